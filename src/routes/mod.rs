pub mod default_route;
pub mod listings_route;
