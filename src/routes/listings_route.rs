use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::ListingRecord;
use crate::services::{ScrapeError, ScrapeOrchestrator};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetListingsBody {
    zip_code: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingsResponse {
    success: bool,
    zip_code: String,
    total_listings: usize,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    listings: Option<Vec<ListingRecord>>,
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

impl ErrorResponse {
    fn new(error: &str) -> Self {
        Self {
            success: false,
            error: error.to_string(),
        }
    }
}

#[post("/get_listings")]
async fn get_listings(
    orchestrator: web::Data<ScrapeOrchestrator>,
    body: web::Json<GetListingsBody>,
) -> HttpResponse {
    let Some(zip_code) = body.zip_code.as_deref().filter(|z| !z.trim().is_empty()) else {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Zip code not provided"));
    };

    match orchestrator.scrape_zip_code(zip_code).await {
        Ok(result) => {
            let total_listings = result.listings.len();
            let listings = orchestrator
                .mode()
                .returns_listings()
                .then_some(result.listings);

            HttpResponse::Ok().json(ListingsResponse {
                success: true,
                zip_code: result.zip_code.clone(),
                total_listings,
                message: format!(
                    "Listings successfully fetched for {}",
                    result.zip_code
                ),
                listings,
            })
        }
        Err(ScrapeError::NotFound) => {
            HttpResponse::NotFound().json(ErrorResponse::new("Cannot find listings"))
        }
        Err(ScrapeError::UpstreamBlocked) => HttpResponse::InternalServerError()
            .json(ErrorResponse::new("Request blocked by upstream site")),
        Err(ScrapeError::UpstreamUnavailable) => {
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to fetch data"))
        }
        Err(ScrapeError::Internal(e)) => {
            log::error!("Scrape session failed unexpectedly: {:?}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Internal server error"))
        }
    }
}
