/// Derives the URLs for result pages 2..=total_pages. Page 1 is always
/// fetched by the orchestrator directly and never appears in the plan.
pub fn plan(total_pages: Option<u32>, base_url: &str) -> Vec<String> {
    let Some(total_pages) = total_pages else {
        return Vec::new();
    };

    (2..=total_pages)
        .map(|page| format!("{}{}_p/", base_url, page))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.zillow.com/98101/";

    #[test]
    fn absent_total_pages_means_no_extra_pages() {
        assert!(plan(None, BASE).is_empty());
    }

    #[test]
    fn single_page_means_no_extra_pages() {
        assert!(plan(Some(1), BASE).is_empty());
        assert!(plan(Some(0), BASE).is_empty());
    }

    #[test]
    fn plans_pages_two_through_n_in_ascending_order() {
        let urls = plan(Some(4), BASE);

        assert_eq!(
            urls,
            vec![
                "https://www.zillow.com/98101/2_p/",
                "https://www.zillow.com/98101/3_p/",
                "https://www.zillow.com/98101/4_p/",
            ]
        );
    }

    #[test]
    fn plan_length_is_always_total_pages_minus_one() {
        for n in 2..20 {
            assert_eq!(plan(Some(n), BASE).len(), (n - 1) as usize);
        }
    }
}
