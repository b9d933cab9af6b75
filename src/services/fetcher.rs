use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::StatusCode;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36";

pub enum FetchOutcome {
    Success { body: String },
    Blocked,
    Failed,
}

/// Fetches single pages from the upstream site with a fixed desktop-browser
/// header bundle. The site rejects unrecognized clients, so the headers are
/// part of the contract, not decoration.
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .default_headers(browser_headers())
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build http client");

        Self { client }
    }

    /// One GET, no retries. 403 means the anti-bot layer turned us away;
    /// any other status is treated as a page worth parsing.
    pub async fn fetch(&self, url: &str, referer: &str) -> FetchOutcome {
        let request = self.client.get(url).header(header::REFERER, referer);

        match request.send().await {
            Ok(res) if res.status() == StatusCode::FORBIDDEN => {
                log::error!("Request blocked (403 Forbidden) on {}", url);
                FetchOutcome::Blocked
            }
            Ok(res) => {
                log::info!("Fetched {} with status {}", url, res.status());
                match res.text().await {
                    Ok(body) => FetchOutcome::Success { body },
                    Err(e) => {
                        log::error!("Failed to read response body from {}: {:?}", url, e);
                        FetchOutcome::Failed
                    }
                }
            }
            Err(e) => {
                log::error!("No response from {}, error: {:?}", url, e);
                FetchOutcome::Failed
            }
        }
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert("priority", HeaderValue::from_static("u=0, i"));
    headers.insert(
        "sec-ch-ua",
        HeaderValue::from_static(
            r#""Not A(Brand";v="8", "Chromium";v="132", "Google Chrome";v="132""#,
        ),
    );
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static(r#""Windows""#));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers
}
