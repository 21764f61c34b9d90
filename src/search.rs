//! The search module finds a candidate source page for a product: Google Custom
//! Search when credentials are configured, DuckDuckGo Lite otherwise.

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use once_cell::sync::Lazy;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER};
use scraper::{Html, Selector};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::constants::{
    ACCEPT_HTML, ACCEPT_LANGUAGE_EN_GB, GOOGLE_API_KEY_ENV_NAME, GOOGLE_CSE_ID_ENV_NAME,
    URL_EXCLUSIONS,
};
use crate::parse::compile;
use crate::scrape::build_http_client;
use crate::storage::{Status, Storage};
use crate::{BatchSummary, ProductTarget};

const GOOGLE_CSE_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
const GOOGLE_MANUAL_SEARCH: &str = "https://www.google.co.uk/search";
const DUCKDUCKGO_LITE: &str = "https://lite.duckduckgo.com/lite/";
const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

/// DuckDuckGo Lite changes its markup now and then, so several shapes are tried.
static DUCKDUCKGO_LINKS: Lazy<Vec<Selector>> = Lazy::new(|| {
    compile(&[
        "a.result-link",
        "a.result__a",
        ".result-link a",
        "td a[href^=\"http\"]",
    ])
});

/// Google Custom Search credentials.
#[derive(Clone, Debug)]
pub struct GoogleCredentials {
    pub api_key: String,
    pub cse_id: String,
}

impl GoogleCredentials {
    /// Reads the credentials from the environment; both variables must be set.
    pub fn from_env() -> Option<Self> {
        match (
            std::env::var(GOOGLE_API_KEY_ENV_NAME),
            std::env::var(GOOGLE_CSE_ID_ENV_NAME),
        ) {
            (Ok(api_key), Ok(cse_id)) if !api_key.is_empty() && !cse_id.is_empty() => {
                Some(Self { api_key, cse_id })
            }
            _ => {
                debug!("Google Custom Search is not configured");
                None
            }
        }
    }
}

/// Search engines to query and the retry policy of the DuckDuckGo fallback.
#[derive(Clone, Debug)]
pub struct SearchOptions {
    /// Google Custom Search is skipped without credentials
    pub google: Option<GoogleCredentials>,
    pub google_endpoint: String,
    pub duckduckgo_endpoint: String,
    pub max_attempts: u32,
    /// Wait after the first failed attempt; doubles after each further one
    pub base_delay: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            google: None,
            google_endpoint: GOOGLE_CSE_ENDPOINT.to_string(),
            duckduckgo_endpoint: DUCKDUCKGO_LITE.to_string(),
            max_attempts: 3,
            base_delay: Duration::from_secs(5),
        }
    }
}

impl SearchOptions {
    /// Default engines, with Google credentials read from the environment.
    pub fn from_env() -> Self {
        Self {
            google: GoogleCredentials::from_env(),
            ..Self::default()
        }
    }
}

/// Wait before the attempt following `attempt` (1-based): 5s, 10s, 20s… for a 5s base.
pub fn backoff_delay(base_delay: Duration, attempt: u32) -> Duration {
    base_delay.saturating_mul(2_u32.saturating_pow(attempt.saturating_sub(1)))
}

/// Whether a URL points to a search engine, marketplace or social site.
pub fn is_excluded_url(href: &str) -> bool {
    URL_EXCLUSIONS.iter().any(|domain| href.contains(domain))
}

/// URL of a manual Google search for the operator to open in a browser.
///
/// # Errors
///
/// Returns an error if the URL can't be built
pub fn google_search_url(query: &str) -> Result<Url> {
    Url::parse_with_params(GOOGLE_MANUAL_SEARCH, &[("q", query)])
        .context("Failed to build search URL")
}

/// Response of the Google Custom Search JSON API, reduced to what's used.
#[derive(Debug, Default, Deserialize)]
pub struct GoogleSearchResponse {
    #[serde(default)]
    pub items: Vec<GoogleSearchItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GoogleSearchItem {
    #[serde(default)]
    pub link: Option<String>,
}

/// First result link that isn't excluded.
pub fn pick_google_result(response: &GoogleSearchResponse) -> Option<String> {
    response
        .items
        .iter()
        .filter_map(|item| item.link.as_deref())
        .find(|link| !is_excluded_url(link))
        .map(str::to_string)
}

/// First absolute result link of a DuckDuckGo Lite page that isn't excluded.
pub fn pick_duckduckgo_result(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    DUCKDUCKGO_LINKS.iter().find_map(|selector| {
        document
            .select(selector)
            .filter_map(|link| link.value().attr("href"))
            .find(|href| href.starts_with("http") && !is_excluded_url(href))
            .map(str::to_string)
    })
}

async fn google_custom_search(
    client: &Client,
    endpoint: &str,
    query: &str,
    credentials: &GoogleCredentials,
) -> Result<Option<String>> {
    let response = client
        .get(endpoint)
        .query(&[
            ("key", credentials.api_key.as_str()),
            ("cx", credentials.cse_id.as_str()),
            ("q", query),
            ("num", "5"),
        ])
        .header(ACCEPT, "application/json")
        .timeout(SEARCH_TIMEOUT)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(anyhow::anyhow!(
            "Google API HTTP {}: {}",
            status.as_u16(),
            body.chars().take(200).collect::<String>()
        ));
    }

    let results: GoogleSearchResponse = response.json().await?;
    Ok(pick_google_result(&results))
}

async fn duckduckgo_search(client: &Client, endpoint: &str, query: &str) -> Result<Option<String>> {
    let response = client
        .post(endpoint)
        .header(ACCEPT, ACCEPT_HTML)
        .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_EN_GB)
        .header(ORIGIN, "https://lite.duckduckgo.com")
        .header(REFERER, "https://lite.duckduckgo.com/")
        .form(&[("q", query)])
        .timeout(SEARCH_TIMEOUT)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(anyhow::anyhow!("DDG HTTP {}", status.as_u16()));
    }

    let html = response.text().await?;
    Ok(pick_duckduckgo_result(&html))
}

/// Searches the web for the product page matching a query.
///
/// Google Custom Search is tried first when credentials are configured; any failure
/// there falls through to DuckDuckGo, which is retried with exponential backoff.
///
/// # Errors
///
/// Returns an error if no acceptable URL was found by any method
pub async fn auto_find_product_url(
    client: &Client,
    query: &str,
    options: &SearchOptions,
) -> Result<String> {
    if let Some(credentials) = &options.google {
        info!("Trying Google Custom Search for \"{query}\"");
        match google_custom_search(client, &options.google_endpoint, query, credentials).await {
            Ok(Some(url)) => {
                info!("Google found {url}");
                return Ok(url);
            }
            Ok(None) => info!("Google found nothing usable, falling back to DuckDuckGo"),
            Err(e) => warn!("Google Custom Search failed: {e}. Falling back to DuckDuckGo"),
        }
    }

    info!("Trying DuckDuckGo for \"{query}\"");
    for attempt in 1..=options.max_attempts {
        match duckduckgo_search(client, &options.duckduckgo_endpoint, query).await {
            Ok(Some(url)) => {
                info!("DuckDuckGo found (attempt {attempt}) {url}");
                return Ok(url);
            }
            Ok(None) => debug!("DuckDuckGo attempt {attempt} found nothing usable"),
            Err(e) => warn!(
                "DuckDuckGo attempt {attempt}/{} failed: {e}",
                options.max_attempts
            ),
        }

        if attempt < options.max_attempts {
            let delay = backoff_delay(options.base_delay, attempt);
            info!("Waiting {}s before retry...", delay.as_secs());
            tokio::time::sleep(delay).await;
        }
    }

    Err(anyhow::anyhow!(
        "No valid e-commerce URL found after trying all search methods"
    ))
}

/// Searches a source page for every targeted product and records it as the
/// candidate to scrape.
///
/// Found URLs become the product's confirmed URL and a source link, and the
/// product moves to `searching` until it's scraped.
///
/// # Errors
///
/// Returns an error if database operations fail, or if searching a single-SKU target fails
pub async fn find_urls(
    db_path: &str,
    target: ProductTarget,
    options: SearchOptions,
) -> Result<BatchSummary> {
    let storage = Storage::new(db_path)?;
    let client = build_http_client()?;
    let mut summary = BatchSummary::default();

    info!("Searching source pages for {target}...");
    for mut product in storage.resolve_target(&target)? {
        match auto_find_product_url(&client, &product.name, &options).await {
            Ok(url) => {
                product.confirmed_url = url.clone();
                product.add_source_link(&url);
                product.status = Status::Searching;
                product.touch();
                storage.upsert_product(&product)?;
                summary.succeeded += 1;
            }
            Err(e) if target.is_single() => return Err(e),
            Err(e) => {
                error!("No source page for {} ({}): {e}", product.sku, product.name);
                summary.failed += 1;
            }
        }
    }

    info!("Search finished: {summary}");
    Ok(summary)
}
