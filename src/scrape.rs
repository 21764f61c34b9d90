//! The scrape module fetches each product's confirmed source page, extracts its
//! content and fills in whatever the product is still missing.

use anyhow::{Context, Result};
use log::{error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use std::time::Duration;

use crate::categories::suggest_categories;
use crate::constants::{ACCEPT_HTML, ACCEPT_LANGUAGE_EN_GB, BROWSER_USER_AGENT};
use crate::parse::{ScrapedProduct, extract_product_page};
use crate::storage::{Product, Status, Storage};
use crate::{BatchSummary, ProductTarget, TextBy};

const PAGE_TIMEOUT: Duration = Duration::from_secs(15);

static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("Failed to compile SENTENCE_END regex"));

/// Builds the HTTP client shared by page fetches, searches and image downloads.
///
/// # Errors
///
/// Returns an error if the TLS backend can't be initialised
pub fn build_http_client() -> Result<Client> {
    Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// Fetches the HTML of a product page.
///
/// # Errors
///
/// Returns an error if the request fails or the server answers with a non-success status
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .header(ACCEPT, ACCEPT_HTML)
        .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_EN_GB)
        .timeout(PAGE_TIMEOUT)
        .send()
        .await
        .with_context(|| format!("Failed to fetch {url}"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(anyhow::anyhow!("HTTP {status}"));
    }

    response
        .text()
        .await
        .with_context(|| format!("Failed to read body of {url}"))
}

/// Escapes text for embedding in HTML element content.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders features as the `<ul>` list stored in `features_html`.
pub fn features_to_html<S: AsRef<str>>(features: &[S]) -> String {
    let items: Vec<String> = features
        .iter()
        .map(|feature| format!("  <li>{}</li>", escape_html(feature.as_ref())))
        .collect();
    format!("<ul>\n{}\n</ul>", items.join("\n"))
}

/// Builds a short description from the first two meaningful sentences of a description.
pub fn summary_from_description(description: &str) -> Option<String> {
    let sentences: Vec<&str> = SENTENCE_END
        .split(description)
        .map(str::trim)
        .filter(|sentence| sentence.chars().count() > 10)
        .take(2)
        .collect();

    (!sentences.is_empty()).then(|| format!("{}.", sentences.join(". ")))
}

/// Applies freshly scraped content to a product.
///
/// The page becomes the confirmed source and the product moves to `confirmed`.
/// Text fields are only filled while empty;
/// new images are queued unapproved and category suggestions are refreshed.
pub fn apply_scraped(product: &mut Product, url: &str, scraped: ScrapedProduct) {
    product.confirmed_url = url.to_string();
    product.status = Status::Confirmed;

    if product.short_description.is_empty() {
        if !scraped.short_description.is_empty() {
            product.short_description = scraped.short_description.clone();
        } else if !scraped.meta_description.is_empty() {
            product.short_description = scraped.meta_description.clone();
        } else if let Some(summary) = summary_from_description(&scraped.description) {
            product.short_description = summary;
        }
    }

    if product.long_description.is_empty() && !scraped.description.is_empty() {
        product.long_description = scraped.description.clone();
    }

    if product.features_html.is_empty() && !scraped.features.is_empty() {
        product.features_html = features_to_html(&scraped.features);
    }

    for image in &scraped.images {
        product.add_image(image);
    }

    product.add_source_link(url);
    product.suggested_categories = suggest_categories(&product.name, &scraped.description);
    product.scraped_data = Some(scraped);
    product.touch();
}

/// Scrapes a single product from the given URL and stores the result.
///
/// # Errors
///
/// Returns an error if the page can't be fetched or the product can't be stored
pub async fn scrape_product(
    storage: &Storage,
    client: &Client,
    product: &mut Product,
    url: &str,
    text_by: TextBy,
) -> Result<()> {
    let html = fetch_page(client, url).await?;
    let scraped = extract_product_page(&html, url, text_by);
    info!(
        "Scraped {url}: \"{}\", {} features, {} images",
        scraped.title,
        scraped.features.len(),
        scraped.images.len()
    );

    apply_scraped(product, url, scraped);
    storage.upsert_product(product)
}

/// Scrapes the confirmed source page of every targeted product.
///
/// # Arguments
///
/// * `db_path` - Path to the workspace database
/// * `target` - Products to scrape
/// * `url_override` - Page to scrape instead of the confirmed URL (single SKU targets only)
/// * `text_by` - Fallback text extraction method for pages without a product area
///
/// # Errors
///
/// Returns an error if:
/// * Database operations fail
/// * A URL override is given for more than one product
/// * Scraping a single-SKU target fails
pub async fn scrape_products(
    db_path: &str,
    target: ProductTarget,
    url_override: Option<String>,
    text_by: TextBy,
) -> Result<BatchSummary> {
    if url_override.is_some() && !target.is_single() {
        return Err(anyhow::anyhow!("--url can only be used with a single SKU target"));
    }

    let storage = Storage::new(db_path)?;
    let client = build_http_client()?;
    let mut summary = BatchSummary::default();

    info!("Scraping {target}...");
    for mut product in storage.resolve_target(&target)? {
        let url = url_override
            .clone()
            .unwrap_or_else(|| product.confirmed_url.clone());
        if url.is_empty() {
            warn!("Skipping {}: no confirmed URL", product.sku);
            summary.skipped += 1;
            continue;
        }

        match scrape_product(&storage, &client, &mut product, &url, text_by).await {
            Ok(()) => summary.succeeded += 1,
            Err(e) if target.is_single() => return Err(e.context(format!("Failed to scrape {url}"))),
            Err(e) => {
                error!("Failed to scrape {url} for {}: {e:#}", product.sku);
                summary.failed += 1;
            }
        }
    }

    info!("Scrape finished: {summary}");
    Ok(summary)
}
