//! The images module manages a product's image candidates: adding, approving,
//! rejecting and removing them, and downloading approved ones to disk.

use anyhow::{Context, Result};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::path::{Path, PathBuf};

use crate::scrape::build_http_client;
use crate::storage::{Product, ProductImage, Storage};

const SLUG_LENGTH: usize = 60;

static NON_SLUG_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("Failed to compile NON_SLUG_RUN regex"));

/// An operator action on a product's image list. Indexes are zero-based
/// positions in the list as shown by `show`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageAction {
    Add { url: String },
    Approve { index: usize },
    Reject { index: usize },
    Remove { index: usize },
}

/// A downloaded image file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadedImage {
    /// File name, also used as the WordPress uploads name
    pub filename: String,
    pub local_path: PathBuf,
    /// Size in bytes
    pub size: usize,
}

/// File extension for an image `Content-Type`, `.jpg` unless recognised.
pub fn extension_for_content_type(content_type: &str) -> &'static str {
    if content_type.contains("png") {
        ".png"
    } else if content_type.contains("webp") {
        ".webp"
    } else if content_type.contains("gif") {
        ".gif"
    } else {
        ".jpg"
    }
}

/// Lower-cased, dash-separated form of a product name, at most 60 characters.
pub fn slugify(text: &str) -> String {
    let lowercase = text.to_lowercase();
    NON_SLUG_RUN
        .replace_all(&lowercase, "-")
        .trim_matches('-')
        .chars()
        .take(SLUG_LENGTH)
        .collect()
}

/// File name for a product image, `<sku>-<slug><ext>`, made unique among
/// `taken` by inserting `-2`, `-3`… before the extension.
pub fn image_filename<S: AsRef<str>>(sku: &str, name: &str, ext: &str, taken: &[S]) -> String {
    let slug = slugify(if name.is_empty() { sku } else { name });
    let stem = format!("{sku}-{slug}");
    let is_taken = |candidate: &str| taken.iter().any(|t| t.as_ref() == candidate);

    let mut filename = format!("{stem}{ext}");
    let mut counter = 2;
    while is_taken(&filename) {
        filename = format!("{stem}-{counter}{ext}");
        counter += 1;
    }
    filename
}

/// Downloads an image into `<images_dir>/<sku>/`.
///
/// # Arguments
///
/// * `client` - HTTP client to download with
/// * `url` - Image URL
/// * `sku` - Product SKU, used for the directory and the file name
/// * `name` - Product name, used for the file name slug
/// * `images_dir` - Root directory of downloaded images
/// * `taken` - File names already used by the product's other images
///
/// # Errors
///
/// Returns an error if the download fails, answers with a non-success status,
/// or the file can't be written
pub async fn download_image<S: AsRef<str>>(
    client: &Client,
    url: &str,
    sku: &str,
    name: &str,
    images_dir: &Path,
    taken: &[S],
) -> Result<DownloadedImage> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download image {url}"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(anyhow::anyhow!("HTTP {status}"));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let filename = image_filename(sku, name, extension_for_content_type(&content_type), taken);

    let bytes = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read image {url}"))?;

    let sku_dir = images_dir.join(sku);
    tokio::fs::create_dir_all(&sku_dir)
        .await
        .with_context(|| format!("Failed to create directory {}", sku_dir.display()))?;

    let local_path = sku_dir.join(&filename);
    tokio::fs::write(&local_path, &bytes)
        .await
        .with_context(|| format!("Failed to write image {}", local_path.display()))?;

    Ok(DownloadedImage {
        filename,
        local_path,
        size: bytes.len(),
    })
}

fn out_of_range(sku: &str, count: usize, index: usize) -> String {
    format!("Image index {index} out of range for {sku} ({count} images)")
}

fn image_mut(product: &mut Product, index: usize) -> Result<&mut ProductImage> {
    let count = product.images.len();
    product
        .images
        .get_mut(index)
        .with_context(|| out_of_range(&product.sku, count, index))
}

/// Applies an image action to a product in memory.
///
/// Approving an image without a local file downloads it first; if that fails
/// the image stays unapproved and the error is returned. Downloaded file names
/// avoid the product's own file names and `workspace_filenames`, since all
/// images share one uploads folder.
///
/// # Errors
///
/// Returns an error if the index is out of range or the download fails
pub async fn apply_image_action(
    client: &Client,
    product: &mut Product,
    action: ImageAction,
    images_dir: &Path,
    workspace_filenames: &[String],
) -> Result<()> {
    match action {
        ImageAction::Add { url } => {
            if !product.add_image(url.trim()) {
                return Err(anyhow::anyhow!("Image already listed: {url}"));
            }
        }
        ImageAction::Approve { index } => {
            if image_mut(product, index)?.filename.is_empty() {
                let url = image_mut(product, index)?.url.clone();
                let taken: Vec<String> = product
                    .images
                    .iter()
                    .map(|image| image.filename.clone())
                    .filter(|filename| !filename.is_empty())
                    .chain(workspace_filenames.iter().cloned())
                    .collect();
                let downloaded = download_image(
                    client,
                    &url,
                    &product.sku,
                    &product.name,
                    images_dir,
                    &taken,
                )
                .await?;
                info!(
                    "Downloaded {} ({} bytes)",
                    downloaded.local_path.display(),
                    downloaded.size
                );
                image_mut(product, index)?.filename = downloaded.filename;
            }
            image_mut(product, index)?.approved = true;
        }
        ImageAction::Reject { index } => {
            image_mut(product, index)?.approved = false;
        }
        ImageAction::Remove { index } => {
            if index >= product.images.len() {
                return Err(anyhow::anyhow!(out_of_range(
                    &product.sku,
                    product.images.len(),
                    index
                )));
            }
            product.images.remove(index);
        }
    }

    product.touch();
    Ok(())
}

/// Applies an image action to a stored product and saves it.
///
/// # Errors
///
/// Returns an error if the product doesn't exist, the action fails or the
/// database update fails
pub async fn manage_image(
    db_path: &str,
    sku: &str,
    action: ImageAction,
    images_dir: &Path,
) -> Result<Product> {
    let storage = Storage::new(db_path)?;
    let client = build_http_client()?;
    let mut product = storage.require_product(sku)?;
    let workspace_filenames: Vec<String> = storage
        .list_products()?
        .into_iter()
        .filter(|other| other.sku != product.sku)
        .flat_map(|other| other.images.into_iter().map(|image| image.filename))
        .filter(|filename| !filename.is_empty())
        .collect();

    apply_image_action(&client, &mut product, action, images_dir, &workspace_filenames).await?;
    storage.upsert_product(&product)?;
    Ok(product)
}
