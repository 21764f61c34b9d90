//! The export module writes finished products out as a WooCommerce import CSV
//! and packs their approved images into a ZIP for the WordPress uploads folder.

use anyhow::{Context, Result};
use log::{info, warn};
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::storage::{Product, Status, Storage};

/// Header of the WooCommerce product import CSV.
pub const WOO_COLUMNS: [&str; 43] = [
    "ID",
    "Type",
    "SKU",
    "Name",
    "Published",
    "Is featured?",
    "Visibility in catalog",
    "Short description",
    "Description",
    "Date sale price starts",
    "Date sale price ends",
    "Tax status",
    "Tax class",
    "In stock?",
    "Stock",
    "Low stock amount",
    "Backorders allowed?",
    "Sold individually?",
    "Weight (kg)",
    "Length (cm)",
    "Width (cm)",
    "Height (cm)",
    "Allow customer reviews?",
    "Purchase note",
    "Sale price",
    "Regular price",
    "Categories",
    "Tags",
    "Shipping class",
    "Images",
    "Download limit",
    "Download expiry days",
    "Parent",
    "Grouped products",
    "Upsells",
    "Cross-sells",
    "External URL",
    "Button text",
    "Position",
    "Attribute 1 name",
    "Attribute 1 value(s)",
    "Attribute 1 visible",
    "Attribute 1 global",
];

/// Public URLs of the product's exportable images once uploaded to `domain`.
pub fn image_urls(product: &Product, domain: &str) -> Vec<String> {
    product
        .images
        .iter()
        .filter(|image| image.is_exportable())
        .map(|image| format!("https://{domain}/wp-content/uploads/{}", image.filename))
        .collect()
}

fn categories_cell(categories: &[String]) -> String {
    categories
        .iter()
        .map(|category| category.replace(',', "\\,"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn description_cell(product: &Product) -> String {
    match (
        product.long_description.trim().is_empty(),
        product.features_html.trim().is_empty(),
    ) {
        (_, true) => product.long_description.clone(),
        (true, false) => product.features_html.clone(),
        (false, false) => format!("{}\n\n{}", product.long_description, product.features_html),
    }
}

/// One WooCommerce CSV row for a product, in `WOO_COLUMNS` order.
pub fn woo_row(product: &Product, domain: &str) -> Vec<String> {
    let row: [String; 43] = [
        String::new(),
        "simple".to_string(),
        product.sku.clone(),
        product.name.clone(),
        "1".to_string(),
        "0".to_string(),
        "visible".to_string(),
        product.short_description.clone(),
        description_cell(product),
        String::new(),
        String::new(),
        "taxable".to_string(),
        String::new(),
        "1".to_string(),
        String::new(),
        String::new(),
        "0".to_string(),
        "0".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        "1".to_string(),
        String::new(),
        String::new(),
        product.price.clone(),
        categories_cell(&product.categories),
        String::new(),
        String::new(),
        image_urls(product, domain).join(", "),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        "0".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
    ];
    row.to_vec()
}

/// Writes the WooCommerce CSV for the given products.
///
/// # Errors
///
/// Returns an error if the CSV can't be written
pub fn write_woo_csv<W: Write>(writer: W, products: &[Product], domain: &str) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(WOO_COLUMNS)?;
    for product in products {
        csv_writer.write_record(woo_row(product, domain))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Exports products as a WooCommerce import CSV.
///
/// # Arguments
///
/// * `db_path` - Path to the workspace database
/// * `output_path` - Path of the CSV file to write
/// * `domain` - Store domain the images will be uploaded to
/// * `include_all` - Export every product instead of only `complete` ones
///
/// # Returns
///
/// Returns the number of exported products
///
/// # Errors
///
/// Returns an error if:
/// * Database operations fail
/// * File operations fail
pub fn export_csv(
    db_path: &str,
    output_path: &str,
    domain: &str,
    include_all: bool,
) -> Result<usize> {
    let storage = Storage::new(db_path)?;
    let products = if include_all {
        storage.list_products()?
    } else {
        storage.list_products_by_status(Status::Complete)?
    };

    info!("Exporting {} products to {output_path}...", products.len());
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create CSV file: {output_path}"))?;
    write_woo_csv(file, &products, domain)?;

    info!("Exported {} products to {output_path}", products.len());
    Ok(products.len())
}

/// Packs every approved, downloaded image into a flat ZIP archive.
///
/// # Arguments
///
/// * `db_path` - Path to the workspace database
/// * `output_path` - Path of the ZIP file to write
/// * `images_dir` - Root directory of downloaded images
///
/// # Returns
///
/// Returns the number of archived images
///
/// # Errors
///
/// Returns an error if:
/// * No product has an approved image
/// * Database operations fail
/// * File operations fail
pub fn export_images(db_path: &str, output_path: &str, images_dir: &Path) -> Result<usize> {
    let storage = Storage::new(db_path)?;
    let approved: Vec<(String, String)> = storage
        .list_products()?
        .into_iter()
        .flat_map(|product| {
            let sku = product.sku;
            product
                .images
                .into_iter()
                .filter(|image| image.is_exportable())
                .map(move |image| (sku.clone(), image.filename))
        })
        .collect();

    if approved.is_empty() {
        return Err(anyhow::anyhow!("No approved images to export"));
    }

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create ZIP file: {output_path}"))?;
    let mut archive = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut archived_names = HashSet::new();
    for (sku, filename) in &approved {
        if archived_names.contains(filename) {
            warn!("Skipping {filename} of {sku}: another product's image has the same name");
            continue;
        }

        let local_path = images_dir.join(sku).join(filename);
        let bytes = match std::fs::read(&local_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Skipping missing image {}: {e}", local_path.display());
                continue;
            }
        };

        archive
            .start_file(filename.as_str(), options)
            .with_context(|| format!("Failed to add {filename} to archive"))?;
        archive.write_all(&bytes)?;
        archived_names.insert(filename.clone());
    }
    archive.finish().context("Failed to finish ZIP archive")?;

    info!("Archived {} images to {output_path}", archived_names.len());
    Ok(archived_names.len())
}
