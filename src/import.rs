//! The import module ingests a CSV of SKUs, names and prices into the workspace.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use std::fs;

use crate::storage::{Product, Storage};

const SKU_COLUMNS: &[&str] = &["sku", "sku number"];
const NAME_COLUMNS: &[&str] = &["name", "product name", "product_name"];
const PRICE_COLUMNS: &[&str] = &["price", "regular price", "regular_price"];

/// Outcome of merging a CSV into the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Usable rows found in the file
    pub parsed: usize,
    /// Rows that became new products
    pub added: usize,
    /// Rows whose SKU was already in the workspace (or earlier in the file)
    pub skipped: usize,
    /// Products in the workspace after the import
    pub total: u64,
}

/// Positions of the header columns matching any alias, in alias order.
fn alias_columns(headers: &StringRecord, aliases: &[&str]) -> Vec<usize> {
    aliases
        .iter()
        .filter_map(|alias| {
            headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(alias))
        })
        .collect()
}

/// First non-empty value among the given columns.
fn first_value(record: &StringRecord, columns: &[usize]) -> String {
    columns
        .iter()
        .filter_map(|&column| record.get(column))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Parses CSV content into freshly imported products.
///
/// Headers are matched case-insensitively against common spellings of the SKU,
/// name and price columns. Rows without a SKU or a name are dropped.
///
/// # Errors
///
/// Returns an error if the CSV is malformed or has no SKU or no name column
pub fn parse_products_csv(content: &str) -> Result<Vec<Product>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers().context("Failed to read CSV header")?.clone();
    let sku_columns = alias_columns(&headers, SKU_COLUMNS);
    let name_columns = alias_columns(&headers, NAME_COLUMNS);
    let price_columns = alias_columns(&headers, PRICE_COLUMNS);

    if sku_columns.is_empty() || name_columns.is_empty() {
        return Err(anyhow::anyhow!(
            "Could not find SKU and Name columns in CSV header: {}",
            headers.iter().collect::<Vec<_>>().join(", ")
        ));
    }

    let mut products = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to parse CSV row {}", index + 2))?;
        let sku = first_value(&record, &sku_columns);
        let name = first_value(&record, &name_columns);
        if sku.is_empty() || name.is_empty() {
            debug!("Skipping CSV row {} without SKU or name", index + 2);
            continue;
        }

        products.push(Product::new(sku, name, first_value(&record, &price_columns)));
    }

    Ok(products)
}

/// Adds products to the workspace without overwriting existing SKUs.
///
/// # Errors
///
/// Returns an error if database operations fail
pub fn merge_products(storage: &Storage, products: &[Product]) -> Result<ImportSummary> {
    let mut added = 0;
    for product in products {
        if storage.insert_new_product(product)? {
            added += 1;
        } else {
            debug!("Skipping duplicate SKU {}", product.sku);
        }
    }

    Ok(ImportSummary {
        parsed: products.len(),
        added,
        skipped: products.len() - added,
        total: storage.count_products(None)?,
    })
}

/// Imports a CSV file of products into the workspace database.
///
/// # Arguments
///
/// * `db_path` - Path to the workspace database
/// * `csv_path` - Path to the CSV file to import
///
/// # Errors
///
/// Returns an error if:
/// * The file can't be read or parsed
/// * Database operations fail
pub fn import_csv(db_path: &str, csv_path: &str) -> Result<ImportSummary> {
    let content = fs::read_to_string(csv_path)
        .with_context(|| format!("Failed to read CSV file: {csv_path}"))?;
    let products = parse_products_csv(&content)?;

    let storage = Storage::new(db_path)?;
    let summary = merge_products(&storage, &products)?;

    info!(
        "Added {} new products ({} duplicates skipped), {} in workspace",
        summary.added, summary.skipped, summary.total
    );
    Ok(summary)
}
