//! The products module covers workspace management: listing, inspecting,
//! editing and removing products.

use anyhow::Result;
use log::{info, warn};
use serde::Serialize;

use crate::categories::is_known_category;
use crate::storage::{Product, Status, Storage};

/// Product counts per status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProductStats {
    pub total: u64,
    pub pending: u64,
    pub searching: u64,
    pub confirmed: u64,
    pub complete: u64,
}

impl std::fmt::Display for ProductStats {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{} products: {} pending, {} searching, {} confirmed, {} complete",
            self.total, self.pending, self.searching, self.confirmed, self.complete
        )
    }
}

/// Counts the workspace products per status.
///
/// # Errors
///
/// Returns an error if the database operation fails
pub fn stats(storage: &Storage) -> Result<ProductStats> {
    Ok(ProductStats {
        total: storage.count_products(None)?,
        pending: storage.count_products(Some(Status::Pending))?,
        searching: storage.count_products(Some(Status::Searching))?,
        confirmed: storage.count_products(Some(Status::Confirmed))?,
        complete: storage.count_products(Some(Status::Complete))?,
    })
}

/// Lists products, optionally filtered by status and by a case-insensitive
/// query matched against name and SKU.
///
/// # Errors
///
/// Returns an error if the database operation fails
pub fn list(storage: &Storage, status: Option<Status>, query: Option<&str>) -> Result<Vec<Product>> {
    let products = match status {
        Some(status) => storage.list_products_by_status(status)?,
        None => storage.list_products()?,
    };

    let query = query
        .map(str::trim)
        .filter(|query| !query.is_empty())
        .map(str::to_lowercase);

    Ok(match query {
        Some(query) => products
            .into_iter()
            .filter(|product| {
                product.name.to_lowercase().contains(&query)
                    || product.sku.to_lowercase().contains(&query)
            })
            .collect(),
        None => products,
    })
}

/// Changes to apply to a product. Unset fields are left alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub status: Option<Status>,
    pub confirmed_url: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub features_html: Option<String>,
    pub notes: Option<String>,
    pub add_categories: Vec<String>,
    pub remove_categories: Vec<String>,
    /// Adopt this many of the best suggested categories
    pub adopt_suggestions: Option<usize>,
}

impl ProductUpdate {
    /// Applies the update to a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the new name would be empty
    pub fn apply(self, product: &mut Product) -> Result<()> {
        if let Some(name) = self.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(anyhow::anyhow!("Product name can't be empty"));
            }
            product.name = name.to_string();
        }
        if let Some(status) = self.status {
            product.status = status;
        }
        if let Some(url) = self.confirmed_url {
            let url = url.trim().to_string();
            if !url.is_empty() {
                product.add_source_link(&url);
            }
            product.confirmed_url = url;
        }
        if let Some(price) = self.price {
            product.price = price.trim().to_string();
        }
        if let Some(short_description) = self.short_description {
            product.short_description = short_description;
        }
        if let Some(long_description) = self.long_description {
            product.long_description = long_description;
        }
        if let Some(features_html) = self.features_html {
            product.features_html = features_html;
        }
        if let Some(notes) = self.notes {
            product.notes = notes;
        }

        if let Some(count) = self.adopt_suggestions {
            let adopted: Vec<String> = product
                .suggested_categories
                .iter()
                .take(count)
                .map(|suggestion| suggestion.path.clone())
                .collect();
            add_categories(product, adopted);
        }
        add_categories(product, self.add_categories);
        product
            .categories
            .retain(|category| !self.remove_categories.contains(category));

        product.touch();
        Ok(())
    }
}

fn add_categories(product: &mut Product, categories: Vec<String>) {
    for category in categories {
        if !is_known_category(&category) {
            warn!("\"{category}\" is not a known category path");
        }
        if !product.categories.contains(&category) {
            product.categories.push(category);
        }
    }
}

/// Applies an update to a stored product and saves it.
///
/// # Errors
///
/// Returns an error if the product doesn't exist, the update is invalid or
/// the database operation fails
pub fn edit(storage: &Storage, sku: &str, update: ProductUpdate) -> Result<Product> {
    let mut product = storage.require_product(sku)?;
    update.apply(&mut product)?;
    storage.upsert_product(&product)?;
    info!("Updated {sku} ({})", product.status);
    Ok(product)
}

/// Removes a product from the workspace.
///
/// # Errors
///
/// Returns an error if the product doesn't exist or the database operation fails
pub fn delete(storage: &Storage, sku: &str) -> Result<()> {
    if !storage.delete_product(sku)? {
        return Err(anyhow::anyhow!("Product not found: {sku}"));
    }
    info!("Deleted {sku}");
    Ok(())
}

/// Removes every product from the workspace.
///
/// # Errors
///
/// Returns an error if the database operation fails
pub fn reset(storage: &Storage) -> Result<usize> {
    let removed = storage.clear_products()?;
    info!("All products cleared ({removed} removed)");
    Ok(removed)
}
