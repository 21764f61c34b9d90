//! The storage module keeps the product workspace in a local SQLite database.

use anyhow::{Context, Result};
use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::sync::{Mutex, MutexGuard};

use crate::ProductTarget;
use crate::categories::CategorySuggestion;
use crate::parse::ScrapedProduct;

const PRODUCT_COLUMNS: &str = "sku, name, price, status, confirmed_url, short_description, \
    long_description, features_html, categories, suggested_categories, images, source_links, \
    scraped_data, notes, added_at, updated_at";

/// Storage provides database operations for the product workspace.
pub struct Storage {
    /// The underlying SQLite connection, guarded so the storage can be shared by reference
    conn: Mutex<Connection>,
}

impl Storage {
    /// Opens (or creates) the workspace database at the specified path.
    ///
    /// `":memory:"` opens a throwaway in-memory workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema cannot be created
    pub fn new(database_path: &str) -> Result<Self> {
        let conn = Connection::open(database_path)
            .with_context(|| format!("Failed to open workspace database {database_path}"))?;

        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS products (
                sku TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                price TEXT NOT NULL,
                status TEXT NOT NULL,
                confirmed_url TEXT NOT NULL,
                short_description TEXT NOT NULL,
                long_description TEXT NOT NULL,
                features_html TEXT NOT NULL,
                categories TEXT NOT NULL,
                suggested_categories TEXT NOT NULL,
                images TEXT NOT NULL,
                source_links TEXT NOT NULL,
                scraped_data TEXT NULL,
                notes TEXT NOT NULL,
                added_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            params![],
        )?;

        Ok(())
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("Storage mutex poisoned"))
    }

    /// Inserts a product unless one with the same SKU already exists.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was added, `false` if the SKU was already taken
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub fn insert_new_product(&self, product: &Product) -> Result<bool> {
        let row = ProductRow::try_from(product)?;
        let conn = self.connection()?;
        let changed = conn.execute(
            &format!(
                "INSERT OR IGNORE INTO products ({PRODUCT_COLUMNS}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)"
            ),
            &row.as_params(),
        )?;

        Ok(changed == 1)
    }

    /// Adds or updates a product.
    ///
    /// An existing row keeps its place in the workspace order.
    ///
    /// # Errors
    ///
    /// Returns an error if the product cannot be serialized or the database operation fails
    pub fn upsert_product(&self, product: &Product) -> Result<()> {
        let row = ProductRow::try_from(product)?;
        let conn = self.connection()?;
        conn.execute(
            &format!(
                "INSERT INTO products ({PRODUCT_COLUMNS}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16) \
                 ON CONFLICT(sku) DO UPDATE SET \
                    name = excluded.name, \
                    price = excluded.price, \
                    status = excluded.status, \
                    confirmed_url = excluded.confirmed_url, \
                    short_description = excluded.short_description, \
                    long_description = excluded.long_description, \
                    features_html = excluded.features_html, \
                    categories = excluded.categories, \
                    suggested_categories = excluded.suggested_categories, \
                    images = excluded.images, \
                    source_links = excluded.source_links, \
                    scraped_data = excluded.scraped_data, \
                    notes = excluded.notes, \
                    updated_at = excluded.updated_at"
            ),
            &row.as_params(),
        )?;

        Ok(())
    }

    /// Gets a product by SKU.
    ///
    /// # Returns
    ///
    /// Returns the product if found, None if not found
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or the stored row is malformed
    pub fn get_product(&self, sku: &str) -> Result<Option<Product>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE sku = ?1"
        ))?;
        let product_row: Option<ProductRow> = stmt
            .query_row([sku], ProductRow::from_row)
            .optional()
            .map_err(|e| anyhow::anyhow!("Unable to fetch product row: {e}"))?;

        product_row.map(Product::try_from).transpose()
    }

    /// Lists all products in import order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or a stored row is malformed
    pub fn list_products(&self) -> Result<Vec<Product>> {
        self.query_products(
            &format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY rowid ASC"),
            params![],
        )
    }

    /// Lists the products in the given status, in import order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or a stored row is malformed
    pub fn list_products_by_status(&self, status: Status) -> Result<Vec<Product>> {
        self.query_products(
            &format!(
                "SELECT {PRODUCT_COLUMNS} FROM products WHERE status = ?1 ORDER BY rowid ASC"
            ),
            params![status.as_str()],
        )
    }

    fn query_products(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<Product>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(sql)?;
        let rows: Vec<ProductRow> = stmt
            .query_map(params, ProductRow::from_row)?
            .collect::<Result<_, rusqlite::Error>>()?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Resolves a batch target into the products it covers.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or a SKU target doesn't exist
    pub fn resolve_target(&self, target: &ProductTarget) -> Result<Vec<Product>> {
        match target {
            ProductTarget::All => self.list_products(),
            ProductTarget::Status(status) => self.list_products_by_status(*status),
            ProductTarget::Sku { sku } => Ok(vec![self.require_product(sku)?]),
        }
    }

    /// Gets a product by SKU, failing if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is missing or the database operation fails
    pub fn require_product(&self, sku: &str) -> Result<Product> {
        self.get_product(sku)?
            .ok_or_else(|| anyhow::anyhow!("Product not found: {sku}"))
    }

    /// Removes a product.
    ///
    /// # Returns
    ///
    /// Returns `true` if a product was removed
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub fn delete_product(&self, sku: &str) -> Result<bool> {
        let conn = self.connection()?;
        let deleted = conn.execute("DELETE FROM products WHERE sku = ?1", params![sku])?;
        Ok(deleted > 0)
    }

    /// Removes every product from the workspace, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub fn clear_products(&self) -> Result<usize> {
        let conn = self.connection()?;
        Ok(conn.execute("DELETE FROM products", params![])?)
    }

    /// Counts products, optionally only those in one status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub fn count_products(&self, status: Option<Status>) -> Result<u64> {
        let conn = self.connection()?;
        let count: i64 = match status {
            Some(status) => conn.query_row(
                "SELECT COUNT(*) FROM products WHERE status = ?1",
                params![status.as_str()],
                |row| row.get(0),
            )?,
            None => conn.query_row("SELECT COUNT(*) FROM products", params![], |row| {
                row.get(0)
            })?,
        };

        u64::try_from(count).context("Negative product count")
    }
}

/// Where a product is in the enrichment workflow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Imported, no source page yet.
    #[default]
    Pending,
    /// A candidate source page was found and awaits scraping.
    Searching,
    /// Content was scraped from the confirmed source page.
    Confirmed,
    /// Reviewed and ready for export.
    Complete,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::Searching,
        Status::Confirmed,
        Status::Complete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Searching => "searching",
            Status::Confirmed => "confirmed",
            Status::Complete => "complete",
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input_lowercase = input.to_lowercase();
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == input_lowercase)
            .ok_or_else(|| format!("Invalid product status: {input}"))
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// An image candidate for a product.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub approved: bool,
    /// Local file name once downloaded, empty before that
    #[serde(default)]
    pub filename: String,
}

impl ProductImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            approved: false,
            filename: String::new(),
        }
    }

    /// Whether the image ends up in exports.
    pub fn is_exportable(&self) -> bool {
        self.approved && !self.filename.is_empty()
    }
}

/// Represents a product row as stored in the database
#[derive(Debug)]
pub struct ProductRow {
    pub sku: String,
    pub name: String,
    pub price: String,
    pub status: String,
    pub confirmed_url: String,
    pub short_description: String,
    pub long_description: String,
    pub features_html: String,
    pub categories: String,
    pub suggested_categories: String,
    pub images: String,
    pub source_links: String,
    pub scraped_data: Option<String>,
    pub notes: String,
    pub added_at: i64,
    pub updated_at: i64,
}

impl ProductRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            sku: row.get(0)?,
            name: row.get(1)?,
            price: row.get(2)?,
            status: row.get(3)?,
            confirmed_url: row.get(4)?,
            short_description: row.get(5)?,
            long_description: row.get(6)?,
            features_html: row.get(7)?,
            categories: row.get(8)?,
            suggested_categories: row.get(9)?,
            images: row.get(10)?,
            source_links: row.get(11)?,
            scraped_data: row.get(12)?,
            notes: row.get(13)?,
            added_at: row.get(14)?,
            updated_at: row.get(15)?,
        })
    }

    fn as_params(&self) -> [&dyn rusqlite::ToSql; 16] {
        [
            &self.sku,
            &self.name,
            &self.price,
            &self.status,
            &self.confirmed_url,
            &self.short_description,
            &self.long_description,
            &self.features_html,
            &self.categories,
            &self.suggested_categories,
            &self.images,
            &self.source_links,
            &self.scraped_data,
            &self.notes,
            &self.added_at,
            &self.updated_at,
        ]
    }
}

/// Represents domain Product
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub name: String,
    pub price: String,
    pub status: Status,
    /// Canonical source page, empty until one is found or entered
    pub confirmed_url: String,
    pub short_description: String,
    pub long_description: String,
    /// Key features rendered as a `<ul>` list
    pub features_html: String,
    /// Selected category paths, e.g. `Garden Machinery > Hedge Trimmers`
    pub categories: Vec<String>,
    pub suggested_categories: Vec<CategorySuggestion>,
    pub images: Vec<ProductImage>,
    pub source_links: Vec<String>,
    pub scraped_data: Option<ScrapedProduct>,
    pub notes: String,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a freshly imported product with no enrichment yet.
    pub fn new(sku: impl Into<String>, name: impl Into<String>, price: impl Into<String>) -> Self {
        let now = Utc::now().trunc_subsecs(0);
        Self {
            sku: sku.into(),
            name: name.into(),
            price: price.into(),
            status: Status::Pending,
            confirmed_url: String::new(),
            short_description: String::new(),
            long_description: String::new(),
            features_html: String::new(),
            categories: Vec::new(),
            suggested_categories: Vec::new(),
            images: Vec::new(),
            source_links: Vec::new(),
            scraped_data: None,
            notes: String::new(),
            added_at: now,
            updated_at: now,
        }
    }

    /// Marks the product as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().trunc_subsecs(0);
    }

    /// Appends a source link unless it's already recorded.
    pub fn add_source_link(&mut self, url: &str) {
        if !self.source_links.iter().any(|link| link == url) {
            self.source_links.push(url.to_string());
        }
    }

    /// Appends an unapproved image unless its URL is already recorded.
    ///
    /// Returns `true` if the image was added.
    pub fn add_image(&mut self, url: &str) -> bool {
        if self.images.iter().any(|image| image.url == url) {
            return false;
        }
        self.images.push(ProductImage::new(url));
        true
    }
}

impl TryFrom<&Product> for ProductRow {
    type Error = anyhow::Error;

    fn try_from(product: &Product) -> Result<Self> {
        Ok(ProductRow {
            sku: product.sku.clone(),
            name: product.name.clone(),
            price: product.price.clone(),
            status: product.status.as_str().to_string(),
            confirmed_url: product.confirmed_url.clone(),
            short_description: product.short_description.clone(),
            long_description: product.long_description.clone(),
            features_html: product.features_html.clone(),
            categories: serde_json::to_string(&product.categories)?,
            suggested_categories: serde_json::to_string(&product.suggested_categories)?,
            images: serde_json::to_string(&product.images)?,
            source_links: serde_json::to_string(&product.source_links)?,
            scraped_data: product
                .scraped_data
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
            notes: product.notes.clone(),
            added_at: product.added_at.timestamp(),
            updated_at: product.updated_at.timestamp(),
        })
    }
}

impl TryFrom<ProductRow> for Product {
    type Error = anyhow::Error;

    fn try_from(product_row: ProductRow) -> Result<Self> {
        let sku = product_row.sku;
        Ok(Product {
            status: product_row
                .status
                .parse()
                .map_err(|e| anyhow::anyhow!("Product {sku}: {e}"))?,
            name: product_row.name,
            price: product_row.price,
            confirmed_url: product_row.confirmed_url,
            short_description: product_row.short_description,
            long_description: product_row.long_description,
            features_html: product_row.features_html,
            categories: serde_json::from_str(&product_row.categories)
                .with_context(|| format!("Malformed categories for product {sku}"))?,
            suggested_categories: serde_json::from_str(&product_row.suggested_categories)
                .with_context(|| format!("Malformed suggested categories for product {sku}"))?,
            images: serde_json::from_str(&product_row.images)
                .with_context(|| format!("Malformed images for product {sku}"))?,
            source_links: serde_json::from_str(&product_row.source_links)
                .with_context(|| format!("Malformed source links for product {sku}"))?,
            scraped_data: product_row
                .scraped_data
                .as_deref()
                .map(serde_json::from_str)
                .transpose()
                .with_context(|| format!("Malformed scraped data for product {sku}"))?,
            notes: product_row.notes,
            added_at: DateTime::from_timestamp(product_row.added_at, 0)
                .context("Unable to initialize added_at from database")?,
            updated_at: DateTime::from_timestamp(product_row.updated_at, 0)
                .context("Unable to initialize updated_at from database")?,
            sku,
        })
    }
}
