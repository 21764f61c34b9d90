//! The skumap library turns a bare CSV of SKUs into WooCommerce-ready catalog data:
//! it finds a source page per product, scrapes its content, optionally fills
//! gaps with an LLM and exports a product CSV plus the approved images.

pub mod categories;
pub mod constants;
pub mod export;
pub mod generate;
pub mod images;
pub mod import;
pub mod parse;
pub mod products;
pub mod scrape;
pub mod search;
pub mod storage;

use storage::Status;

/// Enum representing the text extraction method used when a page has no
/// recognisable product area.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TextBy {
    /// Use dom_smoothie for text extraction
    #[default]
    DomSmoothie,
    /// Use fast_html2md for text extraction
    FastHtml2Md,
}

impl std::str::FromStr for TextBy {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "dom_smoothie" => Ok(TextBy::DomSmoothie),
            "fast_html2md" => Ok(TextBy::FastHtml2Md),
            _ => Err(format!("Invalid text extraction method: {}", input)),
        }
    }
}

/// Enum representing which products a batch command works on.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ProductTarget {
    /// All products in the workspace.
    All,
    /// Products currently in the given status.
    Status(Status),
    /// A single product by SKU.
    Sku { sku: String },
}

/// `all` and the lower-case status names select batches; any other value,
/// `Complete` included, is taken as a SKU.
impl From<&str> for ProductTarget {
    fn from(value: &str) -> Self {
        if value == "all" {
            return Self::All;
        }

        match Status::ALL.into_iter().find(|status| status.as_str() == value) {
            Some(status) => Self::Status(status),
            None => Self::Sku {
                sku: value.to_string(),
            },
        }
    }
}

impl std::fmt::Display for ProductTarget {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(formatter, "all products"),
            Self::Status(status) => write!(formatter, "{status} products"),
            Self::Sku { sku } => write!(formatter, "product {sku}"),
        }
    }
}

impl ProductTarget {
    /// Whether the target names exactly one product, in which case failures
    /// are reported to the caller instead of being logged and counted.
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Sku { .. })
    }
}

/// Outcome of a command run over a batch of products.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{} succeeded, {} failed, {} skipped",
            self.succeeded, self.failed, self.skipped
        )
    }
}

pub use categories::{all_category_paths, suggest_categories};
pub use export::{export_csv, export_images};
pub use generate::generate;
pub use import::import_csv;
pub use parse::extract_product_page;
pub use scrape::scrape_products;
pub use search::find_urls;
