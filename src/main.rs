//! skumap is a CLI tool that turns a CSV of SKUs into WooCommerce-ready
//! product data.
//!
//! The usual workflow is:
//! 1. `import` - Loads SKUs, names and prices into a local workspace database
//! 2. `find` - Searches a source page for each product
//! 3. `scrape` - Extracts descriptions, features and images from the source pages
//! 4. `generate` - Lets an LLM write whatever is still missing
//! 5. `edit` / `image` - Reviews products and approves images
//! 6. `export-csv` / `export-images` - Produces the WooCommerce import files

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Builder;
use llm::builder::{LLMBackend, LLMBuilder};
use log::{LevelFilter, info};
use std::str::FromStr;
use url::Url;

use skumap::{
    ProductTarget, TextBy,
    categories::{flat_categories, suggest_categories},
    constants::{DEFAULT_EXPORT_DOMAIN, MODEL_API_KEY_ENV_NAME},
    export::{export_csv, export_images},
    generate::generate,
    images::{ImageAction, manage_image},
    import::import_csv,
    products::{self, ProductUpdate},
    scrape::scrape_products,
    search::{SearchOptions, find_urls, google_search_url},
    storage::{Product, Status, Storage},
};

/// A CLI tool to build WooCommerce product data from a list of SKUs
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The command to execute
    #[command(subcommand)]
    command: Command,

    #[arg(long, short, action = clap::ArgAction::Count, help = "Output v(v...)erbosity: error (0), warn (1), info (2), debug (3), trace (4)", global = true, default_value_t = 2)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Import products from a CSV with SKU, Name and Price columns
    Import {
        /// Path to the workspace database
        db: String,
        /// Path to the CSV file to import
        csv: String,
    },
    /// List products in the workspace
    List {
        /// Path to the workspace database
        db: String,
        /// Only list products in this status
        #[arg(long, short)]
        status: Option<Status>,
        /// Only list products whose name or SKU contains this text
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Print a product as JSON
    Show {
        /// Path to the workspace database
        db: String,
        /// SKU of the product
        sku: String,
    },
    /// Show product counts per status
    Stats {
        /// Path to the workspace database
        db: String,
    },
    /// Print a Google search URL for finding a product's page by hand
    SearchUrl {
        /// Path to the workspace database
        db: String,
        /// SKU of the product
        sku: String,
    },
    /// Search a source page for products automatically
    Find {
        /// Path to the workspace database
        db: String,
        /// Target to search: a lower-case status, "all" or a SKU
        #[arg(long, short = 't', default_value = "pending")]
        target: ProductTarget,
    },
    /// Scrape product content from the confirmed source pages
    Scrape {
        /// Path to the workspace database
        db: String,
        /// Target to scrape: a lower-case status, "all" or a SKU
        #[arg(long, short = 't', default_value = "searching")]
        target: ProductTarget,
        /// Page to scrape instead of the confirmed URL (single SKU only)
        #[arg(long, short)]
        url: Option<String>,
        /// Text extraction method: "dom_smoothie" (default) or "fast_html2md"
        #[arg(long, default_value = "dom_smoothie")]
        text_by: TextBy,
    },
    /// List the store categories
    Categories {
        /// Also print the keywords of each category
        #[arg(long, short)]
        keywords: bool,
    },
    /// Suggest categories for a product name and description
    Suggest {
        /// Product name
        name: String,
        /// Product description
        #[arg(long, short, default_value = "")]
        description: String,
    },
    /// Fill missing product content using an LLM model
    Generate {
        /// Path to the workspace database
        db: String,
        /// URL of the LLM model to use for processing
        model: String,
        /// Path to a file with the store preamble opening the prompt
        #[arg(long, short = 'p')]
        prompt_file: Option<String>,
        /// Target to generate for: a lower-case status, "all" or a SKU
        #[arg(long, short = 't', default_value = "confirmed")]
        target: ProductTarget,
        /// Rate limit: requests per minute (default: no limit)
        #[arg(long, short = 'r')]
        rpm: Option<u32>,
    },
    /// Edit product fields
    Edit {
        /// Path to the workspace database
        db: String,
        /// SKU of the product
        sku: String,
        #[command(flatten)]
        update: EditArgs,
    },
    /// Manage product images
    Image {
        /// Path to the workspace database
        db: String,
        /// SKU of the product
        sku: String,
        /// Directory of downloaded images
        #[arg(long, default_value = "images")]
        images_dir: PathBuf,
        #[command(subcommand)]
        action: ImageCommand,
    },
    /// Delete a product
    Delete {
        /// Path to the workspace database
        db: String,
        /// SKU of the product
        sku: String,
    },
    /// Remove all products from the workspace
    Reset {
        /// Path to the workspace database
        db: String,
    },
    /// Export products as a WooCommerce import CSV
    ExportCsv {
        /// Path to the workspace database
        db: String,
        /// Path to the CSV file to write
        output_file: String,
        /// Store domain the images are uploaded to
        #[arg(long, default_value = DEFAULT_EXPORT_DOMAIN)]
        domain: String,
        /// Export every product, not only complete ones
        #[arg(long)]
        all: bool,
    },
    /// Pack approved images into a ZIP for the WordPress uploads folder
    ExportImages {
        /// Path to the workspace database
        db: String,
        /// Path to the ZIP file to write
        output_file: String,
        /// Directory of downloaded images
        #[arg(long, default_value = "images")]
        images_dir: PathBuf,
    },
}

#[derive(Args)]
struct EditArgs {
    #[arg(long)]
    status: Option<Status>,
    /// Confirmed source page URL
    #[arg(long)]
    url: Option<String>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    short_description: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    features_html: Option<String>,
    #[arg(long)]
    notes: Option<String>,
    /// Category path to add (repeatable)
    #[arg(long = "add-category")]
    add_categories: Vec<String>,
    /// Category path to remove (repeatable)
    #[arg(long = "remove-category")]
    remove_categories: Vec<String>,
    /// Adopt the N best suggested categories
    #[arg(long)]
    adopt_suggestions: Option<usize>,
}

impl From<EditArgs> for ProductUpdate {
    fn from(args: EditArgs) -> Self {
        ProductUpdate {
            status: args.status,
            confirmed_url: args.url,
            name: args.name,
            price: args.price,
            short_description: args.short_description,
            long_description: args.description,
            features_html: args.features_html,
            notes: args.notes,
            add_categories: args.add_categories,
            remove_categories: args.remove_categories,
            adopt_suggestions: args.adopt_suggestions,
        }
    }
}

#[derive(Subcommand)]
enum ImageCommand {
    /// Add an image URL
    Add { url: String },
    /// Approve an image, downloading it if needed
    Approve { index: usize },
    /// Reject an image
    Reject { index: usize },
    /// Remove an image from the list
    Remove { index: usize },
}

impl From<ImageCommand> for ImageAction {
    fn from(command: ImageCommand) -> Self {
        match command {
            ImageCommand::Add { url } => ImageAction::Add { url },
            ImageCommand::Approve { index } => ImageAction::Approve { index },
            ImageCommand::Reject { index } => ImageAction::Reject { index },
            ImageCommand::Remove { index } => ImageAction::Remove { index },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    match cli.command {
        Command::Import { db, csv } => import_csv(&db, &csv).map(|_| ()),
        Command::List { db, status, query } => handle_list_command(&db, status, query.as_deref()),
        Command::Show { db, sku } => {
            let product = Storage::new(&db)?.require_product(&sku)?;
            println!("{}", serde_json::to_string_pretty(&product)?);
            Ok(())
        }
        Command::Stats { db } => {
            println!("{}", products::stats(&Storage::new(&db)?)?);
            Ok(())
        }
        Command::SearchUrl { db, sku } => {
            let product = Storage::new(&db)?.require_product(&sku)?;
            println!("{}", google_search_url(&product.name)?);
            Ok(())
        }
        Command::Find { db, target } => find_urls(&db, target, SearchOptions::from_env())
            .await
            .map(|_| ()),
        Command::Scrape {
            db,
            target,
            url,
            text_by,
        } => scrape_products(&db, target, url, text_by).await.map(|_| ()),
        Command::Categories { keywords } => {
            print_categories(keywords);
            Ok(())
        }
        Command::Suggest { name, description } => {
            for suggestion in suggest_categories(&name, &description) {
                println!("{:>4}  {}", suggestion.score, suggestion.path);
            }
            Ok(())
        }
        Command::Generate {
            db,
            model,
            prompt_file,
            target,
            rpm,
        } => handle_generate_command(db, model, prompt_file, target, rpm).await,
        Command::Edit { db, sku, update } => {
            products::edit(&Storage::new(&db)?, &sku, update.into()).map(|_| ())
        }
        Command::Image {
            db,
            sku,
            images_dir,
            action,
        } => handle_image_command(&db, &sku, action.into(), &images_dir).await,
        Command::Delete { db, sku } => products::delete(&Storage::new(&db)?, &sku),
        Command::Reset { db } => products::reset(&Storage::new(&db)?).map(|_| ()),
        Command::ExportCsv {
            db,
            output_file,
            domain,
            all,
        } => export_csv(&db, &output_file, &domain, all).map(|_| ()),
        Command::ExportImages {
            db,
            output_file,
            images_dir,
        } => export_images(&db, &output_file, &images_dir).map(|_| ()),
    }
}

fn handle_list_command(db: &str, status: Option<Status>, query: Option<&str>) -> Result<()> {
    let storage = Storage::new(db)?;
    for product in products::list(&storage, status, query)? {
        println!("{}", list_line(&product));
    }
    Ok(())
}

fn print_categories(with_keywords: bool) {
    for category in flat_categories() {
        if with_keywords && !category.keywords.is_empty() {
            println!("{} [{}]", category.path, category.keywords.join(", "));
        } else {
            println!("{}", category.path);
        }
    }
}

async fn handle_image_command(
    db: &str,
    sku: &str,
    action: ImageAction,
    images_dir: &Path,
) -> Result<()> {
    let product = manage_image(db, sku, action, images_dir).await?;
    for (index, image) in product.images.iter().enumerate() {
        println!(
            "{index:>3} {} {} {}",
            if image.approved { "[x]" } else { "[ ]" },
            image.url,
            image.filename
        );
    }
    Ok(())
}

fn list_line(product: &Product) -> String {
    let approved = product.images.iter().filter(|i| i.approved).count();
    format!(
        "{:<16} {:<10} {:>8}  {} ({}/{} images approved)",
        product.sku,
        product.status,
        product.price,
        product.name,
        approved,
        product.images.len()
    )
}

async fn handle_generate_command(
    db: String,
    model: String,
    prompt_file: Option<String>,
    target: ProductTarget,
    rpm: Option<u32>,
) -> Result<()> {
    let model_url = Url::parse(&model).map_err(|e| anyhow::anyhow!("Invalid model URL: {}", e))?;
    let llm_builder = LLMBuilder::new()
        .backend(
            LLMBackend::from_str(model_url.scheme())
                .map_err(|e| anyhow::anyhow!("Invalid LLM backend: {}", e))?,
        )
        .model(
            [
                model_url
                    .host_str()
                    .context("Specify model name as host URL.")?,
                model_url.username(),
            ]
            .iter()
            .filter(|x| !x.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(":"),
        )
        .temperature(0.4)
        .max_tokens(2000);

    let llm_builder = match std::env::var(MODEL_API_KEY_ENV_NAME) {
        Ok(model_key) => {
            info!("Using API key from {MODEL_API_KEY_ENV_NAME}");
            llm_builder.api_key(model_key)
        }
        Err(err) => {
            info!("{err} while providing api key");
            llm_builder
        }
    };

    let preamble = match prompt_file {
        Some(file) => {
            let content =
                fs::read_to_string(&file).context(format!("Failed to read prompt file: {file}"))?;
            Some(content)
        }
        None => None,
    };

    generate(&db, llm_builder, target, preamble.as_deref(), rpm)
        .await
        .map(|_| ())
}
