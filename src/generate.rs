//! The generate module asks an LLM to write the product fields that scraping
//! left empty and stores the answers in the workspace.

use anyhow::Result;
use llm::builder::LLMBuilder;
use llm::chat::{ChatMessage, ChatProvider};
use log::{debug, error, info, warn};
use once_cell::sync::Lazy;
use rate_guard::{RateLimit, StdTokenBucket, TokenBucketBuilder};
use regex::Regex;
use serde::Deserialize;
use std::time::Duration;

use crate::categories::{all_category_paths, is_known_category};
use crate::constants::{DEFAULT_PROMPT_PREAMBLE, THINK_STRIPPER};
use crate::scrape::features_to_html;
use crate::storage::{Product, Storage};
use crate::{BatchSummary, ProductTarget};

static THINK_STRIPPER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(THINK_STRIPPER).expect("Failed to compile THINK_STRIPPER regex"));

static FENCED_JSON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:json)?\s*([\s\S]*?)```").expect("Failed to compile FENCED_JSON regex")
});

const SOURCE_TEXT_LIMIT: usize = 1500;
const PROMPT_CATEGORY_LIMIT: usize = 100;

/// A product field the model can be asked to write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiField {
    ShortDescription,
    Description,
    Features,
    Categories,
}

impl AiField {
    pub const ALL: [AiField; 4] = [
        AiField::ShortDescription,
        AiField::Description,
        AiField::Features,
        AiField::Categories,
    ];

    /// Key of the field in the model's JSON answer.
    pub fn as_str(self) -> &'static str {
        match self {
            AiField::ShortDescription => "shortDescription",
            AiField::Description => "description",
            AiField::Features => "features",
            AiField::Categories => "categories",
        }
    }

    fn instruction(self) -> &'static str {
        match self {
            AiField::ShortDescription => {
                "- \"shortDescription\": A concise product summary (1-2 sentences, max 150 chars). Good for search results and quick scanning."
            }
            AiField::Description => {
                "- \"description\": A detailed product description (2-4 paragraphs). Highlight key benefits, use cases, and quality. DO NOT use markdown formatting, plain text with paragraph breaks only."
            }
            AiField::Features => {
                "- \"features\": An array of 4-8 key product features as short bullet points. Each should be a brief, factual statement about the product."
            }
            AiField::Categories => {
                "- \"categories\": An array of the best matching category paths from the list above. Use the EXACT text from the list. Pick 1-3 categories."
            }
        }
    }

    fn is_missing(self, product: &Product) -> bool {
        match self {
            AiField::ShortDescription => product.short_description.trim().is_empty(),
            AiField::Description => product.long_description.trim().is_empty(),
            AiField::Features => product.features_html.trim().is_empty(),
            AiField::Categories => product.categories.is_empty(),
        }
    }
}

impl std::fmt::Display for AiField {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Fields of the product that are still empty.
pub fn missing_fields(product: &Product) -> Vec<AiField> {
    AiField::ALL
        .into_iter()
        .filter(|field| field.is_missing(product))
        .collect()
}

/// Builds the copywriting prompt for the requested fields.
pub fn build_prompt(product: &Product, fields: &[AiField], preamble: &str) -> String {
    let mut lines: Vec<String> = vec![
        preamble.trim().to_string(),
        String::new(),
        format!("Product Name: {}", product.name),
    ];

    if !product.sku.is_empty() {
        lines.push(format!("SKU: {}", product.sku));
    }
    if !product.price.is_empty() {
        lines.push(format!("Price: £{}", product.price));
    }
    if let Some(scraped) = &product.scraped_data {
        if !scraped.meta_description.is_empty() {
            lines.push(format!("Source Description: {}", scraped.meta_description));
        }
        if !scraped.raw_text.is_empty() {
            let source_text: String = scraped.raw_text.chars().take(SOURCE_TEXT_LIMIT).collect();
            lines.push(format!("Source Page Text:\n{source_text}"));
        }
    }
    if !product.short_description.is_empty() {
        lines.push(format!(
            "Current Short Description: {}",
            product.short_description
        ));
    }
    if !product.long_description.is_empty() {
        lines.push(format!(
            "Current Long Description: {}",
            product.long_description
        ));
    }

    lines.push(String::new());
    lines.push("Generate the following fields in JSON format. Write in a professional but approachable British English tone, as if writing for a specialist retailer whose customers are tradespeople and enthusiasts:".to_string());
    lines.push(String::new());

    for field in fields {
        if *field == AiField::Categories {
            let paths = all_category_paths();
            lines.push(String::new());
            lines.push("Available categories (pick 1-3 most relevant):".to_string());
            lines.extend(
                paths
                    .iter()
                    .take(PROMPT_CATEGORY_LIMIT)
                    .map(|path| path.to_string()),
            );
            if paths.len() > PROMPT_CATEGORY_LIMIT {
                lines.push(format!(
                    "... and {} more",
                    paths.len() - PROMPT_CATEGORY_LIMIT
                ));
            }
            lines.push(String::new());
        }
        lines.push(field.instruction().to_string());
    }

    lines.push(String::new());
    lines.push("Respond with ONLY valid JSON, no other text.".to_string());

    lines.join("\n")
}

/// Content written by the model. Every field is optional since the model is
/// only asked for the missing ones.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratedContent {
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
}

/// Parses the model's answer, accepting bare JSON or a fenced JSON block.
///
/// # Errors
///
/// Returns an error if no JSON object can be read from the answer
pub fn parse_generated(response: &str) -> Result<GeneratedContent> {
    let response = THINK_STRIPPER_REGEX.replace_all(response, "");
    let response = response.trim();

    if let Ok(content) = serde_json::from_str(response) {
        return Ok(content);
    }

    if let Some(block) = FENCED_JSON.captures(response).and_then(|c| c.get(1))
        && let Ok(content) = serde_json::from_str(block.as_str().trim())
    {
        return Ok(content);
    }

    Err(anyhow::anyhow!(
        "Failed to parse AI response: {}",
        response.chars().take(200).collect::<String>()
    ))
}

/// Fills the product's empty fields from generated content.
///
/// Returns the fields that were actually filled.
pub fn apply_generated(product: &mut Product, content: GeneratedContent) -> Vec<AiField> {
    let mut filled = Vec::new();

    if let Some(short_description) = content.short_description.filter(|s| !s.trim().is_empty())
        && AiField::ShortDescription.is_missing(product)
    {
        product.short_description = short_description.trim().to_string();
        filled.push(AiField::ShortDescription);
    }

    if let Some(description) = content.description.filter(|s| !s.trim().is_empty())
        && AiField::Description.is_missing(product)
    {
        product.long_description = description.trim().to_string();
        filled.push(AiField::Description);
    }

    if let Some(features) = content.features
        && AiField::Features.is_missing(product)
    {
        let features: Vec<&str> = features
            .iter()
            .map(|feature| feature.trim())
            .filter(|feature| !feature.is_empty())
            .collect();
        if !features.is_empty() {
            product.features_html = features_to_html(&features);
            filled.push(AiField::Features);
        }
    }

    if let Some(categories) = content.categories
        && AiField::Categories.is_missing(product)
    {
        for category in categories {
            let category = category.trim();
            if !is_known_category(category) {
                warn!("Dropping unknown category \"{category}\" for {}", product.sku);
            } else if !product.categories.iter().any(|c| c == category) {
                product.categories.push(category.to_string());
            }
        }
        if !product.categories.is_empty() {
            filled.push(AiField::Categories);
        }
    }

    if !filled.is_empty() {
        product.touch();
    }
    filled
}

/// Configuration containing shared data for generation operations
pub struct GenerateContext<'a> {
    /// LLM model to use for generation
    pub model: &'a dyn ChatProvider,
    /// Store preamble opening the prompt
    pub preamble: Option<&'a str>,
    /// Rate limiter for controlling request frequency
    pub rate_limiter: Option<&'a StdTokenBucket>,
}

/// Asks the model to write the given fields for a product.
///
/// # Errors
///
/// Returns an error if:
/// * LLM chat operation fails
/// * The answer isn't valid JSON
pub async fn generate_content(
    product: &Product,
    fields: &[AiField],
    ctx: &GenerateContext<'_>,
) -> Result<GeneratedContent> {
    let prompt = build_prompt(
        product,
        fields,
        ctx.preamble.unwrap_or(DEFAULT_PROMPT_PREAMBLE),
    );
    let messages = vec![ChatMessage::user().content(prompt).build()];

    if let Some(limiter) = ctx.rate_limiter {
        loop {
            match limiter.try_acquire(1) {
                Ok(()) => break,
                Err(_) => {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
            }
        }
    }

    let response = ctx
        .model
        .chat(&messages)
        .await
        .map_err(|err| anyhow::anyhow!("LLM error: {err}."))?
        .to_string();

    parse_generated(&response)
}

/// Generates and stores the missing fields of one product.
///
/// # Returns
///
/// Returns `false` if the product had nothing missing
///
/// # Errors
///
/// Returns an error if generation or the database update fails
pub async fn generate_product(
    ctx: &GenerateContext<'_>,
    storage: &Storage,
    product: &mut Product,
) -> Result<bool> {
    let fields = missing_fields(product);
    if fields.is_empty() {
        debug!("Nothing to generate for {}", product.sku);
        return Ok(false);
    }

    let content = generate_content(product, &fields, ctx).await?;
    let filled = apply_generated(product, content);
    storage.upsert_product(product)?;

    info!(
        "Generated {} for {}",
        filled
            .iter()
            .map(|field| field.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        product.sku
    );
    Ok(true)
}

fn build_rate_limiter(rpm: Option<u32>) -> Option<StdTokenBucket> {
    rpm.and_then(|rpm| {
        let capacity = rpm.max(1) as u64;
        let refill_interval = Duration::from_secs_f64(60.0 / capacity as f64);

        TokenBucketBuilder::builder()
            .capacity(capacity)
            .refill_amount(1_u64)
            .refill_every(refill_interval)
            .with_time(rate_guard::StdTimeSource::new())
            .with_precision::<rate_guard::Nanos>()
            .build()
            .ok()
    })
}

/// Fills the missing fields of the targeted products with an LLM.
///
/// # Arguments
///
/// * `db_path` - Path to the workspace database
/// * `llm_builder` - The LLM builder to create the model for processing
/// * `target` - Products to generate content for
/// * `preamble` - Optional store preamble replacing the default one
/// * `rpm` - Rate limit: requests per minute (default: no limit)
///
/// # Errors
///
/// Returns an error if:
/// * The LLM model fails to build
/// * Database operations fail
/// * Generating for a single-SKU target fails
pub async fn generate(
    db_path: &str,
    llm_builder: LLMBuilder,
    target: ProductTarget,
    preamble: Option<&str>,
    rpm: Option<u32>,
) -> Result<BatchSummary> {
    let model = llm_builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build LLM model: {}", e))?;
    let rate_limiter = build_rate_limiter(rpm);
    let storage = Storage::new(db_path)?;

    let ctx = GenerateContext {
        model: model.as_ref(),
        preamble,
        rate_limiter: rate_limiter.as_ref(),
    };

    generate_with_context(&ctx, &storage, &target).await
}

/// Runs generation over a target with an already built model.
///
/// # Errors
///
/// Returns an error if database operations fail or a single-SKU target fails
pub async fn generate_with_context(
    ctx: &GenerateContext<'_>,
    storage: &Storage,
    target: &ProductTarget,
) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    info!("Generating missing content for {target}...");
    for mut product in storage.resolve_target(target)? {
        match generate_product(ctx, storage, &mut product).await {
            Ok(true) => summary.succeeded += 1,
            Ok(false) => summary.skipped += 1,
            Err(e) if target.is_single() => return Err(e),
            Err(e) => {
                error!("Failed to generate content for {}: {e}", product.sku);
                summary.failed += 1;
            }
        }
    }

    info!("Generation finished: {summary}");
    Ok(summary)
}
