use crate::generate_extras::{StubLlmProvider, sample_product};
use skumap::categories::all_category_paths;
use skumap::generate::{
    AiField, GenerateContext, GeneratedContent, apply_generated, build_prompt,
    generate_with_context, missing_fields, parse_generated,
};
use skumap::storage::{Status, Storage};
use skumap::{BatchSummary, ProductTarget};
use spectral::prelude::*;

mod generate_extras;

const FULL_RESPONSE: &str = r#"{
    "shortDescription": "A quiet battery hedge trimmer.",
    "description": "Long copy about the trimmer.",
    "features": ["36 V battery", "50 cm blade & guard"],
    "categories": ["Garden Machinery > Hedge Trimmers", "Made Up > Category"]
}"#;

assert_generated![
    bare_json_parsed:
        response => r#"{"shortDescription": "Quiet trimmer.", "features": ["Light", "Quiet"]}"#,
        result => GeneratedContent {
            short_description: Some("Quiet trimmer.".to_string()),
            features: Some(vec!["Light".to_string(), "Quiet".to_string()]),
            ..Default::default()
        },
    think_removed_before_parsing:
        response => "<think>\nPlanning the copy\n</think>\n{\"description\": \"Long copy.\"}",
        result => GeneratedContent {
            description: Some("Long copy.".to_string()),
            ..Default::default()
        },
    fenced_json_block_parsed:
        response => "Here you go:\n```json\n{\"categories\": [\"Garden Machinery > Hedge Trimmers\"]}\n```\nEnjoy!",
        result => GeneratedContent {
            categories: Some(vec!["Garden Machinery > Hedge Trimmers".to_string()]),
            ..Default::default()
        },
];

#[test]
fn unparseable_response_is_reported() {
    let error = parse_generated("Sorry, I can't help with that.").unwrap_err();

    assert_that(&error.to_string())
        .is_equal_to("Failed to parse AI response: Sorry, I can't help with that.".to_string());
}

#[test]
fn missing_fields_lists_only_empty_ones() {
    let mut product = sample_product();
    assert_that(&missing_fields(&product)).is_equal_to(AiField::ALL.to_vec());

    product.short_description = "Already written.".to_string();
    product.categories = vec!["Garden Machinery > Hedge Trimmers".to_string()];

    assert_that(&missing_fields(&product))
        .is_equal_to(vec![AiField::Description, AiField::Features]);
}

#[test]
fn prompt_includes_product_context_and_requested_fields() {
    let mut product = sample_product();
    product.short_description = "Existing summary.".to_string();

    let prompt = build_prompt(
        &product,
        &[AiField::Description, AiField::Categories],
        "You write copy for a test shop.",
    );

    assert_that(&prompt.starts_with("You write copy for a test shop.\n")).is_true();
    assert_that(&prompt.contains("Product Name: Stihl HSA 50 Cordless Hedge Trimmer")).is_true();
    assert_that(&prompt.contains("SKU: HSA50")).is_true();
    assert_that(&prompt.contains("Price: £199.00")).is_true();
    assert_that(&prompt.contains("Current Short Description: Existing summary.")).is_true();
    assert_that(&prompt.contains("British English")).is_true();
    assert_that(&prompt.contains("- \"description\":")).is_true();
    assert_that(&prompt.contains("- \"shortDescription\":")).is_false();
    assert_that(&prompt.contains("Arborist Equipment > Accessories")).is_true();
    assert_that(&prompt.contains(&format!(
        "... and {} more",
        all_category_paths().len() - 100
    )))
    .is_true();
    assert_that(&prompt.ends_with("Respond with ONLY valid JSON, no other text.")).is_true();
}

#[test]
fn generated_content_fills_only_empty_fields() {
    let mut product = sample_product();
    product.long_description = "Operator written description.".to_string();

    let filled = apply_generated(&mut product, parse_generated(FULL_RESPONSE).unwrap());

    assert_that(&filled).is_equal_to(vec![
        AiField::ShortDescription,
        AiField::Features,
        AiField::Categories,
    ]);
    assert_that(&product.short_description)
        .is_equal_to("A quiet battery hedge trimmer.".to_string());
    assert_that(&product.long_description)
        .is_equal_to("Operator written description.".to_string());
    assert_that(&product.features_html).is_equal_to(
        "<ul>\n  <li>36 V battery</li>\n  <li>50 cm blade &amp; guard</li>\n</ul>".to_string(),
    );
    assert_that(&product.categories)
        .is_equal_to(vec!["Garden Machinery > Hedge Trimmers".to_string()]);
}

#[tokio::test]
async fn batch_generates_for_products_with_gaps() {
    let storage = Storage::new(":memory:").unwrap();
    storage.insert_new_product(&sample_product()).unwrap();

    let mut finished = sample_product();
    finished.sku = "DONE1".to_string();
    finished.short_description = "Short.".to_string();
    finished.long_description = "Long.".to_string();
    finished.features_html = "<ul>\n  <li>One</li>\n</ul>".to_string();
    finished.categories = vec!["Garden Machinery > Hedge Trimmers".to_string()];
    storage.insert_new_product(&finished).unwrap();

    let model = StubLlmProvider::new(FULL_RESPONSE.to_string());
    let context = GenerateContext {
        model: &model,
        preamble: Some("Test preamble."),
        rate_limiter: None,
    };

    let summary = generate_with_context(
        &context,
        &storage,
        &ProductTarget::Status(Status::Confirmed),
    )
    .await
    .unwrap();

    assert_that(&summary).is_equal_to(BatchSummary {
        succeeded: 1,
        failed: 0,
        skipped: 1,
    });
    assert_that(&model.prompts().len()).is_equal_to(1);
    assert_that(&model.prompts()[0].starts_with("Test preamble.")).is_true();

    let generated = storage.require_product("HSA50").unwrap();
    assert_that(&generated.long_description)
        .is_equal_to("Long copy about the trimmer.".to_string());
    assert_that(&generated.categories)
        .is_equal_to(vec!["Garden Machinery > Hedge Trimmers".to_string()]);
    assert_that(&storage.require_product("DONE1").unwrap()).is_equal_to(finished);
}

#[tokio::test]
async fn single_sku_failure_is_returned() {
    let storage = Storage::new(":memory:").unwrap();
    storage.insert_new_product(&sample_product()).unwrap();

    let model = StubLlmProvider::new("no json here".to_string());
    let context = GenerateContext {
        model: &model,
        preamble: None,
        rate_limiter: None,
    };

    let result = generate_with_context(
        &context,
        &storage,
        &ProductTarget::Sku {
            sku: "HSA50".to_string(),
        },
    )
    .await;

    assert_that(&result.is_err()).is_true();
}
