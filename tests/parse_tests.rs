use skumap::TextBy;
use skumap::parse::{ScrapedProduct, extract_product_page, parse_price};
use spectral::prelude::*;
use std::collections::BTreeMap;

const PAGE_URL: &str = "https://shop.example.com/product/hsa-50/";

const WOOCOMMERCE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Stihl HSA 50 Cordless Hedge Trimmer | Example Store</title>
  <meta property="og:description" content="Lightweight cordless hedge trimmer for small gardens.">
  <meta property="og:image" content="https://shop.example.com/wp-content/uploads/hsa50-og.jpg">
</head>
<body>
  <header><h1>Example Store</h1></header>
  <nav><ul><li>Home page link</li></ul></nav>
  <div class="product">
    <div class="woocommerce-product-gallery">
      <div class="woocommerce-product-gallery__image">
        <img src="/wp-content/uploads/hsa50-600x600.jpg" data-large_image="https://shop.example.com/wp-content/uploads/hsa50.jpg">
      </div>
      <div class="woocommerce-product-gallery__image">
        <img src="/wp-content/uploads/hsa50-side-150x150.jpg" data-src="/wp-content/uploads/hsa50-side-800x800.png">
      </div>
      <div class="woocommerce-product-gallery__image">
        <img src="https://shop.example.com/wp-content/uploads/woocommerce-placeholder.png">
      </div>
    </div>
    <div class="summary">
      <h1 class="product_title">Stihl HSA 50 Cordless Hedge Trimmer</h1>
      <p class="price"><span class="woocommerce-Price-amount">£1,299.50</span></p>
      <div class="woocommerce-product-details__short-description"><p>Quiet battery hedge trimmer for small hedges.</p></div>
      <div class="product_meta"><span class="sku">HSA50</span> <span class="posted_in"><a href="/c/hedge" rel="tag">Hedge Trimmers</a></span></div>
    </div>
    <div class="woocommerce-Tabs-panel woocommerce-Tabs-panel--description" id="tab-description">
      <h2>Description</h2>
      <p>The HSA 50 is a lightweight cordless hedge trimmer.</p>
      <ul><li>Weighs only 3.1 kg</li><li>50 cm cutting length</li><li>Weighs only 3.1 kg</li><li>Go</li></ul>
      <script>var tracking = "ignored script text";</script>
    </div>
    <div class="woocommerce-Tabs-panel" id="tab-additional_information">
      <table class="woocommerce-product-attributes shop_attributes">
        <tr><th>Weight</th><td>3.1 kg</td></tr>
        <tr><th>Blade length</th><td>50 cm</td></tr>
      </table>
    </div>
  </div>
  <footer><p>Footer copyright text that is long enough</p></footer>
</body>
</html>"#;

fn extract(html: &str) -> ScrapedProduct {
    extract_product_page(html, PAGE_URL, TextBy::DomSmoothie)
}

#[test]
fn woocommerce_page_fields() {
    let scraped = extract(WOOCOMMERCE_PAGE);

    assert_that(&scraped.title).is_equal_to("Stihl HSA 50 Cordless Hedge Trimmer".to_string());
    assert_that(&scraped.short_description)
        .is_equal_to("Quiet battery hedge trimmer for small hedges.".to_string());
    assert_that(&scraped.description).is_equal_to(
        "Description\n\nThe HSA 50 is a lightweight cordless hedge trimmer.".to_string(),
    );
    assert_that(&scraped.meta_description)
        .is_equal_to("Lightweight cordless hedge trimmer for small gardens.".to_string());
    assert_that(&scraped.brand).is_equal_to("Hedge Trimmers".to_string());
    assert_that(&scraped.sku).is_equal_to("HSA50".to_string());
    assert_that(&scraped.price).is_equal_to("1299.5".to_string());
    assert_that(&scraped.source_url).is_equal_to(PAGE_URL.to_string());
}

#[test]
fn features_are_deduplicated_and_short_items_dropped() {
    let scraped = extract(WOOCOMMERCE_PAGE);

    assert_that(&scraped.features).is_equal_to(vec![
        "Weighs only 3.1 kg".to_string(),
        "50 cm cutting length".to_string(),
    ]);
}

#[test]
fn specs_come_from_attribute_table() {
    let scraped = extract(WOOCOMMERCE_PAGE);

    assert_that(&scraped.specs).is_equal_to(BTreeMap::from([
        ("Blade length".to_string(), "50 cm".to_string()),
        ("Weight".to_string(), "3.1 kg".to_string()),
    ]));
}

#[test]
fn images_prefer_large_sources_and_skip_placeholders() {
    let scraped = extract(WOOCOMMERCE_PAGE);

    assert_that(&scraped.images).is_equal_to(vec![
        "https://shop.example.com/wp-content/uploads/hsa50.jpg".to_string(),
        "https://shop.example.com/wp-content/uploads/hsa50-side.png".to_string(),
        "https://shop.example.com/wp-content/uploads/hsa50-og.jpg".to_string(),
    ]);
}

#[test]
fn raw_text_ignores_scripts_and_boilerplate() {
    let scraped = extract(WOOCOMMERCE_PAGE);

    assert_that(&scraped.raw_text.contains("50 cm cutting length")).is_true();
    assert_that(&scraped.raw_text.contains("ignored script text")).is_false();
    assert_that(&scraped.raw_text.contains("Footer copyright")).is_false();
    assert_that(&(scraped.raw_text.chars().count() <= 3000)).is_true();
}

#[test]
fn title_falls_back_to_page_title_when_headings_are_boilerplate() {
    let scraped = extract(
        r#"<html><head><title>Acme Widget - Garden | Shop</title></head>
        <body><header><h1>Store Name</h1></header><p>Nothing else.</p></body></html>"#,
    );

    assert_that(&scraped.title).is_equal_to("Acme Widget".to_string());
}

#[test]
fn generic_description_and_table_features() {
    let scraped = extract(
        r#"<html><body>
        <div itemprop="description"><p>This is a generic description paragraph.</p></div>
        <table>
          <tr><td>Voltage</td><td>36 V</td></tr>
          <tr><td>a</td><td>b</td><td>c</td></tr>
        </table>
        </body></html>"#,
    );

    assert_that(&scraped.description)
        .is_equal_to("This is a generic description paragraph.".to_string());
    assert_that(&scraped.features).is_equal_to(vec!["Voltage: 36 V".to_string()]);
    assert_that(&scraped.specs.is_empty()).is_true();
}

#[test]
fn definition_list_specs() {
    let scraped = extract(
        r#"<html><body>
        <dl class="product-specs">
          <dt>Weight</dt>
          <dd>2 kg</dd>
          <dt>Colour</dt>
          <dd>Orange</dd>
        </dl>
        </body></html>"#,
    );

    assert_that(&scraped.specs).is_equal_to(BTreeMap::from([
        ("Colour".to_string(), "Orange".to_string()),
        ("Weight".to_string(), "2 kg".to_string()),
    ]));
}

#[test]
fn removed_scripts_do_not_break_sibling_matches() {
    let scraped = extract(
        r#"<html><body>
        <div class="product_meta">m</div><script>var x = 1;</script><div>Adjacent short description text here</div>
        <dl class="product-specs">
          <dt>Weight</dt>
          <script>track("weight");</script>
          <dd>2 kg</dd>
        </dl>
        </body></html>"#,
    );

    assert_that(&scraped.short_description)
        .is_equal_to("Adjacent short description text here".to_string());
    assert_that(&scraped.specs).is_equal_to(BTreeMap::from([(
        "Weight".to_string(),
        "2 kg".to_string(),
    )]));
}

#[test]
fn meta_description_falls_back_to_named_meta() {
    let scraped = extract(
        r#"<html><head><meta name="description" content="Plain meta description."></head>
        <body></body></html>"#,
    );

    assert_that(&scraped.meta_description).is_equal_to("Plain meta description.".to_string());
    assert_that(&scraped.short_description).is_equal_to(String::new());
}

#[test]
fn prices_use_shortest_number_form() {
    assert_that(&parse_price("£12.50")).is_equal_to(Some("12.5".to_string()));
    assert_that(&parse_price("£12.00")).is_equal_to(Some("12".to_string()));
    assert_that(&parse_price("€1,299.99 inc VAT")).is_equal_to(Some("1299.99".to_string()));
    assert_that(&parse_price("From £10")).is_equal_to(None);
    assert_that(&parse_price("")).is_equal_to(None);
}
