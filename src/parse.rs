//! The parse module extracts structured product content from a source page using
//! CSS-selector fallback chains. Every extractor is best-effort: the first plausible
//! match wins and a miss yields an empty value rather than an error.

use crate::TextBy;

use dom_smoothie::{Article, CandidateSelectMode, Config, Readability, TextMode};
use html2md;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

const MAX_FEATURES: usize = 20;
const MAX_IMAGES: usize = 10;
const MAX_DESCRIPTION_PARAGRAPHS: usize = 5;
const MAX_RAW_TEXT_CHARS: usize = 3000;

const THUMBNAIL_MARKERS: &[&str] = &["-150x150", "-100x100", "-50x50"];
const NON_PRODUCT_IMAGE_MARKERS: &[&str] = &[
    "placeholder",
    "spinner",
    "logo",
    "1x1",
    "pixel",
    "woocommerce-placeholder",
];
/// Image attributes from the highest to the lowest quality.
const IMAGE_SOURCE_ATTRIBUTES: &[&str] = &[
    "data-large_image",
    "data-zoom-image",
    "data-full",
    "data-src",
    "src",
];

/// Content scraped from a product source page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedProduct {
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub features: Vec<String>,
    pub specs: BTreeMap<String, String>,
    pub images: Vec<String>,
    pub source_url: String,
    pub meta_description: String,
    pub brand: String,
    pub sku: String,
    pub price: String,
    /// Product-area text kept as context for AI generation
    pub raw_text: String,
}

/// Compiles selectors, logging and skipping any that don't parse.
pub(crate) fn compile(selectors: &[&str]) -> Vec<Selector> {
    selectors
        .iter()
        .filter_map(|selector| match Selector::parse(selector) {
            Ok(selector) => Some(selector),
            Err(e) => {
                warn!("Failed to compile selector '{selector}': {e}");
                None
            }
        })
        .collect()
}

macro_rules! selector_chain {
    ($name:ident => [$($selector:expr),+ $(,)?]) => {
        static $name: Lazy<Vec<Selector>> = Lazy::new(|| compile(&[$($selector),+]));
    };
}

selector_chain!(NOISE => [
    "script, style, noscript, nav, footer, header, .cookie-banner, .popup, #cookie-consent, .site-header, .site-footer, .cart-sidebar",
]);

selector_chain!(TITLE => [
    "h1.product_title",
    "h1.product-title",
    ".product_title",
    "[itemprop=\"name\"]",
    "h1.entry-title",
    ".product-info h1",
    ".product-detail h1",
    ".product-name h1",
    "h1",
]);

selector_chain!(SHORT_DESCRIPTION => [
    ".woocommerce-product-details__short-description",
    ".product-short-description",
    ".short-description",
    "[itemprop=\"description\"]:not(.woocommerce-Tabs-panel)",
    ".product_meta + div",
    ".summary .description",
]);

selector_chain!(WOO_DESCRIPTION => [
    ".woocommerce-Tabs-panel--description",
    "#tab-description",
    ".woocommerce-Tabs-panel",
    ".product-description",
    ".product_description",
    "#product-description",
]);

selector_chain!(GENERIC_DESCRIPTION => [
    "[itemprop=\"description\"]",
    ".description",
    ".product-info .description",
    ".product-detail-description",
    ".tab-pane.active",
    ".product-detail p",
]);

selector_chain!(FEATURE_LISTS => [
    ".woocommerce-Tabs-panel--description ul li",
    ".woocommerce-Tabs-panel--description li",
    "#tab-description ul li",
    ".product-features li",
    ".features li",
    ".feature-list li",
    ".key-features li",
    ".product-highlights li",
    ".bullets li",
    ".summary ul li",
    ".product-info ul li",
    ".product-detail ul li",
    "[class*=\"feature\"] li",
    "[class*=\"specification\"] li",
    ".woocommerce-product-details__short-description ul li",
]);

selector_chain!(ATTRIBUTE_TABLES => [
    ".woocommerce-product-attributes",
    "#tab-additional_information table",
    ".shop_attributes",
    "table.product-attributes",
]);

selector_chain!(SPEC_CONTAINERS => [
    ".woocommerce-product-attributes",
    ".shop_attributes",
    "#tab-additional_information table",
    ".product-specifications",
    ".specifications",
    ".product-specs",
    ".technical-specs",
    ".tech-specs",
    "[class*=\"specification\"]",
]);

selector_chain!(GALLERY_IMAGES => [
    ".woocommerce-product-gallery__image img",
    ".woocommerce-product-gallery img",
    ".product-gallery img",
    ".product-images img",
    ".product-image img",
    "figure.woocommerce-product-gallery__wrapper img",
    "[itemprop=\"image\"]",
    ".wp-post-image",
    ".product-photo img",
    ".product-media img",
    ".gallery img",
    ".product img",
]);

selector_chain!(BRAND => [
    "[rel=\"tag\"]",
    ".product_meta .brand a",
    ".product_meta .posted_in a",
    "[itemprop=\"brand\"]",
    ".brand",
]);

selector_chain!(SKU => [".sku", "[itemprop=\"sku\"]", ".product_meta .sku"]);

selector_chain!(PRICE => [
    ".price .woocommerce-Price-amount",
    ".price ins .woocommerce-Price-amount",
    "[itemprop=\"price\"]",
    ".product-price",
    ".price",
]);

selector_chain!(RAW_TEXT_AREAS => [
    ".woocommerce-Tabs-panel--description",
    "#tab-description",
    ".woocommerce-product-details__short-description",
    ".summary",
    ".product-content",
    ".product-description",
    ".product, .product-detail, .product-info, main, article",
]);

selector_chain!(PAGE_TITLE => ["title"]);
selector_chain!(HEADINGS_AND_PARAGRAPHS => ["p, h2, h3, h4"]);
selector_chain!(PARAGRAPHS => ["p"]);
selector_chain!(TABLES => ["table"]);
selector_chain!(ROWS => ["tr"]);
selector_chain!(HEADER_CELLS => ["th"]);
selector_chain!(DATA_CELLS => ["td"]);
selector_chain!(CELLS => ["td, th"]);
selector_chain!(DEFINITION_TERMS => ["dt"]);
selector_chain!(OG_DESCRIPTION => ["meta[property=\"og:description\"]"]);
selector_chain!(META_DESCRIPTION => ["meta[name=\"description\"]"]);
selector_chain!(OG_IMAGE => ["meta[property=\"og:image\"]"]);

static WP_RESIZE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-\d+x\d+(\.[a-zA-Z]+)$").expect("Failed to compile WP_RESIZE_SUFFIX regex")
});

static LEADING_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("Failed to compile LEADING_FLOAT regex")
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RUN regex"));

/// A parsed page with boilerplate (scripts, navigation, banners…) removed.
struct ProductPage {
    document: Html,
    url: Option<Url>,
}

impl ProductPage {
    fn new(html: &str, page_url: &str) -> Self {
        let mut document = Html::parse_document(html);
        let noise: Vec<_> = NOISE
            .iter()
            .flat_map(|selector| document.select(selector).map(|element| element.id()))
            .collect();
        for id in noise {
            if let Some(mut node) = document.tree.get_mut(id) {
                node.detach();
            }
        }

        Self {
            document,
            url: Url::parse(page_url).ok(),
        }
    }

    fn select<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.document.select(selector)
    }

    fn first<'a>(&'a self, selector: &'a Selector) -> Option<ElementRef<'a>> {
        self.select(selector).next()
    }

    fn select_all<'a>(
        &'a self,
        selectors: &'a [Selector],
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        selectors.iter().flat_map(|selector| self.select(selector))
    }

    fn meta_content(&self, selectors: &[Selector]) -> String {
        selectors
            .iter()
            .find_map(|selector| {
                self.document
                    .select(selector)
                    .find_map(|meta| meta.value().attr("content"))
            })
            .unwrap_or_default()
            .to_string()
    }
}

fn select_within<'a>(
    element: ElementRef<'a>,
    selectors: &'a [Selector],
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    selectors
        .iter()
        .flat_map(move |selector| element.select(selector))
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in (*element).children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out);
                }
            }
            _ => {}
        }
    }
}

fn raw_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    collect_text(element, &mut text);
    text
}

/// Visible text of an element, trimmed.
fn text(element: ElementRef<'_>) -> String {
    raw_text(element).trim().to_string()
}

/// Text of all matched descendants concatenated, trimmed.
fn joined_text(element: ElementRef<'_>, selectors: &[Selector]) -> String {
    select_within(element, selectors)
        .map(raw_text)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Text of the first match of the first selector whose first match passes `accept`.
fn first_accepted_text(
    page: &ProductPage,
    selectors: &[Selector],
    accept: impl Fn(&str) -> bool,
) -> Option<String> {
    selectors
        .iter()
        .filter_map(|selector| page.first(selector).map(text))
        .find(|candidate| accept(candidate))
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

/// Extracts every product field from a fetched source page.
///
/// # Arguments
///
/// * `html` - The page HTML
/// * `page_url` - The URL the page was fetched from, used to resolve relative image URLs
/// * `text_by` - The readability method used for raw text when no product area is found
pub fn extract_product_page(html: &str, page_url: &str, text_by: TextBy) -> ScrapedProduct {
    let page = ProductPage::new(html, page_url);

    let og_description = page.meta_content(&OG_DESCRIPTION);
    let meta_description = if og_description.is_empty() {
        page.meta_content(&META_DESCRIPTION)
    } else {
        og_description
    };

    let mut raw_text = extract_raw_text(&page);
    if raw_text.is_empty() {
        raw_text = readable_text(html, text_by);
    }

    ScrapedProduct {
        title: extract_title(&page),
        description: extract_description(&page),
        short_description: extract_short_description(&page),
        features: extract_features(&page),
        specs: extract_specs(&page),
        images: extract_images(&page),
        source_url: page_url.to_string(),
        meta_description,
        brand: extract_brand(&page),
        sku: extract_sku(&page),
        price: extract_price(&page),
        raw_text,
    }
}

fn extract_title(page: &ProductPage) -> String {
    let heading = first_accepted_text(page, &TITLE, |title| {
        let length = char_len(title);
        length > 2 && length < 300
    });
    if let Some(heading) = heading {
        return heading;
    }

    let page_title: String = PAGE_TITLE
        .iter()
        .flat_map(|selector| page.document.select(selector))
        .map(raw_text)
        .collect();

    page_title
        .split('|')
        .next()
        .and_then(|title| title.split('-').next())
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn extract_short_description(page: &ProductPage) -> String {
    if let Some(short_description) =
        first_accepted_text(page, &SHORT_DESCRIPTION, |candidate| char_len(candidate) > 10)
    {
        return short_description;
    }

    let og_description = page.meta_content(&OG_DESCRIPTION);
    if char_len(&og_description) > 10 {
        return og_description;
    }

    String::new()
}

fn extract_description(page: &ProductPage) -> String {
    for selector in WOO_DESCRIPTION.iter() {
        let Some(panel) = page.first(selector) else {
            continue;
        };

        let paragraphs: Vec<String> = select_within(panel, &HEADINGS_AND_PARAGRAPHS)
            .map(text)
            .filter(|paragraph| char_len(paragraph) > 5)
            .collect();
        if !paragraphs.is_empty() {
            return paragraphs.join("\n\n");
        }

        let full_text = text(panel);
        if char_len(&full_text) > 20 {
            return full_text;
        }
    }

    let in_range = |candidate: &str| {
        let length = char_len(candidate);
        length > 20 && length < 2000
    };

    for selector in GENERIC_DESCRIPTION.iter() {
        let mut paragraphs: Vec<String> = Vec::new();
        for element in page.select(selector) {
            paragraphs.extend(
                select_within(element, &PARAGRAPHS)
                    .map(text)
                    .filter(|paragraph| in_range(paragraph)),
            );

            let direct_text = text(element);
            if in_range(&direct_text) && !paragraphs.contains(&direct_text) {
                paragraphs.push(direct_text);
            }
        }

        if !paragraphs.is_empty() {
            let mut unique = dedup_preserving_order(paragraphs);
            unique.truncate(MAX_DESCRIPTION_PARAGRAPHS);
            return unique.join("\n\n");
        }
    }

    page.meta_content(&OG_DESCRIPTION)
}

fn extract_features(page: &ProductPage) -> Vec<String> {
    let mut features: Vec<String> = Vec::new();

    for selector in FEATURE_LISTS.iter() {
        features.extend(page.select(selector).map(text).filter(|feature| {
            let length = char_len(feature);
            length > 3 && length < 500
        }));
        if !features.is_empty() {
            break;
        }
    }

    if features.is_empty() {
        for selector in ATTRIBUTE_TABLES.iter() {
            for table in page.select(selector) {
                for row in select_within(table, &ROWS) {
                    let label = joined_text(row, &HEADER_CELLS);
                    let value = joined_text(row, &DATA_CELLS);
                    if !label.is_empty() && !value.is_empty() {
                        features.push(format!("{label}: {value}"));
                    }
                }
            }
            if !features.is_empty() {
                break;
            }
        }
    }

    if features.is_empty() {
        for table in page.select_all(&TABLES) {
            for row in select_within(table, &ROWS) {
                let cells: Vec<ElementRef<'_>> = select_within(row, &CELLS).collect();
                if let [label_cell, value_cell] = cells.as_slice() {
                    let label = text(*label_cell);
                    let value = text(*value_cell);
                    if !label.is_empty()
                        && !value.is_empty()
                        && char_len(&label) < 100
                        && char_len(&value) < 200
                    {
                        features.push(format!("{label}: {value}"));
                    }
                }
            }
        }
    }

    let mut features = dedup_preserving_order(features);
    features.truncate(MAX_FEATURES);
    features
}

fn extract_specs(page: &ProductPage) -> BTreeMap<String, String> {
    let mut specs = BTreeMap::new();

    for selector in SPEC_CONTAINERS.iter() {
        for container in page.select(selector) {
            for row in select_within(container, &ROWS) {
                let key = joined_text(row, &HEADER_CELLS);
                let value = joined_text(row, &DATA_CELLS);
                if !key.is_empty() && !value.is_empty() {
                    specs.insert(key, value);
                }
            }

            for term in select_within(container, &DEFINITION_TERMS) {
                let key = text(term);
                let definition = (*term)
                    .next_siblings()
                    .find_map(ElementRef::wrap)
                    .filter(|sibling| sibling.value().name() == "dd");
                if let Some(definition) = definition
                    && !key.is_empty()
                {
                    specs.insert(key, text(definition));
                }
            }
        }

        if !specs.is_empty() {
            break;
        }
    }

    specs
}

/// Picks the best usable URL out of an image element's source attributes.
fn best_image_source(image: ElementRef<'_>, base_url: Option<&Url>) -> Option<String> {
    for attribute in IMAGE_SOURCE_ATTRIBUTES {
        let Some(source) = image
            .value()
            .attr(attribute)
            .filter(|source| !source.is_empty())
        else {
            continue;
        };

        if THUMBNAIL_MARKERS
            .iter()
            .any(|marker| source.contains(marker))
        {
            continue;
        }

        let resolved = if !source.starts_with("http") && !source.starts_with("data:") {
            match base_url.map(|base| base.join(source)) {
                Some(Ok(url)) => url.to_string(),
                _ => continue,
            }
        } else {
            source.to_string()
        };

        if resolved.starts_with("http")
            && !NON_PRODUCT_IMAGE_MARKERS
                .iter()
                .any(|marker| resolved.contains(marker))
        {
            return Some(WP_RESIZE_SUFFIX.replace(&resolved, "$1").into_owned());
        }
    }

    None
}

fn extract_images(page: &ProductPage) -> Vec<String> {
    let mut images: Vec<String> = Vec::new();

    for image in page.select_all(&GALLERY_IMAGES) {
        if let Some(source) = best_image_source(image, page.url.as_ref())
            && !images.contains(&source)
        {
            images.push(source);
        }
    }

    let og_image = page.meta_content(&OG_IMAGE);
    if og_image.starts_with("http") && !images.contains(&og_image) {
        images.push(og_image);
    }

    images.truncate(MAX_IMAGES);
    images
}

fn extract_brand(page: &ProductPage) -> String {
    first_accepted_text(page, &BRAND, |brand| {
        let length = char_len(brand);
        length > 1 && length < 100
    })
    .unwrap_or_default()
}

fn extract_sku(page: &ProductPage) -> String {
    first_accepted_text(page, &SKU, |sku| char_len(sku) > 1).unwrap_or_default()
}

/// Parses the leading float of a price text the way a lenient number parser would,
/// formatted in its shortest form (`12.50` gives `12.5`).
pub fn parse_price(price_text: &str) -> Option<String> {
    let cleaned: String = price_text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '£' | '$' | '€' | ','))
        .collect();

    let number = LEADING_FLOAT.captures(&cleaned)?.get(1)?.as_str();
    let value: f64 = number.parse().ok()?;
    value.is_finite().then(|| value.to_string())
}

fn extract_price(page: &ProductPage) -> String {
    PRICE
        .iter()
        .filter_map(|selector| page.first(selector))
        .find_map(|element| parse_price(&text(element)))
        .unwrap_or_default()
}

fn extract_raw_text(page: &ProductPage) -> String {
    let texts: Vec<String> = RAW_TEXT_AREAS
        .iter()
        .map(|selector| {
            let area_text: String = page.select(selector).map(raw_text).collect();
            WHITESPACE_RUN
                .replace_all(area_text.trim(), " ")
                .into_owned()
        })
        .filter(|area_text| char_len(area_text) > 20)
        .collect();

    truncate_chars(
        &dedup_preserving_order(texts).join("\n\n"),
        MAX_RAW_TEXT_CHARS,
    )
}

/// Readable text of the whole page, used when no product area could be found.
fn readable_text(html: &str, text_by: TextBy) -> String {
    let text = match text_by {
        TextBy::DomSmoothie => {
            let config = Config {
                text_mode: TextMode::Markdown,
                candidate_select_mode: CandidateSelectMode::DomSmoothie,
                ..Default::default()
            };

            let article: Result<Article, _> =
                Readability::new(html, None, Some(config)).and_then(|mut readability| readability.parse());
            match article {
                Ok(article) => article.text_content.to_string(),
                Err(e) => {
                    debug!("Readability found no article: {e}");
                    String::new()
                }
            }
        }
        TextBy::FastHtml2Md => html2md::parse_html(html, false),
    };

    truncate_chars(text.trim(), MAX_RAW_TEXT_CHARS)
}
