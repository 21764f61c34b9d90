pub const MODEL_API_KEY_ENV_NAME: &str = "SKUMAP_MODEL_API_KEY";
pub const GOOGLE_API_KEY_ENV_NAME: &str = "SKUMAP_GOOGLE_API_KEY";
pub const GOOGLE_CSE_ID_ENV_NAME: &str = "SKUMAP_GOOGLE_CSE_ID";

pub const DEFAULT_EXPORT_DOMAIN: &str = "briantsofrisborough.co.uk";

pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub(crate) const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
pub(crate) const ACCEPT_LANGUAGE_EN_GB: &str = "en-GB,en;q=0.9";

pub(crate) const THINK_STRIPPER: &str = r"<think>[\s\S]*</think>\s*";

/// Hosts that never count as a product source page.
pub const URL_EXCLUSIONS: &[&str] = &[
    "duckduckgo.com",
    "yahoo.com",
    "google.com",
    "amazon",
    "ebay",
    "wikipedia.org",
    "youtube.com",
    "facebook.com",
    "pinterest.com",
    "instagram.com",
    "twitter.com",
    "linkedin.com",
    "bing.com",
    "tiktok.com",
    "yell.com",
    "yelp.com",
    "checkatrade.com",
    "trustpilot.com",
    "reddit.com",
];

pub(crate) const DEFAULT_PROMPT_PREAMBLE: &str = "You are a product copywriter for a UK-based specialist retailer selling agricultural, forestry, garden, and hardware products.";
