//! Per-category copy catalogs and URL classification.

use regex::Regex;
use std::sync::LazyLock;

static PRODUCT_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/product/([^/?]+)").expect("valid product path regex"));

static DOMAIN_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9-]+)\.[a-z]+").expect("valid domain regex"));

const COFFEE_KEYWORDS: &[&str] = &["coffee", "cafe", "espresso"];
const FASHION_KEYWORDS: &[&str] = &["fashion", "wear", "apparel", "clothing"];
const BAKERY_KEYWORDS: &[&str] = &["bakery", "bakes", "cake"];
const FITNESS_KEYWORDS: &[&str] = &["fitness", "gym", "yoga"];
const PRODUCT_MARKERS: &[&str] = &["/product/", "?product="];

const DEFAULT_PRODUCT_HINT: &str = "Product";
const DEFAULT_DOMAIN_TOKENS: &[&str] = &["Business", "Services", "Quality"];

/// Theme a URL resolves to. Variants are tried in declaration order and the
/// first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Coffee,
    Fashion,
    Bakery,
    Fitness,
    /// Transactional product page; `hint` is interpolated into every template.
    Product { hint: String },
    /// Anything else, themed on the first usable domain token.
    Fallback { token: String },
}

/// Copy tables owned by one category: 5 topics, 4 headlines, 3 descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub topics: Vec<String>,
    pub headlines: Vec<String>,
    pub descriptions: Vec<String>,
}

impl Category {
    /// Classify an already lower-cased URL.
    pub fn detect(lower_url: &str) -> Self {
        let has_any = |words: &[&str]| words.iter().any(|w| lower_url.contains(w));

        if has_any(COFFEE_KEYWORDS) {
            Category::Coffee
        } else if has_any(FASHION_KEYWORDS) {
            Category::Fashion
        } else if has_any(BAKERY_KEYWORDS) {
            Category::Bakery
        } else if has_any(FITNESS_KEYWORDS) {
            Category::Fitness
        } else if has_any(PRODUCT_MARKERS) {
            Category::Product {
                hint: product_hint(lower_url),
            }
        } else {
            Category::Fallback {
                token: domain_token(lower_url),
            }
        }
    }

    pub fn catalog(&self) -> Catalog {
        match self {
            Category::Coffee => Catalog::from_static(
                &["Coffee", "Espresso", "Cafe Culture", "Artisan Brewing", "Morning Rituals"],
                &[
                    "Premium Coffee Delivered Fresh",
                    "Artisan Coffee at Your Doorstep",
                    "Wake Up to Freshly Roasted Coffee",
                    "Discover Exceptional Coffee Blends",
                ],
                &[
                    "Experience the perfect cup every morning. Premium beans, expert roasting.",
                    "From bean to cup - authentic coffee crafted with passion and precision.",
                    "Elevate your coffee ritual with our handpicked selection of premium blends.",
                ],
            ),
            Category::Fashion => Catalog::from_static(
                &["Fashion", "Style", "Trendy Apparel", "Designer Wear", "Seasonal Collections"],
                &[
                    "Latest Fashion Trends - Shop Now",
                    "Discover Your Perfect Style",
                    "Premium Apparel for Every Occasion",
                    "Elevate Your Wardrobe Today",
                ],
                &[
                    "Find the perfect outfit. Curated collections from top designers.",
                    "Express yourself through fashion. Quality apparel that fits your lifestyle.",
                    "From casual to formal - discover styles that define you.",
                ],
            ),
            Category::Bakery => Catalog::from_static(
                &["Bakery", "Fresh Baked Goods", "Artisan Pastries", "Custom Cakes", "Daily Specials"],
                &[
                    "Fresh Baked Daily - Order Now",
                    "Artisan Bakery Goods Delivered",
                    "Custom Cakes for Every Celebration",
                    "Taste the Difference - Fresh Daily",
                ],
                &[
                    "Freshly baked pastries and breads made daily with premium ingredients.",
                    "From classic to creative - bakery goods that delight every palate.",
                    "Celebrate life's moments with our custom cakes and artisan treats.",
                ],
            ),
            Category::Fitness => Catalog::from_static(
                &["Fitness", "Wellness", "Workout Programs", "Yoga Classes", "Health Goals"],
                &[
                    "Transform Your Fitness Journey",
                    "Achieve Your Health Goals Today",
                    "Expert-Led Fitness Programs",
                    "Your Path to Wellness Starts Here",
                ],
                &[
                    "Personalized fitness programs designed to help you reach your goals.",
                    "Join a community committed to health, wellness, and transformation.",
                    "Expert trainers, flexible schedules, proven results - start today.",
                ],
            ),
            Category::Product { hint } => Catalog {
                topics: vec![
                    format!("Buy {hint}"),
                    "Shop Online".to_string(),
                    "Product Deals".to_string(),
                    "Fast Shipping".to_string(),
                    "Secure Checkout".to_string(),
                ],
                headlines: vec![
                    format!("Buy {hint} - Best Prices"),
                    format!("{hint} - Free Shipping Available"),
                    format!("Shop {hint} - Order Today"),
                    format!("Premium {hint} - Shop Now"),
                ],
                descriptions: vec![
                    format!("Find the best {hint} at competitive prices. Fast, secure checkout."),
                    format!("Shop {hint} with confidence. Free shipping on orders over $50."),
                    format!("Quality {hint} delivered to your door. Easy returns guaranteed."),
                ],
            },
            Category::Fallback { token } => Catalog {
                topics: vec![
                    "Business Growth".to_string(),
                    format!("{token} Online"),
                    "Professional Services".to_string(),
                    format!("Quality {token}"),
                    "Local Business".to_string(),
                ],
                headlines: vec![
                    format!("Discover {token} Services"),
                    format!("{token} - Your Trusted Provider"),
                    format!("Quality {token} Solutions"),
                    format!("Professional {token} Services"),
                ],
                descriptions: vec![
                    format!("Expert {token} services tailored to your needs. Get started today."),
                    format!("Trusted by customers for quality {token}. Discover the difference."),
                    format!("Professional {token} solutions delivered with care and expertise."),
                ],
            },
        }
    }
}

impl Catalog {
    fn from_static(topics: &[&str], headlines: &[&str], descriptions: &[&str]) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            topics: owned(topics),
            headlines: owned(headlines),
            descriptions: owned(descriptions),
        }
    }
}

/// Path segment after `/product/`, hyphens read as spaces. `?product=` URLs
/// carry no usable segment and get the generic hint.
fn product_hint(lower_url: &str) -> String {
    match PRODUCT_SEGMENT.captures(lower_url) {
        Some(caps) => caps[1]
            .replace(['-', '/'], " ")
            .trim_matches(is_trimmable)
            .to_string(),
        None => DEFAULT_PRODUCT_HINT.to_string(),
    }
}

/// Whitespace stripped from hint edges: Unicode white space plus the byte
/// order mark, minus NEL.
fn is_trimmable(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// First hyphen-delimited token longer than two characters from the first
/// `label.tld` run in the URL.
fn domain_token(lower_url: &str) -> String {
    DOMAIN_LABEL
        .captures(lower_url)
        .and_then(|caps| {
            caps[1]
                .split('-')
                .find(|token| token.chars().count() > 2)
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_DOMAIN_TOKENS[0].to_string())
}
