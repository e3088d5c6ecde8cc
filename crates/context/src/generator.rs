use crate::catalog::Category;
use crate::hash::{hash_string, seeded_shuffle};
use campaign_core::types::ContextBundle;

/// Build the context bundle for a URL.
///
/// Pure and total: the same input always yields the same bundle, and empty
/// or malformed input lands in the fallback category. The seed is hashed
/// from the URL as given; classification runs on its lower-cased form.
pub fn generate_context(url: &str) -> ContextBundle {
    let seed = hash_string(url);
    let category = Category::detect(&url.to_lowercase());
    let catalog = category.catalog();

    let headline_index = seed as usize % catalog.headlines.len();
    let description_index = seed as usize % catalog.descriptions.len();

    ContextBundle {
        topics: seeded_shuffle(&catalog.topics, seed),
        suggested_headline: catalog.headlines[headline_index].clone(),
        suggested_description: catalog.descriptions[description_index].clone(),
        warnings: Vec::new(),
    }
}
