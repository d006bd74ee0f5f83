use crate::model::{Asset, CategoryFilter};

/// Category filter first, then case-insensitive substring match on the name.
/// Surrounding whitespace in `search` is ignored, an empty search keeps everything.
pub fn filter_assets(assets: Vec<Asset>, category: CategoryFilter, search: &str) -> Vec<Asset> {
    let needle = search.trim().to_lowercase();
    assets
        .into_iter()
        .filter(|asset| category.matches(&asset.category))
        .filter(|asset| needle.is_empty() || asset.name.to_lowercase().contains(&needle))
        .collect()
}
