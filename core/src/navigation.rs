use reqwest::Url;

use crate::model::{Category, CategoryFilter};

pub fn category_param(location: &Url) -> Option<String> {
    location
        .query_pairs()
        .find(|(key, _)| key == "category")
        .map(|(_, value)| value.into_owned())
}

/// Reads the `category` query parameter of the current location.
pub fn category_from_location(location: &Url) -> CategoryFilter {
    CategoryFilter::from_param(category_param(location).as_deref())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    pub is_active: bool,
}

/// One link per category plus "all", in display order.
pub fn category_links() -> Vec<NavLink> {
    std::iter::once(CategoryFilter::All)
        .chain(Category::all().map(CategoryFilter::Only))
        .map(|filter| NavLink {
            label: match filter {
                CategoryFilter::All => "All".to_owned(),
                CategoryFilter::Only(category) => crate::model::capitalize(category.as_ref()),
            },
            href: format!("/?category={}", filter),
            is_active: false,
        })
        .collect()
}

/// A link is active when its href contains the active category name.
pub fn mark_active(links: &mut [NavLink], active: CategoryFilter) {
    for link in links.iter_mut() {
        link.is_active = link.href.contains(active.as_str());
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn location_query() {
        let url = |s: &str| Url::parse(s).unwrap();
        assert_eq!(
            category_from_location(&url("http://localhost:8080/?search=x&category=capcut")),
            CategoryFilter::Only(Category::Capcut)
        );
        assert_eq!(
            category_from_location(&url("http://localhost:8080/?category=video")),
            CategoryFilter::All
        );
        assert_eq!(
            category_from_location(&url("http://localhost:8080/")),
            CategoryFilter::All
        );
    }

    #[test]
    fn marks_matching_link() {
        let mut links = category_links();
        mark_active(&mut links, CategoryFilter::Only(Category::Premiere));
        let active: Vec<&str> = links
            .iter()
            .filter(|l| l.is_active)
            .map(|l| l.label.as_str())
            .collect();
        assert_eq!(active, vec!["Premiere"]);

        mark_active(&mut links, CategoryFilter::All);
        let active: Vec<&str> = links
            .iter()
            .filter(|l| l.is_active)
            .map(|l| l.href.as_str())
            .collect();
        assert_eq!(active, vec!["/?category=all"]);
    }
}
