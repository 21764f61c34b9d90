//! The categories module scores products against the store category tree by keyword.

mod tree;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use tree::CATEGORY_TREE;

const MAX_SUGGESTIONS: usize = 8;
const PATH_SEPARATOR: &str = " > ";

/// A node of the category tree.
#[derive(Debug)]
pub struct CategoryNode {
    pub name: &'static str,
    /// Lower-case phrases that hint a product belongs here
    pub keywords: &'static [&'static str],
    pub children: &'static [CategoryNode],
}

/// A category flattened out of the tree with its full path.
#[derive(Debug)]
pub struct FlatCategory {
    pub name: &'static str,
    /// Full path, e.g. `Garden Machinery > Chainsaws and Accessories`
    pub path: String,
    pub keywords: &'static [&'static str],
}

/// A scored category suggestion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySuggestion {
    pub path: String,
    pub name: String,
    /// Sum of the lengths of matched keywords; longer matches are more specific
    pub score: usize,
}

static FLAT_CATEGORIES: Lazy<Vec<FlatCategory>> = Lazy::new(|| {
    let mut flat = Vec::new();
    flatten_into(CATEGORY_TREE, None, &mut flat);
    flat
});

/// Pre-order walk so that every parent precedes its children.
fn flatten_into(nodes: &'static [CategoryNode], parent: Option<&str>, flat: &mut Vec<FlatCategory>) {
    for node in nodes {
        let path = match parent {
            Some(parent) => format!("{parent}{PATH_SEPARATOR}{}", node.name),
            None => node.name.to_string(),
        };
        flat.push(FlatCategory {
            name: node.name,
            path: path.clone(),
            keywords: node.keywords,
        });
        flatten_into(node.children, Some(&path), flat);
    }
}

/// Returns every category in tree order.
pub fn flat_categories() -> &'static [FlatCategory] {
    &FLAT_CATEGORIES
}

/// Returns every category path in tree order.
pub fn all_category_paths() -> Vec<&'static str> {
    FLAT_CATEGORIES
        .iter()
        .map(|category| category.path.as_str())
        .collect()
}

/// Checks whether a path names a category of the tree exactly.
pub fn is_known_category(path: &str) -> bool {
    FLAT_CATEGORIES.iter().any(|category| category.path == path)
}

/// Suggests categories for a product based on its name and description.
///
/// Every category scores the total length of its keywords found in the
/// lower-cased text. Categories with no match are dropped, the rest are
/// ordered by score (ties keep tree order) and the best eight returned.
pub fn suggest_categories(name: &str, description: &str) -> Vec<CategorySuggestion> {
    let text = format!("{name} {description}").to_lowercase();

    let mut scored: Vec<CategorySuggestion> = FLAT_CATEGORIES
        .iter()
        .filter_map(|category| {
            let score: usize = category
                .keywords
                .iter()
                .filter(|keyword| text.contains(&keyword.to_lowercase()))
                .map(|keyword| keyword.len())
                .sum();

            (score > 0).then(|| CategorySuggestion {
                path: category.path.clone(),
                name: category.name.to_string(),
                score,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_SUGGESTIONS);
    scored
}
