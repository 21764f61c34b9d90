use skumap::categories::{
    CategorySuggestion, all_category_paths, is_known_category, suggest_categories,
};
use spectral::prelude::*;

fn scored_paths(suggestions: &[CategorySuggestion]) -> Vec<(&str, usize)> {
    suggestions
        .iter()
        .map(|suggestion| (suggestion.path.as_str(), suggestion.score))
        .collect()
}

#[test]
fn paths_are_flattened_in_tree_order() {
    let paths = all_category_paths();

    assert_that(&paths[0]).is_equal_to("Arborist Equipment");
    assert_that(&paths[1]).is_equal_to("Arborist Equipment > Accessories");
    assert_that(&paths.contains(&"Garden Machinery > Chainsaws and Accessories > Cordless Chainsaws"))
        .is_true();
}

#[test]
fn known_categories_need_the_exact_path() {
    assert_that(&is_known_category("Garden Machinery > Hedge Trimmers")).is_true();
    assert_that(&is_known_category("Hedge Trimmers")).is_false();
    assert_that(&is_known_category("garden machinery > hedge trimmers")).is_false();
}

#[test]
fn longer_keyword_matches_rank_first() {
    let suggestions = suggest_categories("Stihl HSA 50 Cordless Hedge Trimmer", "");

    assert_that(&scored_paths(&suggestions)).is_equal_to(vec![
        ("Garden Machinery > Hedge Trimmers", 13),
        ("Garden Machinery > Cordless Garden Machinery", 8),
        ("Garden Machinery > Grass Trimmers and Brushcutters", 7),
    ]);
    assert_that(&suggestions[0].name).is_equal_to("Hedge Trimmers".to_string());
}

#[test]
fn description_contributes_to_scores() {
    let suggestions = suggest_categories("Cordless saw", "A chainsaw with a spare chain.");

    assert_that(&suggestions[0].path)
        .is_equal_to("Garden Machinery > Chainsaws and Accessories".to_string());
}

#[test]
fn ties_keep_tree_order() {
    let suggestions = suggest_categories("Polyester sling", "");

    assert_that(&scored_paths(&suggestions)).is_equal_to(vec![
        ("Arborist Equipment > Lifting Slings", 5),
        ("Arborist Equipment > Prusik Rope - Accessory Cords and Slings", 5),
    ]);
}

#[test]
fn unrelated_text_has_no_suggestions() {
    assert_that(&suggest_categories("zzzz", "qqq").is_empty()).is_true();
}
