use skumap::categories::CategorySuggestion;
use skumap::products::{self, ProductStats, ProductUpdate};
use skumap::storage::{Product, Status, Storage};
use spectral::prelude::*;

fn workspace() -> Storage {
    let storage = Storage::new(":memory:").unwrap();
    for (sku, name, status) in [
        ("HSA50", "Stihl HSA 50 Hedge Trimmer", Status::Confirmed),
        ("FW1", "Felling Wedge", Status::Pending),
        ("MS170", "Stihl MS 170 Chainsaw", Status::Complete),
        ("HS45", "Stihl HS 45 Hedge Trimmer", Status::Searching),
    ] {
        let mut product = Product::new(sku, name, "10");
        product.status = status;
        storage.insert_new_product(&product).unwrap();
    }
    storage
}

fn skus(products: &[Product]) -> Vec<&str> {
    products.iter().map(|product| product.sku.as_str()).collect()
}

#[test]
fn stats_count_each_status() {
    assert_that(&products::stats(&workspace()).unwrap()).is_equal_to(ProductStats {
        total: 4,
        pending: 1,
        searching: 1,
        confirmed: 1,
        complete: 1,
    });
}

#[test]
fn list_filters_by_status_and_query() {
    let storage = workspace();

    assert_that(&skus(&products::list(&storage, None, Some("hedge")).unwrap()))
        .is_equal_to(vec!["HSA50", "HS45"]);
    assert_that(&skus(&products::list(&storage, None, Some("ms1")).unwrap()))
        .is_equal_to(vec!["MS170"]);
    assert_that(&skus(
        &products::list(&storage, Some(Status::Searching), Some("STIHL")).unwrap(),
    ))
    .is_equal_to(vec!["HS45"]);
    assert_that(&products::list(&storage, None, Some("  ")).unwrap().len()).is_equal_to(4);
}

#[test]
fn edit_sets_fields_and_records_url() {
    let storage = workspace();

    let product = products::edit(
        &storage,
        "FW1",
        ProductUpdate {
            status: Some(Status::Complete),
            confirmed_url: Some(" https://dealer.example.org/wedge ".to_string()),
            price: Some(" 12.50 ".to_string()),
            notes: Some("Checked".to_string()),
            ..Default::default()
        },
    )
    .unwrap();

    assert_that(&product.status).is_equal_to(Status::Complete);
    assert_that(&product.confirmed_url)
        .is_equal_to("https://dealer.example.org/wedge".to_string());
    assert_that(&product.source_links)
        .is_equal_to(vec!["https://dealer.example.org/wedge".to_string()]);
    assert_that(&product.price).is_equal_to("12.50".to_string());
    assert_that(&storage.require_product("FW1").unwrap()).is_equal_to(product);
}

#[test]
fn edit_manages_categories() {
    let storage = workspace();
    let mut product = storage.require_product("HSA50").unwrap();
    product.categories = vec!["CLEARANCE".to_string()];
    product.suggested_categories = vec![
        CategorySuggestion {
            path: "Garden Machinery > Hedge Trimmers".to_string(),
            name: "Hedge Trimmers".to_string(),
            score: 13,
        },
        CategorySuggestion {
            path: "Garden Machinery > Cordless Garden Machinery".to_string(),
            name: "Cordless Garden Machinery".to_string(),
            score: 8,
        },
    ];
    storage.upsert_product(&product).unwrap();

    let product = products::edit(
        &storage,
        "HSA50",
        ProductUpdate {
            adopt_suggestions: Some(1),
            add_categories: vec!["Garden Machinery > Hedge Trimmers".to_string()],
            remove_categories: vec!["CLEARANCE".to_string()],
            ..Default::default()
        },
    )
    .unwrap();

    assert_that(&product.categories)
        .is_equal_to(vec!["Garden Machinery > Hedge Trimmers".to_string()]);
}

#[test]
fn edit_rejects_empty_name_and_unknown_sku() {
    let storage = workspace();

    let empty_name = products::edit(
        &storage,
        "FW1",
        ProductUpdate {
            name: Some("   ".to_string()),
            ..Default::default()
        },
    );
    let unknown = products::edit(&storage, "NOPE", ProductUpdate::default());

    assert_that(&empty_name.is_err()).is_true();
    assert_that(&storage.require_product("FW1").unwrap().name)
        .is_equal_to("Felling Wedge".to_string());
    assert_that(&unknown.unwrap_err().to_string())
        .is_equal_to("Product not found: NOPE".to_string());
}

#[test]
fn delete_and_reset() {
    let storage = workspace();

    products::delete(&storage, "FW1").unwrap();
    let missing = products::delete(&storage, "FW1");

    assert_that(&missing.unwrap_err().to_string())
        .is_equal_to("Product not found: FW1".to_string());
    assert_that(&products::reset(&storage).unwrap()).is_equal_to(3);
    assert_that(&products::stats(&storage).unwrap()).is_equal_to(ProductStats::default());
}
