use skumap::ProductTarget;
use skumap::categories::CategorySuggestion;
use skumap::parse::ScrapedProduct;
use skumap::storage::{Product, ProductImage, Status, Storage};
use spectral::prelude::*;

fn skus(products: &[Product]) -> Vec<&str> {
    products.iter().map(|product| product.sku.as_str()).collect()
}

fn workspace(products: &[(&str, Status)]) -> Storage {
    let storage = Storage::new(":memory:").unwrap();
    for (sku, status) in products {
        let mut product = Product::new(*sku, format!("Product {sku}"), "10");
        product.status = *status;
        storage.insert_new_product(&product).unwrap();
    }
    storage
}

#[test]
fn product_round_trips_with_json_fields() {
    let storage = Storage::new(":memory:").unwrap();
    let mut product = Product::new("HSA50", "Stihl HSA 50", "199.00");
    product.status = Status::Confirmed;
    product.confirmed_url = "https://shop.example.com/hsa-50".to_string();
    product.categories = vec!["Garden Machinery > Hedge Trimmers".to_string()];
    product.suggested_categories = vec![CategorySuggestion {
        path: "Garden Machinery > Hedge Trimmers".to_string(),
        name: "Hedge Trimmers".to_string(),
        score: 13,
    }];
    product.images = vec![ProductImage {
        url: "https://shop.example.com/hsa50.jpg".to_string(),
        approved: true,
        filename: "HSA50-stihl-hsa-50.jpg".to_string(),
    }];
    product.source_links = vec!["https://shop.example.com/hsa-50".to_string()];
    product.scraped_data = Some(ScrapedProduct {
        title: "Stihl HSA 50".to_string(),
        ..Default::default()
    });
    product.notes = "Check the blade length.".to_string();

    storage.upsert_product(&product).unwrap();

    assert_that(&storage.get_product("HSA50").unwrap()).is_equal_to(Some(product));
    assert_that(&storage.get_product("missing").unwrap()).is_equal_to(None);
}

#[test]
fn upsert_keeps_import_order() {
    let storage = workspace(&[("A", Status::Pending), ("B", Status::Pending)]);
    let mut first = storage.require_product("A").unwrap();
    first.name = "Renamed".to_string();
    storage.upsert_product(&first).unwrap();

    let products = storage.list_products().unwrap();

    assert_that(&skus(&products)).is_equal_to(vec!["A", "B"]);
    assert_that(&products[0].name).is_equal_to("Renamed".to_string());
}

#[test]
fn insert_new_product_never_overwrites() {
    let storage = workspace(&[("A", Status::Complete)]);

    let inserted = storage
        .insert_new_product(&Product::new("A", "Other", "1"))
        .unwrap();

    assert_that(&inserted).is_false();
    assert_that(&storage.require_product("A").unwrap().status).is_equal_to(Status::Complete);
}

#[test]
fn targets_resolve_to_products() {
    let storage = workspace(&[
        ("A", Status::Pending),
        ("B", Status::Confirmed),
        ("C", Status::Pending),
    ]);

    assert_that(&skus(&storage.resolve_target(&ProductTarget::All).unwrap()))
        .is_equal_to(vec!["A", "B", "C"]);
    assert_that(&skus(
        &storage
            .resolve_target(&ProductTarget::Status(Status::Pending))
            .unwrap(),
    ))
    .is_equal_to(vec!["A", "C"]);
    assert_that(&skus(
        &storage
            .resolve_target(&ProductTarget::from("B"))
            .unwrap(),
    ))
    .is_equal_to(vec!["B"]);

    let error = storage
        .resolve_target(&ProductTarget::from("Z"))
        .unwrap_err();
    assert_that(&error.to_string()).is_equal_to("Product not found: Z".to_string());
}

#[test]
fn target_parsing() {
    assert_that(&ProductTarget::from("all")).is_equal_to(ProductTarget::All);
    assert_that(&ProductTarget::from("confirmed"))
        .is_equal_to(ProductTarget::Status(Status::Confirmed));
    assert_that(&ProductTarget::from("Complete")).is_equal_to(ProductTarget::Sku {
        sku: "Complete".to_string(),
    });
    assert_that(&ProductTarget::from("HSA50")).is_equal_to(ProductTarget::Sku {
        sku: "HSA50".to_string(),
    });
}

#[test]
fn counts_delete_and_clear() {
    let storage = workspace(&[
        ("A", Status::Pending),
        ("B", Status::Complete),
        ("C", Status::Complete),
    ]);

    assert_that(&storage.count_products(None).unwrap()).is_equal_to(3);
    assert_that(&storage.count_products(Some(Status::Complete)).unwrap()).is_equal_to(2);

    assert_that(&storage.delete_product("B").unwrap()).is_true();
    assert_that(&storage.delete_product("B").unwrap()).is_false();

    assert_that(&storage.clear_products().unwrap()).is_equal_to(2);
    assert_that(&storage.count_products(None).unwrap()).is_equal_to(0);
}

#[test]
fn status_parsing_rejects_unknown_names() {
    assert_that(&"searching".parse::<Status>()).is_equal_to(Ok(Status::Searching));
    assert_that(&"done".parse::<Status>())
        .is_equal_to(Err("Invalid product status: done".to_string()));
}
