//! End-to-end augmentation of the demo book library
//!
//! A book resource fetches books from the repository, builds a request
//! context from the options header and returns augmented books as JSON.

mod library_harness;

use hateoas::prelude::*;
use library_harness::*;
use serde_json::json;

fn books_uri(id: i64) -> String {
    format!("{BASE_URI}/library/books/{id}")
}

fn get_book(
    repository: &BookRepository,
    engine: &AugmentationEngine,
    config: &HateoasConfig,
    id: i64,
    options_header: Option<&str>,
) -> serde_json::Value {
    let headers: Vec<(&str, &str)> = options_header
        .map(|value| (config.options_header.as_str(), value))
        .into_iter()
        .collect();
    let ctx = config.request_context(BASE_URI, headers);
    let verbosity = config.verbosity_for(&ctx);
    let book = repository.book(id).expect("seeded book");

    let augmented = engine
        .augment(&book, &BookLinks::new(ctx), verbosity)
        .unwrap();
    serde_json::to_value(&augmented).unwrap()
}

#[test]
fn test_seeded_repository() {
    let repository = BookRepository::seeded();

    let titles: Vec<_> = repository
        .all_books()
        .into_iter()
        .map(|b| b.title)
        .collect();
    assert_eq!(
        titles,
        [
            "Lord of the Rings",
            "The Road",
            "The Game of Thrones",
            "A Clash of Kings"
        ]
    );
    assert!(repository.loans().is_empty());
}

#[test]
fn test_book_in_list_mode_at_minimum_verbosity() {
    init_tracing();
    let repository = BookRepository::seeded();
    let config = HateoasConfig::default();
    let engine = AugmentationEngine::from_config(&config);

    let json = get_book(&repository, &engine, &config, 0, None);

    assert_eq!(
        json,
        json!({
            "id": 0,
            "author": "J.R.R. Tolkien",
            "title": "Lord of the Rings",
            "links": [
                {"rel": "self", "href": books_uri(0), "method": "GET"},
                {"rel": "update", "href": books_uri(0), "method": "PUT"},
                {"rel": "loan", "href": format!("{BASE_URI}/library/loans"), "method": "POST"}
            ]
        })
    );
}

#[test]
fn test_book_in_map_mode_with_requested_verbosity() {
    init_tracing();
    let repository = BookRepository::seeded();
    let config = HateoasConfig::from_yaml_str("storage: map\n").unwrap();
    let engine = AugmentationEngine::from_config(&config);

    let json = get_book(&repository, &engine, &config, 1, Some("basic"));

    assert_eq!(
        json,
        json!({
            "id": 1,
            "author": "Cormac McCarthy",
            "title": "The Road",
            "links": {
                "self": {
                    "href": books_uri(1),
                    "method": "GET",
                    "produces": [BOOK_MEDIA_TYPE]
                },
                "update": {
                    "href": books_uri(1),
                    "method": "PUT",
                    "consumes": [BOOK_MEDIA_TYPE],
                    "produces": [BOOK_MEDIA_TYPE]
                },
                "loan": {
                    "href": format!("{BASE_URI}/library/loans"),
                    "method": "POST",
                    "consumes": [LOAN_MEDIA_TYPE]
                }
            }
        })
    );
}

#[test]
fn test_full_verbosity_includes_every_attribute() {
    let repository = BookRepository::seeded();
    let config = HateoasConfig::from_yaml_str("storage: map\nverbosity: FULL\n").unwrap();
    let engine = AugmentationEngine::from_config(&config);

    let json = get_book(&repository, &engine, &config, 2, None);

    assert_eq!(
        json["links"]["self"],
        json!({
            "id": "book-self",
            "href": books_uri(2),
            "method": "GET",
            "produces": [BOOK_MEDIA_TYPE],
            "label": "Book",
            "description": "This book"
        })
    );
    assert_eq!(json["links"]["loan"]["bookId"], json!(2));
}

#[test]
fn test_unknown_options_header_falls_back_to_config() {
    let repository = BookRepository::seeded();
    let config = HateoasConfig::from_yaml_str("storage: map\nverbosity: GENERIC\n").unwrap();
    let engine = AugmentationEngine::from_config(&config);

    let json = get_book(&repository, &engine, &config, 0, Some("verbose-please"));

    assert_eq!(json["links"]["self"]["label"], json!("Book"));
    assert!(json["links"]["self"].get("id").is_none());
}

#[test]
fn test_borrowed_book_links_to_customer() {
    let repository = BookRepository::seeded();
    let customer = repository.customers().remove(0);
    repository.lend(3, customer.id).unwrap();

    let config = HateoasConfig::from_yaml_str("storage: map\n").unwrap();
    let engine = AugmentationEngine::from_config(&config);
    let json = get_book(&repository, &engine, &config, 3, None);

    assert_eq!(json["borrowed_by"], json!(customer.id));
    assert_eq!(
        json["links"]["customer"]["href"],
        json!(format!("{BASE_URI}/library/customers/{}", customer.id))
    );
    assert!(json["links"].get("loan").is_none());
    assert_eq!(repository.loans_for_customer(customer.id).len(), 1);
}

#[test]
fn test_all_books_keep_repository_order() {
    let repository = BookRepository::seeded();
    let engine = AugmentationEngine::new(StorageMode::List);
    let producer = BookLinks::new(request_context(None));

    let books = repository.all_books();
    let augmented = engine
        .augment_all(&books, &producer, Verbosity::Minimum)
        .unwrap();

    assert_eq!(augmented.len(), 4);
    for (book, augmented) in books.iter().zip(&augmented) {
        assert_eq!(augmented.entity(), book);
        assert_eq!(
            augmented.links().as_list().unwrap()[0]["href"],
            json!(books_uri(book.id))
        );
    }
}

#[test]
fn test_customer_without_links() {
    let repository = BookRepository::seeded();
    let engine = AugmentationEngine::new(StorageMode::List);
    let customer = repository.customers().remove(0);

    let augmented = engine
        .augment(&customer, &NoLinks, Verbosity::Full)
        .unwrap();

    assert_eq!(
        serde_json::to_value(&augmented).unwrap(),
        json!({"id": customer.id, "name": "Arthur Dent", "links": []})
    );
}

#[test]
fn test_custom_options_header_is_honoured() {
    let repository = BookRepository::seeded();
    let config =
        HateoasConfig::from_yaml_str("storage: map\noptions_header: X-Library-Links\n").unwrap();
    let engine = AugmentationEngine::from_config(&config);
    let book = repository.book(0).unwrap();

    let ctx = config.request_context(
        BASE_URI,
        [(HATEOAS_OPTIONS_HEADER, "MINIMUM"), ("X-LIBRARY-LINKS", "generic")],
    );
    let verbosity = config.verbosity_for(&ctx);
    let augmented = engine
        .augment(&book, &BookLinks::new(ctx), verbosity)
        .unwrap();

    let json = serde_json::to_value(&augmented).unwrap();
    assert_eq!(verbosity, Verbosity::Generic);
    assert_eq!(json["links"]["self"]["description"], json!("This book"));
}
