//! Shared test harness for end-to-end augmentation tests
//!
//! Provides a small book library: `BookDto` and `CustomerDto` entities, an
//! in-memory `BookRepository` seeded with four books, and `BookLinks`, the
//! link producer a book resource would hand to the engine.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod library_harness;
//! use library_harness::*;
//! ```

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use hateoas::prelude::*;

pub const BASE_URI: &str = "http://localhost:8080/demo";
pub const BOOK_MEDIA_TYPE: &str = "application/vnd.demo.library.book+json";
pub const LOAN_MEDIA_TYPE: &str = "application/vnd.demo.library.loan+json";
pub const CUSTOMER_MEDIA_TYPE: &str = "application/vnd.demo.library.customer+json";

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A library customer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomerDto {
    pub id: i64,
    pub name: String,
}

impl_entity!(CustomerDto, "CustomerDto", {
    id: i64,
    name: String,
});

/// A book as exposed by the book resource
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookDto {
    pub id: i64,
    pub author: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrowed_by: Option<i64>,
}

impl_entity!(BookDto, "BookDto", {
    id: i64,
    author: String,
    title: String,
    borrowed_by: Option<i64>,
});

impl BookDto {
    pub fn is_borrowed(&self) -> bool {
        self.borrowed_by.is_some()
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// Books and customers kept in memory, ordered by id
#[derive(Debug, Default)]
pub struct BookRepository {
    books: RwLock<BTreeMap<i64, BookDto>>,
    customers: RwLock<BTreeMap<i64, CustomerDto>>,
    next_id: AtomicI64,
}

impl BookRepository {
    /// Repository holding the four demo books and one customer
    pub fn seeded() -> Self {
        let repository = Self::default();
        repository.new_book("J.R.R. Tolkien", "Lord of the Rings");
        repository.new_book("Cormac McCarthy", "The Road");
        repository.new_book("George R.R. Martin", "The Game of Thrones");
        repository.new_book("George R.R. Martin", "A Clash of Kings");
        repository.new_customer("Arthur Dent");
        repository
    }

    pub fn new_book(&self, author: &str, title: &str) -> BookDto {
        let book = BookDto {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            author: author.to_string(),
            title: title.to_string(),
            borrowed_by: None,
        };
        self.books.write().unwrap().insert(book.id, book.clone());
        book
    }

    pub fn new_customer(&self, name: &str) -> CustomerDto {
        let customer = CustomerDto {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: name.to_string(),
        };
        self.customers
            .write()
            .unwrap()
            .insert(customer.id, customer.clone());
        customer
    }

    pub fn book(&self, id: i64) -> Option<BookDto> {
        self.books.read().unwrap().get(&id).cloned()
    }

    pub fn all_books(&self) -> Vec<BookDto> {
        self.books.read().unwrap().values().cloned().collect()
    }

    pub fn customers(&self) -> Vec<CustomerDto> {
        self.customers.read().unwrap().values().cloned().collect()
    }

    pub fn lend(&self, book_id: i64, customer_id: i64) -> Option<BookDto> {
        let mut books = self.books.write().unwrap();
        let book = books.get_mut(&book_id)?;
        book.borrowed_by = Some(customer_id);
        Some(book.clone())
    }

    pub fn loans(&self) -> Vec<BookDto> {
        self.all_books()
            .into_iter()
            .filter(BookDto::is_borrowed)
            .collect()
    }

    pub fn loans_for_customer(&self, customer_id: i64) -> Vec<BookDto> {
        self.all_books()
            .into_iter()
            .filter(|book| book.borrowed_by == Some(customer_id))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Link producer
// ---------------------------------------------------------------------------

/// Links a book resource attaches to every book it returns
pub struct BookLinks {
    ctx: RequestContext,
}

impl BookLinks {
    pub fn new(ctx: RequestContext) -> Self {
        Self { ctx }
    }
}

impl LinkProducer<BookDto> for BookLinks {
    type Link = HateoasLink;

    fn links(&self, book: &BookDto) -> Vec<HateoasLink> {
        let book_uri = self.ctx.resolve(&format!("library/books/{}", book.id));

        let mut links = vec![
            HateoasLink::new("self", LinkTarget::get(book_uri.clone()))
                .expect("static rel")
                .with_id("book-self")
                .with_label("Book")
                .with_description("This book")
                .produces(BOOK_MEDIA_TYPE),
            HateoasLink::new("update", LinkTarget::new(book_uri, "PUT"))
                .expect("static rel")
                .consumes(BOOK_MEDIA_TYPE)
                .produces(BOOK_MEDIA_TYPE),
        ];

        match book.borrowed_by {
            Some(customer_id) => links.push(
                HateoasLink::new(
                    "customer",
                    LinkTarget::get(self.ctx.resolve(&format!("library/customers/{customer_id}"))),
                )
                .expect("static rel")
                .produces(CUSTOMER_MEDIA_TYPE),
            ),
            None => links.push(
                HateoasLink::new(
                    "loan",
                    LinkTarget::new(self.ctx.resolve("library/loans"), "POST"),
                )
                .expect("static rel")
                .consumes(LOAN_MEDIA_TYPE)
                .with_attribute("bookId", book.id),
            ),
        }

        links
    }
}

/// Request context as the book resource would build it from headers
pub fn request_context(options_header: Option<&str>) -> RequestContext {
    RequestContext::from_header(BASE_URI, options_header)
}

/// Install a test subscriber honouring `RUST_LOG`; repeated calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
