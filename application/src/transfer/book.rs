use time::OffsetDateTime;

use kernel::prelude::entity::Book;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookDto {
    pub isbn: String,
    pub title: String,
    pub price: i32,
    pub stock: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        Self {
            isbn: value.isbn().as_ref().clone(),
            title: value.title().as_ref().clone(),
            price: *value.price().as_ref(),
            stock: *value.stock().as_ref(),
            created_at: *value.created_at().as_ref(),
            updated_at: *value.updated_at().as_ref(),
        }
    }
}

#[derive(Debug)]
pub struct GetBookDto {
    pub isbn: String,
}

#[derive(Debug)]
pub struct CreateBookDto {
    pub isbn: String,
    pub title: String,
    pub price: i32,
    pub stock: i32,
}

/// `stock` is the desired absolute stock, not a delta.
#[derive(Debug)]
pub struct UpdateBookDto {
    pub isbn: String,
    pub title: String,
    pub price: i32,
    pub stock: i32,
}

#[derive(Debug)]
pub struct DeleteBookDto {
    pub isbn: String,
}
