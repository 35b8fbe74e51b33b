use application::transfer::{CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};
use kernel::prelude::entity::BookIsbn;
use kernel::KernelError;
use serde::Deserialize;

use crate::controller::{Intake, TryIntake};
use crate::request::require;

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    isbn: String,
    title: String,
    price: i32,
    stock: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    title: String,
    price: i32,
    stock: i32,
}

#[derive(Debug)]
pub struct GetBookRequest {
    isbn: String,
}

impl GetBookRequest {
    pub fn new(isbn: String) -> Self {
        Self { isbn }
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    isbn: String,
}

impl DeleteBookRequest {
    pub fn new(isbn: String) -> Self {
        Self { isbn }
    }
}

fn validate(title: &str, price: i32, stock: i32) -> error_stack::Result<(), KernelError> {
    require(!title.is_empty(), "title must not be empty")?;
    require(price >= 0, "price must be 0 or greater")?;
    require(stock >= 0, "stock must be 0 or greater")
}

pub struct BookTransformer;

impl TryIntake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    type Error = error_stack::Report<KernelError>;
    fn emit(&self, input: CreateBookRequest) -> Result<Self::To, Self::Error> {
        require(
            input.isbn.chars().count() == BookIsbn::LENGTH,
            "isbn must be 13 characters",
        )?;
        validate(&input.title, input.price, input.stock)?;
        Ok(CreateBookDto {
            isbn: input.isbn,
            title: input.title,
            price: input.price,
            stock: input.stock,
        })
    }
}

impl TryIntake<(String, UpdateBookRequest)> for BookTransformer {
    type To = UpdateBookDto;
    type Error = error_stack::Report<KernelError>;
    fn emit(&self, (isbn, input): (String, UpdateBookRequest)) -> Result<Self::To, Self::Error> {
        validate(&input.title, input.price, input.stock)?;
        Ok(UpdateBookDto {
            isbn,
            title: input.title,
            price: input.price,
            stock: input.stock,
        })
    }
}

impl Intake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        GetBookDto { isbn: input.isbn }
    }
}

impl Intake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteBookRequest) -> Self::To {
        DeleteBookDto { isbn: input.isbn }
    }
}
