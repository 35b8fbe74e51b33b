use uuid::Uuid;

use application::service::{
    CreateBookService, CreateCustomerService, DeleteBookService, DeleteCustomerService,
    GetBookService, GetCustomerService, UpdateBookService, UpdateCustomerService,
};
use application::transfer::{
    CreateBookDto, CreateCustomerDto, DeleteBookDto, DeleteCustomerDto, GetBookDto,
    GetCustomerDto, UpdateBookDto, UpdateCustomerDto,
};
use driver::database::InMemoryDatabase;
use kernel::KernelError;

fn rust_book(stock: i32) -> CreateBookDto {
    CreateBookDto {
        isbn: "9784297100339".to_string(),
        title: "Rust Book".to_string(),
        price: 3000,
        stock,
    }
}

#[tokio::test]
async fn books_are_unique_by_isbn() {
    let db = InMemoryDatabase::new();
    let created = db.create_book(rust_book(10)).await.unwrap();
    assert_eq!(created.stock, 10);

    let error = db.create_book(rust_book(1)).await.unwrap_err();
    assert!(matches!(
        error.current_context(),
        KernelError::InvalidArgument { .. }
    ));
    let books = db.get_all_books().await.unwrap();
    assert_eq!(books, vec![created]);
}

#[tokio::test]
async fn invalid_books_are_rejected() {
    let db = InMemoryDatabase::new();
    let error = db.create_book(rust_book(-1)).await.unwrap_err();
    assert!(matches!(
        error.current_context(),
        KernelError::InvalidArgument { .. }
    ));
    assert!(db.get_all_books().await.unwrap().is_empty());
}

#[tokio::test]
async fn updating_a_book_moves_its_stock() {
    let db = InMemoryDatabase::new();
    db.create_book(rust_book(10)).await.unwrap();

    let updated = db
        .update_book(UpdateBookDto {
            isbn: "9784297100339".to_string(),
            title: "Programming Rust".to_string(),
            price: 4800,
            stock: 4,
        })
        .await
        .unwrap();
    assert_eq!(updated.title, "Programming Rust");
    assert_eq!(updated.price, 4800);
    assert_eq!(updated.stock, 4);

    let error = db
        .update_book(UpdateBookDto {
            isbn: "9784297100339".to_string(),
            title: "Programming Rust".to_string(),
            price: 4800,
            stock: -3,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        error.current_context(),
        KernelError::InvalidArgument { .. }
    ));

    let found = db
        .get_book(GetBookDto {
            isbn: "9784297100339".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(found, Some(updated));
}

#[tokio::test]
async fn missing_books_are_not_found() {
    let db = InMemoryDatabase::new();
    let error = db
        .update_book(UpdateBookDto {
            isbn: "9784297100339".to_string(),
            title: "Rust Book".to_string(),
            price: 3000,
            stock: 1,
        })
        .await
        .unwrap_err();
    assert!(matches!(error.current_context(), KernelError::NotFound { .. }));

    let error = db
        .delete_book(DeleteBookDto {
            isbn: "9784297100339".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(error.current_context(), KernelError::NotFound { .. }));
}

#[tokio::test]
async fn customer_lifecycle() {
    let db = InMemoryDatabase::new();
    let created = db
        .create_customer(CreateCustomerDto {
            name: "Hanako".to_string(),
            email: "hanako@example.com".to_string(),
        })
        .await
        .unwrap();

    let updated = db
        .update_customer(UpdateCustomerDto {
            id: created.id,
            name: "Hanako Yamada".to_string(),
            email: "yamada@example.com".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.email, "yamada@example.com");
    assert_eq!(db.get_all_customers().await.unwrap(), vec![updated.clone()]);

    db.delete_customer(DeleteCustomerDto { id: created.id })
        .await
        .unwrap();
    let found = db
        .get_customer(GetCustomerDto { id: created.id })
        .await
        .unwrap();
    assert!(found.is_none());

    let error = db
        .delete_customer(DeleteCustomerDto { id: Uuid::new_v4() })
        .await
        .unwrap_err();
    assert!(matches!(error.current_context(), KernelError::NotFound { .. }));
}

#[tokio::test]
async fn malformed_customers_are_rejected() {
    let db = InMemoryDatabase::new();
    let error = db
        .create_customer(CreateCustomerDto {
            name: "Hanako".to_string(),
            email: "not-an-address".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        error.current_context(),
        KernelError::InvalidArgument { .. }
    ));
    assert!(db.get_all_customers().await.unwrap().is_empty());
}
