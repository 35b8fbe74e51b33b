use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{Book, BookIsbn, BookPrice, BookStock, BookTitle};
use kernel::KernelError;

use crate::service::complete;
use crate::transfer::{BookDto, CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};

/// The only path through which book stock changes once a book exists.
///
/// Both operations run inside the caller's transaction and lock the book row first.
#[async_trait::async_trait]
pub trait BookLedgerService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    async fn validate_and_decrease_stock(
        &self,
        con: &mut <Self::DatabaseConnection as DatabaseConnection>::Transaction,
        isbn: &BookIsbn,
        quantity: i32,
    ) -> error_stack::Result<Book, KernelError> {
        let mut book = self
            .book_query()
            .find_by_isbn_for_update(con, isbn)
            .await?
            .ok_or_else(|| Report::new(KernelError::not_found("Book", isbn)))?;
        book.decrease_stock(quantity)?;
        self.book_modifier().update(con, &book).await?;
        tracing::debug!(%isbn, quantity, stock = *book.stock().as_ref(), "Stock decreased");
        Ok(book)
    }

    async fn validate_and_increase_stock(
        &self,
        con: &mut <Self::DatabaseConnection as DatabaseConnection>::Transaction,
        isbn: &BookIsbn,
        quantity: i32,
    ) -> error_stack::Result<Book, KernelError> {
        let mut book = self
            .book_query()
            .find_by_isbn_for_update(con, isbn)
            .await?
            .ok_or_else(|| Report::new(KernelError::not_found("Book", isbn)))?;
        book.increase_stock(quantity)?;
        self.book_modifier().update(con, &book).await?;
        tracing::debug!(%isbn, quantity, stock = *book.stock().as_ref(), "Stock increased");
        Ok(book)
    }
}

impl<T> BookLedgerService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut transaction = self.database_connection().transact().await?;
        let isbn = BookIsbn::new(dto.isbn);
        let result = self.book_query().find_by_isbn(&mut transaction, &isbn).await;
        let book = complete(transaction, result).await?;
        Ok(book.map(BookDto::from))
    }

    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut transaction = self.database_connection().transact().await?;
        let result = self.book_query().find_all(&mut transaction).await;
        let books = complete(transaction, result).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let book = Book::create(
            BookIsbn::new(dto.isbn),
            BookTitle::new(dto.title),
            BookPrice::new(dto.price),
            BookStock::new(dto.stock),
        )?;

        let mut transaction = self.database_connection().transact().await?;
        let result = async {
            if self.book_query().exists(&mut transaction, book.isbn()).await? {
                return Err(Report::new(KernelError::invalid_argument(format!(
                    "book {} already exists",
                    book.isbn()
                ))));
            }
            self.book_modifier().create(&mut transaction, &book).await?;
            Ok::<_, Report<KernelError>>(())
        }
        .await;
        complete(transaction, result).await?;

        tracing::info!(isbn = %book.isbn(), "Book created");
        Ok(BookDto::from(book))
    }
}

impl<T> CreateBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    /// Renames, reprices, and moves stock to `dto.stock` through the same checks the
    /// ledger applies, so stock can never be driven below zero here either.
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<BookDto, KernelError> {
        if dto.stock < 0 {
            return Err(Report::new(KernelError::invalid_argument(
                "stock must be 0 or greater",
            )));
        }
        let isbn = BookIsbn::new(dto.isbn);

        let mut transaction = self.database_connection().transact().await?;
        let result = async {
            let mut book = self
                .book_query()
                .find_by_isbn_for_update(&mut transaction, &isbn)
                .await?
                .ok_or_else(|| Report::new(KernelError::not_found("Book", &isbn)))?;

            book.rename(BookTitle::new(dto.title))?;
            book.update_price(BookPrice::new(dto.price))?;
            let difference = dto.stock - *book.stock().as_ref();
            if difference > 0 {
                book.increase_stock(difference)?;
            } else if difference < 0 {
                book.decrease_stock(-difference)?;
            }

            self.book_modifier().update(&mut transaction, &book).await?;
            Ok::<_, Report<KernelError>>(book)
        }
        .await;
        let book = complete(transaction, result).await?;

        tracing::info!(%isbn, "Book updated");
        Ok(BookDto::from(book))
    }
}

impl<T> UpdateBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait DeleteBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let isbn = BookIsbn::new(dto.isbn);

        let mut transaction = self.database_connection().transact().await?;
        let result = async {
            let book = self
                .book_query()
                .find_by_isbn_for_update(&mut transaction, &isbn)
                .await?
                .ok_or_else(|| Report::new(KernelError::not_found("Book", &isbn)))?;
            book.ensure_deletable()?;
            self.book_modifier().delete(&mut transaction, &isbn).await
        }
        .await;
        complete(transaction, result).await?;

        tracing::info!(%isbn, "Book deleted");
        Ok(())
    }
}

impl<T> DeleteBookService for T where T: DependOnBookQuery + DependOnBookModifier {}
