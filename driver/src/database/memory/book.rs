use error_stack::Report;

use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{Book, BookIsbn};
use kernel::KernelError;

use crate::database::memory::{InMemoryDatabase, InMemoryTransaction};

pub struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con.tables.books.values().cloned().collect())
    }

    async fn find_by_isbn(
        &self,
        con: &mut InMemoryTransaction,
        isbn: &BookIsbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.tables.books.get(isbn).cloned())
    }

    // The transaction already owns the whole store.
    async fn find_by_isbn_for_update(
        &self,
        con: &mut InMemoryTransaction,
        isbn: &BookIsbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        self.find_by_isbn(con, isbn).await
    }

    async fn exists(
        &self,
        con: &mut InMemoryTransaction,
        isbn: &BookIsbn,
    ) -> error_stack::Result<bool, KernelError> {
        Ok(con.tables.books.contains_key(isbn))
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        if con.tables.books.contains_key(book.isbn()) {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Duplicate key in books: {}", book.isbn())));
        }
        con.tables.books.insert(book.isbn().clone(), book.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(stored) = con.tables.books.get_mut(book.isbn()) {
            *stored = book.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        isbn: &BookIsbn,
    ) -> error_stack::Result<(), KernelError> {
        con.tables.books.remove(isbn);
        Ok(())
    }
}

impl DependOnBookQuery for InMemoryDatabase {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl DependOnBookModifier for InMemoryDatabase {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryBookRepository
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{Book, BookIsbn, BookPrice, BookStock, BookTitle};
    use kernel::KernelError;

    use crate::database::memory::{InMemoryBookRepository, InMemoryDatabase};

    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let isbn = BookIsbn::new("9784297100339");

        let mut book = Book::create(
            isbn.clone(),
            BookTitle::new("Rust Book"),
            BookPrice::new(3000),
            BookStock::new(10),
        )?;
        InMemoryBookRepository.create(&mut con, &book).await?;
        let duplicate = InMemoryBookRepository.create(&mut con, &book).await;
        assert!(duplicate.is_err());

        book.decrease_stock(4)?;
        InMemoryBookRepository.update(&mut con, &book).await?;
        let found = InMemoryBookRepository
            .find_by_isbn_for_update(&mut con, &isbn)
            .await?;
        assert_eq!(found, Some(book));

        InMemoryBookRepository.delete(&mut con, &isbn).await?;
        assert!(!InMemoryBookRepository.exists(&mut con, &isbn).await?);
        Ok(())
    }
}
