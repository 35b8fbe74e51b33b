use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::prelude::entity::{Book, BookIsbn, Customer, Order, OrderItem};
use kernel::KernelError;

pub use self::{book::*, customer::*, order::*};

mod book;
mod customer;
mod order;

#[derive(Debug, Clone, Default)]
struct Tables {
    books: BTreeMap<BookIsbn, Book>,
    customers: Vec<Customer>,
    orders: Vec<Order>,
    order_items: Vec<OrderItem>,
}

/// Process-local store with the same transactional behavior as [`PostgresDatabase`](crate::database::PostgresDatabase).
///
/// A transaction holds the store's lock from `transact` until it ends and works on a
/// private copy of every table, so transactions run one at a time and a rolled back
/// (or dropped) transaction leaves no trace.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let tables = guard.clone();
        Ok(InMemoryTransaction { guard, tables })
    }
}

pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<Tables>,
    tables: Tables,
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let Self { mut guard, tables } = self;
        *guard = tables;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{Book, BookIsbn, BookPrice, BookStock, BookTitle};
    use kernel::KernelError;

    use crate::database::memory::{InMemoryBookRepository, InMemoryDatabase};

    fn book(isbn: &str) -> Book {
        Book::create(
            BookIsbn::new(isbn),
            BookTitle::new("Rust Book"),
            BookPrice::new(3000),
            BookStock::new(10),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn commit_publishes_writes() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        InMemoryBookRepository
            .create(&mut con, &book("9784297100339"))
            .await?;
        con.commit().await?;

        let mut con = db.transact().await?;
        let found = InMemoryBookRepository
            .find_by_isbn(&mut con, &BookIsbn::new("9784297100339"))
            .await?;
        assert!(found.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn roll_back_discards_writes() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        InMemoryBookRepository
            .create(&mut con, &book("9784297100339"))
            .await?;
        con.roll_back().await?;

        let mut con = db.transact().await?;
        let found = InMemoryBookRepository.find_all(&mut con).await?;
        assert!(found.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn dropped_transaction_discards_writes() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        {
            let mut con = db.transact().await?;
            InMemoryBookRepository
                .create(&mut con, &book("9784297100339"))
                .await?;
        }
        let mut con = db.transact().await?;
        let found = InMemoryBookRepository.find_all(&mut con).await?;
        assert!(found.is_empty());
        Ok(())
    }
}
