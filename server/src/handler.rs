use std::ops::Deref;
use std::sync::Arc;

use driver::database::PostgresDatabase;
use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{
    DependOnBookQuery, DependOnCustomerQuery, DependOnOrderItemQuery, DependOnOrderQuery,
};
use kernel::interface::update::{
    DependOnBookModifier, DependOnCustomerModifier, DependOnOrderItemModifier,
    DependOnOrderModifier,
};
use kernel::KernelError;

/// Everything the routes need from a store.
pub trait Database:
    DatabaseConnection
    + DependOnBookQuery
    + DependOnBookModifier
    + DependOnCustomerQuery
    + DependOnCustomerModifier
    + DependOnOrderQuery
    + DependOnOrderModifier
    + DependOnOrderItemQuery
    + DependOnOrderItemModifier
{
}

impl<T> Database for T where
    T: DatabaseConnection
        + DependOnBookQuery
        + DependOnBookModifier
        + DependOnCustomerQuery
        + DependOnCustomerModifier
        + DependOnOrderQuery
        + DependOnOrderModifier
        + DependOnOrderItemQuery
        + DependOnOrderItemModifier
{
}

pub struct AppModule<D = PostgresDatabase>(Arc<Handler<D>>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self::with(Handler::init().await?))
    }
}

impl<D> AppModule<D> {
    pub fn with(handler: Handler<D>) -> Self {
        Self(Arc::new(handler))
    }
}

impl<D> Clone for AppModule<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<D> Deref for AppModule<D> {
    type Target = Handler<D>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<D> {
    database: D,
}

impl Handler<PostgresDatabase> {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let database = PostgresDatabase::new().await?;
        database.migrate().await?;

        Ok(Self::new(database))
    }
}

impl<D> Handler<D> {
    pub fn new(database: D) -> Self {
        Self { database }
    }

    pub fn database(&self) -> &D {
        &self.database
    }
}
