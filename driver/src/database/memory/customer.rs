use error_stack::Report;

use kernel::interface::query::{CustomerQuery, DependOnCustomerQuery};
use kernel::interface::update::{CustomerModifier, DependOnCustomerModifier};
use kernel::prelude::entity::{Customer, CustomerId};
use kernel::KernelError;

use crate::database::memory::{InMemoryDatabase, InMemoryTransaction};

pub struct InMemoryCustomerRepository;

#[async_trait::async_trait]
impl CustomerQuery for InMemoryCustomerRepository {
    type Transaction = InMemoryTransaction;

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Customer>, KernelError> {
        Ok(con.tables.customers.clone())
    }

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        let found = con
            .tables
            .customers
            .iter()
            .find(|customer| customer.id() == id)
            .cloned();
        Ok(found)
    }
}

#[async_trait::async_trait]
impl CustomerModifier for InMemoryCustomerRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        let customers = &mut con.tables.customers;
        if customers.iter().any(|stored| stored.id() == customer.id()) {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Duplicate key in customers: {}", customer.id())));
        }
        customers.push(customer.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        let stored = con
            .tables
            .customers
            .iter_mut()
            .find(|stored| stored.id() == customer.id());
        if let Some(stored) = stored {
            *stored = customer.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        id: &CustomerId,
    ) -> error_stack::Result<(), KernelError> {
        con.tables.customers.retain(|customer| customer.id() != id);
        Ok(())
    }
}

impl DependOnCustomerQuery for InMemoryDatabase {
    type CustomerQuery = InMemoryCustomerRepository;
    fn customer_query(&self) -> &Self::CustomerQuery {
        &InMemoryCustomerRepository
    }
}

impl DependOnCustomerModifier for InMemoryDatabase {
    type CustomerModifier = InMemoryCustomerRepository;
    fn customer_modifier(&self) -> &Self::CustomerModifier {
        &InMemoryCustomerRepository
    }
}
