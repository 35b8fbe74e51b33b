use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{CustomerQuery, DependOnCustomerQuery};
use kernel::interface::update::{CustomerModifier, DependOnCustomerModifier};
use kernel::prelude::entity::{Customer, CustomerEmail, CustomerId, CustomerName};
use kernel::KernelError;

use crate::service::complete;
use crate::transfer::{
    CreateCustomerDto, CustomerDto, DeleteCustomerDto, GetCustomerDto, UpdateCustomerDto,
};

#[async_trait::async_trait]
pub trait GetCustomerService: 'static + Sync + Send + DependOnCustomerQuery {
    async fn get_customer(
        &self,
        dto: GetCustomerDto,
    ) -> error_stack::Result<Option<CustomerDto>, KernelError> {
        let mut transaction = self.database_connection().transact().await?;
        let id = CustomerId::new(dto.id);
        let result = self.customer_query().find_by_id(&mut transaction, &id).await;
        let customer = complete(transaction, result).await?;
        Ok(customer.map(CustomerDto::from))
    }

    async fn get_all_customers(&self) -> error_stack::Result<Vec<CustomerDto>, KernelError> {
        let mut transaction = self.database_connection().transact().await?;
        let result = self.customer_query().find_all(&mut transaction).await;
        let customers = complete(transaction, result).await?;
        Ok(customers.into_iter().map(CustomerDto::from).collect())
    }
}

impl<T> GetCustomerService for T where T: DependOnCustomerQuery {}

#[async_trait::async_trait]
pub trait CreateCustomerService: 'static + Sync + Send + DependOnCustomerModifier {
    async fn create_customer(
        &self,
        dto: CreateCustomerDto,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        let customer = Customer::create(CustomerName::new(dto.name), CustomerEmail::new(dto.email))?;

        let mut transaction = self.database_connection().transact().await?;
        let result = self
            .customer_modifier()
            .create(&mut transaction, &customer)
            .await;
        complete(transaction, result).await?;

        tracing::info!(id = %customer.id(), "Customer created");
        Ok(CustomerDto::from(customer))
    }
}

impl<T> CreateCustomerService for T where T: DependOnCustomerModifier {}

#[async_trait::async_trait]
pub trait UpdateCustomerService:
    'static + Sync + Send + DependOnCustomerQuery + DependOnCustomerModifier
{
    async fn update_customer(
        &self,
        dto: UpdateCustomerDto,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        let id = CustomerId::new(dto.id);

        let mut transaction = self.database_connection().transact().await?;
        let result = async {
            let mut customer = self
                .customer_query()
                .find_by_id(&mut transaction, &id)
                .await?
                .ok_or_else(|| Report::new(KernelError::not_found("Customer", id)))?;
            customer.update(CustomerName::new(dto.name), CustomerEmail::new(dto.email))?;
            self.customer_modifier()
                .update(&mut transaction, &customer)
                .await?;
            Ok::<_, Report<KernelError>>(customer)
        }
        .await;
        let customer = complete(transaction, result).await?;

        tracing::info!(%id, "Customer updated");
        Ok(CustomerDto::from(customer))
    }
}

impl<T> UpdateCustomerService for T where T: DependOnCustomerQuery + DependOnCustomerModifier {}

#[async_trait::async_trait]
pub trait DeleteCustomerService:
    'static + Sync + Send + DependOnCustomerQuery + DependOnCustomerModifier
{
    async fn delete_customer(&self, dto: DeleteCustomerDto) -> error_stack::Result<(), KernelError> {
        let id = CustomerId::new(dto.id);

        let mut transaction = self.database_connection().transact().await?;
        let result = async {
            self.customer_query()
                .find_by_id(&mut transaction, &id)
                .await?
                .ok_or_else(|| Report::new(KernelError::not_found("Customer", id)))?;
            self.customer_modifier().delete(&mut transaction, &id).await
        }
        .await;
        complete(transaction, result).await?;

        tracing::info!(%id, "Customer deleted");
        Ok(())
    }
}

impl<T> DeleteCustomerService for T where T: DependOnCustomerQuery + DependOnCustomerModifier {}
