use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{Customer, DestructCustomer};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CustomerDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<Customer> for CustomerDto {
    fn from(value: Customer) -> Self {
        let DestructCustomer {
            id,
            name,
            email,
            created_at,
            updated_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }
}

#[derive(Debug)]
pub struct GetCustomerDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct CreateCustomerDto {
    pub name: String,
    pub email: String,
}

#[derive(Debug)]
pub struct UpdateCustomerDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug)]
pub struct DeleteCustomerDto {
    pub id: Uuid,
}
