mod email;
mod id;
mod name;

pub use self::{email::*, id::*, name::*};

use destructure::Destructure;
use error_stack::Report;
use time::OffsetDateTime;
use uuid::Uuid;
use vodca::References;

use crate::entity::{CreatedAt, UpdatedAt};
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Customer {
    id: CustomerId,
    name: CustomerName,
    email: CustomerEmail,
    created_at: CreatedAt<Customer>,
    updated_at: UpdatedAt<Customer>,
}

impl Customer {
    pub fn new(
        id: CustomerId,
        name: CustomerName,
        email: CustomerEmail,
        created_at: CreatedAt<Customer>,
        updated_at: UpdatedAt<Customer>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            created_at,
            updated_at,
        }
    }

    pub fn create(
        name: CustomerName,
        email: CustomerEmail,
    ) -> error_stack::Result<Self, KernelError> {
        validate(&name, &email)?;
        let now = OffsetDateTime::now_utc();
        Ok(Self {
            id: CustomerId::new(Uuid::new_v4()),
            name,
            email,
            created_at: CreatedAt::new(now),
            updated_at: UpdatedAt::new(now),
        })
    }

    pub fn update(
        &mut self,
        name: CustomerName,
        email: CustomerEmail,
    ) -> error_stack::Result<(), KernelError> {
        validate(&name, &email)?;
        self.name = name;
        self.email = email;
        self.updated_at.stamp();
        Ok(())
    }
}

fn validate(name: &CustomerName, email: &CustomerEmail) -> error_stack::Result<(), KernelError> {
    if name.as_ref().trim().is_empty() {
        return Err(Report::new(KernelError::invalid_argument("name is required")));
    }
    if !email.is_well_formed() {
        return Err(Report::new(KernelError::invalid_argument(format!(
            "email is malformed: {:?}",
            email.as_ref()
        ))));
    }
    Ok(())
}
