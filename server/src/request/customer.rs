use application::transfer::{
    CreateCustomerDto, DeleteCustomerDto, GetCustomerDto, UpdateCustomerDto,
};
use kernel::prelude::entity::CustomerEmail;
use kernel::KernelError;
use serde::Deserialize;
use uuid::Uuid;

use crate::controller::{Intake, TryIntake};
use crate::request::require;

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    name: String,
    email: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    name: String,
    email: String,
}

#[derive(Debug)]
pub struct GetCustomerRequest {
    id: Uuid,
}

impl GetCustomerRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteCustomerRequest {
    id: Uuid,
}

impl DeleteCustomerRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

fn validate(name: &str, email: &str) -> error_stack::Result<(), KernelError> {
    require(!name.trim().is_empty(), "name must not be blank")?;
    require(
        CustomerEmail::new(email).is_well_formed(),
        "email must be a valid address",
    )
}

pub struct CustomerTransformer;

impl TryIntake<CreateCustomerRequest> for CustomerTransformer {
    type To = CreateCustomerDto;
    type Error = error_stack::Report<KernelError>;
    fn emit(&self, input: CreateCustomerRequest) -> Result<Self::To, Self::Error> {
        validate(&input.name, &input.email)?;
        Ok(CreateCustomerDto {
            name: input.name,
            email: input.email,
        })
    }
}

impl TryIntake<(Uuid, UpdateCustomerRequest)> for CustomerTransformer {
    type To = UpdateCustomerDto;
    type Error = error_stack::Report<KernelError>;
    fn emit(&self, (id, input): (Uuid, UpdateCustomerRequest)) -> Result<Self::To, Self::Error> {
        validate(&input.name, &input.email)?;
        Ok(UpdateCustomerDto {
            id,
            name: input.name,
            email: input.email,
        })
    }
}

impl Intake<GetCustomerRequest> for CustomerTransformer {
    type To = GetCustomerDto;
    fn emit(&self, input: GetCustomerRequest) -> Self::To {
        GetCustomerDto { id: input.id }
    }
}

impl Intake<DeleteCustomerRequest> for CustomerTransformer {
    type To = DeleteCustomerDto;
    fn emit(&self, input: DeleteCustomerRequest) -> Self::To {
        DeleteCustomerDto { id: input.id }
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use crate::controller::TryIntake;
    use crate::request::{CreateCustomerRequest, CustomerTransformer, UpdateCustomerRequest};

    #[test]
    fn validates_name_and_email() {
        let ok = CustomerTransformer.emit(CreateCustomerRequest {
            name: "Hanako".to_string(),
            email: "hanako@example.com".to_string(),
        });
        assert!(ok.is_ok());

        for (name, email) in [("", "hanako@example.com"), ("Hanako", "hanako")] {
            let result = CustomerTransformer.emit(CreateCustomerRequest {
                name: name.to_string(),
                email: email.to_string(),
            });
            assert!(result.is_err());
        }

        let id = Uuid::new_v4();
        let dto = CustomerTransformer
            .emit((
                id,
                UpdateCustomerRequest {
                    name: "Taro".to_string(),
                    email: "taro@example.com".to_string(),
                },
            ))
            .unwrap();
        assert_eq!(dto.id, id);
    }
}
