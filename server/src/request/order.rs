use application::transfer::{
    CancelOrderDto, CreateOrderDto, CreateOrderItemDto, GetOrderDto, ShipOrderDto,
};
use kernel::KernelError;
use serde::Deserialize;
use uuid::Uuid;

use crate::controller::{Intake, TryIntake};
use crate::request::require;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    customer_id: Uuid,
    order_items: Vec<CreateOrderItemRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItemRequest {
    book_isbn: String,
    quantity: i32,
}

#[derive(Debug)]
pub struct GetOrderRequest {
    id: Uuid,
}

impl GetOrderRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct CancelOrderRequest {
    id: Uuid,
}

impl CancelOrderRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct ShipOrderRequest {
    id: Uuid,
}

impl ShipOrderRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct OrderTransformer;

impl TryIntake<CreateOrderRequest> for OrderTransformer {
    type To = CreateOrderDto;
    type Error = error_stack::Report<KernelError>;
    fn emit(&self, input: CreateOrderRequest) -> Result<Self::To, Self::Error> {
        require(
            !input.order_items.is_empty(),
            "order must contain at least one item",
        )?;
        let items = input
            .order_items
            .into_iter()
            .map(|item| {
                require(!item.book_isbn.trim().is_empty(), "bookIsbn must not be blank")?;
                require(item.quantity >= 1, "quantity must be 1 or greater")?;
                Ok(CreateOrderItemDto {
                    book_isbn: item.book_isbn,
                    quantity: item.quantity,
                })
            })
            .collect::<Result<Vec<_>, Self::Error>>()?;
        Ok(CreateOrderDto {
            customer_id: input.customer_id,
            items,
        })
    }
}

impl Intake<GetOrderRequest> for OrderTransformer {
    type To = GetOrderDto;
    fn emit(&self, input: GetOrderRequest) -> Self::To {
        GetOrderDto { id: input.id }
    }
}

impl Intake<CancelOrderRequest> for OrderTransformer {
    type To = CancelOrderDto;
    fn emit(&self, input: CancelOrderRequest) -> Self::To {
        CancelOrderDto { id: input.id }
    }
}

impl Intake<ShipOrderRequest> for OrderTransformer {
    type To = ShipOrderDto;
    fn emit(&self, input: ShipOrderRequest) -> Self::To {
        ShipOrderDto { id: input.id }
    }
}

#[cfg(test)]
mod test {
    use kernel::KernelError;

    use crate::controller::TryIntake;
    use crate::request::{CreateOrderRequest, OrderTransformer};

    fn request(json: serde_json::Value) -> CreateOrderRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn accepts_camel_case_payload() {
        let dto = OrderTransformer
            .emit(request(serde_json::json!({
                "customerId": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                "orderItems": [
                    { "bookIsbn": "9784297100339", "quantity": 2 },
                    { "bookIsbn": "9784798157573", "quantity": 1 }
                ]
            })))
            .unwrap();
        assert_eq!(dto.items.len(), 2);
        assert_eq!(dto.items[0].book_isbn, "9784297100339");
        assert_eq!(dto.items[0].quantity, 2);
    }

    #[test]
    fn rejects_empty_orders_and_bad_lines() {
        for json in [
            serde_json::json!({
                "customerId": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                "orderItems": []
            }),
            serde_json::json!({
                "customerId": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                "orderItems": [{ "bookIsbn": "9784297100339", "quantity": 0 }]
            }),
            serde_json::json!({
                "customerId": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                "orderItems": [{ "bookIsbn": " ", "quantity": 1 }]
            }),
        ] {
            let error = OrderTransformer.emit(request(json)).unwrap_err();
            assert!(matches!(
                error.current_context(),
                KernelError::InvalidArgument { .. }
            ));
        }
    }
}
