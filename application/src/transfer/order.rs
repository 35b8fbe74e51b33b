use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{Order, OrderItem, OrderStatus};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OrderDto {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub ordered_at: OffsetDateTime,
    pub status: OrderStatus,
    pub items: Vec<OrderItemDto>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<Order> for OrderDto {
    fn from(value: Order) -> Self {
        Self {
            id: *value.id().as_ref(),
            customer_id: *value.customer_id().as_ref(),
            ordered_at: *value.ordered_at().as_ref(),
            status: *value.status(),
            items: value.items().iter().map(OrderItemDto::from).collect(),
            created_at: *value.created_at().as_ref(),
            updated_at: *value.updated_at().as_ref(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OrderItemDto {
    pub id: i32,
    pub book_isbn: String,
    pub quantity: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<&OrderItem> for OrderItemDto {
    fn from(value: &OrderItem) -> Self {
        Self {
            id: *value.id().as_ref(),
            book_isbn: value.book_isbn().as_ref().clone(),
            quantity: *value.quantity().as_ref(),
            created_at: *value.created_at().as_ref(),
            updated_at: *value.updated_at().as_ref(),
        }
    }
}

#[derive(Debug)]
pub struct GetOrderDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct CreateOrderDto {
    pub customer_id: Uuid,
    pub items: Vec<CreateOrderItemDto>,
}

#[derive(Debug)]
pub struct CreateOrderItemDto {
    pub book_isbn: String,
    pub quantity: i32,
}

#[derive(Debug)]
pub struct CancelOrderDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct ShipOrderDto {
    pub id: Uuid,
}
