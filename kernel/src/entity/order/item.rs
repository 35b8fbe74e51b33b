use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln, References};

use crate::entity::{BookIsbn, CreatedAt, OrderId, UpdatedAt};

/// Line number of an item within its order, starting at 1.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct OrderItemId(i32);

impl OrderItemId {
    pub fn new(line: impl Into<i32>) -> Self {
        Self(line.into())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct OrderItemQuantity(i32);

impl OrderItemQuantity {
    pub fn new(quantity: impl Into<i32>) -> Self {
        Self(quantity.into())
    }
}

/// A single (book, quantity) line. Owned by exactly one order and never changed after
/// it is appended.
#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct OrderItem {
    order_id: OrderId,
    id: OrderItemId,
    book_isbn: BookIsbn,
    quantity: OrderItemQuantity,
    created_at: CreatedAt<OrderItem>,
    updated_at: UpdatedAt<OrderItem>,
}

impl OrderItem {
    pub fn new(
        order_id: OrderId,
        id: OrderItemId,
        book_isbn: BookIsbn,
        quantity: OrderItemQuantity,
        created_at: CreatedAt<OrderItem>,
        updated_at: UpdatedAt<OrderItem>,
    ) -> Self {
        Self {
            order_id,
            id,
            book_isbn,
            quantity,
            created_at,
            updated_at,
        }
    }
}
