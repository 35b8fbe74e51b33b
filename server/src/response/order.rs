use application::transfer::{OrderDto, OrderItemDto};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::prelude::entity::OrderStatus;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    id: Uuid,
    customer_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    order_datetime: OffsetDateTime,
    status: OrderStatus,
    order_items: Vec<OrderItemResponse>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    id: i32,
    book_isbn: String,
    quantity: i32,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<OrderItemDto> for OrderItemResponse {
    fn from(value: OrderItemDto) -> Self {
        Self {
            id: value.id,
            book_isbn: value.book_isbn,
            quantity: value.quantity,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<OrderDto> for OrderResponse {
    fn from(value: OrderDto) -> Self {
        Self {
            id: value.id,
            customer_id: value.customer_id,
            order_datetime: value.ordered_at,
            status: value.status,
            order_items: value
                .items
                .into_iter()
                .map(OrderItemResponse::from)
                .collect(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl IntoResponse for OrderResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct OrderPresenter;

impl Exhaust<()> for OrderPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

impl Exhaust<OrderDto> for OrderPresenter {
    type To = OrderResponse;
    fn emit(&self, input: OrderDto) -> Self::To {
        OrderResponse::from(input)
    }
}

impl Exhaust<Option<OrderDto>> for OrderPresenter {
    type To = Option<OrderResponse>;
    fn emit(&self, input: Option<OrderDto>) -> Self::To {
        input.map(OrderResponse::from)
    }
}

impl Exhaust<Vec<OrderDto>> for OrderPresenter {
    type To = axum::Json<Vec<OrderResponse>>;
    fn emit(&self, input: Vec<OrderDto>) -> Self::To {
        axum::Json::from(
            input
                .into_iter()
                .map(OrderResponse::from)
                .collect::<Vec<_>>(),
        )
    }
}
