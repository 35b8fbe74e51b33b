use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::{
    DependOnOrderItemQuery, DependOnOrderQuery, OrderItemQuery, OrderQuery,
};
use kernel::interface::update::{
    DependOnOrderItemModifier, DependOnOrderModifier, OrderItemModifier, OrderModifier,
};
use kernel::prelude::entity::{
    BookIsbn, CreatedAt, CustomerId, Order, OrderId, OrderItem, OrderItemId, OrderItemQuantity,
    OrderStatus, OrderedAt, UpdatedAt,
};
use kernel::KernelError;

use crate::database::postgres::{PostgresDatabase, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresOrderRepository;

#[async_trait::async_trait]
impl OrderQuery for PostgresOrderRepository {
    type Transaction = PostgresTransaction;

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Order>, KernelError> {
        PgOrderInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        PgOrderInternal::find_by_id(con, id, false).await
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut PostgresTransaction,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        PgOrderInternal::find_by_id(con, id, true).await
    }
}

#[async_trait::async_trait]
impl OrderModifier for PostgresOrderRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        PgOrderInternal::create(con, order).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        PgOrderInternal::update(con, order).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        id: &OrderId,
    ) -> error_stack::Result<(), KernelError> {
        PgOrderInternal::delete(con, id).await
    }
}

pub struct PostgresOrderItemRepository;

#[async_trait::async_trait]
impl OrderItemQuery for PostgresOrderItemRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_order_id(
        &self,
        con: &mut PostgresTransaction,
        order_id: &OrderId,
    ) -> error_stack::Result<Vec<OrderItem>, KernelError> {
        PgOrderItemInternal::find_by_order_id(con, order_id).await
    }
}

#[async_trait::async_trait]
impl OrderItemModifier for PostgresOrderItemRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        item: &OrderItem,
    ) -> error_stack::Result<(), KernelError> {
        PgOrderItemInternal::create(con, item).await
    }

    async fn delete_by_order_id(
        &self,
        con: &mut PostgresTransaction,
        order_id: &OrderId,
    ) -> error_stack::Result<(), KernelError> {
        PgOrderItemInternal::delete_by_order_id(con, order_id).await
    }
}

impl DependOnOrderQuery for PostgresDatabase {
    type OrderQuery = PostgresOrderRepository;
    fn order_query(&self) -> &Self::OrderQuery {
        &PostgresOrderRepository
    }
}

impl DependOnOrderModifier for PostgresDatabase {
    type OrderModifier = PostgresOrderRepository;
    fn order_modifier(&self) -> &Self::OrderModifier {
        &PostgresOrderRepository
    }
}

impl DependOnOrderItemQuery for PostgresDatabase {
    type OrderItemQuery = PostgresOrderItemRepository;
    fn order_item_query(&self) -> &Self::OrderItemQuery {
        &PostgresOrderItemRepository
    }
}

impl DependOnOrderItemModifier for PostgresDatabase {
    type OrderItemModifier = PostgresOrderItemRepository;
    fn order_item_modifier(&self) -> &Self::OrderItemModifier {
        &PostgresOrderItemRepository
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    customer_id: Uuid,
    ordered_at: OffsetDateTime,
    status: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<OrderRow> for Order {
    type Error = error_stack::Report<KernelError>;
    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order::new(
            OrderId::new(row.id),
            CustomerId::new(row.customer_id),
            OrderedAt::new(row.ordered_at),
            row.status.parse::<OrderStatus>()?,
            CreatedAt::new(row.created_at),
            UpdatedAt::new(row.updated_at),
        ))
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    order_id: Uuid,
    line_no: i32,
    book_isbn: String,
    quantity: i32,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        OrderItem::new(
            OrderId::new(row.order_id),
            OrderItemId::new(row.line_no),
            BookIsbn::new(row.book_isbn),
            OrderItemQuantity::new(row.quantity),
            CreatedAt::new(row.created_at),
            UpdatedAt::new(row.updated_at),
        )
    }
}

pub(in crate::database) struct PgOrderInternal;

impl PgOrderInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Order>, KernelError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            // language=postgresql
            r#"
            SELECT id, customer_id, ordered_at, status, created_at, updated_at
            FROM orders
            ORDER BY ordered_at, id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Order::try_from).collect()
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &OrderId,
        for_update: bool,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        // language=postgresql
        let query = if for_update {
            r#"
            SELECT id, customer_id, ordered_at, status, created_at, updated_at
            FROM orders
            WHERE id = $1
            FOR UPDATE
            "#
        } else {
            r#"
            SELECT id, customer_id, ordered_at, status, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#
        };
        let row = sqlx::query_as::<_, OrderRow>(query)
            .bind(id.as_ref())
            .fetch_optional(con)
            .await
            .convert_error()?;
        row.map(Order::try_from).transpose()
    }

    async fn create(con: &mut PgConnection, order: &Order) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO orders (id, customer_id, ordered_at, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(order.id().as_ref())
        .bind(order.customer_id().as_ref())
        .bind(order.ordered_at().as_ref())
        .bind(order.status().as_str())
        .bind(order.created_at().as_ref())
        .bind(order.updated_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, order: &Order) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE orders
            SET status = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(order.id().as_ref())
        .bind(order.status().as_str())
        .bind(order.updated_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        tracing::debug!(id = %order.id(), status = order.status().as_str(), "Order row updated");
        Ok(())
    }

    async fn delete(con: &mut PgConnection, id: &OrderId) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

pub(in crate::database) struct PgOrderItemInternal;

impl PgOrderItemInternal {
    async fn find_by_order_id(
        con: &mut PgConnection,
        order_id: &OrderId,
    ) -> error_stack::Result<Vec<OrderItem>, KernelError> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            // language=postgresql
            r#"
            SELECT order_id, line_no, book_isbn, quantity, created_at, updated_at
            FROM order_items
            WHERE order_id = $1
            ORDER BY line_no
            "#,
        )
        .bind(order_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(OrderItem::from).collect())
    }

    async fn create(con: &mut PgConnection, item: &OrderItem) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO order_items (order_id, line_no, book_isbn, quantity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(item.order_id().as_ref())
        .bind(item.id().as_ref())
        .bind(item.book_isbn().as_ref())
        .bind(item.quantity().as_ref())
        .bind(item.created_at().as_ref())
        .bind(item.updated_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete_by_order_id(
        con: &mut PgConnection,
        order_id: &OrderId,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM order_items
            WHERE order_id = $1
            "#,
        )
        .bind(order_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        tracing::debug!(%order_id, "Order item rows deleted");
        Ok(())
    }
}
