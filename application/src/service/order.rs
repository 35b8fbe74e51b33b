use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{
    DependOnOrderItemQuery, DependOnOrderQuery, OrderItemQuery, OrderQuery,
};
use kernel::interface::update::{
    DependOnOrderItemModifier, DependOnOrderModifier, OrderItemModifier, OrderModifier,
};
use kernel::prelude::entity::{BookIsbn, CustomerId, Order, OrderId, OrderItemQuantity};
use kernel::KernelError;

use crate::service::{complete, BookLedgerService};
use crate::transfer::{CancelOrderDto, CreateOrderDto, GetOrderDto, OrderDto, ShipOrderDto};

#[async_trait::async_trait]
pub trait GetOrderService:
    'static + Sync + Send + DependOnOrderQuery + DependOnOrderItemQuery
{
    async fn get_order(&self, dto: GetOrderDto) -> error_stack::Result<Option<OrderDto>, KernelError> {
        let id = OrderId::new(dto.id);

        let mut transaction = self.database_connection().transact().await?;
        let result = async {
            let Some(order) = self.order_query().find_by_id(&mut transaction, &id).await? else {
                return Ok(None);
            };
            let items = self
                .order_item_query()
                .find_by_order_id(&mut transaction, &id)
                .await?;
            Ok::<_, Report<KernelError>>(Some(order.with_items(items)))
        }
        .await;
        let order = complete(transaction, result).await?;
        Ok(order.map(OrderDto::from))
    }

    async fn get_all_orders(&self) -> error_stack::Result<Vec<OrderDto>, KernelError> {
        let mut transaction = self.database_connection().transact().await?;
        let result = async {
            let orders = self.order_query().find_all(&mut transaction).await?;
            let mut loaded = Vec::with_capacity(orders.len());
            for order in orders {
                let items = self
                    .order_item_query()
                    .find_by_order_id(&mut transaction, order.id())
                    .await?;
                loaded.push(order.with_items(items));
            }
            Ok::<_, Report<KernelError>>(loaded)
        }
        .await;
        let orders = complete(transaction, result).await?;
        Ok(orders.into_iter().map(OrderDto::from).collect())
    }
}

impl<T> GetOrderService for T where T: DependOnOrderQuery + DependOnOrderItemQuery {}

/// Places an order: one transaction covering the order row, every line, and every stock
/// decrement. The first failing line aborts the whole call and nothing it did persists.
#[async_trait::async_trait]
pub trait PlaceOrderService:
    'static
    + Sync
    + Send
    + BookLedgerService
    + DependOnOrderModifier
    + DependOnOrderItemModifier
{
    async fn place_order(&self, dto: CreateOrderDto) -> error_stack::Result<OrderDto, KernelError> {
        if dto.items.is_empty() {
            return Err(Report::new(KernelError::invalid_argument(
                "order must contain at least one item",
            )));
        }

        let mut transaction = self.database_connection().transact().await?;
        let result = async {
            // The header goes in first: lines reference it.
            let mut order = Order::create(CustomerId::new(dto.customer_id));
            self.order_modifier()
                .create(&mut transaction, &order)
                .await?;

            for line in dto.items {
                let isbn = BookIsbn::new(line.book_isbn);
                let book = self
                    .validate_and_decrease_stock(&mut transaction, &isbn, line.quantity)
                    .await?;
                let item = order
                    .add_order_item(book.isbn().clone(), OrderItemQuantity::new(line.quantity))?;
                self.order_item_modifier()
                    .create(&mut transaction, item)
                    .await?;
            }
            self.order_modifier()
                .update(&mut transaction, &order)
                .await?;
            Ok::<_, Report<KernelError>>(order)
        }
        .await;
        let order = complete(transaction, result).await?;

        tracing::info!(
            id = %order.id(),
            customer_id = %order.customer_id(),
            lines = order.items().len(),
            "Order placed"
        );
        Ok(OrderDto::from(order))
    }
}

impl<T> PlaceOrderService for T where
    T: BookLedgerService + DependOnOrderModifier + DependOnOrderItemModifier
{
}

/// Cancels a `PENDING` order: every line's stock is given back, then the order and its
/// lines are deleted, all in one transaction. The status check runs before any stock is
/// touched.
#[async_trait::async_trait]
pub trait CancelOrderService:
    'static
    + Sync
    + Send
    + BookLedgerService
    + DependOnOrderQuery
    + DependOnOrderItemQuery
    + DependOnOrderModifier
    + DependOnOrderItemModifier
{
    async fn cancel_order(&self, dto: CancelOrderDto) -> error_stack::Result<(), KernelError> {
        let id = OrderId::new(dto.id);

        let mut transaction = self.database_connection().transact().await?;
        let result = async {
            let order = self
                .order_query()
                .find_by_id_for_update(&mut transaction, &id)
                .await?
                .ok_or_else(|| Report::new(KernelError::not_found("Order", id)))?;
            let items = self
                .order_item_query()
                .find_by_order_id(&mut transaction, &id)
                .await?;
            let order = order.with_items(items);

            order.validate_cancellation()?;

            for item in order.items() {
                self.validate_and_increase_stock(
                    &mut transaction,
                    item.book_isbn(),
                    *item.quantity().as_ref(),
                )
                .await?;
            }

            self.order_item_modifier()
                .delete_by_order_id(&mut transaction, &id)
                .await?;
            self.order_modifier().delete(&mut transaction, &id).await?;
            Ok::<_, Report<KernelError>>(order)
        }
        .await;
        let order = complete(transaction, result).await?;

        tracing::info!(%id, lines = order.items().len(), "Order cancelled");
        Ok(())
    }
}

impl<T> CancelOrderService for T where
    T: BookLedgerService
        + DependOnOrderQuery
        + DependOnOrderItemQuery
        + DependOnOrderModifier
        + DependOnOrderItemModifier
{
}

#[async_trait::async_trait]
pub trait ShipOrderService:
    'static + Sync + Send + DependOnOrderQuery + DependOnOrderItemQuery + DependOnOrderModifier
{
    async fn ship_order(&self, dto: ShipOrderDto) -> error_stack::Result<OrderDto, KernelError> {
        let id = OrderId::new(dto.id);

        let mut transaction = self.database_connection().transact().await?;
        let result = async {
            let mut order = self
                .order_query()
                .find_by_id_for_update(&mut transaction, &id)
                .await?
                .ok_or_else(|| Report::new(KernelError::not_found("Order", id)))?;
            order.ship()?;
            self.order_modifier().update(&mut transaction, &order).await?;
            let items = self
                .order_item_query()
                .find_by_order_id(&mut transaction, &id)
                .await?;
            Ok::<_, Report<KernelError>>(order.with_items(items))
        }
        .await;
        let order = complete(transaction, result).await?;

        tracing::info!(%id, "Order shipped");
        Ok(OrderDto::from(order))
    }
}

impl<T> ShipOrderService for T where
    T: DependOnOrderQuery + DependOnOrderItemQuery + DependOnOrderModifier
{
}
