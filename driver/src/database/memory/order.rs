use error_stack::Report;

use kernel::interface::query::{
    DependOnOrderItemQuery, DependOnOrderQuery, OrderItemQuery, OrderQuery,
};
use kernel::interface::update::{
    DependOnOrderItemModifier, DependOnOrderModifier, OrderItemModifier, OrderModifier,
};
use kernel::prelude::entity::{Order, OrderId, OrderItem};
use kernel::KernelError;

use crate::database::memory::{InMemoryDatabase, InMemoryTransaction};

pub struct InMemoryOrderRepository;

#[async_trait::async_trait]
impl OrderQuery for InMemoryOrderRepository {
    type Transaction = InMemoryTransaction;

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Order>, KernelError> {
        Ok(con.tables.orders.clone())
    }

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        let found = con
            .tables
            .orders
            .iter()
            .find(|order| order.id() == id)
            .cloned();
        Ok(found)
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut InMemoryTransaction,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        self.find_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl OrderModifier for InMemoryOrderRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        let orders = &mut con.tables.orders;
        if orders.iter().any(|stored| stored.id() == order.id()) {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Duplicate key in orders: {}", order.id())));
        }
        // Headers only, like the orders table.
        orders.push(order.clone().with_items(Vec::new()));
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        let stored = con
            .tables
            .orders
            .iter_mut()
            .find(|stored| stored.id() == order.id());
        if let Some(stored) = stored {
            *stored = order.clone().with_items(Vec::new());
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        id: &OrderId,
    ) -> error_stack::Result<(), KernelError> {
        con.tables.orders.retain(|order| order.id() != id);
        con.tables.order_items.retain(|item| item.order_id() != id);
        Ok(())
    }
}

pub struct InMemoryOrderItemRepository;

#[async_trait::async_trait]
impl OrderItemQuery for InMemoryOrderItemRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_order_id(
        &self,
        con: &mut InMemoryTransaction,
        order_id: &OrderId,
    ) -> error_stack::Result<Vec<OrderItem>, KernelError> {
        let mut items = con
            .tables
            .order_items
            .iter()
            .filter(|item| item.order_id() == order_id)
            .cloned()
            .collect::<Vec<_>>();
        items.sort_by_key(|item| *item.id());
        Ok(items)
    }
}

#[async_trait::async_trait]
impl OrderItemModifier for InMemoryOrderItemRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        item: &OrderItem,
    ) -> error_stack::Result<(), KernelError> {
        let tables = &mut con.tables;
        if !tables.orders.iter().any(|order| order.id() == item.order_id()) {
            return Err(Report::new(KernelError::Internal).attach_printable(format!(
                "Order item references missing order: {}",
                item.order_id()
            )));
        }
        let duplicate = tables
            .order_items
            .iter()
            .any(|stored| stored.order_id() == item.order_id() && stored.id() == item.id());
        if duplicate {
            return Err(Report::new(KernelError::Internal).attach_printable(format!(
                "Duplicate key in order_items: ({}, {})",
                item.order_id(),
                item.id().as_ref()
            )));
        }
        tables.order_items.push(item.clone());
        Ok(())
    }

    async fn delete_by_order_id(
        &self,
        con: &mut InMemoryTransaction,
        order_id: &OrderId,
    ) -> error_stack::Result<(), KernelError> {
        con.tables
            .order_items
            .retain(|item| item.order_id() != order_id);
        Ok(())
    }
}

impl DependOnOrderQuery for InMemoryDatabase {
    type OrderQuery = InMemoryOrderRepository;
    fn order_query(&self) -> &Self::OrderQuery {
        &InMemoryOrderRepository
    }
}

impl DependOnOrderModifier for InMemoryDatabase {
    type OrderModifier = InMemoryOrderRepository;
    fn order_modifier(&self) -> &Self::OrderModifier {
        &InMemoryOrderRepository
    }
}

impl DependOnOrderItemQuery for InMemoryDatabase {
    type OrderItemQuery = InMemoryOrderItemRepository;
    fn order_item_query(&self) -> &Self::OrderItemQuery {
        &InMemoryOrderItemRepository
    }
}

impl DependOnOrderItemModifier for InMemoryDatabase {
    type OrderItemModifier = InMemoryOrderItemRepository;
    fn order_item_modifier(&self) -> &Self::OrderItemModifier {
        &InMemoryOrderItemRepository
    }
}
