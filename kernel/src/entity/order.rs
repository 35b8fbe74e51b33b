mod id;
mod item;
mod ordered_at;
mod status;

pub use self::{id::*, item::*, ordered_at::*, status::*};

use error_stack::Report;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entity::{BookIsbn, CreatedAt, CustomerId, UpdatedAt};
use crate::KernelError;

/// Order aggregate and its lifecycle.
///
/// Items are readable through [`Order::items`] but can only be appended through
/// [`Order::add_order_item`], which refuses anything but a `PENDING` order. Status
/// changes go through [`Order::ship`] and [`Order::cancel`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    ordered_at: OrderedAt,
    status: OrderStatus,
    items: Vec<OrderItem>,
    created_at: CreatedAt<Order>,
    updated_at: UpdatedAt<Order>,
}

impl Order {
    /// Restores a stored order header. Items are attached with [`Order::with_items`].
    pub fn new(
        id: OrderId,
        customer_id: CustomerId,
        ordered_at: OrderedAt,
        status: OrderStatus,
        created_at: CreatedAt<Order>,
        updated_at: UpdatedAt<Order>,
    ) -> Self {
        Self {
            id,
            customer_id,
            ordered_at,
            status,
            items: Vec::new(),
            created_at,
            updated_at,
        }
    }

    pub fn with_items(mut self, mut items: Vec<OrderItem>) -> Self {
        items.sort_by_key(|item| *item.id());
        self.items = items;
        self
    }

    pub fn create(customer_id: CustomerId) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: OrderId::new(Uuid::new_v4()),
            customer_id,
            ordered_at: OrderedAt::new(now),
            status: OrderStatus::Pending,
            items: Vec::new(),
            created_at: CreatedAt::new(now),
            updated_at: UpdatedAt::new(now),
        }
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn ordered_at(&self) -> &OrderedAt {
        &self.ordered_at
    }

    pub fn status(&self) -> &OrderStatus {
        &self.status
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn created_at(&self) -> &CreatedAt<Order> {
        &self.created_at
    }

    pub fn updated_at(&self) -> &UpdatedAt<Order> {
        &self.updated_at
    }

    /// Appends a line and returns it so the caller can persist it.
    pub fn add_order_item(
        &mut self,
        book_isbn: BookIsbn,
        quantity: OrderItemQuantity,
    ) -> error_stack::Result<&OrderItem, KernelError> {
        self.require(OrderStatus::Pending)?;
        if *quantity.as_ref() <= 0 {
            return Err(Report::new(KernelError::InvalidQuantity {
                quantity: *quantity.as_ref(),
            }));
        }
        let line = self
            .items
            .last()
            .map_or(1, |last| *last.id().as_ref() + 1);
        let now = OffsetDateTime::now_utc();
        self.items.push(OrderItem::new(
            self.id,
            OrderItemId::new(line),
            book_isbn,
            quantity,
            CreatedAt::new(now),
            UpdatedAt::new(now),
        ));
        self.updated_at = UpdatedAt::new(now);
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn ship(&mut self) -> error_stack::Result<(), KernelError> {
        self.transition(OrderStatus::Shipped)
    }

    pub fn cancel(&mut self) -> error_stack::Result<(), KernelError> {
        self.transition(OrderStatus::Cancelled)
    }

    /// Checks that [`Order::cancel`] would succeed without changing anything.
    pub fn validate_cancellation(&self) -> error_stack::Result<(), KernelError> {
        self.require(OrderStatus::Pending)
    }

    fn transition(&mut self, to: OrderStatus) -> error_stack::Result<(), KernelError> {
        self.require(OrderStatus::Pending)?;
        self.status = to;
        self.updated_at.stamp();
        Ok(())
    }

    fn require(&self, required: OrderStatus) -> error_stack::Result<(), KernelError> {
        if self.status != required {
            return Err(Report::new(KernelError::InvalidState {
                required,
                actual: self.status,
            }));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use crate::entity::{
        BookIsbn, CustomerId, Order, OrderItemId, OrderItemQuantity, OrderStatus,
    };
    use crate::KernelError;

    fn order() -> Order {
        Order::create(CustomerId::new(Uuid::new_v4()))
    }

    #[test]
    fn created_orders_are_pending_and_empty() {
        let order = order();
        assert_eq!(order.status(), &OrderStatus::Pending);
        assert!(order.items().is_empty());
        assert_eq!(order.created_at().as_ref(), order.updated_at().as_ref());
    }

    #[test]
    fn items_get_consecutive_line_numbers() {
        let mut order = order();
        let first = order
            .add_order_item(BookIsbn::new("9784297100339"), OrderItemQuantity::new(3))
            .unwrap()
            .clone();
        let second = order
            .add_order_item(BookIsbn::new("9784873119786"), OrderItemQuantity::new(1))
            .unwrap()
            .clone();
        assert_eq!(first.id(), &OrderItemId::new(1));
        assert_eq!(second.id(), &OrderItemId::new(2));
        assert_eq!(first.order_id(), order.id());
        assert_eq!(order.items(), &[first, second]);
    }

    #[test]
    fn zero_quantity_lines_are_rejected() {
        let mut order = order();
        let error = order
            .add_order_item(BookIsbn::new("9784297100339"), OrderItemQuantity::new(0))
            .unwrap_err();
        assert_eq!(
            error.current_context(),
            &KernelError::InvalidQuantity { quantity: 0 }
        );
        assert!(order.items().is_empty());
    }

    #[test]
    fn shipped_orders_accept_no_more_items() {
        let mut order = order();
        order.ship().unwrap();
        let error = order
            .add_order_item(BookIsbn::new("9784297100339"), OrderItemQuantity::new(1))
            .unwrap_err();
        assert_eq!(
            error.current_context(),
            &KernelError::InvalidState {
                required: OrderStatus::Pending,
                actual: OrderStatus::Shipped,
            }
        );
    }

    #[test]
    fn terminal_states_never_transition() {
        let mut shipped = order();
        shipped.ship().unwrap();
        assert!(shipped.ship().is_err());
        assert!(shipped.cancel().is_err());
        assert!(shipped.validate_cancellation().is_err());
        assert_eq!(shipped.status(), &OrderStatus::Shipped);

        let mut cancelled = order();
        cancelled.cancel().unwrap();
        assert!(cancelled.ship().is_err());
        assert!(cancelled.cancel().is_err());
        assert_eq!(cancelled.status(), &OrderStatus::Cancelled);
    }

    #[test]
    fn validating_cancellation_leaves_the_order_untouched() {
        let order = order();
        let before = order.clone();
        order.validate_cancellation().unwrap();
        assert_eq!(order, before);
    }

    #[test]
    fn rehydrated_items_are_ordered_by_line() {
        let mut source = order();
        source
            .add_order_item(BookIsbn::new("9784297100339"), OrderItemQuantity::new(1))
            .unwrap();
        source
            .add_order_item(BookIsbn::new("9784873119786"), OrderItemQuantity::new(2))
            .unwrap();
        let mut items = source.items().to_vec();
        items.reverse();

        let restored = Order::new(
            *source.id(),
            *source.customer_id(),
            source.ordered_at().clone(),
            *source.status(),
            source.created_at().clone(),
            source.updated_at().clone(),
        )
        .with_items(items);
        assert_eq!(restored, source);
    }
}
