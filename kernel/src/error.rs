use std::fmt::Display;

use error_stack::Context;

use crate::entity::OrderStatus;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum KernelError {
    NotFound {
        entity: &'static str,
        id: String,
    },
    InvalidArgument {
        reason: String,
    },
    InvalidQuantity {
        quantity: i32,
    },
    InsufficientStock {
        isbn: String,
        title: String,
        requested: i32,
        available: i32,
    },
    InvalidState {
        required: OrderStatus,
        actual: OrderStatus,
    },
    BookHasStock {
        isbn: String,
        stock: i32,
    },
    Concurrency,
    Timeout,
    Internal,
}

impl KernelError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by the caller's input or the current state of the
    /// data, as opposed to a failure of the store itself.
    pub fn is_business(&self) -> bool {
        !matches!(
            self,
            KernelError::Concurrency | KernelError::Timeout | KernelError::Internal
        )
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            KernelError::InvalidArgument { reason } => write!(f, "Invalid argument: {reason}"),
            KernelError::InvalidQuantity { quantity } => {
                write!(f, "Quantity must be at least 1 (given: {quantity})")
            }
            KernelError::InsufficientStock {
                isbn,
                title,
                requested,
                available,
            } => write!(
                f,
                "Insufficient stock (requested: {requested}, available: {available}, book: {title} [{isbn}])"
            ),
            KernelError::InvalidState { required, actual } => write!(
                f,
                "Operation requires status {required}; current status is {actual}"
            ),
            KernelError::BookHasStock { isbn, stock } => {
                write!(f, "Book {isbn} still has {stock} in stock and cannot be deleted")
            }
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}

#[cfg(test)]
mod test {
    use crate::entity::OrderStatus;
    use crate::KernelError;

    #[test]
    fn insufficient_stock_message_names_the_book() {
        let error = KernelError::InsufficientStock {
            isbn: "9784297100339".to_string(),
            title: "Rust Book".to_string(),
            requested: 11,
            available: 10,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient stock (requested: 11, available: 10, book: Rust Book [9784297100339])"
        );
    }

    #[test]
    fn invalid_state_message_names_both_states() {
        let error = KernelError::InvalidState {
            required: OrderStatus::Pending,
            actual: OrderStatus::Shipped,
        };
        assert_eq!(
            error.to_string(),
            "Operation requires status PENDING; current status is SHIPPED"
        );
    }

    #[test]
    fn store_failures_are_not_business_errors() {
        assert!(!KernelError::Internal.is_business());
        assert!(!KernelError::Concurrency.is_business());
        assert!(KernelError::not_found("Book", "123").is_business());
    }
}
