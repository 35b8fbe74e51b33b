mod book;
mod customer;
mod order;

pub use self::{book::*, customer::*, order::*};

use error_stack::Report;
use kernel::KernelError;

/// Shape checks run before any service is called.
fn require(condition: bool, reason: &str) -> error_stack::Result<(), KernelError> {
    if condition {
        Ok(())
    } else {
        Err(Report::new(KernelError::invalid_argument(reason)))
    }
}
