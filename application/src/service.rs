mod book;
mod customer;
mod order;

pub use self::{book::*, customer::*, order::*};

use kernel::interface::database::Transaction;
use kernel::KernelError;

/// Commits `transaction` when `result` is `Ok`, rolls it back otherwise.
///
/// The original report is always the one returned; a failed roll back is attached to it.
pub(crate) async fn complete<T, O>(
    transaction: T,
    result: error_stack::Result<O, KernelError>,
) -> error_stack::Result<O, KernelError>
where
    T: Transaction,
{
    match result {
        Ok(value) => {
            transaction.commit().await?;
            Ok(value)
        }
        Err(report) => {
            if report.current_context().is_business() {
                tracing::warn!(error = %report.current_context(), "Rejected, rolling back");
            } else {
                tracing::error!(error = ?report, "Failed, rolling back");
            }
            match transaction.roll_back().await {
                Ok(()) => Err(report),
                Err(roll_back) => {
                    tracing::error!(error = ?roll_back, "Roll back failed");
                    Err(report.attach_printable(format!("Roll back also failed: {roll_back:?}")))
                }
            }
        }
    }
}
