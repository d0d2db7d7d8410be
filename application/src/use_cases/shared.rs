//! Shared utilities for use cases.

use crate::use_cases::execute_with_tools::RunError;
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
///
/// Returns `Err(RunError::Cancelled)` if the token exists and is cancelled.
pub(crate) fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), RunError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(RunError::Cancelled);
    }
    Ok(())
}
