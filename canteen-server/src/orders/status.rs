//! Order status workflow
//!
//! Forward only: PLACED → READY → COMPLETED, skipping READY is allowed.

use shared::error::ErrorCode;
use shared::models::OrderStatus;

use crate::utils::{AppError, AppResult};

/// Check a status change
///
/// `Ok(false)` when `to == from` (nothing to do), `Ok(true)` for a valid
/// forward move.
pub fn check_transition(from: OrderStatus, to: OrderStatus) -> AppResult<bool> {
    if from == to {
        return Ok(false);
    }
    if to.rank() < from.rank() {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Cannot move order from {from} back to {to}"),
        )
        .with_detail("from", from.as_str())
        .with_detail("to", to.as_str()));
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn test_forward_moves() {
        assert!(check_transition(Placed, Ready).unwrap());
        assert!(check_transition(Ready, Completed).unwrap());
        assert!(check_transition(Placed, Completed).unwrap());
    }

    #[test]
    fn test_same_status_is_noop() {
        assert!(!check_transition(Ready, Ready).unwrap());
    }

    #[test]
    fn test_backwards_rejected() {
        for (from, to) in [(Ready, Placed), (Completed, Ready), (Completed, Placed)] {
            let err = check_transition(from, to).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
        }
    }
}
