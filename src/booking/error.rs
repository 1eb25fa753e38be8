//! Booking error taxonomy
//!
//! Every failure of `complete_booking` maps to exactly one of these
//! kinds so the UI can choose the right recovery path: correct the
//! input, reload the catalog, retry the whole flow, or stop and direct
//! the user to support.

use crate::booking::gateway::StoreError;
use crate::core_types::OrderId;
use crate::validation::ValidationError;

/// Typed failure of one booking attempt
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// Malformed input, rejected before any side effect. The user
    /// corrects the form and resubmits.
    #[error("Invalid booking input: {0}")]
    Validation(#[from] ValidationError),

    /// The computed amount is not a payable positive price; usually bad
    /// catalog data upstream. Recoverable by reloading the catalog.
    #[error("Price not computable: {detail}")]
    Pricing { detail: String },

    /// Checkout declined, cancelled, or failed in transit. Nothing was
    /// written; the whole flow may be retried.
    #[error("Payment failed: {reason}")]
    Payment { reason: String },

    /// Payment was captured but a later persistence step failed or
    /// failed validation. NOT locally recoverable: an automatic retry
    /// risks a duplicate charge, so the caller must route the user to
    /// support/reconciliation. Carries the order id when the order
    /// write had already succeeded.
    #[error("Booking records inconsistent after captured payment (order: {order_id:?}): {detail}")]
    DataIntegrity {
        order_id: Option<OrderId>,
        detail: String,
    },

    /// Store failure outside the post-payment window (read paths and
    /// other non-orchestration operations).
    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

impl BookingError {
    /// True when re-invoking `complete_booking` with the same input is
    /// safe (no money captured, nothing persisted)
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BookingError::Validation(_)
                | BookingError::Pricing { .. }
                | BookingError::Payment { .. }
        )
    }

    /// True when the failure needs manual reconciliation
    pub fn needs_reconciliation(&self) -> bool {
        matches!(self, BookingError::DataIntegrity { .. })
    }
}
