//! Structural validation of booking inputs and persisted records
//!
//! Two layers use these checks: the UI-facing input checks (service,
//! quantity, booking details) and the last-chance record guards run
//! immediately before a store write. The two are deliberately
//! independent so that UI-level validation and persistence-level
//! validation cannot silently drift apart.

use rust_decimal::Decimal;

use crate::models::{Order, Payment, Service};

// ============================================================================
// Validation Errors
// ============================================================================

/// Structural validation failures, reported before any side effect
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Field must not be blank: {field}")]
    BlankField { field: &'static str },

    #[error("Service price must be positive: got {got}")]
    NonPositivePrice { got: Decimal },

    #[error("Quantity must be a positive integer: got {got}")]
    NonPositiveQuantity { got: u32 },

    #[error("Record amount must be positive: got {got}")]
    NonPositiveAmount { got: Decimal },
}

fn require_non_blank(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::BlankField { field })
    } else {
        Ok(())
    }
}

// ============================================================================
// Input checks (pre-pricing)
// ============================================================================

/// Check a catalog service: non-empty id and name, positive unit price.
///
/// The service type is a closed enum so its presence is enforced by the
/// type system; only the string and numeric fields can be malformed.
pub fn validate_service(service: &Service) -> Result<(), ValidationError> {
    require_non_blank(&service.id, "service.id")?;
    require_non_blank(&service.name, "service.name")?;
    if service.price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice { got: service.price });
    }
    Ok(())
}

/// Check the booked quantity: at least one unit
pub fn validate_quantity(quantity: u32) -> Result<(), ValidationError> {
    if quantity == 0 {
        return Err(ValidationError::NonPositiveQuantity { got: quantity });
    }
    Ok(())
}

/// Check the user-entered booking details: pickup slot and address
/// must be non-blank (the pickup date is typed and always present)
pub fn validate_booking_inputs(pickup_time: &str, address: &str) -> Result<(), ValidationError> {
    require_non_blank(pickup_time, "pickup_time")?;
    require_non_blank(address, "address")?;
    Ok(())
}

// ============================================================================
// Record guards (pre-write)
// ============================================================================

/// Last-chance guard on an assembled Order immediately before the
/// store write, independent of earlier UI-level validation
pub fn validate_order_record(order: &Order) -> Result<(), ValidationError> {
    if order.customer_id.is_blank() {
        return Err(ValidationError::MissingField {
            field: "order.customer_id",
        });
    }
    require_non_blank(&order.service.id, "order.service.id")?;
    require_non_blank(&order.pickup_time, "order.pickup_time")?;
    require_non_blank(&order.address, "order.address")?;
    if order.service.final_price <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount {
            got: order.service.final_price,
        });
    }
    Ok(())
}

/// Guard on an assembled Payment before the store write: it must
/// reference an order, a customer, a gateway receipt, and carry a
/// positive amount
pub fn validate_payment_record(payment: &Payment) -> Result<(), ValidationError> {
    if payment.customer_id.is_blank() {
        return Err(ValidationError::MissingField {
            field: "payment.customer_id",
        });
    }
    require_non_blank(&payment.gateway_payment_id, "payment.gateway_payment_id")?;
    if payment.amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount {
            got: payment.amount,
        });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
