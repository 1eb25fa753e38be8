//! Booking Orchestrator
//!
//! Drives one booking attempt end to end: validate, price, checkout,
//! persist the order, persist the payment. One linear async sequence
//! per call, no implicit retries, no writes before the gateway approves.
//!
//! Re-invoking after a post-payment failure is NOT idempotent: it can
//! create a second order/payment pair. The caller must gate
//! resubmission behind explicit user confirmation (and disable the
//! submit control while a call is in flight; the core does not
//! serialize concurrent attempts).

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::error::BookingError;
use super::gateway::{CheckoutOutcome, CheckoutRequest, PaymentGateway, PersistenceGateway};
use crate::config::PricingConfig;
use crate::core_types::{CustomerId, OrderId, PaymentId};
use crate::models::{BookingRequest, Order, Payment};
use crate::pricing;
use crate::validation::{
    ValidationError, validate_booking_inputs, validate_order_record, validate_payment_record,
    validate_quantity, validate_service,
};

/// Method tag recorded on payments made through the checkout sheet
const PAYMENT_METHOD: &str = "card";

/// Successful booking result handed back to the UI
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub order_id: OrderId,
    pub payment_id: PaymentId,
    pub final_price: Decimal,
}

/// Orchestrates the booking-to-payment sequence
pub struct BookingOrchestrator {
    config: PricingConfig,
    store: Arc<dyn PersistenceGateway>,
    payments: Arc<dyn PaymentGateway>,
}

impl BookingOrchestrator {
    /// Create a new BookingOrchestrator
    pub fn new(
        config: PricingConfig,
        store: Arc<dyn PersistenceGateway>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            config,
            store,
            payments,
        }
    }

    /// Run one booking attempt to completion.
    ///
    /// Sequence: validate inputs, compute the breakdown, open checkout,
    /// persist the order, persist the payment referencing it. Failures
    /// before checkout have no side effects; failures after a captured
    /// payment surface as [`BookingError::DataIntegrity`] and require
    /// manual reconciliation, never an automatic retry.
    pub async fn complete_booking(
        &self,
        request: BookingRequest,
    ) -> Result<BookingConfirmation, BookingError> {
        // 1. Structural input validation - no side effects on failure
        if request.customer_id.is_blank() {
            return Err(ValidationError::MissingField {
                field: "customer_id",
            }
            .into());
        }
        validate_service(&request.service)?;
        validate_quantity(request.quantity)?;
        validate_booking_inputs(&request.pickup_time, &request.address)?;

        // 2. Price the booking; a non-positive quote blocks checkout
        let breakdown = pricing::quote(
            &request.service,
            request.quantity,
            request.offer.as_ref(),
            &request.extra_items,
            &self.config,
        );
        if breakdown.final_price <= Decimal::ZERO {
            return Err(BookingError::Pricing {
                detail: format!(
                    "final price {} is not payable (service {})",
                    breakdown.final_price, request.service.id
                ),
            });
        }
        let amount_minor_units =
            pricing::to_minor_units(breakdown.final_price).ok_or_else(|| BookingError::Pricing {
                detail: format!(
                    "final price {} has no integer minor-unit representation",
                    breakdown.final_price
                ),
            })?;

        debug!(
            customer_id = %request.customer_id,
            service_id = %request.service.id,
            final_price = %breakdown.final_price,
            amount_minor_units,
            "Booking priced, opening checkout"
        );

        // 3. Checkout round trip - the only unbounded suspension point.
        //    A decline of any kind terminates the attempt with zero writes.
        let outcome = self
            .payments
            .open_checkout(CheckoutRequest {
                amount_minor_units,
                currency: self.config.currency.clone(),
                customer_id: request.customer_id.clone(),
                description: request.service.name.clone(),
            })
            .await;
        let receipt_id = match outcome {
            CheckoutOutcome::Approved { receipt_id } => receipt_id,
            CheckoutOutcome::Declined { reason } => {
                warn!(
                    customer_id = %request.customer_id,
                    reason = %reason,
                    "Checkout declined, no records written"
                );
                return Err(BookingError::Payment { reason });
            }
        };

        // Money is captured from here on. Any failure below is a
        // reconciliation case, not a retry case.

        // 4. Assemble and guard the order record
        let order = Order::from_booking(&request, &breakdown);
        if let Err(e) = validate_order_record(&order) {
            error!(
                customer_id = %request.customer_id,
                receipt_id = %receipt_id,
                error = %e,
                "Captured payment but order record failed validation"
            );
            return Err(BookingError::DataIntegrity {
                order_id: None,
                detail: format!("order record invalid after captured payment: {}", e),
            });
        }

        // 5. Persist the order
        let order_id = match self.store.create_order(&order).await {
            Ok(id) => id,
            Err(e) => {
                error!(
                    customer_id = %request.customer_id,
                    receipt_id = %receipt_id,
                    error = %e,
                    "Captured payment but order write failed"
                );
                return Err(BookingError::DataIntegrity {
                    order_id: None,
                    detail: format!("order write failed after captured payment: {}", e),
                });
            }
        };
        info!(
            order_id = %order_id,
            customer_id = %request.customer_id,
            final_price = %breakdown.final_price,
            "Order created"
        );

        // 6. Assemble and guard the payment record
        let payment = Payment::completed(
            order_id,
            request.customer_id.clone(),
            breakdown.final_price,
            receipt_id,
            PAYMENT_METHOD.to_string(),
        );
        if let Err(e) = validate_payment_record(&payment) {
            error!(order_id = %order_id, error = %e, "Payment record failed validation");
            return Err(BookingError::DataIntegrity {
                order_id: Some(order_id),
                detail: format!("payment record invalid: {}", e),
            });
        }

        // 7. Persist the payment
        let payment_id = match self.store.create_payment(&payment).await {
            Ok(id) => id,
            Err(e) => {
                error!(
                    order_id = %order_id,
                    error = %e,
                    "Order exists but payment write failed"
                );
                return Err(BookingError::DataIntegrity {
                    order_id: Some(order_id),
                    detail: format!("payment write failed: {}", e),
                });
            }
        };

        info!(
            order_id = %order_id,
            payment_id = %payment_id,
            "Booking completed"
        );

        Ok(BookingConfirmation {
            order_id,
            payment_id,
            final_price: breakdown.final_price,
        })
    }

    /// Order history for one customer (read path for the surrounding
    /// screens; store failures propagate as [`BookingError::Store`])
    pub async fn order_history(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<(OrderId, Order)>, BookingError> {
        Ok(self.store.orders_for_customer(customer_id).await?)
    }
}
