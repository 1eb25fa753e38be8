//! Gateway traits for the external collaborators
//!
//! The orchestrator only ever talks to these boundaries; concrete
//! adapters (document store, payment provider SDK) live in the host
//! application. Every trait call resolves exactly once.

use async_trait::async_trait;

use crate::core_types::{CustomerId, OrderId, PaymentId};
use crate::models::{Order, Payment};

/// Failures from the durable store. Propagated, never retried here.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store I/O failure: {0}")]
    Io(String),

    #[error("Store rejected the record: {0}")]
    Rejected(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Current-customer accessor provided by the auth layer
pub trait IdentityProvider: Send + Sync {
    /// The signed-in customer, if any
    fn current_customer_id(&self) -> Option<CustomerId>;
}

/// Durable store for Order and Payment records.
///
/// The store assigns ids; a returned id means the record is durable.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Persist a new order, returning the store-assigned id
    async fn create_order(&self, order: &Order) -> Result<OrderId, StoreError>;

    /// Persist a new payment, returning the store-assigned id
    async fn create_payment(&self, payment: &Payment) -> Result<PaymentId, StoreError>;

    /// Orders previously placed by one customer (order-history screens)
    async fn orders_for_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<(OrderId, Order)>, StoreError>;
}

/// What the orchestrator sends into the checkout sheet
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    /// Amount in integer minor units (e.g. cents), always positive
    pub amount_minor_units: u64,
    /// ISO currency code
    pub currency: String,
    pub customer_id: CustomerId,
    /// Free-form line shown on the sheet, e.g. the service name
    pub description: String,
}

/// Terminal outcome of one checkout invocation.
///
/// User cancellation and transport failures both surface as `Declined`;
/// there is no pending state at this boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Gateway captured the payment and issued a receipt
    Approved { receipt_id: String },
    /// Gateway declined, user cancelled, or the round trip failed
    Declined { reason: String },
}

impl CheckoutOutcome {
    #[inline]
    pub fn is_approved(&self) -> bool {
        matches!(self, CheckoutOutcome::Approved { .. })
    }
}

/// Third-party checkout flow
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open the payment sheet and suspend until it settles.
    ///
    /// The sole unbounded suspension point of the booking flow;
    /// timeout policy belongs to the adapter, not the core.
    async fn open_checkout(&self, request: CheckoutRequest) -> CheckoutOutcome;
}
