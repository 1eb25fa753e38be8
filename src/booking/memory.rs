//! In-memory gateway adapters
//!
//! Simulated collaborators for tests and host-app prototyping. The
//! memory store mirrors the real store's contract: ids are assigned on
//! write and records are returned as stored, never mutated.

use std::sync::Mutex;

use async_trait::async_trait;

use super::gateway::{IdentityProvider, PersistenceGateway, StoreError};
use crate::core_types::{CustomerId, OrderId, PaymentId};
use crate::models::{Order, Payment};

/// Identity provider fixed to one signed-in customer (or none)
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    customer_id: Option<CustomerId>,
}

impl StaticIdentity {
    pub fn signed_in(customer_id: CustomerId) -> Self {
        Self {
            customer_id: Some(customer_id),
        }
    }

    pub fn signed_out() -> Self {
        Self { customer_id: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_customer_id(&self) -> Option<CustomerId> {
        self.customer_id.clone()
    }
}

#[derive(Debug, Default)]
struct Tables {
    orders: Vec<(OrderId, Order)>,
    payments: Vec<(PaymentId, Payment)>,
}

/// Mutex-guarded in-memory persistence gateway
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of orders written so far
    pub fn order_count(&self) -> usize {
        self.tables.lock().map(|t| t.orders.len()).unwrap_or(0)
    }

    /// Number of payments written so far
    pub fn payment_count(&self) -> usize {
        self.tables.lock().map(|t| t.payments.len()).unwrap_or(0)
    }

    /// All payments recorded against one order
    pub fn payments_for_order(&self, order_id: OrderId) -> Vec<Payment> {
        self.tables
            .lock()
            .map(|t| {
                t.payments
                    .iter()
                    .filter(|(_, p)| p.order_id == order_id)
                    .map(|(_, p)| p.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn poisoned(_e: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable("store lock poisoned".to_string())
}

#[async_trait]
impl PersistenceGateway for MemoryStore {
    async fn create_order(&self, order: &Order) -> Result<OrderId, StoreError> {
        let mut tables = self.tables.lock().map_err(poisoned)?;
        let order_id = OrderId::new();
        tables.orders.push((order_id, order.clone()));
        Ok(order_id)
    }

    async fn create_payment(&self, payment: &Payment) -> Result<PaymentId, StoreError> {
        let mut tables = self.tables.lock().map_err(poisoned)?;
        let payment_id = PaymentId::new();
        tables.payments.push((payment_id, payment.clone()));
        Ok(payment_id)
    }

    async fn orders_for_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<(OrderId, Order)>, StoreError> {
        let tables = self.tables.lock().map_err(poisoned)?;
        Ok(tables
            .orders
            .iter()
            .filter(|(_, o)| &o.customer_id == customer_id)
            .map(|(id, o)| (*id, o.clone()))
            .collect())
    }
}
