//! Booking domain records
//!
//! Catalog inputs (Service, Offer, ExtraItems), the computed
//! PriceBreakdown, and the persisted Order/Payment records.
//!
//! Order and Payment are built through explicit constructors that
//! enumerate every field, so nothing leaks into a persisted record by
//! accident. The store owns both records after the write returns; this
//! crate never mutates them afterwards.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core_types::{CustomerId, GarmentType, OrderId, ServiceType, current_time_ms};

// ============================================================================
// Catalog inputs
// ============================================================================

/// Catalog service entry (immutable once fetched, owned by the catalog)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    /// Price per unit (e.g. per kg)
    pub price: Decimal,
    /// Unit label, e.g. "kg"
    pub unit: String,
    pub service_type: ServiceType,
}

/// Promotional offer applied to the base service price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    /// Percentage off the base service price, 0-100
    pub discount_percent: Decimal,
    pub active: bool,
    /// Display metadata, never read by pricing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Offer {
    /// True when the offer should discount a booking
    pub fn is_applicable(&self) -> bool {
        self.active
            && self.discount_percent >= Decimal::ZERO
            && self.discount_percent <= Decimal::ONE_HUNDRED
    }
}

/// Extra garment counts added on top of the base service
///
/// Keyed by the closed [`GarmentType`] set; counts are unsigned so a
/// negative count cannot be represented. BTreeMap keeps the persisted
/// key order stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraItems(BTreeMap<GarmentType, u32>);

impl ExtraItems {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the count for one garment type (builder-style)
    pub fn with(mut self, garment: GarmentType, count: u32) -> Self {
        self.set(garment, count);
        self
    }

    /// Set the count for one garment type; a zero count removes the entry
    pub fn set(&mut self, garment: GarmentType, count: u32) {
        if count == 0 {
            self.0.remove(&garment);
        } else {
            self.0.insert(garment, count);
        }
    }

    /// Count for one garment type (0 when absent)
    pub fn count(&self, garment: GarmentType) -> u32 {
        self.0.get(&garment).copied().unwrap_or(0)
    }

    /// Sum of all counts across garment types
    pub fn total_units(&self) -> u64 {
        self.0.values().map(|&c| c as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GarmentType, u32)> + '_ {
        self.0.iter().map(|(&g, &c)| (g, c))
    }
}

// ============================================================================
// Computed pricing
// ============================================================================

/// Full price decomposition for one booking (computed, never persisted)
///
/// Invariant: `final_price = discounted_service_price
/// + additional_items_price + delivery_fee`, every field rounded to
/// 2 decimal places and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub original_service_price: Decimal,
    pub discount_amount: Decimal,
    pub discounted_service_price: Decimal,
    pub additional_items_price: Decimal,
    pub delivery_fee: Decimal,
    pub final_price: Decimal,
}

impl PriceBreakdown {
    /// Check the additive invariant and non-negativity of all fields
    pub fn is_consistent(&self) -> bool {
        let parts = [
            self.original_service_price,
            self.discount_amount,
            self.discounted_service_price,
            self.additional_items_price,
            self.delivery_fee,
            self.final_price,
        ];
        parts.iter().all(|p| *p >= Decimal::ZERO)
            && self.final_price
                == self.discounted_service_price + self.additional_items_price + self.delivery_fee
    }
}

// ============================================================================
// Booking request (UI -> orchestrator)
// ============================================================================

/// Everything the orchestrator needs for one booking attempt.
///
/// The customer identity is an explicit field; there is no ambient
/// current-user singleton anywhere in this crate.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub customer_id: CustomerId,
    pub service: Service,
    pub quantity: u32,
    pub offer: Option<Offer>,
    pub extra_items: ExtraItems,
    pub pickup_date: NaiveDate,
    /// Slot label shown to the user, e.g. "10:00 - 12:00"
    pub pickup_time: String,
    pub address: String,
    pub notes: Option<String>,
}

// ============================================================================
// Persisted records
// ============================================================================

/// Order fulfillment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment settlement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentStatus {
    Completed,
    Failed,
}

/// Snapshot of the booked service frozen into the Order record
///
/// A copy, not a reference: later catalog price edits must not change
/// what the customer was charged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSnapshot {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub unit: String,
    pub service_type: ServiceType,
    pub quantity: u32,
    pub final_price: Decimal,
}

impl ServiceSnapshot {
    /// Freeze a catalog service plus the computed final price
    pub fn from_service(service: &Service, quantity: u32, final_price: Decimal) -> Self {
        Self {
            id: service.id.clone(),
            name: service.name.clone(),
            price: service.price,
            unit: service.unit.clone(),
            service_type: service.service_type,
            quantity,
            final_price,
        }
    }
}

/// Persisted order record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub customer_id: CustomerId,
    pub service: ServiceSnapshot,
    pub pickup_date: NaiveDate,
    pub pickup_time: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub offer_applied: bool,
    pub discount_percent: Decimal,
    /// Created timestamp (millis)
    pub created_at: i64,
}

impl Order {
    /// Assemble an Order from a booking request and its computed breakdown.
    ///
    /// Every persisted field is enumerated here; there is no spread of
    /// request fields into the record.
    pub fn from_booking(request: &BookingRequest, breakdown: &PriceBreakdown) -> Self {
        let offer_applied = request
            .offer
            .as_ref()
            .map(|o| o.is_applicable())
            .unwrap_or(false);
        let discount_percent = if offer_applied {
            request
                .offer
                .as_ref()
                .map(|o| o.discount_percent)
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        Self {
            customer_id: request.customer_id.clone(),
            service: ServiceSnapshot::from_service(
                &request.service,
                request.quantity,
                breakdown.final_price,
            ),
            pickup_date: request.pickup_date,
            pickup_time: request.pickup_time.clone(),
            address: request.address.clone(),
            notes: request.notes.clone(),
            status: OrderStatus::Processing,
            offer_applied,
            discount_percent,
            created_at: current_time_ms(),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order customer={} service={} qty={} total={} status={}",
            self.customer_id,
            self.service.id,
            self.service.quantity,
            self.service.final_price,
            self.status
        )
    }
}

/// Persisted payment record, created only after a gateway-approved
/// checkout and a successful order write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    /// Must equal the order's final price
    pub amount: Decimal,
    /// Receipt id issued by the payment gateway
    pub gateway_payment_id: String,
    pub status: PaymentStatus,
    /// Payment method tag, e.g. "card"
    pub method: String,
    /// Created timestamp (millis)
    pub created_at: i64,
}

impl Payment {
    /// Build the completed-payment record tied to a just-created order
    pub fn completed(
        order_id: OrderId,
        customer_id: CustomerId,
        amount: Decimal,
        gateway_payment_id: String,
        method: String,
    ) -> Self {
        Self {
            order_id,
            customer_id,
            amount,
            gateway_payment_id,
            status: PaymentStatus::Completed,
            method,
            created_at: current_time_ms(),
        }
    }
}
