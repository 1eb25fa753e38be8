//! Washbook - Laundry-Service Booking Core
//!
//! Pricing and order/payment orchestration for a laundry booking app.
//! The UI layer collects a service selection and hands it to this crate,
//! which computes a consistent total and drives the checkout-then-persist
//! sequence against external gateways.
//!
//! # Modules
//!
//! - [`core_types`] - Id newtypes and catalog enums
//! - [`models`] - Service, Offer, PriceBreakdown, Order and Payment records
//! - [`pricing`] - Pure price computation (fixed-point decimals)
//! - [`validation`] - Structural validation of inputs and records
//! - [`booking`] - Orchestrator, gateway traits, and the in-memory store
//! - [`config`] - YAML application config (logging + pricing)
//! - [`logging`] - tracing subscriber setup

// Core types - must be first!
pub mod core_types;

pub mod config;
pub mod logging;
pub mod models;
pub mod pricing;
pub mod validation;

pub mod booking;

// Convenient re-exports at crate root
pub use booking::{
    BookingConfirmation, BookingError, BookingOrchestrator, CheckoutOutcome, CheckoutRequest,
    IdentityProvider, MemoryStore, PaymentGateway, PersistenceGateway, StoreError,
};
pub use core_types::{CustomerId, GarmentType, OrderId, PaymentId, ServiceType};
pub use models::{
    BookingRequest, ExtraItems, Offer, Order, OrderStatus, Payment, PaymentStatus, PriceBreakdown,
    Service, ServiceSnapshot,
};
pub use config::PricingConfig;
pub use validation::ValidationError;
