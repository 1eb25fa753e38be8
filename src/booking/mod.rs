//! Booking orchestration
//!
//! The single public entry point the UI calls is
//! [`BookingOrchestrator::complete_booking`]. Everything it touches
//! beyond the pure pricing/validation modules goes through the gateway
//! traits in [`gateway`].
//!
//! # Flow
//!
//! ```text
//! validate -> quote -> open_checkout -> create_order -> create_payment
//!    |           |          |                |               |
//!    Validation  Pricing    Payment          DataIntegrity   DataIntegrity
//! ```
//!
//! Failures left of the checkout have no side effects. Failures right
//! of it mean money was captured and are surfaced as
//! [`BookingError::DataIntegrity`] for manual reconciliation.

pub mod error;
pub mod gateway;
pub mod memory;
pub mod orchestrator;

pub use error::BookingError;
pub use gateway::{
    CheckoutOutcome, CheckoutRequest, IdentityProvider, PaymentGateway, PersistenceGateway,
    StoreError,
};
pub use memory::{MemoryStore, StaticIdentity};
pub use orchestrator::{BookingConfirmation, BookingOrchestrator};
