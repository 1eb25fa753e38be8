//! Booking price computation
//!
//! Pure, stateless functions over `rust_decimal::Decimal`. All monetary
//! results are rounded to 2 decimal places inside the engine; string
//! formatting belongs to the presentation layer.
//!
//! Invalid catalog input never panics or errors here: `base_price`
//! returns zero and callers treat a zero quote as "not computable",
//! blocking checkout downstream.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::PricingConfig;
use crate::models::{ExtraItems, Offer, PriceBreakdown, Service};
use crate::validation::{validate_quantity, validate_service};

/// Surcharge per extra garment unit, as a fraction of the base price (0.5)
pub const EXTRA_ITEM_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Minor units per major currency unit (cents per dollar)
pub const MINOR_UNITS_PER_MAJOR: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Monetary rounding precision (2 decimal places)
pub const MONEY_DP: u32 = 2;

/// Base service price: `unit price * quantity`, rounded to 2 dp.
///
/// Returns `Decimal::ZERO` when the service fails catalog validation or
/// the quantity is zero. A zero result means "not computable" and must
/// block checkout; it is never a legitimate price.
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use washbook::core_types::ServiceType;
/// use washbook::models::Service;
/// use washbook::pricing::base_price;
///
/// let service = Service {
///     id: "svc_wash".into(),
///     name: "Wash & Fold".into(),
///     price: Decimal::new(1499, 2),
///     unit: "kg".into(),
///     service_type: ServiceType::WashAndFold,
/// };
/// assert_eq!(base_price(&service, 2), Decimal::new(2998, 2));
/// ```
#[inline]
pub fn base_price(service: &Service, quantity: u32) -> Decimal {
    if validate_service(service).is_err() || validate_quantity(quantity).is_err() {
        return Decimal::ZERO;
    }
    (service.price * Decimal::from(quantity)).round_dp(MONEY_DP)
}

/// Surcharge for extra garments: `total units * base price * 0.5`.
///
/// Each extra unit costs half the base price. Counts are unsigned so
/// negative counts cannot occur; a zero base yields a zero surcharge.
#[inline]
pub fn additional_items_price(extras: &ExtraItems, base_price: Decimal) -> Decimal {
    if base_price <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (Decimal::from(extras.total_units()) * base_price * EXTRA_ITEM_RATE).round_dp(MONEY_DP)
}

/// Apply a promotional offer to the base service price.
///
/// Returns `(discount_amount, discounted_price)`. An absent or inactive
/// offer, or a percentage outside 0-100, discounts nothing. Always
/// `discounted_price + discount_amount == original_price`.
#[inline]
pub fn apply_offer(original_price: Decimal, offer: Option<&Offer>) -> (Decimal, Decimal) {
    let discount = match offer {
        Some(o) if o.is_applicable() => {
            (original_price * o.discount_percent / Decimal::ONE_HUNDRED).round_dp(MONEY_DP)
        }
        _ => Decimal::ZERO,
    };
    (discount, original_price - discount)
}

/// Final payable amount: discounted base + extras + delivery fee, 2 dp
#[inline]
pub fn final_price(
    discounted_price: Decimal,
    additional_items_price: Decimal,
    delivery_fee: Decimal,
) -> Decimal {
    (discounted_price + additional_items_price + delivery_fee).round_dp(MONEY_DP)
}

/// Compute the full price breakdown for one booking.
///
/// Each component is rounded to 2 dp before summation so the invariant
/// `final = discounted + additional + delivery` holds exactly.
///
/// When the base price is not computable (bad catalog data or zero
/// quantity), every field including the delivery fee is zero: the
/// breakdown must read as "no payable amount", not "delivery fee only".
pub fn quote(
    service: &Service,
    quantity: u32,
    offer: Option<&Offer>,
    extras: &ExtraItems,
    config: &PricingConfig,
) -> PriceBreakdown {
    let original = base_price(service, quantity);
    if original <= Decimal::ZERO {
        return PriceBreakdown {
            original_service_price: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            discounted_service_price: Decimal::ZERO,
            additional_items_price: Decimal::ZERO,
            delivery_fee: Decimal::ZERO,
            final_price: Decimal::ZERO,
        };
    }

    let (discount_amount, discounted) = apply_offer(original, offer);
    let additional = additional_items_price(extras, original);
    let delivery_fee = config.delivery_fee.round_dp(MONEY_DP);

    PriceBreakdown {
        original_service_price: original,
        discount_amount,
        discounted_service_price: discounted,
        additional_items_price: additional,
        delivery_fee,
        final_price: final_price(discounted, additional, delivery_fee),
    }
}

/// Convert a major-unit amount to the gateway's integer minor units
/// (e.g. 34.98 -> 3498).
///
/// Returns `None` unless the scaled amount is a positive exact integer;
/// the orchestrator treats `None` as a pricing failure and never calls
/// the gateway with it.
#[inline]
pub fn to_minor_units(amount: Decimal) -> Option<u64> {
    let scaled = (amount * MINOR_UNITS_PER_MAJOR).normalize();
    if scaled <= Decimal::ZERO || scaled.fract() != Decimal::ZERO {
        return None;
    }
    scaled.to_u64()
}
