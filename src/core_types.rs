//! Core type definitions
//!
//! Id newtypes and the fixed catalog enums shared across the crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Order ID - ULID-based unique identifier, assigned by the store
///
/// Using ULID provides:
/// - Monotonic, sortable IDs
/// - No coordination needed (no machine_id)
/// - 128-bit with good entropy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(ulid::Ulid);

impl OrderId {
    /// Generate a new unique OrderId
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Get the inner ULID value
    pub fn inner(&self) -> ulid::Ulid {
        self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(ulid::Ulid::from_string(s)?))
    }
}

/// Payment ID - ULID-based unique identifier, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(ulid::Ulid);

impl PaymentId {
    /// Generate a new unique PaymentId
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Get the inner ULID value
    pub fn inner(&self) -> ulid::Ulid {
        self.0
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PaymentId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(ulid::Ulid::from_string(s)?))
    }
}

/// Customer identity as issued by the auth provider (opaque string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Wrap a provider-issued customer id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as &str
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the id is empty or whitespace-only
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Service category from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceType {
    WashAndFold,
    DryClean,
    Iron,
    Express,
}

impl ServiceType {
    /// Get human-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::WashAndFold => "washAndFold",
            ServiceType::DryClean => "dryClean",
            ServiceType::Iron => "iron",
            ServiceType::Express => "express",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Garment categories billable as extra items
///
/// The set is closed: unknown keys in stored or submitted extra-item
/// maps fail deserialization instead of defaulting to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GarmentType {
    TShirts,
    Shirts,
    Pants,
    Shorts,
    Dresses,
    Jackets,
    Towels,
    Bedsheets,
}

impl GarmentType {
    /// All known garment types, in display order
    pub const ALL: [GarmentType; 8] = [
        GarmentType::TShirts,
        GarmentType::Shirts,
        GarmentType::Pants,
        GarmentType::Shorts,
        GarmentType::Dresses,
        GarmentType::Jackets,
        GarmentType::Towels,
        GarmentType::Bedsheets,
    ];

    /// Store/display key for the garment type
    pub fn as_str(&self) -> &'static str {
        match self {
            GarmentType::TShirts => "tShirts",
            GarmentType::Shirts => "shirts",
            GarmentType::Pants => "pants",
            GarmentType::Shorts => "shorts",
            GarmentType::Dresses => "dresses",
            GarmentType::Jackets => "jackets",
            GarmentType::Towels => "towels",
            GarmentType::Bedsheets => "bedsheets",
        }
    }
}

impl fmt::Display for GarmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Get current timestamp in milliseconds
#[inline]
pub fn current_time_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
