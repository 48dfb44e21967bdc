//! Placed orders and their fulfilment status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Dish;
use super::dish::lenient_amount;

/// Numeric order identifier, unique and assigned in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Fulfilment state of an order.
///
/// Snapshots may hold labels outside the known lifecycle. Those load as
/// [`OrderStatus::Other`] and are written back unchanged until an
/// administrator sets a known status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    /// Placed, not yet picked up by the kitchen.
    Pending,
    /// Being cooked.
    Preparing,
    /// Waiting at the counter.
    Ready,
    /// Handed over.
    Completed,
    /// Abandoned.
    Cancelled,
    /// Unrecognised stored label, kept verbatim.
    Other(String),
}

impl OrderStatus {
    /// Every known status in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Preparing,
        Self::Ready,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Retired label that older snapshots used for [`OrderStatus::Completed`].
    pub const LEGACY_DELIVERED: &'static str = "Delivered";

    /// Stored label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Preparing => "Preparing",
            Self::Ready => "Ready",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Other(label) => label.as_str(),
        }
    }

    /// Whether the order has left the kitchen for good.
    ///
    /// ```
    /// use eatery::domain::OrderStatus;
    ///
    /// assert!(OrderStatus::Cancelled.is_final());
    /// assert!(!OrderStatus::Ready.is_final());
    /// ```
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether this is the retired `Delivered` label.
    #[must_use]
    pub fn is_legacy_delivered(&self) -> bool {
        matches!(self, Self::Other(label) if label == Self::LEGACY_DELIVERED)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for OrderStatus {
    fn from(label: String) -> Self {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == label)
            .unwrap_or(Self::Other(label))
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(label) => label,
            known => known.as_str().to_owned(),
        }
    }
}

/// Error returned when parsing an unknown status label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOrderStatusError {
    /// The unrecognised input value.
    pub input: String,
}

impl fmt::Display for ParseOrderStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown order status: {}", self.input)
    }
}

impl std::error::Error for ParseOrderStatusError {}

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseOrderStatusError {
                input: s.to_owned(),
            })
    }
}

/// A checked-out cart.
///
/// Items and total are fixed at checkout; only the status changes later.
/// Stored records missing optional fields load with empty defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: OrderId,
    #[serde(default)]
    customer: String,
    #[serde(default)]
    items: Vec<Dish>,
    #[serde(default, deserialize_with = "lenient_amount")]
    total: u64,
    status: OrderStatus,
    #[serde(default)]
    payment_method: String,
}

impl Order {
    pub(crate) const fn new(
        id: OrderId,
        customer: String,
        items: Vec<Dish>,
        total: u64,
        payment_method: String,
    ) -> Self {
        Self {
            id,
            customer,
            items,
            total,
            status: OrderStatus::Pending,
            payment_method,
        }
    }

    pub(crate) fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    pub(crate) fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    /// Order identifier.
    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    /// Name of the customer who checked out.
    #[must_use]
    pub fn customer(&self) -> &str {
        self.customer.as_str()
    }

    /// Dish copies captured at checkout.
    #[must_use]
    pub fn items(&self) -> &[Dish] {
        &self.items
    }

    /// Total captured at checkout. Never recomputed.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Current fulfilment status.
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status.clone()
    }

    /// Payment method label, e.g. `Pay at Cashier`.
    #[must_use]
    pub fn payment_method(&self) -> &str {
        self.payment_method.as_str()
    }
}

/// Rule applied when an administrator changes an order's status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionPolicy {
    /// Any status may replace any other.
    #[default]
    Permissive,
    /// Completed and cancelled orders keep their status.
    LockFinal,
}

impl TransitionPolicy {
    /// Whether moving from `from` to `to` is allowed.
    #[must_use]
    pub fn permits(self, from: &OrderStatus, to: &OrderStatus) -> bool {
        match self {
            Self::Permissive => true,
            Self::LockFinal => !from.is_final() || from == to,
        }
    }
}
