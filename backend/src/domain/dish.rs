//! Menu dishes and their promotional tags.
//!
//! Dishes are owned by the [`CatalogStore`](super::CatalogStore) and are
//! addressed by position. Each dish also carries a surrogate [`DishId`] that
//! survives deletions elsewhere in the list.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::EateryError;

/// Promotional tag that places a dish on one of the home view shelves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DishTag {
    /// Shown on the featured shelf.
    Featured,
    /// Shown on the popular shelf.
    Popular,
    /// Shown on the new arrivals shelf.
    New,
}

impl DishTag {
    /// Every tag in display order.
    pub const ALL: [Self; 3] = [Self::Featured, Self::Popular, Self::New];

    /// Returns the stored string representation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use eatery::domain::DishTag;
    /// assert_eq!(DishTag::Featured.as_str(), "featured");
    /// assert_eq!(DishTag::New.as_str(), "new");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::Popular => "popular",
            Self::New => "new",
        }
    }
}

impl fmt::Display for DishTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown dish tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDishTagError {
    /// The unrecognised input value.
    pub input: String,
}

impl fmt::Display for ParseDishTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown dish tag: {}", self.input)
    }
}

impl std::error::Error for ParseDishTagError {}

impl FromStr for DishTag {
    type Err = ParseDishTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "featured" => Ok(Self::Featured),
            "popular" => Ok(Self::Popular),
            "new" => Ok(Self::New),
            _ => Err(ParseDishTagError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Stable surrogate identifier assigned when a dish is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DishId(Uuid);

impl DishId {
    /// Generate a new random [`DishId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation errors returned by [`Dish::new`] and [`Dish::revised`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DishValidationError {
    /// The name was blank once trimmed.
    BlankName,
    /// The category was blank once trimmed.
    BlankCategory,
    /// The price was below zero.
    NegativePrice {
        /// The rejected price.
        price: i64,
    },
}

impl fmt::Display for DishValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankName => write!(f, "dish name must not be empty"),
            Self::BlankCategory => write!(f, "dish category must not be empty"),
            Self::NegativePrice { price } => {
                write!(f, "dish price must not be negative (got {price})")
            }
        }
    }
}

impl std::error::Error for DishValidationError {}

impl From<DishValidationError> for EateryError {
    fn from(value: DishValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

/// Admin-supplied dish fields prior to validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DishDraft {
    /// Display name.
    pub name: String,
    /// Short description shown under the name.
    pub description: String,
    /// Whole-peso price.
    pub price: i64,
    /// Image URL or path.
    pub image_url: String,
    /// Menu category, matched exactly by category filters.
    pub category: String,
    /// Home view shelves the dish appears on.
    pub tags: BTreeSet<DishTag>,
}

/// A purchasable menu entry.
///
/// ## Invariants
/// - `name` and `category` are non-blank when created through [`Dish::new`].
///   Snapshots loaded from storage are accepted as written.
///
/// # Examples
///
/// ```
/// use eatery::domain::{Dish, DishDraft};
///
/// let dish = Dish::new(DishDraft {
///     name: "Adobo".to_owned(),
///     price: 150,
///     category: "Mains".to_owned(),
///     ..DishDraft::default()
/// })
/// .expect("valid dish");
/// assert_eq!(dish.price(), 150);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    #[serde(default = "DishId::random")]
    id: DishId,
    #[serde(default)]
    name: String,
    #[serde(rename = "desc", default)]
    description: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    price: u64,
    #[serde(rename = "img", default)]
    image_url: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    tags: BTreeSet<DishTag>,
}

/// Read a stored peso amount, treating `null` or any non-integer value as 0.
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_u64).unwrap_or(0))
}

impl Dish {
    /// Validate a draft and assign a fresh [`DishId`].
    ///
    /// # Errors
    ///
    /// Returns [`DishValidationError`] when the draft is incomplete.
    pub fn new(draft: DishDraft) -> Result<Self, DishValidationError> {
        Self::from_draft(DishId::random(), draft)
    }

    /// Validate a replacement draft, keeping this dish's identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DishValidationError`] when the draft is incomplete.
    pub fn revised(&self, draft: DishDraft) -> Result<Self, DishValidationError> {
        Self::from_draft(self.id, draft)
    }

    fn from_draft(id: DishId, draft: DishDraft) -> Result<Self, DishValidationError> {
        let DishDraft {
            name,
            description,
            price,
            image_url,
            category,
            tags,
        } = draft;

        if name.trim().is_empty() {
            return Err(DishValidationError::BlankName);
        }
        if category.trim().is_empty() {
            return Err(DishValidationError::BlankCategory);
        }
        let unsigned_price =
            u64::try_from(price).map_err(|_| DishValidationError::NegativePrice { price })?;

        Ok(Self {
            id,
            name: name.trim().to_owned(),
            description,
            price: unsigned_price,
            image_url,
            category: category.trim().to_owned(),
            tags,
        })
    }

    /// Surrogate identifier.
    #[must_use]
    pub const fn id(&self) -> DishId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Short description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Whole-peso price.
    #[must_use]
    pub const fn price(&self) -> u64 {
        self.price
    }

    /// Image URL or path.
    #[must_use]
    pub fn image_url(&self) -> &str {
        self.image_url.as_str()
    }

    /// Menu category.
    #[must_use]
    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    /// Home view shelves.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<DishTag> {
        &self.tags
    }

    /// Whether the dish sits on the given shelf.
    #[must_use]
    pub fn has_tag(&self, tag: DishTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Case-insensitive substring match against name or description.
    ///
    /// `needle` must already be lower-cased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}
