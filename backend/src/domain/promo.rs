//! Promotional teasers shown on the home view.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::EateryError;

/// Stable surrogate identifier assigned when a promo is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromoId(Uuid);

impl PromoId {
    /// Generate a new random [`PromoId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PromoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation errors returned by [`Promo::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromoValidationError {
    /// The title was blank once trimmed.
    BlankTitle,
}

impl fmt::Display for PromoValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "promo title must not be empty"),
        }
    }
}

impl std::error::Error for PromoValidationError {}

impl From<PromoValidationError> for EateryError {
    fn from(value: PromoValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

/// Admin-supplied promo fields prior to validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromoDraft {
    /// Headline.
    pub title: String,
    /// Teaser copy.
    pub description: String,
    /// Image URL or path.
    pub image_url: String,
}

/// A marketing teaser. Unrelated to pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promo {
    #[serde(default = "PromoId::random")]
    id: PromoId,
    title: String,
    #[serde(rename = "desc", default)]
    description: String,
    #[serde(rename = "img", default)]
    image_url: String,
}

impl Promo {
    /// Validate a draft and assign a fresh [`PromoId`].
    ///
    /// # Errors
    ///
    /// Returns [`PromoValidationError::BlankTitle`] for a blank title.
    pub fn new(draft: PromoDraft) -> Result<Self, PromoValidationError> {
        let PromoDraft {
            title,
            description,
            image_url,
        } = draft;
        if title.trim().is_empty() {
            return Err(PromoValidationError::BlankTitle);
        }
        Ok(Self {
            id: PromoId::random(),
            title: title.trim().to_owned(),
            description,
            image_url,
        })
    }

    /// Surrogate identifier.
    #[must_use]
    pub const fn id(&self) -> PromoId {
        self.id
    }

    /// Headline.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Teaser copy.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Image URL or path.
    #[must_use]
    pub fn image_url(&self) -> &str {
        self.image_url.as_str()
    }
}
