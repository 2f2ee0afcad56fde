//! Structured site content and the partial-save payload
//!
//! The content a tenant edits in the site builder is an explicit schema, not
//! an open map: known optional fields validate before they reach the store and
//! round-trip field-for-field. JSON field names use camelCase to match the
//! editor payloads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Error, Result};

/// A single offered service, ordered within the site's service list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Display duration, e.g. "60 min"
    #[serde(default)]
    pub duration: String,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
}

/// Primary/secondary color pair chosen in the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
}

/// The full structured content object for a tenant's site.
///
/// This is the single content slot: what the owner edits is what visitors see
/// once the site is published. Gallery entries are committed public URLs and
/// are append/remove only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub business_name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    /// Opening hours keyed by weekday name, e.g. "Monday" -> "9am - 5pm"
    #[serde(default)]
    pub hours: BTreeMap<String, String>,
    #[serde(default)]
    pub social: SocialLinks,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub colors: ColorScheme,
}

impl SiteContent {
    /// Validate content before it reaches the store.
    ///
    /// # Errors
    /// - `Error::Validation` for an empty business name, an empty service
    ///   name, or a negative/non-finite service price.
    pub fn validate(&self) -> Result<()> {
        if self.business_name.trim().is_empty() {
            return Err(Error::Validation("business name is required".to_string()));
        }
        for (idx, service) in self.services.iter().enumerate() {
            if service.name.trim().is_empty() {
                return Err(Error::Validation(format!(
                    "service at position {} has an empty name",
                    idx
                )));
            }
            if !service.price.is_finite() || service.price < 0.0 {
                return Err(Error::Validation(format!(
                    "service '{}' has an invalid price",
                    service.name
                )));
            }
        }
        Ok(())
    }
}

/// Partial content submitted by a single editor save.
///
/// Top-level info fields merge at the field level; the list-valued fields
/// (`services`, `gallery`, `hours`) are full replacements. Callers always
/// submit the complete list they intend to persist, never a delta, so that
/// concurrent saves from multiple tabs resolve to one submitted list rather
/// than a merged hybrid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<SocialLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Service>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorScheme>,
}

impl ContentUpdate {
    /// Apply this update to existing content.
    ///
    /// Scalar fields overwrite only when present; list-valued fields replace
    /// wholesale when present.
    pub fn apply_to(&self, content: &mut SiteContent) {
        if let Some(v) = &self.business_name {
            content.business_name = v.clone();
        }
        if let Some(v) = &self.tagline {
            content.tagline = v.clone();
        }
        if let Some(v) = &self.description {
            content.description = v.clone();
        }
        if let Some(v) = &self.owner {
            content.owner = v.clone();
        }
        if let Some(v) = &self.phone {
            content.phone = v.clone();
        }
        if let Some(v) = &self.email {
            content.email = v.clone();
        }
        if let Some(v) = &self.address {
            content.address = v.clone();
        }
        if let Some(v) = &self.hours {
            content.hours = v.clone();
        }
        if let Some(v) = &self.social {
            content.social = v.clone();
        }
        if let Some(v) = &self.services {
            content.services = v.clone();
        }
        if let Some(v) = &self.gallery {
            content.gallery = v.clone();
        }
        if let Some(v) = &self.colors {
            content.colors = v.clone();
        }
    }

    /// Materialize full content from this update alone, for first saves.
    pub fn into_content(self) -> SiteContent {
        let mut content = SiteContent::default();
        self.apply_to(&mut content);
        content
    }

    /// Validate the update in isolation (applied to empty content the
    /// list-valued checks still hold; business name is only required once a
    /// record carries one).
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.business_name
            && name.trim().is_empty()
        {
            return Err(Error::Validation("business name is required".to_string()));
        }
        if let Some(services) = &self.services {
            for (idx, service) in services.iter().enumerate() {
                if service.name.trim().is_empty() {
                    return Err(Error::Validation(format!(
                        "service at position {} has an empty name",
                        idx
                    )));
                }
                if !service.price.is_finite() || service.price < 0.0 {
                    return Err(Error::Validation(format!(
                        "service '{}' has an invalid price",
                        service.name
                    )));
                }
            }
        }
        Ok(())
    }
}
