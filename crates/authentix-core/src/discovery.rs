//! "Near you" discovery location for guests and signed-in users.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{GUEST_COUNTRY_KEY, GUEST_ZIP_KEY, MAX_ZIP_CODE_LEN};
use crate::error::Result;
use crate::store::KeyValueStore;

/// A normalized postal code with an optional ISO 3166-1 alpha-2 country.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryLocation {
    pub zip_code: String,
    pub country: Option<String>,
}

impl DiscoveryLocation {
    /// Normalize raw input. Returns `None` when no usable postal code remains.
    ///
    /// The zip is trimmed and must be 1..=20 chars. The country is kept only
    /// when it is exactly two ASCII letters, and is uppercased.
    pub fn new(zip_code: &str, country: Option<&str>) -> Option<Self> {
        let zip = zip_code.trim();
        if zip.is_empty() || zip.chars().count() > MAX_ZIP_CODE_LEN {
            return None;
        }
        Some(Self {
            zip_code: zip.to_string(),
            country: country.and_then(normalize_country),
        })
    }
}

fn normalize_country(raw: &str) -> Option<String> {
    let code = raw.trim();
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code.to_ascii_uppercase())
    } else {
        None
    }
}

/// Body of the discovery-location update request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryLocationUpdate {
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

impl From<Option<&DiscoveryLocation>> for DiscoveryLocationUpdate {
    fn from(location: Option<&DiscoveryLocation>) -> Self {
        match location {
            Some(loc) => Self {
                zip_code: Some(loc.zip_code.clone()),
                country: loc.country.clone(),
            },
            None => Self::default(),
        }
    }
}

/// Where a resolved location came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationSource {
    User,
    Guest,
}

/// Guest location persisted in an injected store.
#[derive(Debug)]
pub struct DiscoveryPreferences<S> {
    store: S,
}

impl<S: KeyValueStore> DiscoveryPreferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn guest(&self) -> Result<Option<DiscoveryLocation>> {
        let Some(zip) = self.store.get(GUEST_ZIP_KEY)? else {
            return Ok(None);
        };
        let country = self.store.get(GUEST_COUNTRY_KEY)?;
        Ok(DiscoveryLocation::new(&zip, country.as_deref()))
    }

    /// Replace (or with `None`, forget) the guest location.
    pub fn set_guest(&mut self, location: Option<&DiscoveryLocation>) -> Result<()> {
        match location {
            Some(loc) => {
                self.store.set(GUEST_ZIP_KEY, &loc.zip_code)?;
                match &loc.country {
                    Some(country) => self.store.set(GUEST_COUNTRY_KEY, country)?,
                    None => self.store.clear(GUEST_COUNTRY_KEY)?,
                }
                debug!(zip = %loc.zip_code, country = ?loc.country, "Guest location saved");
            }
            None => {
                self.store.clear(GUEST_ZIP_KEY)?;
                self.store.clear(GUEST_COUNTRY_KEY)?;
                debug!("Guest location cleared");
            }
        }
        Ok(())
    }

    /// The location "near you" results are biased by.
    ///
    /// A signed-in user's saved location wins over the guest one.
    pub fn effective(
        &self,
        user_location: Option<&DiscoveryLocation>,
    ) -> Result<Option<(DiscoveryLocation, LocationSource)>> {
        if let Some(loc) = user_location {
            return Ok(Some((loc.clone(), LocationSource::User)));
        }
        Ok(self.guest()?.map(|loc| (loc, LocationSource::Guest)))
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
