//! Partner directory model.
//!
//! The directory is loaded once at startup (from YAML) and never mutated.
//! Construction validates every invariant the locator relies on, so a
//! [`Directory`] value in hand is always well-formed.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Directory shipped with the site, compiled into the binary.
pub const BUNDLED_DIRECTORY_YAML: &str = include_str!("../../../config/directory.yaml");

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite, latitude within [-90, 90] and longitude within [-180, 180].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    Singapore,
    #[serde(rename = "Hong Kong")]
    HongKong,
    Philippines,
    Malaysia,
}

impl Country {
    pub const ALL: [Country; 4] = [
        Country::Singapore,
        Country::HongKong,
        Country::Philippines,
        Country::Malaysia,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Country::Singapore => "Singapore",
            Country::HongKong => "Hong Kong",
            Country::Philippines => "Philippines",
            Country::Malaysia => "Malaysia",
        }
    }

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Country::Singapore => "singapore",
            Country::HongKong => "hong-kong",
            Country::Philippines => "philippines",
            Country::Malaysia => "malaysia",
        }
    }

    /// Parse a label or slug, ignoring case, spaces, dashes and underscores.
    ///
    /// `"Hong Kong"`, `"hong-kong"` and `"HONGKONG"` all resolve to
    /// [`Country::HongKong`].
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "singapore" => Some(Country::Singapore),
            "hongkong" => Some(Country::HongKong),
            "philippines" => Some(Country::Philippines),
            "malaysia" => Some(Country::Malaysia),
            _ => None,
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerType {
    Distributor,
    Retail,
    Bar,
}

impl PartnerType {
    pub const ALL: [PartnerType; 3] = [
        PartnerType::Distributor,
        PartnerType::Retail,
        PartnerType::Bar,
    ];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            PartnerType::Distributor => "distributor",
            PartnerType::Retail => "retail",
            PartnerType::Bar => "bar",
        }
    }

    /// Badge text shown on a single location.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PartnerType::Distributor => "Distributor",
            PartnerType::Retail => "Retail",
            PartnerType::Bar => "Bar & Restaurant",
        }
    }

    /// Plural text used for the filter option.
    #[must_use]
    pub fn option_label(self) -> &'static str {
        match self {
            PartnerType::Distributor => "Distributors",
            PartnerType::Retail => "Retail",
            PartnerType::Bar => "Bars & Restaurants",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "distributor" => Some(PartnerType::Distributor),
            "retail" => Some(PartnerType::Retail),
            "bar" => Some(PartnerType::Bar),
            _ => None,
        }
    }
}

impl std::fmt::Display for PartnerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Brand identifier as written in the directory file (e.g. `Lush`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrandId(String);

impl BrandId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BrandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Palette entry for one product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub label: String,
    /// Primary pin/badge color, `#RRGGBB`.
    pub color: String,
    /// Lighter gradient stop for the pin body, `#RRGGBB`.
    pub highlight: String,
    /// Absolute URL or site-relative path (`/imgs/...`).
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub fax: Option<String>,
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub area_label: Option<String>,
    pub partner_type: PartnerType,
    pub country: Country,
    pub brands: Vec<BrandId>,
}

impl Location {
    #[must_use]
    pub fn carries(&self, brand: &BrandId) -> bool {
        self.brands.contains(brand)
    }
}

#[derive(Debug, Deserialize)]
struct DirectoryFile {
    brands: Vec<Brand>,
    locations: Vec<Location>,
}

/// Validated, immutable partner directory.
#[derive(Debug, Clone)]
pub struct Directory {
    brands: Vec<Brand>,
    locations: Vec<Location>,
}

impl Directory {
    /// Build a directory from a brand palette and locations, validating all invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first offending brand or location.
    pub fn new(brands: Vec<Brand>, locations: Vec<Location>) -> Result<Self, ConfigError> {
        validate_brands(&brands)?;
        validate_locations(&brands, &locations)?;
        Ok(Self { brands, locations })
    }

    /// Parse and validate a directory from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DirectoryFileParse`] for malformed YAML and
    /// [`ConfigError::Validation`] for invariant violations.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let file: DirectoryFile = serde_yaml::from_str(content)?;
        Self::new(file.brands, file.locations)
    }

    /// The directory compiled into the binary.
    ///
    /// # Errors
    ///
    /// Fails only if the bundled YAML was edited into an invalid state.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_yaml_str(BUNDLED_DIRECTORY_YAML)
    }

    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    #[must_use]
    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    #[must_use]
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|loc| loc.id == id)
    }

    #[must_use]
    pub fn brand(&self, id: &BrandId) -> Option<&Brand> {
        self.brands.iter().find(|b| &b.id == id)
    }

    /// Resolve user input to a palette brand, matching id or label case-insensitively.
    #[must_use]
    pub fn resolve_brand(&self, raw: &str) -> Option<&Brand> {
        let raw = raw.trim();
        self.brands
            .iter()
            .find(|b| b.id.as_str().eq_ignore_ascii_case(raw) || b.label.eq_ignore_ascii_case(raw))
    }
}

/// Load and validate the partner directory from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_directory(path: &Path) -> Result<Directory, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::DirectoryFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    Directory::from_yaml_str(&content)
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

fn validate_brands(brands: &[Brand]) -> Result<(), ConfigError> {
    if brands.is_empty() {
        return Err(ConfigError::Validation(
            "brand palette must declare at least one brand".to_string(),
        ));
    }

    let mut seen_ids = HashSet::new();
    for brand in brands {
        if brand.id.as_str().trim().is_empty() {
            return Err(ConfigError::Validation(
                "brand id must be non-empty".to_string(),
            ));
        }

        if !seen_ids.insert(brand.id.as_str().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand id: '{}'",
                brand.id
            )));
        }

        for (field, value) in [("color", &brand.color), ("highlight", &brand.highlight)] {
            if !is_hex_color(value) {
                return Err(ConfigError::Validation(format!(
                    "brand '{}' has invalid {field} '{value}'; expected #RRGGBB",
                    brand.id
                )));
            }
        }
    }

    Ok(())
}

fn validate_locations(brands: &[Brand], locations: &[Location]) -> Result<(), ConfigError> {
    let known: HashSet<&BrandId> = brands.iter().map(|b| &b.id).collect();
    let mut seen_ids = HashSet::new();

    for location in locations {
        if location.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "location id must be non-empty".to_string(),
            ));
        }

        if !seen_ids.insert(location.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate location id: '{}'",
                location.id
            )));
        }

        if location.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "location '{}' has an empty name",
                location.id
            )));
        }

        if !location.coordinates.is_valid() {
            return Err(ConfigError::Validation(format!(
                "location '{}' has out-of-range coordinates ({}, {})",
                location.id, location.coordinates.latitude, location.coordinates.longitude
            )));
        }

        if location.brands.is_empty() {
            return Err(ConfigError::Validation(format!(
                "location '{}' must carry at least one brand",
                location.id
            )));
        }

        let mut carried = HashSet::new();
        for brand in &location.brands {
            if !known.contains(brand) {
                return Err(ConfigError::Validation(format!(
                    "location '{}' references unknown brand '{brand}'",
                    location.id
                )));
            }
            if !carried.insert(brand) {
                return Err(ConfigError::Validation(format!(
                    "location '{}' lists brand '{brand}' more than once",
                    location.id
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "directory_test.rs"]
mod tests;
