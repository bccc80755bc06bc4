//! Filter engine: reduces the directory to the subset matching a [`FilterState`].

use nativis_core::{BrandId, Country, Directory, Location, PartnerType};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::LocatorError;

/// A filter axis: either everything, or one specific value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T: PartialEq> Choice<T> {
    /// `true` when `value` passes this axis.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }
}

impl<T> Choice<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    pub fn as_only(&self) -> Option<&T> {
        match self {
            Choice::All => None,
            Choice::Only(value) => Some(value),
        }
    }
}

impl<T: Serialize> Serialize for Choice<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Choice::All => serializer.serialize_str("all"),
            Choice::Only(value) => value.serialize(serializer),
        }
    }
}

fn serialize_country<S: Serializer>(
    country: &Choice<Country>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match country {
        Choice::All => serializer.serialize_str("all"),
        Choice::Only(country) => serializer.serialize_str(country.slug()),
    }
}

fn is_all_keyword(raw: &str) -> bool {
    raw.trim().is_empty() || raw.trim().eq_ignore_ascii_case("all")
}

/// Current locator filters. Updates replace the value rather than mutating it.
///
/// Serializes each axis with the same `value` its [`FilterOption`] carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub search_query: String,
    pub brand: Choice<BrandId>,
    #[serde(serialize_with = "serialize_country")]
    pub country: Choice<Country>,
    pub partner_type: Choice<PartnerType>,
}

impl FilterState {
    #[must_use]
    pub fn with_search_query(self, query: impl Into<String>) -> Self {
        Self {
            search_query: query.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_brand(self, brand: Choice<BrandId>) -> Self {
        Self { brand, ..self }
    }

    #[must_use]
    pub fn with_country(self, country: Choice<Country>) -> Self {
        Self { country, ..self }
    }

    #[must_use]
    pub fn with_partner_type(self, partner_type: Choice<PartnerType>) -> Self {
        Self {
            partner_type,
            ..self
        }
    }

    /// Whether any filter differs from the defaults (drives "Clear all filters").
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.search_query.trim().is_empty()
            || !self.brand.is_all()
            || !self.country.is_all()
            || !self.partner_type.is_all()
    }

    /// Build a filter state from raw user/HTTP input.
    ///
    /// Missing or empty values and `"all"` (any case) select everything.
    /// Brand ids resolve case-insensitively against the directory palette.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::UnknownFilterValue`] for values outside the
    /// closed brand, country, or partner type sets.
    pub fn from_query(directory: &Directory, query: &FilterQuery) -> Result<Self, LocatorError> {
        let brand = match query.brand.as_deref() {
            None => Choice::All,
            Some(raw) if is_all_keyword(raw) => Choice::All,
            Some(raw) => directory
                .resolve_brand(raw)
                .map(|b| Choice::Only(b.id.clone()))
                .ok_or_else(|| LocatorError::UnknownFilterValue {
                    field: "brand",
                    value: raw.to_string(),
                })?,
        };

        let country = match query.country.as_deref() {
            None => Choice::All,
            Some(raw) if is_all_keyword(raw) => Choice::All,
            Some(raw) => Country::parse(raw).map(Choice::Only).ok_or_else(|| {
                LocatorError::UnknownFilterValue {
                    field: "country",
                    value: raw.to_string(),
                }
            })?,
        };

        let partner_type = match query.partner_type.as_deref() {
            None => Choice::All,
            Some(raw) if is_all_keyword(raw) => Choice::All,
            Some(raw) => PartnerType::parse(raw).map(Choice::Only).ok_or_else(|| {
                LocatorError::UnknownFilterValue {
                    field: "type",
                    value: raw.to_string(),
                }
            })?,
        };

        Ok(Self {
            search_query: query.q.clone().unwrap_or_default(),
            brand,
            country,
            partner_type,
        })
    }
}

/// Unvalidated filter input, as it arrives in a query string or CLI flags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    pub q: Option<String>,
    pub brand: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "type")]
    pub partner_type: Option<String>,
}

fn matches_text(location: &Location, folded_query: &str) -> bool {
    if folded_query.is_empty() {
        return true;
    }

    [
        Some(location.name.as_str()),
        Some(location.address.as_str()),
        Some(location.country.label()),
        location.area_label.as_deref(),
        location.contact_person.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(folded_query))
}

fn matches_state(location: &Location, folded_query: &str, state: &FilterState) -> bool {
    matches_text(location, folded_query)
        && location_has_brand(location, &state.brand)
        && state.country.admits(&location.country)
        && state.partner_type.admits(&location.partner_type)
}

fn location_has_brand(location: &Location, brand: &Choice<BrandId>) -> bool {
    match brand {
        Choice::All => true,
        Choice::Only(id) => location.carries(id),
    }
}

/// Apply `state` to the directory.
///
/// The result keeps directory order and is empty (not an error) when nothing
/// matches. Pure: repeated calls with the same inputs return the same subset.
#[must_use]
pub fn filter<'d>(directory: &'d Directory, state: &FilterState) -> Vec<&'d Location> {
    let folded_query = state.search_query.trim().to_lowercase();
    directory
        .locations()
        .iter()
        .filter(|location| matches_state(location, &folded_query, state))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// Selectable values for each filter axis, "all" first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub brands: Vec<FilterOption>,
    pub countries: Vec<FilterOption>,
    pub partner_types: Vec<FilterOption>,
}

fn all_option(label: &str) -> FilterOption {
    FilterOption {
        value: "all".to_string(),
        label: label.to_string(),
        logo_url: None,
    }
}

#[must_use]
pub fn filter_options(directory: &Directory) -> FilterOptions {
    let brands = std::iter::once(all_option("All Brands"))
        .chain(directory.brands().iter().map(|brand| FilterOption {
            value: brand.id.to_string(),
            label: brand.label.clone(),
            logo_url: brand.logo_url.clone(),
        }))
        .collect();

    let countries = std::iter::once(all_option("All"))
        .chain(Country::ALL.iter().map(|country| FilterOption {
            value: country.slug().to_string(),
            label: country.label().to_string(),
            logo_url: None,
        }))
        .collect();

    let partner_types = std::iter::once(all_option("All Types"))
        .chain(PartnerType::ALL.iter().map(|kind| FilterOption {
            value: kind.slug().to_string(),
            label: kind.option_label().to_string(),
            logo_url: None,
        }))
        .collect();

    FilterOptions {
        brands,
        countries,
        partner_types,
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
