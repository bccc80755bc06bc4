//! Card list shown beside the map.

use nativis_core::Location;
use serde::Serialize;

use crate::contact::{contact_links, ContactLink};
use crate::detail::PartnerTypeBadge;
use crate::filter::FilterState;
use crate::selection::SelectionState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationCard {
    pub id: String,
    pub name: String,
    pub country: &'static str,
    pub partner_type: PartnerTypeBadge,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    pub contacts: Vec<ContactLink>,
    pub selected: bool,
}

impl LocationCard {
    #[must_use]
    pub fn new(location: &Location, selection: &SelectionState) -> Self {
        Self {
            id: location.id.clone(),
            name: location.name.clone(),
            country: location.country.label(),
            partner_type: location.partner_type.into(),
            address: location.address.clone(),
            contact_person: location.contact_person.clone(),
            contacts: contact_links(location),
            selected: selection.is_selected(&location.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub count: usize,
    pub label: String,
    pub show_clear_filters: bool,
}

impl ResultSummary {
    #[must_use]
    pub fn new(count: usize, filters: &FilterState) -> Self {
        let noun = if count == 1 { "location" } else { "locations" };
        Self {
            count,
            label: format!("{count} {noun} found"),
            show_clear_filters: filters.is_active(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: &'static str,
    pub message: &'static str,
    pub reset_label: &'static str,
    /// Filters to apply when the reset action is taken.
    pub reset: FilterState,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            title: "No Locations Found",
            message: "Try adjusting your search criteria or filters to find locations near you.",
            reset_label: "Reset Filters",
            reset: FilterState::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListView {
    Cards {
        summary: ResultSummary,
        cards: Vec<LocationCard>,
    },
    Empty {
        summary: ResultSummary,
        empty: EmptyState,
    },
}

impl ListView {
    #[must_use]
    pub fn summary(&self) -> &ResultSummary {
        match self {
            ListView::Cards { summary, .. } | ListView::Empty { summary, .. } => summary,
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[LocationCard] {
        match self {
            ListView::Cards { cards, .. } => cards,
            ListView::Empty { .. } => &[],
        }
    }
}

/// Render `subset` as cards in directory order; an empty subset renders the
/// empty state with its reset action.
#[must_use]
pub fn render_list(
    subset: &[&Location],
    filters: &FilterState,
    selection: &SelectionState,
) -> ListView {
    let summary = ResultSummary::new(subset.len(), filters);
    if subset.is_empty() {
        return ListView::Empty {
            summary,
            empty: EmptyState::default(),
        };
    }

    ListView::Cards {
        summary,
        cards: subset
            .iter()
            .map(|location| LocationCard::new(location, selection))
            .collect(),
    }
}
