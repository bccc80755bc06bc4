use std::sync::Arc;

use nativis_core::{BrandId, Country, Directory, PartnerType};
use serde::Serialize;

use crate::assets::LogoAsset;
use crate::detail::LocationDetail;
use crate::error::{AssetError, LocatorError};
use crate::filter::{filter, Choice, FilterState};
use crate::icon::IconCache;
use crate::list::{render_list, ListView};
use crate::map::{MapEvent, MapFallback, MapStatus, MapViewAdapter, MapWidget};

/// Everything the page needs to render after an update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocatorSnapshot {
    pub filters: FilterState,
    pub list: ListView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<LocationDetail>,
    pub map_status: MapStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_fallback: Option<MapFallback>,
}

/// Single owner of the locator page state: filters, selection (held by the
/// map adapter), and the map itself. Every update replaces the filter value
/// and returns a fresh snapshot.
pub struct LocatorSession<W> {
    directory: Arc<Directory>,
    filters: FilterState,
    map: MapViewAdapter<W>,
}

impl<W: MapWidget> LocatorSession<W> {
    pub fn new(
        directory: Arc<Directory>,
        icons: IconCache,
        widget: W,
        contact_email: impl Into<String>,
    ) -> Self {
        let map = MapViewAdapter::new(widget, Arc::clone(&directory), icons, contact_email);
        Self {
            directory,
            filters: FilterState::default(),
            map,
        }
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub fn map(&self) -> &MapViewAdapter<W> {
        &self.map
    }

    /// Replace the filters, refresh the map, and apply the selection policy.
    pub fn update_filters(&mut self, next: FilterState) -> LocatorSnapshot {
        tracing::debug!(?next, "filters updated");
        self.filters = next;
        let directory = Arc::clone(&self.directory);
        let subset = filter(&directory, &self.filters);
        self.map.show(&subset, &self.filters);
        self.snapshot()
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) -> LocatorSnapshot {
        let next = self.filters.clone().with_search_query(query);
        self.update_filters(next)
    }

    pub fn set_brand(&mut self, brand: Choice<BrandId>) -> LocatorSnapshot {
        let next = self.filters.clone().with_brand(brand);
        self.update_filters(next)
    }

    pub fn set_country(&mut self, country: Choice<Country>) -> LocatorSnapshot {
        let next = self.filters.clone().with_country(country);
        self.update_filters(next)
    }

    pub fn set_partner_type(&mut self, partner_type: Choice<PartnerType>) -> LocatorSnapshot {
        let next = self.filters.clone().with_partner_type(partner_type);
        self.update_filters(next)
    }

    pub fn reset_filters(&mut self) -> LocatorSnapshot {
        self.update_filters(FilterState::default())
    }

    /// Card or marker click.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::LocationNotFound`] for an id outside the directory.
    pub fn select(&mut self, id: &str) -> Result<LocatorSnapshot, LocatorError> {
        self.map.select_location(id)?;
        Ok(self.snapshot())
    }

    pub fn deselect(&mut self) -> LocatorSnapshot {
        self.map.deselect();
        self.snapshot()
    }

    pub fn handle_map_event(&mut self, event: MapEvent) -> LocatorSnapshot {
        self.map.handle(event);
        self.snapshot()
    }

    pub fn apply_logo(&mut self, brand: &BrandId, outcome: Result<LogoAsset, AssetError>) {
        self.map.apply_logo(brand, outcome);
    }

    pub fn unmount(&mut self) {
        self.map.unmount();
    }

    #[must_use]
    pub fn snapshot(&self) -> LocatorSnapshot {
        let subset = filter(&self.directory, &self.filters);
        LocatorSnapshot {
            filters: self.filters.clone(),
            list: render_list(&subset, &self.filters, self.map.selection()),
            selection: self.map.selected_detail(),
            map_status: self.map.status().clone(),
            map_fallback: self.map.fallback_notice(),
        }
    }
}
