//! Map view adapter: keeps an opaque map widget in step with the filtered
//! subset and the shared selection.
//!
//! The widget loads asynchronously. Until it reports [`MapEvent::Ready`] the
//! adapter only buffers the latest markers and viewport; they are flushed once
//! on ready. A widget that fails to load leaves the adapter degraded, and the
//! page shows [`MapFallback`] instead of the map.

use std::sync::Arc;

use nativis_core::{BrandId, Directory, Location};
use serde::Serialize;

use crate::assets::LogoAsset;
use crate::contact::contact_mailto;
use crate::detail::{location_detail, LocationDetail};
use crate::error::{AssetError, LocatorError, MapWidgetError};
use crate::filter::{filter, FilterState};
use crate::icon::IconCache;
use crate::markers::{render_markers, MarkerSet};
use crate::selection::SelectionState;
use crate::viewport::{fit_viewport, Viewport};

/// The map provider, seen from the adapter.
pub trait MapWidget {
    /// Start loading the provider. Readiness is reported later as
    /// [`MapEvent::Ready`] (or [`MapEvent::Failed`]).
    ///
    /// # Errors
    ///
    /// Returns [`MapWidgetError`] when the provider cannot even start loading.
    fn initialize(&mut self) -> Result<(), MapWidgetError>;
    fn set_viewport(&mut self, viewport: &Viewport);
    /// Replace every marker on the map.
    fn set_markers(&mut self, markers: &MarkerSet);
    fn open_popup(&mut self, detail: &LocationDetail);
    fn close_popup(&mut self);
}

/// Provider callbacks, delivered to [`MapViewAdapter::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapEvent {
    Ready,
    Failed(String),
    MarkerClicked { marker_key: String },
    PopupClosed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MapStatus {
    Loading,
    Ready,
    Degraded { reason: String },
    Unmounted,
}

/// Static notice shown in place of the map when it cannot load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapFallback {
    pub title: &'static str,
    pub message: &'static str,
    pub contact_href: String,
}

impl MapFallback {
    #[must_use]
    pub fn new(contact_email: &str) -> Self {
        Self {
            title: "Map Unavailable",
            message: "Unable to load the interactive map. Please view our location listings below.",
            contact_href: contact_mailto(contact_email),
        }
    }
}

pub struct MapViewAdapter<W> {
    widget: W,
    directory: Arc<Directory>,
    icons: IconCache,
    status: MapStatus,
    filters: FilterState,
    visible: Vec<String>,
    markers: MarkerSet,
    viewport: Viewport,
    selection: SelectionState,
    contact_email: String,
}

impl<W: MapWidget> MapViewAdapter<W> {
    /// Wrap `widget` and start loading it. The adapter starts out showing the
    /// whole directory.
    pub fn new(
        mut widget: W,
        directory: Arc<Directory>,
        icons: IconCache,
        contact_email: impl Into<String>,
    ) -> Self {
        let status = match widget.initialize() {
            Ok(()) => MapStatus::Loading,
            Err(error) => {
                tracing::warn!(error = %error, "map widget failed to initialize; showing fallback");
                MapStatus::Degraded {
                    reason: error.to_string(),
                }
            }
        };

        let filters = FilterState::default();
        let subset = filter(&directory, &filters);
        let visible = subset.iter().map(|loc| loc.id.clone()).collect();
        let markers = render_markers(&directory, &subset, &filters.brand, &icons);
        let viewport = fit_viewport(&subset, &filters.country);

        Self {
            widget,
            directory,
            icons,
            status,
            filters,
            visible,
            markers,
            viewport,
            selection: SelectionState::none(),
            contact_email: contact_email.into(),
        }
    }

    #[must_use]
    pub fn status(&self) -> &MapStatus {
        &self.status
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == MapStatus::Ready
    }

    #[must_use]
    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Notice to render instead of the map, if it failed to load.
    #[must_use]
    pub fn fallback_notice(&self) -> Option<MapFallback> {
        match self.status {
            MapStatus::Degraded { .. } => Some(MapFallback::new(&self.contact_email)),
            _ => None,
        }
    }

    /// Popup content for the current selection.
    #[must_use]
    pub fn selected_detail(&self) -> Option<LocationDetail> {
        self.selection
            .selected_id()
            .and_then(|id| self.directory.location(id))
            .map(|location| location_detail(&self.directory, location))
    }

    /// Show `subset` (already filtered with `filters`).
    ///
    /// Rebuilds markers and viewport, clears a selection that was filtered
    /// out, and pushes everything to the widget if it is ready.
    pub fn show(&mut self, subset: &[&Location], filters: &FilterState) {
        if self.status == MapStatus::Unmounted {
            return;
        }

        self.filters = filters.clone();
        self.visible = subset.iter().map(|loc| loc.id.clone()).collect();
        self.markers = render_markers(&self.directory, subset, &filters.brand, &self.icons);
        self.viewport = fit_viewport(subset, &filters.country);

        let previous = std::mem::take(&mut self.selection);
        let had_selection = previous.selected_id().is_some();
        self.selection = previous.reconcile(subset);
        let cleared = had_selection && self.selection.selected_id().is_none();
        if cleared {
            tracing::debug!("selection filtered out; clearing");
        }

        if self.is_ready() {
            if cleared {
                self.widget.close_popup();
            }
            self.widget.set_markers(&self.markers);
            self.widget.set_viewport(&self.viewport);
        }
    }

    /// Select a location (marker or card click).
    ///
    /// Returns the popup content, or `None` when the location exists but is
    /// hidden by the current filters (the selection is then cleared).
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::LocationNotFound`] for an id that is not in the
    /// directory.
    pub fn select_location(&mut self, id: &str) -> Result<Option<LocationDetail>, LocatorError> {
        let directory = Arc::clone(&self.directory);
        let location = directory
            .location(id)
            .ok_or_else(|| LocatorError::LocationNotFound(id.to_string()))?;

        if !self.visible.iter().any(|visible| visible == id) {
            tracing::debug!(location_id = id, "selected location is filtered out");
            self.deselect();
            return Ok(None);
        }

        let detail = location_detail(&directory, location);
        self.selection = SelectionState::of(id);
        if self.is_ready() {
            self.widget.open_popup(&detail);
        }
        Ok(Some(detail))
    }

    pub fn deselect(&mut self) {
        let had_selection = self.selection.selected_id().is_some();
        self.selection = SelectionState::none();
        if had_selection && self.is_ready() {
            self.widget.close_popup();
        }
    }

    /// Feed a provider callback into the adapter. Events after
    /// [`unmount`](Self::unmount) are ignored.
    pub fn handle(&mut self, event: MapEvent) {
        if self.status == MapStatus::Unmounted {
            tracing::debug!(?event, "map event after unmount ignored");
            return;
        }

        match event {
            MapEvent::Ready => {
                if self.status != MapStatus::Loading {
                    return;
                }
                tracing::info!(markers = self.markers.len(), "map ready");
                self.status = MapStatus::Ready;
                self.widget.set_markers(&self.markers);
                self.widget.set_viewport(&self.viewport);
                if let Some(detail) = self.selected_detail() {
                    self.widget.open_popup(&detail);
                }
            }
            MapEvent::Failed(reason) => {
                if matches!(self.status, MapStatus::Degraded { .. }) {
                    return;
                }
                tracing::warn!(reason = %reason, "map widget failed; showing fallback");
                self.status = MapStatus::Degraded { reason };
            }
            MapEvent::MarkerClicked { marker_key } => {
                let Some(location_id) = self
                    .markers
                    .find(&marker_key)
                    .map(|marker| marker.location_id.clone())
                else {
                    tracing::warn!(marker_key = %marker_key, "click on unknown marker");
                    return;
                };
                if let Err(error) = self.select_location(&location_id) {
                    tracing::warn!(error = %error, "marker click did not resolve");
                }
            }
            MapEvent::PopupClosed => {
                self.selection = SelectionState::none();
            }
        }
    }

    /// Record a logo load. Markers using that brand are re-pushed when the
    /// icon changes; results arriving after unmount are dropped.
    pub fn apply_logo(&mut self, brand: &BrandId, outcome: Result<LogoAsset, AssetError>) {
        if self.status == MapStatus::Unmounted {
            tracing::debug!(brand = %brand, "logo result after unmount ignored");
            return;
        }
        if !self.icons.record_logo(brand, outcome) {
            return;
        }

        let directory = Arc::clone(&self.directory);
        let subset = filter(&directory, &self.filters);
        self.markers = render_markers(&directory, &subset, &self.filters.brand, &self.icons);
        if self.is_ready() {
            self.widget.set_markers(&self.markers);
        }
    }

    /// Tear down. Pending icon results and widget events are dropped afterwards.
    pub fn unmount(&mut self) {
        if self.is_ready() && self.selection.selected_id().is_some() {
            self.widget.close_popup();
        }
        self.selection = SelectionState::none();
        self.status = MapStatus::Unmounted;
    }
}

#[cfg(test)]
#[path = "map_test.rs"]
mod tests;
