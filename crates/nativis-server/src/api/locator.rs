use axum::{
    extract::{Query, State},
    Extension, Json,
};
use nativis_locator::{
    filter, filter_options, fit_viewport, inquiry_links, location_detail, render_list,
    render_markers, FilterOptions, FilterQuery, FilterState, InquiryLinks, ListView,
    LocationDetail, LocatorError, MarkerSet, SelectionState, Viewport,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_locator_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Default, Deserialize)]
pub(super) struct LocatorParams {
    pub q: Option<String>,
    pub brand: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "type")]
    pub partner_type: Option<String>,
    pub selected: Option<String>,
}

impl LocatorParams {
    fn filter_query(&self) -> FilterQuery {
        FilterQuery {
            q: self.q.clone(),
            brand: self.brand.clone(),
            country: self.country.clone(),
            partner_type: self.partner_type.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct LocatorView {
    pub filters: FilterState,
    pub list: ListView,
    pub markers: MarkerSet,
    pub viewport: Viewport,
    pub selection: Option<LocationDetail>,
}

#[derive(Debug, Serialize)]
pub(super) struct LocatorOptions {
    #[serde(flatten)]
    pub filters: FilterOptions,
    pub inquiry: InquiryLinks,
}

pub(super) async fn options(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<LocatorOptions>> {
    Json(ApiResponse {
        data: LocatorOptions {
            filters: filter_options(&state.directory),
            inquiry: inquiry_links(&state.contact_email),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

/// Filtered list, markers, viewport and (optionally) the selected popup.
///
/// A `selected` id that the filters hide is dropped rather than rejected.
pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<LocatorParams>,
) -> Result<Json<ApiResponse<LocatorView>>, ApiError> {
    let directory = &state.directory;
    let filters = FilterState::from_query(directory, &params.filter_query())
        .map_err(|e| map_locator_error(req_id.0.clone(), &e))?;

    let subset = filter(directory, &filters);

    let selection = match params.selected.as_deref().map(str::trim) {
        None | Some("") => SelectionState::none(),
        Some(id) => {
            if directory.location(id).is_none() {
                let error = LocatorError::LocationNotFound(id.to_string());
                return Err(map_locator_error(req_id.0, &error));
            }
            SelectionState::of(id).reconcile(&subset)
        }
    };

    let detail = selection
        .selected_id()
        .and_then(|id| directory.location(id))
        .map(|location| location_detail(directory, location));

    tracing::debug!(
        request_id = %req_id.0,
        results = subset.len(),
        selected = selection.selected_id().unwrap_or("-"),
        "locator search"
    );

    let data = LocatorView {
        list: render_list(&subset, &filters, &selection),
        markers: render_markers(directory, &subset, &filters.brand, &state.icons),
        viewport: fit_viewport(&subset, &filters.country),
        selection: detail,
        filters,
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
