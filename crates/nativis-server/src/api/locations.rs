use axum::{
    extract::{Path, State},
    Extension, Json,
};
use nativis_locator::{location_detail, LocationDetail, LocatorError};

use crate::middleware::RequestId;

use super::{map_locator_error, ApiError, ApiResponse, AppState, ResponseMeta};

pub(super) async fn get_location(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(location_id): Path<String>,
) -> Result<Json<ApiResponse<LocationDetail>>, ApiError> {
    let location = state.directory.location(&location_id).ok_or_else(|| {
        map_locator_error(
            req_id.0.clone(),
            &LocatorError::LocationNotFound(location_id.clone()),
        )
    })?;

    Ok(Json(ApiResponse {
        data: location_detail(&state.directory, location),
        meta: ResponseMeta::new(req_id.0),
    }))
}
