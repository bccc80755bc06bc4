use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Extension,
};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

/// Marker icon for a brand as `image/svg+xml`. Brand ids match case-insensitively.
pub(super) async fn marker_svg(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(brand_id): Path<String>,
) -> Result<Response, ApiError> {
    let brand = state.directory.resolve_brand(&brand_id).ok_or_else(|| {
        ApiError::new(
            req_id.0.clone(),
            "not_found",
            format!("brand not found: {brand_id}"),
        )
    })?;

    let icon = state.icons.icon_for(brand);
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], icon.svg).into_response())
}
