use axum::{extract::State, Json};

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::EmrServer;
use crate::services::NavigationCount;

/// Navigation counts handler
///
/// Returns every sidebar count probe in one response so the front end can
/// decorate its navigation tree with a single request.
#[utoipa::path(
    get,
    path = crate::routes::paths::api_v1::NAVIGATION_COUNTS,
    responses(
        (status = 200, description = "Navigation counts retrieved", body = Vec<NavigationCount>)
    ),
    tag = "navigation"
)]
pub async fn navigation_counts(
    State(server): State<EmrServer>,
) -> Result<Json<ApiResponse<Vec<NavigationCount>>>, ApiError> {
    let counts = server.navigation.counts().await;
    Ok(Json(api_success(counts)))
}
