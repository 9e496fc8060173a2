use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentViewer;
use crate::core::state::AppState;
use crate::schemas::course_page::{build_page, CoursePageResponse};
use crate::services;
use crate::services::player::{VideoKind, VideoSelection};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/:internship_id/courses/:course_id", get(course_page))
        .route("/:internship_id/courses/:course_id/access", get(course_access))
}

#[derive(Debug, Deserialize)]
struct CoursePageQuery {
    /// Inline video selection as `<chapter_id>:<topic|recorded>`.
    #[serde(default)]
    video: Option<String>,
}

#[derive(Debug, Serialize)]
struct AccessResponse {
    course_id: String,
    unlocked: Vec<String>,
}

async fn course_page(
    State(state): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    Path((internship_id, course_id)): Path<(String, String)>,
    Query(query): Query<CoursePageQuery>,
) -> Result<Json<CoursePageResponse>, ApiError> {
    let selection = query.video.as_deref().map(parse_video_selection).transpose()?;

    let data =
        services::course_page::aggregate(&state, &internship_id, &course_id, Some(viewer.id.as_str()))
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load course"))?;

    let Some(data) = data else {
        return Err(ApiError::NotFound("Course not found".to_string()));
    };

    let unlocked =
        services::access::resolve_access(state.db(), &viewer, &internship_id, &course_id).await;

    let page = build_page(data, &unlocked, selection.as_ref(), state.settings().routes());
    Ok(Json(page))
}

async fn course_access(
    State(state): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    Path((internship_id, course_id)): Path<(String, String)>,
) -> Result<Json<AccessResponse>, ApiError> {
    let course = crate::repositories::courses::find_course(state.db(), &internship_id, &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load course"))?;

    if course.is_none() {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    let unlocked =
        services::access::resolve_access(state.db(), &viewer, &internship_id, &course_id).await;

    Ok(Json(AccessResponse { course_id, unlocked }))
}

fn parse_video_selection(raw: &str) -> Result<VideoSelection, ApiError> {
    let Some((chapter_id, kind)) = raw.split_once(':') else {
        return Err(ApiError::BadRequest("Invalid video selection".to_string()));
    };

    if chapter_id.is_empty() {
        return Err(ApiError::BadRequest("Invalid video selection".to_string()));
    }

    let kind = match kind {
        "topic" => VideoKind::Topic,
        "recorded" => VideoKind::Recorded,
        _ => return Err(ApiError::BadRequest("Invalid video selection".to_string())),
    };

    Ok(VideoSelection { chapter_id: chapter_id.to_string(), kind })
}
