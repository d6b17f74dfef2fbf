//! Projects (projets) API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    availability::EquipmentAvailability,
    error::AppResult,
    models::project::{CreateProject, Project, ProjectQuery, UpdateProject},
};

/// List projects, optionally filtered
#[utoipa::path(
    get,
    path = "/projets",
    tag = "projets",
    params(ProjectQuery),
    responses(
        (status = 200, description = "Project list", body = Vec<Project>),
        (status = 400, description = "Invalid filter date", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_projects(
    State(state): State<crate::AppState>,
    Query(query): Query<ProjectQuery>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = state.services.projects.list(&query).await?;
    Ok(Json(projects))
}

/// Get project by ID
#[utoipa::path(
    get,
    path = "/projets/{id}",
    tag = "projets",
    params(("id" = String, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project details", body = Project),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_project(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Project>> {
    let project = state.services.projects.get_by_id(&id).await?;
    Ok(Json(project))
}

/// Create a project
#[utoipa::path(
    post,
    path = "/projets",
    tag = "projets",
    request_body = CreateProject,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Invalid dates or equipment usage", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_project(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = state.services.projects.create(&data).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// Update a project
#[utoipa::path(
    put,
    path = "/projets/{id}",
    tag = "projets",
    params(("id" = String, Path, description = "Project ID")),
    request_body = UpdateProject,
    responses(
        (status = 200, description = "Project updated", body = Project)
    )
)]
pub async fn update_project(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(data): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project = state.services.projects.update(&id, &data).await?;
    Ok(Json(project))
}

/// Delete a project
#[utoipa::path(
    delete,
    path = "/projets/{id}",
    tag = "projets",
    params(("id" = String, Path, description = "Project ID")),
    responses(
        (status = 204, description = "Project deleted")
    )
)]
pub async fn delete_project(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.projects.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Availability at the project's start date, for the equipment it reserves
#[utoipa::path(
    get,
    path = "/projets/{id}/availability",
    tag = "projets",
    params(("id" = String, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Availability of the project's equipment", body = Vec<EquipmentAvailability>),
        (status = 422, description = "Project start date is unparsable", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_project_availability(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<EquipmentAvailability>>> {
    let entries = state.services.availability.project_availability(&id).await?;
    Ok(Json(entries))
}
