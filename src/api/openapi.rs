//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{availability, equipment, health, projects};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "T~T Stock API",
        version = "0.1.0",
        description = "Equipment inventory and project availability REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Projects
        projects::list_projects,
        projects::get_project,
        projects::create_project,
        projects::update_project,
        projects::delete_project,
        projects::get_project_availability,
        // Availability
        availability::get_availability,
    ),
    components(
        schemas(
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            // Projects
            crate::models::project::Project,
            crate::models::project::EquipmentUsage,
            crate::models::project::CreateProject,
            crate::models::project::UpdateProject,
            crate::models::project::ProjectQuery,
            // Availability
            crate::availability::EquipmentAvailability,
            crate::availability::OpenEndedPolicy,
            availability::AvailabilityQuery,
            availability::AvailabilityResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "materiels", description = "Equipment catalog"),
        (name = "projets", description = "Projects and their equipment reservations"),
        (name = "availability", description = "Equipment availability")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
