//! Availability API endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    availability::EquipmentAvailability,
    error::AppResult,
    services::parse_date_param,
};

/// Query parameters for availability
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AvailabilityQuery {
    /// Reference date (RFC 3339, YYYY-MM-DDTHH:MM or YYYY-MM-DD), defaults to now
    pub date: Option<String>,
    /// Only return over-booked equipment
    #[serde(default)]
    pub overbooked_only: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityResponse {
    pub reference_date: DateTime<Utc>,
    pub entries: Vec<EquipmentAvailability>,
}

/// Equipment availability at a reference date
#[utoipa::path(
    get,
    path = "/availability",
    tag = "availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Availability per equipment item", body = AvailabilityResponse),
        (status = 400, description = "Invalid reference date", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_availability(
    State(state): State<crate::AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let reference_date = match query.date.as_deref() {
        Some(raw) => parse_date_param(raw, "date")?,
        None => Utc::now(),
    };

    let entries = state
        .services
        .availability
        .availability_at(reference_date, query.overbooked_only)
        .await?;

    Ok(Json(AvailabilityResponse {
        reference_date,
        entries,
    }))
}
