use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use dietdesk_booking::{Occupancy, RequestAppointmentInput, TimeSlot, day_schedule};
use dietdesk_shared::Error;
use serde::Deserialize;
use serde_json::json;

use crate::{error::AppError, routes::AppState};

#[derive(Deserialize)]
pub struct SlotsQuery {
    pub date: String,
}

/// GET /api/book/{slug}/slots?date=YYYY-MM-DD
pub async fn slots(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<SlotsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = dietdesk_shared::parse_date(&query.date)
        .map_err(|_| AppError::bad_request("date must be YYYY-MM-DD"))?;

    let Some(owner) = state.booking_query.find_by_slug(&slug).await? else {
        return Err(Error::NotFound("owner".to_owned()).into());
    };

    let occupancy = Occupancy::load(
        &state.pool,
        &owner.id,
        date,
        state.booking_command.offset(),
    )
    .await?;

    Ok(Json(json!({
        "owner": {
            "full_name": owner.full_name,
            "public_slug": owner.public_slug,
        },
        "date": dietdesk_shared::format_date(date),
        "slots": day_schedule(&owner.slots(), &occupancy),
    })))
}

#[derive(Deserialize)]
pub struct RequestBody {
    pub date: String,
    pub time: TimeSlot,
    pub client_name: String,
    pub client_phone: String,
    #[serde(default)]
    pub note: String,
}

/// POST /api/book/{slug}
pub async fn request(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<RequestBody>,
) -> Result<impl IntoResponse, AppError> {
    let date = dietdesk_shared::parse_date(&body.date)
        .map_err(|_| AppError::bad_request("date must be YYYY-MM-DD"))?;

    let id = state
        .booking_command
        .request(
            &slug,
            RequestAppointmentInput {
                date,
                time: body.time,
                client_name: body.client_name,
                client_phone: body.client_phone,
                note: body.note,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}
