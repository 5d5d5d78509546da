use axum::{Json, response::IntoResponse};
use dietdesk_dietplan::{PlanDocument, PlanMode, share};
use serde::Deserialize;
use serde_json::json;

/// POST /api/plans/encode
pub async fn encode(Json(document): Json<PlanDocument>) -> impl IntoResponse {
    Json(json!({
        "content": dietdesk_dietplan::encode(&document),
        "mode": document.mode(),
    }))
}

#[derive(Deserialize)]
pub struct DecodeBody {
    pub content: String,
    /// Guessed from day names when missing.
    #[serde(default)]
    pub mode: Option<PlanMode>,
}

/// POST /api/plans/decode
pub async fn decode(Json(body): Json<DecodeBody>) -> Json<PlanDocument> {
    let document = match body.mode {
        Some(mode) => dietdesk_dietplan::decode_as(&body.content, mode),
        None => dietdesk_dietplan::decode(&body.content),
    };

    Json(document)
}

#[derive(Deserialize)]
pub struct ShareBody {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_phone: String,
    #[serde(default)]
    pub title: String,
    pub content: String,
}

/// POST /api/plans/share
pub async fn share(Json(body): Json<ShareBody>) -> impl IntoResponse {
    let message = share::whatsapp_message(&body.client_name, &body.title, &body.content);
    let link = share::whatsapp_link(&body.client_phone, &message);

    Json(json!({ "message": message, "link": link }))
}
