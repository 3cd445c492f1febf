//! Axum HTTP handlers for the web server
//!
//! Provides the prediction endpoint, the API description and the health probe.

use axum::{
    body::Bytes,
    extract::{FromRequest, Query, Request, State},
    http::header,
    Form, Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::{
    domain::{
        predictor::PredictionResult,
        request::{ParamSources, PredictionRequest},
    },
    errors::AppError,
    http::docs::swagger_document,
    AppState,
};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn swagger() -> Json<Value> {
    Json(swagger_document())
}

pub async fn predict(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<PredictionResult>, AppError> {
    let sources = collect_sources(request).await?;
    let passenger = PredictionRequest::from_sources(&sources)?;

    info!(
        ticket_class = passenger.ticket_class,
        sex = passenger.sex,
        age = passenger.age,
        num_of_siblings_and_spouses = passenger.num_of_siblings_and_spouses,
        num_of_parents_and_children = passenger.num_of_parents_and_children,
        fare = passenger.fare,
        port_of_embarkation = passenger.port_of_embarkation,
        "prediction request accepted"
    );

    let result = state.predictor.predict(&passenger).await?;
    Ok(Json(result))
}

async fn collect_sources(request: Request) -> Result<ParamSources, AppError> {
    let Query(query) =
        Query::<Vec<(String, String)>>::try_from_uri(request.uri()).map_err(|_| {
            AppError::bad_request("malformed_query", "query string could not be decoded")
        })?;
    let sources = ParamSources::new().with_query(query);

    let media_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if is_json(&media_type) {
        let body = Bytes::from_request(request, &())
            .await
            .map_err(|rejection| AppError::bad_request("malformed_body", rejection.body_text()))?;
        if body.is_empty() {
            return Ok(sources);
        }

        return match serde_json::from_slice::<Value>(&body) {
            Ok(Value::Object(object)) => Ok(sources.with_json(object)),
            Ok(_) => Err(AppError::bad_request(
                "malformed_body",
                "request body must be a JSON object",
            )),
            Err(_) => Err(AppError::bad_request(
                "malformed_body",
                "failed to decode JSON object",
            )),
        };
    }

    if media_type == "application/x-www-form-urlencoded" {
        let Form(form) = Form::<Vec<(String, String)>>::from_request(request, &())
            .await
            .map_err(|rejection| AppError::bad_request("malformed_body", rejection.body_text()))?;
        return Ok(sources.with_form(form));
    }

    Ok(sources)
}

fn is_json(media_type: &str) -> bool {
    media_type == "application/json"
        || (media_type.starts_with("application/") && media_type.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::is_json;

    #[test]
    fn recognizes_json_media_types() {
        assert!(is_json("application/json"));
        assert!(is_json("application/merge-patch+json"));
        assert!(!is_json("text/plain"));
        assert!(!is_json("application/x-www-form-urlencoded"));
        assert!(!is_json(""));
    }
}
