use super::{
    FunctionRequest, FunctionResponse, SignupRequest, SignupResponse, FAILURE_MESSAGE,
    METHOD_NOT_ALLOWED,
};
use crate::error::MailingListError;
use crate::services::SignupService;
use std::collections::BTreeMap;

/// Handle one signup function invocation.
///
/// `OPTIONS` answers the CORS preflight, any other non-`POST` is rejected
/// with 405. Invalid input yields 400; any mailing-list failure yields 500
/// with a generic message.
pub async fn handle(service: &dyn SignupService, request: &FunctionRequest) -> FunctionResponse {
    let method = request.http_method.to_ascii_uppercase();

    if method == "OPTIONS" {
        return preflight();
    }

    if method != "POST" {
        return respond(405, METHOD_NOT_ALLOWED.to_string());
    }

    let payload = match parse_body(request.body.as_deref()) {
        Ok(payload) => payload,
        Err(reason) => {
            tracing::debug!("Rejected signup body: {}", reason);
            return respond_json(400, &SignupResponse::failure(reason));
        }
    };

    match service.subscribe(&payload.email, &payload.source).await {
        Ok(_) => respond_json(200, &SignupResponse::success()),
        Err(MailingListError::InvalidRequest(reason)) => {
            respond_json(400, &SignupResponse::failure(reason))
        }
        Err(_) => respond_json(500, &SignupResponse::failure(FAILURE_MESSAGE)),
    }
}

fn parse_body(body: Option<&str>) -> Result<SignupRequest, String> {
    let body = body
        .filter(|b| !b.trim().is_empty())
        .ok_or_else(|| "Missing request body".to_string())?;
    serde_json::from_str(body).map_err(|e| format!("Invalid request body: {}", e))
}

fn preflight() -> FunctionResponse {
    let mut headers = BTreeMap::new();
    headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
    headers.insert(
        "Access-Control-Allow-Headers".to_string(),
        "Content-Type".to_string(),
    );
    headers.insert("Access-Control-Allow-Methods".to_string(), "POST".to_string());

    FunctionResponse {
        status_code: 200,
        headers,
        body: None,
    }
}

fn respond(status_code: u16, body: String) -> FunctionResponse {
    let mut headers = BTreeMap::new();
    headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    FunctionResponse {
        status_code,
        headers,
        body: Some(body),
    }
}

fn respond_json(status_code: u16, payload: &SignupResponse) -> FunctionResponse {
    match serde_json::to_string(payload) {
        Ok(body) => respond(status_code, body),
        Err(e) => {
            tracing::error!("Failed to serialize signup response: {}", e);
            respond(500, format!(r#"{{"error":"{}"}}"#, FAILURE_MESSAGE))
        }
    }
}
