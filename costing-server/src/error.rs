use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use costing_core::{CostingError, TotalField};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Message returned for every 500; the cause is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "an error occurred during the calculation";

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Validation or calculation rejected the request (400).
    #[error(transparent)]
    Costing(#[from] CostingError),

    /// The body could not be read, e.g. it exceeds the size limit (413).
    #[error("request body rejected: {0}")]
    BodyRejected(#[from] BytesRejection),

    /// The body is not a JSON object (500, matching any other unexpected failure).
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Costing(_) => StatusCode::BAD_REQUEST,
            Self::BodyRejected(rejection) => rejection.status(),
            Self::MalformedBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Distinguishes bad numbers from a bad method.
    fn public_message(&self) -> String {
        match self {
            Self::Costing(CostingError::InvalidInput { fields }) => format!(
                "ventas, costosVariables and costosFijos must be valid numbers (invalid: {})",
                wire_names(fields)
            ),
            Self::Costing(CostingError::OutOfRange { fields }) => format!(
                "ventas, costosVariables and costosFijos are out of range (out of range: {})",
                wire_names(fields)
            ),
            Self::Costing(CostingError::InvalidMethod(_)) => {
                "invalid costing method; expected 'directo' or 'absorcion'".to_string()
            }
            Self::BodyRejected(rejection) => rejection.body_text(),
            Self::MalformedBody(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

/// JSON field name of a total in the request body.
pub fn wire_name(field: &TotalField) -> &'static str {
    match field {
        TotalField::Sales => "ventas",
        TotalField::VariableCosts => "costosVariables",
        TotalField::FixedCosts => "costosFijos",
    }
}

fn wire_names(fields: &[TotalField]) -> String {
    fields.iter().map(wire_name).collect::<Vec<_>>().join(", ")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "costing request failed");
        } else {
            warn!(error = %self, "costing request rejected");
        }

        let body = Json(json!({ "error": self.public_message() }));
        (status, body).into_response()
    }
}
