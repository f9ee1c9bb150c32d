use axum::{Json, body::Bytes, extract::rejection::BytesRejection};
use costing_core::{RawCostingInput, calculate_raw};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::ApiError;

/// Request body of `POST /api/costeo`.
///
/// Totals may arrive as JSON numbers or numeric strings; both are kept as
/// text until validation. Any other JSON type is treated as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostingRequest {
    pub ventas: Option<String>,
    pub costos_variables: Option<String>,
    pub costos_fijos: Option<String>,
    pub metodo: Option<String>,
}

impl CostingRequest {
    /// Parses a raw body.
    ///
    /// # Errors
    ///
    /// [`ApiError::MalformedBody`] when the body is not a JSON object.
    pub fn from_slice(body: &[u8]) -> Result<Self, ApiError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| ApiError::MalformedBody(e.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(ApiError::MalformedBody(
                "request body must be a JSON object".to_string(),
            ));
        };

        Ok(Self {
            ventas: numeric_text(&fields, "ventas"),
            costos_variables: numeric_text(&fields, "costosVariables"),
            costos_fijos: numeric_text(&fields, "costosFijos"),
            metodo: fields
                .get("metodo")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    pub fn as_raw(&self) -> RawCostingInput<'_> {
        RawCostingInput {
            sales: self.ventas.as_deref(),
            variable_costs: self.costos_variables.as_deref(),
            fixed_costs: self.costos_fijos.as_deref(),
            method: self.metodo.as_deref(),
        }
    }
}

fn numeric_text(
    fields: &Map<String, Value>,
    key: &str,
) -> Option<String> {
    match fields.get(key)? {
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) => Some(text.clone()),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostingResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub resultado: Decimal,
}

/// `POST /api/costeo`
///
/// The body is taken as a `Result` so that a rejected body (over the size
/// limit) is answered in the same JSON error shape as every other failure.
pub async fn handle_costing(
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<CostingResponse>, ApiError> {
    let request = CostingRequest::from_slice(&body?)?;
    debug!(?request, "costing request");

    let result = calculate_raw(&request.as_raw())?;
    info!(method = %result.method, resultado = %result.result, "costing calculated");

    Ok(Json(CostingResponse {
        resultado: result.result,
    }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn from_slice_reads_numbers_and_strings() {
        let body = br#"{"ventas": 1000, "costosVariables": "400.5", "costosFijos": 2e2, "metodo": "directo"}"#;

        let request = CostingRequest::from_slice(body).unwrap();

        assert_eq!(
            request,
            CostingRequest {
                ventas: Some("1000".to_string()),
                costos_variables: Some("400.5".to_string()),
                costos_fijos: Some("200.0".to_string()),
                metodo: Some("directo".to_string()),
            }
        );
    }

    #[test]
    fn from_slice_treats_other_types_as_missing() {
        let body = br#"{"ventas": null, "costosVariables": true, "costosFijos": [1], "metodo": 7}"#;

        let request = CostingRequest::from_slice(body).unwrap();

        assert_eq!(request, CostingRequest::default());
    }

    #[test]
    fn from_slice_rejects_invalid_json() {
        let result = CostingRequest::from_slice(b"{not json");

        assert!(matches!(result, Err(ApiError::MalformedBody(_))));
    }

    #[test]
    fn from_slice_rejects_non_object_json() {
        let result = CostingRequest::from_slice(b"[1, 2, 3]");

        assert!(matches!(result, Err(ApiError::MalformedBody(_))));
    }

    #[tokio::test]
    async fn handle_costing_returns_result() {
        let body = Bytes::from_static(
            br#"{"ventas": 1000, "costosVariables": 400, "costosFijos": 200, "metodo": "absorcion"}"#,
        );

        let Json(response) = handle_costing(Ok(body)).await.unwrap();

        assert_eq!(response.resultado, dec!(400));
    }

    #[tokio::test]
    async fn handle_costing_rejects_bad_numbers() {
        let body = Bytes::from_static(
            br#"{"ventas": "abc", "costosVariables": 400, "costosFijos": 200, "metodo": "directo"}"#,
        );

        let error = handle_costing(Ok(body)).await.unwrap_err();

        assert!(matches!(error, ApiError::Costing(ref e) if e.is_invalid_input()));
    }
}
