//! API handlers for the formfill server
//!
//! Provides REST endpoints for:
//! - Template filling (returns the generated PDF)
//! - Field dumps (raw, pairs, or keys)
//! - Template listing

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use pdftk_engine::FieldRecord;

use crate::error::ServerError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "formfill-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler: GET /pdf/
pub async fn handle_list_templates(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.registry.names())
}

/// Query parameters for the dump endpoint
#[derive(Deserialize)]
pub struct DumpParams {
    /// Output shape: `pairs`, `keys`, or absent/unknown for the raw records.
    format: Option<String>,
}

/// Handler: GET /pdf/:name?format={pairs|keys}
pub async fn handle_dump_fields(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(params): Query<DumpParams>,
) -> Result<Json<Value>, ServerError> {
    let template = state.resolve_template(&name)?;

    info!("Dump request: template={}", name);
    let records = state.toolkit.dump_fields(&template).await?;
    debug!("Template {} reported {} field(s)", name, records.len());

    let body = match params.format.as_deref() {
        Some("pairs") => Value::Array(fields_as_pairs(&records)),
        Some("keys") => serde_json::to_value(fields_as_keys(&records))
            .map_err(|e| ServerError::Internal(e.to_string()))?,
        _ => serde_json::to_value(&records).map_err(|e| ServerError::Internal(e.to_string()))?,
    };
    Ok(Json(body))
}

/// Handler: POST /pdf/:name
///
/// The body is read as raw bytes and parsed here rather than through the
/// `Json` extractor: a missing or malformed body must produce the fixed
/// error message clients match on, not the extractor's rejection.
pub async fn handle_fill_template(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, [(String, String); 2], Vec<u8>), ServerError> {
    let template = state.resolve_template(&name)?;

    let data: Map<String, Value> =
        serde_json::from_slice(&body).map_err(|_| ServerError::InvalidBody)?;

    info!("Fill request: template={}, fields={}", name, data.len());
    let filled = state.toolkit.fill_form(&template, &data).await?;

    let pdf = tokio::fs::read(filled.path())
        .await
        .map_err(|e| ServerError::Internal(format!("Cannot read generated file: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            ("Content-Type".to_string(), "application/pdf".to_string()),
            (
                "Content-Disposition".to_string(),
                "attachment; filename=\"out.pdf\"".to_string(),
            ),
        ],
        pdf,
    ))
}

/// One single-entry `{FieldName: FieldValue}` object per record, report order kept.
fn fields_as_pairs(records: &[FieldRecord]) -> Vec<Value> {
    records
        .iter()
        .map(|record| {
            let mut pair = Map::with_capacity(1);
            let value = record
                .value
                .clone()
                .map_or(Value::Null, Value::String);
            pair.insert(record.name.clone(), value);
            Value::Object(pair)
        })
        .collect()
}

/// The ordered field names only.
fn fields_as_keys(records: &[FieldRecord]) -> Vec<String> {
    records.iter().map(|record| record.name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    fn sample_records() -> Vec<FieldRecord> {
        vec![
            FieldRecord::new("A", Some("1".to_string())),
            FieldRecord::new("B", None),
            FieldRecord::new("C", Some("three".to_string())),
        ]
    }

    #[test]
    fn pairs_are_single_entry_objects_in_order() {
        let pairs = fields_as_pairs(&sample_records());
        assert_eq!(
            Value::Array(pairs),
            json!([{"A": "1"}, {"B": null}, {"C": "three"}])
        );
    }

    #[test]
    fn keys_are_names_only_in_order() {
        assert_eq!(fields_as_keys(&sample_records()), vec!["A", "B", "C"]);
    }

    #[test]
    fn empty_records_reshape_to_empty() {
        assert!(fields_as_pairs(&[]).is_empty());
        assert!(fields_as_keys(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn reshaping_preserves_length_and_order(
            names in proptest::collection::vec("[a-zA-Z0-9_]{1,12}", 0..8)
        ) {
            let records: Vec<FieldRecord> = names
                .iter()
                .map(|name| FieldRecord::new(name.clone(), Some("x".to_string())))
                .collect();

            prop_assert_eq!(fields_as_keys(&records), names.clone());

            let pairs = fields_as_pairs(&records);
            prop_assert_eq!(pairs.len(), records.len());
            for (pair, name) in pairs.iter().zip(&names) {
                let object = pair.as_object().unwrap();
                prop_assert_eq!(object.len(), 1);
                prop_assert!(object.contains_key(name));
            }
        }
    }
}
