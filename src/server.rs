//! HTTP surface: upload a sheet, run query phrases, download the filtered
//! rows. Handlers serialize access to the shared session; evaluation runs
//! on a blocking thread since the engine is synchronous.

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::error::RowsiftError;
use crate::session::Session;
use crate::sheet::SheetFormat;

pub type SharedSession = Arc<Mutex<Session>>;

#[derive(Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Serialize)]
pub struct QueryResponse {
    pub status: String,
    pub elapsed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct LoadResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn error_status(e: &RowsiftError) -> StatusCode {
    match e {
        RowsiftError::Load(_) | RowsiftError::EmptySource(_) | RowsiftError::NoTable => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn router(session: SharedSession, preview_rows: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers(Any);

    let load_session = Arc::clone(&session);
    let query_session = Arc::clone(&session);
    let export_session = Arc::clone(&session);

    Router::new()
        .route(
            "/v1/load",
            post(move |body: Bytes| {
                let shared = Arc::clone(&load_session);
                async move {
                    let outcome = tokio::task::spawn_blocking(move || {
                        shared.lock().unwrap().load(&body)
                    })
                    .await
                    .map_err(|e| {
                        warn!(error = %e, "Join error");
                        (StatusCode::INTERNAL_SERVER_ERROR, "Join error")
                    })?;
                    match outcome {
                        Ok(summary) => {
                            info!(rows = summary.row_count, "load complete");
                            let body = LoadResponse {
                                status: "ok".into(),
                                format: Some(
                                    match summary.format {
                                        SheetFormat::Csv => "csv",
                                        SheetFormat::JsonRows => "json",
                                    }
                                    .into(),
                                ),
                                row_count: Some(summary.row_count),
                                columns: Some(summary.columns),
                                error: None,
                            };
                            Ok::<_, (StatusCode, &'static str)>((StatusCode::OK, Json(body)))
                        }
                        Err(e) => {
                            let status = error_status(&e);
                            let msg = format!("{e}");
                            warn!(%msg, code = %status.as_u16(), "load error");
                            let body = LoadResponse {
                                status: "error".into(),
                                format: None,
                                row_count: None,
                                columns: None,
                                error: Some(msg),
                            };
                            Ok::<_, (StatusCode, &'static str)>((status, Json(body)))
                        }
                    }
                }
            }),
        )
        .route(
            "/v1/query",
            post(move |Json(req): Json<QueryRequest>| {
                let shared = Arc::clone(&query_session);
                async move {
                    let started = std::time::Instant::now();
                    let outcome = tokio::task::spawn_blocking(move || {
                        shared
                            .lock()
                            .unwrap()
                            .query(&req.query, Some(preview_rows))
                    })
                    .await
                    .map_err(|e| {
                        warn!(error = %e, "Join error");
                        (StatusCode::INTERNAL_SERVER_ERROR, "Join error")
                    })?;
                    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                    match outcome {
                        Ok(collected) => {
                            info!(
                                ms = elapsed_ms,
                                rows = collected.row_count,
                                limited = collected.limited,
                                "query complete"
                            );
                            let body = QueryResponse {
                                status: "ok".into(),
                                elapsed_ms,
                                columns: Some(collected.columns),
                                rows: Some(collected.rows),
                                row_count: Some(collected.row_count),
                                total_rows: Some(collected.total_rows),
                                limited: Some(collected.limited),
                                error: None,
                            };
                            Ok::<_, (StatusCode, &'static str)>((StatusCode::OK, Json(body)))
                        }
                        Err(e) => {
                            let status = error_status(&e);
                            let msg = format!("{e}");
                            warn!(%msg, code = %status.as_u16(), "query error");
                            let body = QueryResponse {
                                status: "error".into(),
                                elapsed_ms,
                                columns: None,
                                rows: None,
                                row_count: None,
                                total_rows: None,
                                limited: None,
                                error: Some(msg),
                            };
                            Ok::<_, (StatusCode, &'static str)>((status, Json(body)))
                        }
                    }
                }
            }),
        )
        .route(
            "/v1/export",
            get(move || {
                let shared = Arc::clone(&export_session);
                async move {
                    let outcome =
                        tokio::task::spawn_blocking(move || shared.lock().unwrap().export())
                            .await
                            .map_err(|e| {
                                warn!(error = %e, "Join error");
                                (StatusCode::INTERNAL_SERVER_ERROR, "Join error")
                            })?;
                    match outcome {
                        Ok(bytes) => {
                            let name = format!(
                                "filtered_rows_{}.csv",
                                Utc::now().format("%Y-%m-%dT%H-%M-%S")
                            );
                            info!(bytes = bytes.len(), %name, "export complete");
                            Ok::<_, (StatusCode, &'static str)>((
                                StatusCode::OK,
                                [
                                    ("content-type", "text/csv".to_string()),
                                    (
                                        "content-disposition",
                                        format!("attachment; filename=\"{name}\""),
                                    ),
                                ],
                                bytes,
                            ))
                        }
                        Err(e) => {
                            let status = error_status(&e);
                            warn!(error = %e, code = %status.as_u16(), "export error");
                            Ok::<_, (StatusCode, &'static str)>((
                                status,
                                [
                                    ("content-type", "text/plain".to_string()),
                                    ("content-disposition", "inline".to_string()),
                                ],
                                format!("{e}").into_bytes(),
                            ))
                        }
                    }
                }
            }),
        )
        .layer(cors)
}
