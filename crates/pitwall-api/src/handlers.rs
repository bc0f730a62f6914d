//! Route handlers. Every request reads the shared engine; nothing is
//! mutated per request.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use pitwall_analytics::H2hReport;
use pitwall_domain::{DriverCatalogEntry, ResolvedDriver, YearRange};
use serde::Deserialize;

use crate::AppState;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct CatalogParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct H2hParams {
    pub a: String,
    pub b: String,
    pub from: Option<i32>,
    pub to: Option<i32>,
}

fn params<T>(query: Result<Query<T>, QueryRejection>) -> ApiResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::InvalidInput(rejection.body_text()))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// `GET /drivers?limit=N`
pub async fn list_drivers(
    State(state): State<AppState>,
    query: Result<Query<CatalogParams>, QueryRejection>,
) -> ApiResult<Json<Vec<DriverCatalogEntry>>> {
    let limit = params(query)?.limit.unwrap_or(state.suggestion_limit);
    Ok(Json(state.engine.suggestions(limit)))
}

/// `GET /drivers/resolve?q=...`
///
/// A numeric `q` selects from the default suggestion list.
pub async fn resolve_driver(
    State(state): State<AppState>,
    query: Result<Query<ResolveParams>, QueryRejection>,
) -> ApiResult<Json<ResolvedDriver>> {
    let ResolveParams { q } = params(query)?;
    let driver = state.engine.select_driver(&q, state.suggestion_limit)?;
    Ok(Json(driver))
}

/// `GET /h2h?a=...&b=...&from=Y&to=Y`
pub async fn head_to_head(
    State(state): State<AppState>,
    query: Result<Query<H2hParams>, QueryRejection>,
) -> ApiResult<Json<H2hReport>> {
    let H2hParams { a, b, from, to } = params(query)?;
    let years = YearRange::new(from, to).map_err(pitwall_analytics::AnalyticsError::from)?;

    let engine = &state.engine;
    let driver_a = engine.select_driver(&a, state.suggestion_limit)?;
    let driver_b = engine.select_driver(&b, state.suggestion_limit)?;
    let report = engine.compare_head_to_head(driver_a.id, driver_b.id, years)?;

    tracing::info!(
        driver_a = %report.driver_a.reference,
        driver_b = %report.driver_b.reference,
        %years,
        races = report.rows.len(),
        "H2H served"
    );
    Ok(Json(report))
}
