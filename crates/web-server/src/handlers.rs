use crate::{error::AppError, AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use core_types::{NewObservation, StoredObservation};
use engine::StrategyResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordsResponse {
    pub records: Vec<StoredObservation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordCreated {
    pub message: String,
    pub record: StoredObservation,
}

/// Query parameters of the performance endpoint. Missing windows fall back to the
/// configured defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PerformanceParams {
    pub short_window: Option<usize>,
    pub long_window: Option<usize>,
}

/// # GET /data
/// Every stored record, oldest first.
pub async fn get_all_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RecordsResponse>, AppError> {
    let records = state.store.list_all().await?;
    Ok(Json(RecordsResponse { records }))
}

/// # POST /data
pub async fn add_data(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewObservation>, JsonRejection>,
) -> Result<Json<RecordCreated>, AppError> {
    let Json(record) = payload?;
    record.validate()?;

    let record = state.store.insert(record).await.map_err(AppError::rejected)?;
    tracing::info!(id = record.id, "Record added");

    Ok(Json(RecordCreated {
        message: "Record added successfully".to_string(),
        record,
    }))
}

/// # GET /strategy/performance
/// Evaluates the moving-average crossover over the full stored history.
pub async fn strategy_performance(
    State(state): State<Arc<AppState>>,
    params: Result<Query<PerformanceParams>, QueryRejection>,
) -> Result<Json<StrategyResult>, AppError> {
    let Query(params) = params?;
    let short_window = params.short_window.unwrap_or(state.defaults.short_window);
    let long_window = params.long_window.unwrap_or(state.defaults.long_window);

    let series = state.store.snapshot().await?;
    let result = state.engine.evaluate(&series, short_window, long_window)?;
    Ok(Json(result))
}
