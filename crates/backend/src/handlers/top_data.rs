use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use contracts::enums::dataset_kind::DatasetKind;
use contracts::shared::date_range::DateRange;
use contracts::shared::pivot::TOP_N;
use contracts::usecases::u508_refresh_top_data::{
    request::{DateRangeDto, RefreshRequest},
    response::{RefreshResponse, SlotValue, SlotsResponse},
};

use crate::shared::collaborators::VariableStore;
use crate::usecases::u508_refresh_top_data::RefreshExecutor;

/// Имена переменных активного диапазона дат
const START_DATE_VAR: &str = "Start_date";
const END_DATE_VAR: &str = "End_date";

/// Состояние HTTP-слоя: executor и хранилище переменных
pub struct AppState {
    pub executor: RefreshExecutor,
    pub store: Arc<dyn VariableStore>,
}

/// POST /api/u508/refresh — обновить топ-данные за период
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, StatusCode> {
    let range = DateRange::parse(&request.start_date, &request.end_date).map_err(|e| {
        tracing::warn!("Rejected refresh request: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    run_refresh(&state, &range).await.map(Json)
}

/// GET /api/u508/slots/:kind — текущее содержимое слотов датасета
pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<Json<SlotsResponse>, StatusCode> {
    let kind = DatasetKind::from_code(&kind).ok_or(StatusCode::NOT_FOUND)?;

    let mut slots = Vec::with_capacity(TOP_N);
    for position in 1..=TOP_N {
        let name = kind.slot_name(position);
        let value = state.store.get(&name).await.map_err(|e| {
            tracing::error!("Failed to read slot {}: {}", name, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        slots.push(SlotValue {
            name,
            value: value.unwrap_or_default(),
        });
    }

    Ok(Json(SlotsResponse { kind, slots }))
}

/// GET /api/u508/date-range — активный диапазон дат.
///
/// Отсутствующие или невалидные сохранённые даты заменяются границами
/// текущего месяца и сразу сохраняются (поведение исходного компонента
/// при загрузке).
pub async fn get_date_range(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DateRangeDto>, StatusCode> {
    let stored_start = read_var(&state, START_DATE_VAR).await?;
    let stored_end = read_var(&state, END_DATE_VAR).await?;

    let defaults = DateRange::current_month(Utc::now().date_naive());

    let start = stored_start
        .as_deref()
        .filter(|s| is_valid_date(s))
        .map(|s| s.to_string())
        .unwrap_or_else(|| defaults.start_iso());
    let end = stored_end
        .as_deref()
        .filter(|s| is_valid_date(s))
        .map(|s| s.to_string())
        .unwrap_or_else(|| defaults.end_iso());

    if stored_start.as_deref() != Some(start.as_str()) {
        write_var(&state, START_DATE_VAR, &start).await?;
    }
    if stored_end.as_deref() != Some(end.as_str()) {
        write_var(&state, END_DATE_VAR, &end).await?;
    }

    Ok(Json(DateRangeDto {
        start_date: start,
        end_date: end,
    }))
}

/// POST /api/u508/date-range — сохранить диапазон и обновить топ-данные
pub async fn set_date_range(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DateRangeDto>,
) -> Result<Json<RefreshResponse>, StatusCode> {
    let range = DateRange::parse(&request.start_date, &request.end_date).map_err(|e| {
        tracing::warn!("Rejected date range: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    write_var(&state, START_DATE_VAR, &range.start_iso()).await?;
    write_var(&state, END_DATE_VAR, &range.end_iso()).await?;

    run_refresh(&state, &range).await.map(Json)
}

async fn run_refresh(
    state: &AppState,
    range: &DateRange,
) -> Result<RefreshResponse, StatusCode> {
    state.executor.refresh(range).await.map_err(|e| {
        tracing::warn!("Top data refresh skipped: {}", e);
        StatusCode::SERVICE_UNAVAILABLE
    })
}

async fn read_var(state: &AppState, name: &str) -> Result<Option<String>, StatusCode> {
    state.store.get(name).await.map_err(|e| {
        tracing::error!("Failed to read variable {}: {}", name, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

async fn write_var(state: &AppState, name: &str, value: &str) -> Result<(), StatusCode> {
    state.store.set(name, value).await.map_err(|e| {
        tracing::error!("Failed to write variable {}: {}", name, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

fn is_valid_date(value: &str) -> bool {
    DateRange::parse(value, value).is_ok()
}
