use serde::{Deserialize, Serialize};

/// Запрос на обновление топ-данных за период
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Начало периода (ISO, YYYY-MM-DD)
    pub start_date: String,

    /// Конец периода (ISO, YYYY-MM-DD)
    pub end_date: String,
}

/// Сохраняемый диапазон дат (переменные Start_date / End_date)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRangeDto {
    pub start_date: String,
    pub end_date: String,
}
