use serde::{Deserialize, Serialize};

use crate::enums::dataset_kind::DatasetKind;

/// Ответ на запрос обновления: итог по каждому датасету
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// Идентификатор запуска (для поиска в логах)
    pub run_id: String,

    pub start_date: String,
    pub end_date: String,

    /// Итоги по датасетам в порядке обработки
    pub datasets: Vec<DatasetOutcome>,
}

/// Итог обработки одного датасета
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetOutcome {
    pub kind: DatasetKind,

    pub status: DatasetStatus,

    /// Опубликованные метки в порядке рейтинга (пусто при очистке)
    #[serde(default)]
    pub published: Vec<String>,

    /// Диагностическое сообщение (причина очистки или ошибки)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetStatus {
    /// Слоты заполнены метками топ-рейтинга
    Published,

    /// Данных нет — все слоты очищены
    Cleared,

    /// Ошибка сети или записи; слоты этого датасета не тронуты
    Failed,

    /// Запуск устарел (пришёл более новый диапазон), запись пропущена
    Superseded,
}

/// Текущее содержимое слотов одного датасета
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub kind: DatasetKind,
    pub slots: Vec<SlotValue>,
}

/// Один именованный слот
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotValue {
    pub name: String,
    pub value: String,
}
