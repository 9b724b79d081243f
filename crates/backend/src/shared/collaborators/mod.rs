pub mod host_api;
pub mod memory;

use async_trait::async_trait;
use contracts::enums::dataset_kind::DatasetKind;
use contracts::shared::date_range::DateRange;
use contracts::shared::pivot::ReportData;
use thiserror::Error;

/// Ошибки получения идентификатора аккаунта
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("account identifier not available after {0}s")]
    Timeout(u64),

    #[error("host API error: {0}")]
    Api(String),
}

/// Ошибки запроса отчёта
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("report request failed: {0}")]
    Network(String),

    #[error("report request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse report payload: {0}")]
    Parse(String),
}

/// Ошибки хранилища переменных
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("variable request failed: {0}")]
    Network(String),

    #[error("variable request failed with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Поставщик идентификатора аккаунта хост-платформы.
///
/// Разрешается один раз (с таймаутом) и кэшируется; замена циклу опроса
/// `kf.account` из исходного компонента.
#[async_trait]
pub trait AccountProvider: Send + Sync {
    async fn account_id(&self) -> Result<String, AccountError>;
}

/// Клиент отчётов аналитики хост-платформы
#[async_trait]
pub trait ReportFetcher: Send + Sync {
    /// Получить сводный отчёт датасета за период
    async fn fetch(
        &self,
        account_id: &str,
        kind: DatasetKind,
        range: &DateRange,
    ) -> Result<ReportData, FetchError>;
}

/// Key-value хранилище переменных хост-платформы
#[async_trait]
pub trait VariableStore: Send + Sync {
    /// Прочитать переменную; `None`, если она не установлена
    async fn get(&self, name: &str) -> Result<Option<String>, StoreError>;

    /// Записать переменную (перезапись без условий)
    async fn set(&self, name: &str, value: &str) -> Result<(), StoreError>;
}
