use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use contracts::enums::dataset_kind::DatasetKind;
use contracts::shared::date_range::DateRange;
use contracts::shared::pivot::{KeyDetection, TOP_N};
use contracts::usecases::u508_refresh_top_data::response::{
    DatasetOutcome, DatasetStatus, RefreshResponse,
};
use uuid::Uuid;

use super::slot_publisher::SlotPublisher;
use crate::shared::collaborators::{AccountProvider, ReportFetcher, VariableStore};
use crate::shared::pivot::{detect_keys, extract_top};

/// Executor для UseCase обновления топ-данных.
///
/// Все коллабораторы внедряются через конструктор; пайплайны материалов
/// и клиентов независимы — сбой одного не мешает другому.
pub struct RefreshExecutor {
    account: Arc<dyn AccountProvider>,
    fetcher: Arc<dyn ReportFetcher>,
    store: Arc<dyn VariableStore>,
    /// Счётчик поколений запусков: устаревший запуск не пишет в слоты
    generation: AtomicU64,
}

impl RefreshExecutor {
    pub fn new(
        account: Arc<dyn AccountProvider>,
        fetcher: Arc<dyn ReportFetcher>,
        store: Arc<dyn VariableStore>,
    ) -> Self {
        Self {
            account,
            fetcher,
            store,
            generation: AtomicU64::new(0),
        }
    }

    /// Обновить топ-данные обоих датасетов за период.
    ///
    /// Если аккаунт недоступен — запуск целиком пропускается без
    /// изменения слотов (warning в лог).
    pub async fn refresh(&self, range: &DateRange) -> Result<RefreshResponse> {
        let run_id = Uuid::new_v4().to_string();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::info!(
            "Refreshing top data for {}..{} (run {})",
            range.start_iso(),
            range.end_iso(),
            run_id
        );

        let account_id = match self.account.account_id().await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Missing account id, skipping top data refresh: {}", e);
                anyhow::bail!("account not ready: {}", e);
            }
        };

        // Оба пайплайна запускаются всегда, независимо друг от друга
        let (materials, customers) = tokio::join!(
            self.run_dataset(&account_id, DatasetKind::Material, range, generation),
            self.run_dataset(&account_id, DatasetKind::Customer, range, generation),
        );

        Ok(RefreshResponse {
            run_id,
            start_date: range.start_iso(),
            end_date: range.end_iso(),
            datasets: vec![materials, customers],
        })
    }

    /// Пайплайн одного датасета: fetch → детекция ключей → top-N →
    /// публикация (или очистка)
    async fn run_dataset(
        &self,
        account_id: &str,
        kind: DatasetKind,
        range: &DateRange,
        generation: u64,
    ) -> DatasetOutcome {
        let report = match self.fetcher.fetch(account_id, kind, range).await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("Top {} fetch failed: {}", kind.code(), e);
                return failed(kind, format!("fetch failed: {}", e));
            }
        };

        match detect_keys(&report) {
            KeyDetection::EmptyResult => {
                tracing::info!(
                    "No {} data for {}..{}, clearing slots",
                    kind.code(),
                    range.start_iso(),
                    range.end_iso()
                );
                self.clear_slots(kind, generation, "empty result").await
            }
            KeyDetection::Undetectable { sample } => {
                tracing::info!(
                    "Could not detect row/column/value keys for {}. Sample row: {}",
                    kind.code(),
                    serde_json::to_string(&sample).unwrap_or_default()
                );
                self.clear_slots(kind, generation, "keys undetectable").await
            }
            KeyDetection::Detected(keys) => {
                let top = extract_top(&report.data, &keys, TOP_N);

                if top.is_empty() {
                    tracing::info!(
                        "No self-matching {} rows, clearing slots",
                        kind.code()
                    );
                    return self.clear_slots(kind, generation, "no matches").await;
                }

                if !self.is_current(generation) {
                    return superseded(kind);
                }

                let labels: Vec<String> = top.iter().map(|e| e.label.clone()).collect();
                match SlotPublisher::new(self.store.as_ref())
                    .publish(kind, &top)
                    .await
                {
                    Ok(()) => {
                        tracing::info!(
                            "Published top {} {}: {:?}",
                            top.len(),
                            kind.code(),
                            labels
                        );
                        DatasetOutcome {
                            kind,
                            status: DatasetStatus::Published,
                            published: labels,
                            message: None,
                        }
                    }
                    Err(e) => failed(kind, format!("slot write failed: {}", e)),
                }
            }
        }
    }

    async fn clear_slots(
        &self,
        kind: DatasetKind,
        generation: u64,
        reason: &str,
    ) -> DatasetOutcome {
        if !self.is_current(generation) {
            return superseded(kind);
        }

        match SlotPublisher::new(self.store.as_ref()).clear(kind).await {
            Ok(()) => DatasetOutcome {
                kind,
                status: DatasetStatus::Cleared,
                published: vec![],
                message: Some(reason.to_string()),
            },
            Err(e) => failed(kind, format!("slot clear failed: {}", e)),
        }
    }

    /// Актуален ли запуск данного поколения (generation fencing:
    /// результат, обогнанный более новым диапазоном, не публикуется)
    fn is_current(&self, generation: u64) -> bool {
        let current = self.generation.load(Ordering::SeqCst);
        if current != generation {
            tracing::debug!(
                "Run of generation {} superseded by {}, skipping writes",
                generation,
                current
            );
            return false;
        }
        true
    }
}

fn failed(kind: DatasetKind, message: String) -> DatasetOutcome {
    DatasetOutcome {
        kind,
        status: DatasetStatus::Failed,
        published: vec![],
        message: Some(message),
    }
}

fn superseded(kind: DatasetKind) -> DatasetOutcome {
    DatasetOutcome {
        kind,
        status: DatasetStatus::Superseded,
        published: vec![],
        message: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::collaborators::memory::MemoryVariableStore;
    use crate::shared::collaborators::{AccountError, FetchError};
    use async_trait::async_trait;
    use contracts::shared::pivot::{PivotRow, ReportData};
    use std::collections::HashMap;

    struct ReadyAccount;

    #[async_trait]
    impl AccountProvider for ReadyAccount {
        async fn account_id(&self) -> Result<String, AccountError> {
            Ok("acc-1".to_string())
        }
    }

    struct NoAccount;

    #[async_trait]
    impl AccountProvider for NoAccount {
        async fn account_id(&self) -> Result<String, AccountError> {
            Err(AccountError::Timeout(10))
        }
    }

    /// Fetcher со сценарием на каждый датасет
    struct ScriptedFetcher {
        responses: HashMap<DatasetKind, Result<Vec<&'static str>, FetchError>>,
    }

    impl ScriptedFetcher {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
            }
        }

        fn with_rows(mut self, kind: DatasetKind, rows: Vec<&'static str>) -> Self {
            self.responses.insert(kind, Ok(rows));
            self
        }

        fn with_error(mut self, kind: DatasetKind) -> Self {
            self.responses
                .insert(kind, Err(FetchError::Network("connection refused".into())));
            self
        }
    }

    #[async_trait]
    impl ReportFetcher for ScriptedFetcher {
        async fn fetch(
            &self,
            _account_id: &str,
            kind: DatasetKind,
            _range: &DateRange,
        ) -> Result<ReportData, FetchError> {
            match self.responses.get(&kind) {
                Some(Ok(rows)) => Ok(ReportData {
                    data: rows
                        .iter()
                        .map(|r| serde_json::from_str::<PivotRow>(r).unwrap())
                        .collect(),
                }),
                Some(Err(_)) => Err(FetchError::Network("connection refused".into())),
                None => Ok(ReportData::default()),
            }
        }
    }

    fn range() -> DateRange {
        DateRange::parse("2025-01-01", "2025-01-31").unwrap()
    }

    fn executor(
        fetcher: ScriptedFetcher,
        store: Arc<MemoryVariableStore>,
    ) -> RefreshExecutor {
        RefreshExecutor::new(Arc::new(ReadyAccount), Arc::new(fetcher), store)
    }

    #[tokio::test]
    async fn test_publishes_ranked_labels() {
        let store = Arc::new(MemoryVariableStore::new());
        let fetcher = ScriptedFetcher::new().with_rows(
            DatasetKind::Material,
            vec![
                r#"{"Row_A": "X", "Column_A": "X", "Value_A": "10"}"#,
                r#"{"Row_A": "Y", "Column_A": "Y", "Value_A": "30"}"#,
                r#"{"Row_A": "Y", "Column_A": "Z", "Value_A": "99"}"#,
            ],
        );

        let response = executor(fetcher, store.clone())
            .refresh(&range())
            .await
            .unwrap();

        let materials = &response.datasets[0];
        assert_eq!(materials.status, DatasetStatus::Published);
        assert_eq!(materials.published, vec!["Y", "X"]);

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot["Top_1_Material_Name"], "Y");
        assert_eq!(snapshot["Top_2_Material_Name"], "X");
        assert_eq!(snapshot["Top_3_Material_Name"], "");

        // customer report was empty: its slots are cleared, not stale
        assert_eq!(response.datasets[1].status, DatasetStatus::Cleared);
        assert_eq!(snapshot["Top_1_Customer_Name"], "");
    }

    #[tokio::test]
    async fn test_one_dataset_failure_does_not_block_the_other() {
        let store = Arc::new(MemoryVariableStore::new());
        let fetcher = ScriptedFetcher::new()
            .with_error(DatasetKind::Material)
            .with_rows(
                DatasetKind::Customer,
                vec![r#"{"Row_C": "Acme", "Column_C": "Acme", "Value_C": 5}"#],
            );

        let response = executor(fetcher, store.clone())
            .refresh(&range())
            .await
            .unwrap();

        assert_eq!(response.datasets[0].status, DatasetStatus::Failed);
        assert_eq!(response.datasets[1].status, DatasetStatus::Published);

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot["Top_1_Customer_Name"], "Acme");
        // failed pipeline left material slots untouched
        assert!(!snapshot.contains_key("Top_1_Material_Name"));
    }

    #[tokio::test]
    async fn test_undetectable_keys_clear_slots() {
        let store = Arc::new(MemoryVariableStore::new());
        store.set("Top_1_Material_Name", "Stale").await.unwrap();

        let fetcher = ScriptedFetcher::new()
            .with_rows(DatasetKind::Material, vec![r#"{"Foo": "a", "Bar": 1}"#]);

        let response = executor(fetcher, store.clone())
            .refresh(&range())
            .await
            .unwrap();

        assert_eq!(response.datasets[0].status, DatasetStatus::Cleared);
        assert_eq!(
            response.datasets[0].message.as_deref(),
            Some("keys undetectable")
        );
        assert_eq!(store.snapshot().await["Top_1_Material_Name"], "");
    }

    #[tokio::test]
    async fn test_no_matches_clear_slots() {
        let store = Arc::new(MemoryVariableStore::new());
        let fetcher = ScriptedFetcher::new().with_rows(
            DatasetKind::Material,
            vec![r#"{"Row_A": "X", "Column_A": "Y", "Value_A": 10}"#],
        );

        let response = executor(fetcher, store.clone())
            .refresh(&range())
            .await
            .unwrap();

        assert_eq!(response.datasets[0].status, DatasetStatus::Cleared);
        assert_eq!(response.datasets[0].message.as_deref(), Some("no matches"));
    }

    #[tokio::test]
    async fn test_missing_account_skips_run_without_mutation() {
        let store = Arc::new(MemoryVariableStore::new());
        let fetcher = ScriptedFetcher::new();
        let executor = RefreshExecutor::new(
            Arc::new(NoAccount),
            Arc::new(fetcher),
            store.clone(),
        );

        assert!(executor.refresh(&range()).await.is_err());
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_superseded_generation_does_not_write() {
        let store = Arc::new(MemoryVariableStore::new());
        let fetcher = ScriptedFetcher::new().with_rows(
            DatasetKind::Material,
            vec![r#"{"Row_A": "X", "Column_A": "X", "Value_A": 1}"#],
        );
        let executor = executor(fetcher, store.clone());

        // a newer run has already started
        executor.generation.store(5, Ordering::SeqCst);

        let outcome = executor
            .run_dataset("acc-1", DatasetKind::Material, &range(), 1)
            .await;

        assert_eq!(outcome.status, DatasetStatus::Superseded);
        assert!(store.snapshot().await.is_empty());
    }
}
