use contracts::enums::dataset_kind::DatasetKind;
use contracts::shared::pivot::{MatchEntry, TOP_N};

use crate::shared::collaborators::{StoreError, VariableStore};

/// Публикация рейтинга в слоты `Top_{1..5}_{Kind}_Name`.
///
/// Всегда перезаписываются все N слотов: позиции без записи получают
/// пустую строку, частичного состояния между запусками не остаётся.
/// Очистка — вырожденный случай публикации пустого списка.
pub struct SlotPublisher<'a> {
    store: &'a dyn VariableStore,
}

impl<'a> SlotPublisher<'a> {
    pub fn new(store: &'a dyn VariableStore) -> Self {
        Self { store }
    }

    /// Записать все N слотов датасета. Ошибка записи одного слота
    /// логируется и не прерывает запись остальных; первая ошибка
    /// возвращается после прохода по всем слотам.
    pub async fn publish(
        &self,
        kind: DatasetKind,
        entries: &[MatchEntry],
    ) -> Result<(), StoreError> {
        let mut first_error: Option<StoreError> = None;

        for position in 1..=TOP_N {
            let name = kind.slot_name(position);
            let value = entries
                .get(position - 1)
                .map(|e| e.label.as_str())
                .unwrap_or("");

            if let Err(e) = self.store.set(&name, value).await {
                tracing::error!("Failed to write slot {}: {}", name, e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Очистить все N слотов датасета
    pub async fn clear(&self, kind: DatasetKind) -> Result<(), StoreError> {
        self.publish(kind, &[]).await
    }
}
