use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{StoreError, VariableStore};

/// In-memory хранилище переменных.
///
/// Используется в тестах и при локальном запуске без хост-платформы.
#[derive(Debug, Default)]
pub struct MemoryVariableStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryVariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Снимок всех переменных (для проверок в тестах)
    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.values.lock().await.clone()
    }
}

#[async_trait]
impl VariableStore for MemoryVariableStore {
    async fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.lock().await.get(name).cloned())
    }

    async fn set(&self, name: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .lock()
            .await
            .insert(name.to_string(), value.to_string());
        Ok(())
    }
}
