use serde::{Deserialize, Serialize};

/// Виды датасетов топ-данных
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Material,
    Customer,
}

impl DatasetKind {
    /// Оба датасета в фиксированном порядке обработки
    pub const ALL: [DatasetKind; 2] = [DatasetKind::Material, DatasetKind::Customer];

    /// Получить код датасета
    pub fn code(&self) -> &'static str {
        match self {
            DatasetKind::Material => "material",
            DatasetKind::Customer => "customer",
        }
    }

    /// Получить человекочитаемое название (используется в именах слотов)
    pub fn display_name(&self) -> &'static str {
        match self {
            DatasetKind::Material => "Material",
            DatasetKind::Customer => "Customer",
        }
    }

    /// Определить датасет по коду
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "material" | "materials" => Some(DatasetKind::Material),
            "customer" | "customers" => Some(DatasetKind::Customer),
            _ => None,
        }
    }

    /// Имя переменной-слота для позиции рейтинга (1-based)
    pub fn slot_name(&self, position: usize) -> String {
        format!("Top_{}_{}_Name", position, self.display_name())
    }
}
