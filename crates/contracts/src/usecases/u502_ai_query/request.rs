use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Standard,
    /// Просим модель вложить JSON для графика или таблицы
    Advanced,
}

/// Тело POST /api/ai-query.
///
/// Поля необязательны на уровне десериализации: отсутствие проверяется
/// явно, чтобы вернуть 400 с понятным сообщением.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiQueryRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(rename = "csvText", default)]
    pub csv_text: Option<String>,
    #[serde(rename = "displayMode", default)]
    pub display_mode: DisplayMode,
}

impl AiQueryRequest {
    pub fn new(question: impl Into<String>, csv_text: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            csv_text: Some(csv_text.into()),
            display_mode: DisplayMode::Standard,
        }
    }
}
