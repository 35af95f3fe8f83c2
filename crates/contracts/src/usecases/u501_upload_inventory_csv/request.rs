use serde::{Deserialize, Serialize};

/// Запрос на загрузку CSV (текст файла целиком)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    #[serde(rename = "csvText")]
    pub csv_text: String,
    #[serde(rename = "fileName", default)]
    pub file_name: Option<String>,
}
