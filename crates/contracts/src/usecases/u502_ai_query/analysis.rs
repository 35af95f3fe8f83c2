use serde::{Deserialize, Serialize};
use serde_json::Value;

const JSON_FENCE_OPEN: &str = "```json";
const FENCE: &str = "```";

/// Ответ модели, разобранный для отображения.
///
/// Если в тексте есть блок ```json с описанием графика или таблицы,
/// он извлекается, а в `content` остаётся только текст вокруг блока.
/// Любая ошибка разбора даёт `PlainText` со всем ответом.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisResult {
    #[serde(rename = "text")]
    PlainText { content: String },
    Chart { content: String, data: Vec<Value> },
    Table {
        content: String,
        headers: Vec<String>,
        rows: Vec<Value>,
    },
}

/// Положение блока: (начало ```json, конец закрывающего ```, содержимое)
fn find_json_block(text: &str) -> Option<(usize, usize, &str)> {
    let start = text.find(JSON_FENCE_OPEN)?;
    let body_start = start + JSON_FENCE_OPEN.len();
    let body_len = text[body_start..].find(FENCE)?;
    let body_end = body_start + body_len;
    Some((start, body_end + FENCE.len(), text[body_start..body_end].trim()))
}

fn header_to_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl AnalysisResult {
    pub fn parse(text: &str) -> Self {
        Self::try_parse_structured(text).unwrap_or_else(|| AnalysisResult::PlainText {
            content: text.to_string(),
        })
    }

    fn try_parse_structured(text: &str) -> Option<Self> {
        let (start, end, body) = find_json_block(text)?;
        let parsed: Value = serde_json::from_str(body).ok()?;
        let content = format!("{}{}", &text[..start], &text[end..])
            .trim()
            .to_string();

        match parsed.get("type").and_then(Value::as_str) {
            Some("chart") => {
                let data = parsed.get("data")?.as_array()?.clone();
                Some(AnalysisResult::Chart { content, data })
            }
            Some("table") => {
                let headers = parsed
                    .get("headers")?
                    .as_array()?
                    .iter()
                    .map(header_to_string)
                    .collect();
                let rows = parsed.get("rows")?.as_array()?.clone();
                Some(AnalysisResult::Table {
                    content,
                    headers,
                    rows,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_without_block() {
        let result = AnalysisResult::parse("Golden Apple has 7 units.");
        assert_eq!(
            result,
            AnalysisResult::PlainText {
                content: "Golden Apple has 7 units.".into()
            }
        );
    }

    #[test]
    fn test_chart_block_extracted() {
        let text = "Totals below.\n```json\n{\"type\":\"chart\",\"data\":[{\"MSKU\":\"Golden Apple\",\"total\":7}]}\n```\nDone.";
        match AnalysisResult::parse(text) {
            AnalysisResult::Chart { content, data } => {
                assert_eq!(content, "Totals below.\n\nDone.");
                assert_eq!(data.len(), 1);
                assert_eq!(data[0]["total"], 7);
            }
            other => panic!("expected chart, got {:?}", other),
        }
    }

    #[test]
    fn test_table_block_extracted() {
        let text = "```json {\"type\":\"table\",\"headers\":[\"MSKU\",\"Qty\"],\"rows\":[[\"Red Banana\",3]]} ``` Summary";
        match AnalysisResult::parse(text) {
            AnalysisResult::Table {
                content,
                headers,
                rows,
            } => {
                assert_eq!(content, "Summary");
                assert_eq!(headers, vec!["MSKU", "Qty"]);
                assert_eq!(rows.len(), 1);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json_falls_back_to_text() {
        let text = "Answer\n```json\n{\"type\":\"chart\", data: }\n```";
        assert_eq!(
            AnalysisResult::parse(text),
            AnalysisResult::PlainText {
                content: text.into()
            }
        );
    }

    #[test]
    fn test_unknown_shape_falls_back_to_text() {
        let text = "```json\n{\"type\":\"chart\",\"data\":{}}\n```";
        assert!(matches!(
            AnalysisResult::parse(text),
            AnalysisResult::PlainText { .. }
        ));
        let text = "```json\n[1,2,3]\n```";
        assert!(matches!(
            AnalysisResult::parse(text),
            AnalysisResult::PlainText { .. }
        ));
    }

    #[test]
    fn test_unclosed_fence_is_text() {
        let text = "```json {\"type\":\"chart\",\"data\":[]}";
        assert!(matches!(
            AnalysisResult::parse(text),
            AnalysisResult::PlainText { .. }
        ));
    }

    #[test]
    fn test_serialized_tag() {
        let json = serde_json::to_value(AnalysisResult::PlainText {
            content: "x".into(),
        })
        .unwrap();
        assert_eq!(json["type"], "text");
    }
}
