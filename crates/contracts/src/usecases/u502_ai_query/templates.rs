/// Подсказки для вопросов на странице AI-запросов
pub const QUERY_TEMPLATES: &[&str] = &[
    "What is the total quantity of each MSKU?",
    "Which MSKU has the highest quantity?",
    "Show the average quantity per MSKU",
    "Calculate the percentage distribution of MSKUs",
    "Identify any MSKUs with fewer than 10 items",
    "Compare quantities between Golden Apple and Red Banana",
    "Summarize the inventory distribution",
];

const VISUALIZATION_INSTRUCTION: &str = "If possible, provide your answer with visualization data in JSON format. \
For charts, use format: {\"type\":\"chart\",\"data\":[{key:value}]}. \
For tables, use format: {\"type\":\"table\",\"headers\":[...],\"rows\":[[...]]}";

/// Вопрос для расширенного режима: просим модель приложить JSON-блок
pub fn enhance_question(question: &str) -> String {
    format!("{} {}", question, VISUALIZATION_INSTRUCTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhance_question_keeps_original_first() {
        let q = enhance_question("Top MSKU?");
        assert!(q.starts_with("Top MSKU? "));
        assert!(q.contains("\"type\":\"table\""));
    }
}
