/// Промпт с CSV и вопросом целиком. Данные не сокращаются: лимит
/// задаёт только размер тела запроса
pub fn build_prompt(csv_text: &str, question: &str) -> String {
    format!(
        "\nYou are a warehouse analytics assistant. You have access to the following CSV data \
(headers on first line, comma-separated). Use this data to answer the user\u{2019}s question. \
Do not hallucinate\u{2014}base your answer strictly on the data below.\n\
\n\
CSV DATA:\n\
{}\n\
\n\
QUESTION:\n\
{}\n",
        csv_text, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_data_and_question() {
        let prompt = build_prompt("SKU,Quantity\nGLD,5", "Total?");
        assert!(prompt.contains("warehouse analytics assistant"));
        assert!(prompt.contains("CSV DATA:\nSKU,Quantity\nGLD,5\n"));
        assert!(prompt.ends_with("QUESTION:\nTotal?\n"));
    }
}
