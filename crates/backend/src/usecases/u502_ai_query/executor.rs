use std::fmt;
use std::sync::Arc;

use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u502_ai_query::{
    enhance_question, AiQuery, AiQueryRequest, AiQueryResponse, AnalysisResult, DisplayMode,
};
use thiserror::Error;

use super::history::QueryHistoryStore;
use super::prompt::build_prompt;
use crate::shared::llm::{ChatMessage, LlmError, LlmProvider};

pub const MISSING_FIELDS_MESSAGE: &str = "Missing `question` or `csvText` in request body.";

#[derive(Debug, Error)]
pub enum AiQueryError {
    #[error("{0}")]
    Validation(String),

    #[error("LLM request failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("LLM returned an empty answer")]
    EmptyAnswer,
}

/// Этапы обработки запроса (для трассировки)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Idle,
    Validating,
    CallingLlm,
    Done,
    Failed,
}

impl fmt::Display for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryState::Idle => "idle",
            QueryState::Validating => "validating",
            QueryState::CallingLlm => "calling_llm",
            QueryState::Done => "done",
            QueryState::Failed => "failed",
        };
        f.write_str(name)
    }
}

fn transition(from: QueryState, to: QueryState) -> QueryState {
    tracing::debug!("{}: {} -> {}", AiQuery::full_name(), from, to);
    to
}

/// Непустое после trim значение
fn required(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Executor для UseCase вопроса к данным
#[derive(Clone)]
pub struct AiQueryExecutor {
    provider: Arc<dyn LlmProvider>,
    history: QueryHistoryStore,
}

impl AiQueryExecutor {
    pub fn new(provider: Arc<dyn LlmProvider>, history: QueryHistoryStore) -> Self {
        Self { provider, history }
    }

    pub fn history(&self) -> &QueryHistoryStore {
        &self.history
    }

    /// Один запрос к модели, без повторов
    pub async fn execute(&self, request: AiQueryRequest) -> Result<AiQueryResponse, AiQueryError> {
        let state = transition(QueryState::Idle, QueryState::Validating);

        let (Some(question), Some(csv_text)) = (
            required(request.question.as_deref()),
            required(request.csv_text.as_deref()),
        ) else {
            transition(state, QueryState::Failed);
            return Err(AiQueryError::Validation(MISSING_FIELDS_MESSAGE.into()));
        };

        if let Err(e) = self.history.record(question.trim()) {
            tracing::warn!("Failed to save query history: {}", e);
        }

        let advanced = request.display_mode == DisplayMode::Advanced;
        let question = if advanced {
            enhance_question(question)
        } else {
            question.to_string()
        };
        let messages = vec![ChatMessage::user(build_prompt(csv_text, &question))];

        let state = transition(state, QueryState::CallingLlm);
        tracing::info!(
            "{}: asking {} ({} bytes of CSV)",
            AiQuery::full_name(),
            self.provider.provider_name(),
            csv_text.len()
        );

        let response = match self.provider.chat_completion(messages).await {
            Ok(response) => response,
            Err(e) => {
                transition(state, QueryState::Failed);
                tracing::error!("{}: LLM call failed: {}", AiQuery::full_name(), e);
                return Err(e.into());
            }
        };

        let Some(answer) = response.content.filter(|c| !c.trim().is_empty()) else {
            transition(state, QueryState::Failed);
            tracing::error!(
                "{}: empty answer from {} (finish reason {:?})",
                AiQuery::full_name(),
                response.model,
                response.finish_reason
            );
            return Err(AiQueryError::EmptyAnswer);
        };

        transition(state, QueryState::Done);
        tracing::info!(
            "{}: answered by {} (tokens: {:?})",
            AiQuery::full_name(),
            response.model,
            response.tokens_used
        );

        let analysis = advanced.then(|| AnalysisResult::parse(&answer));
        Ok(AiQueryResponse { answer, analysis })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::llm::LlmResponse;
    use crate::shared::local_store::MemoryLocalStore;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedProvider {
        reply: Result<Option<String>, ()>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn answering(text: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.map(str::to_string)),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(()),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn chat_completion(
            &self,
            messages: Vec<ChatMessage>,
        ) -> Result<LlmResponse, LlmError> {
            self.prompts
                .lock()
                .unwrap()
                .extend(messages.into_iter().map(|m| m.content));
            match &self.reply {
                Ok(content) => Ok(LlmResponse {
                    content: content.clone(),
                    tokens_used: Some(10),
                    model: "scripted".into(),
                    finish_reason: None,
                }),
                Err(()) => Err(LlmError::NetworkError("connection refused".into())),
            }
        }

        fn provider_name(&self) -> &str {
            "Scripted"
        }
    }

    fn executor(provider: Arc<ScriptedProvider>) -> AiQueryExecutor {
        AiQueryExecutor::new(
            provider,
            QueryHistoryStore::new(Arc::new(MemoryLocalStore::new())),
        )
    }

    #[tokio::test]
    async fn test_missing_fields_do_not_call_llm() {
        let provider = ScriptedProvider::answering(Some("x"));
        let exec = executor(provider.clone());

        let mut request = AiQueryRequest::new("   ", "SKU\nGLD");
        assert!(matches!(
            exec.execute(request.clone()).await,
            Err(AiQueryError::Validation(_))
        ));
        request.question = Some("Total?".into());
        request.csv_text = None;
        assert!(matches!(
            exec.execute(request).await,
            Err(AiQueryError::Validation(_))
        ));
        assert!(provider.prompts.lock().unwrap().is_empty());
        assert!(exec.history().load().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_answer_and_history() {
        let provider = ScriptedProvider::answering(Some("Golden Apple: 7"));
        let exec = executor(provider.clone());

        let response = exec
            .execute(AiQueryRequest::new("Top MSKU?", "SKU,Quantity\nGLD,7"))
            .await
            .unwrap();
        assert_eq!(response.answer, "Golden Apple: 7");
        assert!(response.analysis.is_none());

        let prompts = provider.prompts.lock().unwrap();
        assert!(prompts[0].contains("SKU,Quantity\nGLD,7"));
        assert!(prompts[0].contains("QUESTION:\nTop MSKU?"));
        assert_eq!(exec.history().load().unwrap().entries()[0].question, "Top MSKU?");
    }

    #[tokio::test]
    async fn test_advanced_mode_parses_analysis() {
        let provider = ScriptedProvider::answering(Some(
            "Totals\n```json\n{\"type\":\"chart\",\"data\":[{\"Golden Apple\":7}]}\n```",
        ));
        let exec = executor(provider.clone());

        let mut request = AiQueryRequest::new("Totals?", "SKU,Quantity\nGLD,7");
        request.display_mode = DisplayMode::Advanced;
        let response = exec.execute(request).await.unwrap();

        assert!(matches!(
            response.analysis,
            Some(AnalysisResult::Chart { .. })
        ));
        assert!(provider.prompts.lock().unwrap()[0].contains("\"type\":\"table\""));
        // в историю попадает исходный вопрос
        assert_eq!(exec.history().load().unwrap().entries()[0].question, "Totals?");
    }

    #[tokio::test]
    async fn test_upstream_failures() {
        let exec = executor(ScriptedProvider::failing());
        assert!(matches!(
            exec.execute(AiQueryRequest::new("q", "csv")).await,
            Err(AiQueryError::Upstream(_))
        ));

        let exec = executor(ScriptedProvider::answering(None));
        assert!(matches!(
            exec.execute(AiQueryRequest::new("q", "csv")).await,
            Err(AiQueryError::EmptyAnswer)
        ));
    }
}
