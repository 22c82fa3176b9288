//! OpenAI-compatible feedback generator.
//!
//! Sends one chat-completions request per draft and returns the first choice.
//! Any endpoint speaking the OpenAI wire format works (OpenAI, Azure, local
//! gateways) by changing the base URL.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiFeedbackConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let generator = OpenAiFeedbackGenerator::new(config)?;
//! ```

use std::fmt::Write as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{FeedbackRequest, ReviewFeedbackGenerator};

/// Settings for [`OpenAiFeedbackGenerator`].
#[derive(Debug, Clone)]
pub struct OpenAiFeedbackConfig {
    api_key: SecretString,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Retries after timeouts, 429 and 5xx responses.
    pub max_retries: u32,
}

impl OpenAiFeedbackConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Call failure, split by whether another attempt may help.
#[derive(Debug)]
enum CallError {
    Retryable(String),
    Fatal(String),
}

impl CallError {
    fn into_domain(self) -> DomainError {
        let message = match self {
            CallError::Retryable(m) | CallError::Fatal(m) => m,
        };
        DomainError::new(ErrorCode::FeedbackGeneratorError, message)
    }
}

pub struct OpenAiFeedbackGenerator {
    config: OpenAiFeedbackConfig,
    client: Client,
}

impl OpenAiFeedbackGenerator {
    pub fn new(config: OpenAiFeedbackConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    async fn call(&self, body: &ChatRequest) -> Result<String, CallError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    CallError::Retryable(format!("request failed: {}", e))
                } else {
                    CallError::Fatal(e.to_string())
                }
            })?;

        let response = Self::check_status(response).await?;
        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| CallError::Fatal(format!("failed to parse response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| CallError::Fatal("empty completion".to_string()))
    }

    async fn check_status(response: Response) -> Result<Response, CallError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            429 | 500..=599 => Err(CallError::Retryable(format!("status {}: {}", status, body))),
            _ => Err(CallError::Fatal(format!("status {}: {}", status, body))),
        }
    }
}

#[async_trait]
impl ReviewFeedbackGenerator for OpenAiFeedbackGenerator {
    async fn generate(&self, request: &FeedbackRequest) -> Result<String, DomainError> {
        let body = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(request),
            }],
            temperature: Some(0.7),
        };

        let mut attempt = 0;
        loop {
            match self.call(&body).await {
                Ok(feedback) => return Ok(feedback),
                Err(CallError::Retryable(msg)) if attempt < self.config.max_retries => {
                    tracing::warn!(attempt, error = %msg, "feedback generation failed, retrying");
                    sleep(Duration::from_secs(1 << attempt)).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(error = ?err, "feedback generation failed");
                    return Err(err.into_domain());
                }
            }
        }
    }
}

/// Renders the Brazilian Portuguese instruction for a feedback paragraph.
pub fn build_prompt(request: &FeedbackRequest) -> String {
    let mut prompt = String::from(
        "Você é um especialista em Recursos Humanos, mestre em fornecer feedbacks construtivos e motivadores.\n\n\
         Um gestor finalizou uma avaliação de desempenho. Sua tarefa é sintetizar as notas e observações em um feedback bem estruturado para o colaborador.\n\n\
         A avaliação foi baseada nos seguintes itens, com notas de 1 (Muito a melhorar) a 10 (Excelente):\n",
    );
    for item in &request.items {
        let _ = writeln!(prompt, "- Critério: {} - Nota: {}/10", item.text, item.score);
    }
    if let Some(observations) = &request.manager_observations {
        let _ = write!(
            prompt,
            "\nO gestor também forneceu as seguintes observações (use-as como contexto, mas não as cite diretamente):\n\"{}\"\n",
            observations
        );
    }
    prompt.push_str(
        "\nCom base nessas informações, escreva um parágrafo de feedback para o colaborador. \
         O tom deve ser profissional, empático e focado no desenvolvimento. \
         Comece destacando os pontos fortes (notas altas), depois aborde as áreas de melhoria (notas baixas) com sugestões práticas e acionáveis. \
         Conclua com uma mensagem de encorajamento e foco no futuro. \
         O texto deve ser escrito em português do Brasil.",
    );
    prompt
}

impl std::fmt::Debug for OpenAiFeedbackGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiFeedbackGenerator")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

// ----- Wire types -----

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FeedbackItem;

    fn request(observations: Option<&str>) -> FeedbackRequest {
        FeedbackRequest {
            items: vec![
                FeedbackItem {
                    text: "Pontualidade".to_string(),
                    score: 9,
                },
                FeedbackItem {
                    text: "Comunicação".to_string(),
                    score: 4,
                },
            ],
            manager_observations: observations.map(str::to_string),
        }
    }

    #[test]
    fn prompt_lists_every_item_with_score() {
        let prompt = build_prompt(&request(None));
        assert!(prompt.contains("- Critério: Pontualidade - Nota: 9/10"));
        assert!(prompt.contains("- Critério: Comunicação - Nota: 4/10"));
        assert!(prompt.contains("português do Brasil"));
        assert!(!prompt.contains("observações (use-as"));
    }

    #[test]
    fn observations_are_included_as_context() {
        let prompt = build_prompt(&request(Some("Chegou atrasado duas vezes")));
        assert!(prompt.contains("não as cite diretamente"));
        assert!(prompt.contains("\"Chegou atrasado duas vezes\""));
    }

    #[test]
    fn config_builder_and_url() {
        let config = OpenAiFeedbackConfig::new("sk-test")
            .with_model("gpt-4o")
            .with_base_url("http://localhost:8080/v1/")
            .with_timeout(Duration::from_secs(5))
            .with_max_retries(0);
        let generator = OpenAiFeedbackGenerator::new(config).unwrap();
        assert_eq!(generator.completions_url(), "http://localhost:8080/v1/chat/completions");
        assert!(!format!("{:?}", generator).contains("sk-test"));
    }

    #[test]
    fn response_parsing_reads_first_choice() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":" Parabéns! "}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content.trim(), "Parabéns!");
    }
}
