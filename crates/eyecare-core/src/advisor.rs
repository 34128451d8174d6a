//! Eye-health advice client -- a single request/response wrapper around the
//! Gemini `generateContent` endpoint.
//!
//! The call is fire-and-forget relative to sessions: it never touches
//! player state, and a slow or failed call surfaces as a canned fallback
//! string rather than an error. The API key comes from the OS keyring
//! (set once via `store_api_key`) with an environment-variable override.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::AdvisorError;
use crate::storage::AdvisorConfig;

/// Returned verbatim whenever the advice call fails for any reason.
pub const FALLBACK_MESSAGE: &str =
    "Sorry, the advice service is unavailable right now. Please try again later.";

/// Fixed system prompt: domain-constrained health-information assistant.
const SYSTEM_PROMPT: &str = "You are the in-app advisor of an eye-care application. \
Answer questions about eye health, vision protection, dry eyes, and eye strain \
kindly, based on medically reliable information. You cannot replace a doctor: \
for serious symptoms, always recommend visiting an ophthalmologist. \
Keep answers concise and easy to understand.";

const API_KEY_ENV: &str = "EYECARE_GEMINI_API_KEY";
const API_KEY_KEYRING: &str = "gemini_api_key";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    const SERVICE: &str = "eyecare";

    pub fn get(key: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    pub fn delete(key: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One chat transcript entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Model, text)
    }

    fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Gemini advice client.
pub struct Advisor {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f64,
}

impl Advisor {
    /// Build a client from config, resolving the API key from the
    /// `EYECARE_GEMINI_API_KEY` environment variable or the OS keyring.
    pub fn new(config: &AdvisorConfig) -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| keyring_store::get(API_KEY_KEYRING).ok().flatten());
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    /// Override the endpoint base URL (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the API key without touching the keyring.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Persist a user-provided API key to the OS keyring and update
    /// in-memory state.
    pub fn store_api_key(&mut self, key: &str) -> Result<(), Box<dyn std::error::Error>> {
        keyring_store::set(API_KEY_KEYRING, key)?;
        self.api_key = Some(key.to_string());
        Ok(())
    }

    /// Remove the stored API key.
    pub fn clear_api_key(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        keyring_store::delete(API_KEY_KEYRING)?;
        self.api_key = None;
        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Ask for advice. Never fails outward: any error yields
    /// [`FALLBACK_MESSAGE`].
    pub async fn ask(&self, query: &str) -> String {
        match self.generate(query).await {
            Ok(text) => text,
            Err(_) => FALLBACK_MESSAGE.to_string(),
        }
    }

    async fn generate(&self, query: &str) -> Result<String, AdvisorError> {
        let key = self.api_key.as_deref().ok_or(AdvisorError::MissingApiKey)?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = json!({
            "system_instruction": { "parts": [{ "text": SYSTEM_PROMPT }] },
            "contents": [{ "role": "user", "parts": [{ "text": query }] }],
            "generationConfig": { "temperature": self.temperature },
        });

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AdvisorError::Api {
                status: status.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }

        let value: serde_json::Value = resp.json().await?;
        value["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(AdvisorError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advisor(base_url: &str) -> Advisor {
        Advisor::new(&AdvisorConfig::default())
            .with_base_url(base_url)
            .with_api_key("test-key")
    }

    #[tokio::test]
    async fn returns_generated_text() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"Blink more often."}]}}]}"#,
            )
            .create_async()
            .await;

        let reply = advisor(&server.url()).ask("My eyes feel dry").await;
        assert_eq!(reply, "Blink more often.");
    }

    #[tokio::test]
    async fn http_error_yields_fallback() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let reply = advisor(&server.url()).ask("hello").await;
        assert_eq!(reply, FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn empty_candidates_yield_fallback() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let reply = advisor(&server.url()).ask("hello").await;
        assert_eq!(reply, FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn missing_api_key_yields_fallback_without_network() {
        let advisor = Advisor {
            client: reqwest::Client::new(),
            base_url: "http://127.0.0.1:1".into(),
            api_key: None,
            model: "gemini-2.5-flash".into(),
            temperature: 0.7,
        };
        assert_eq!(advisor.ask("hello").await, FALLBACK_MESSAGE);
    }

    #[test]
    fn chat_messages_carry_identity() {
        let a = ChatMessage::user("q");
        let b = ChatMessage::model("a");
        assert_ne!(a.id, b.id);
        assert_eq!(a.role, ChatRole::User);
        assert_eq!(b.role, ChatRole::Model);
    }
}
