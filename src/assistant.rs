//! Model update service: turns a chat instruction into a replacement
//! [`ShapeModel`] by asking a hosted language model.
//!
//! The service is fail-soft. Whatever goes wrong (no key, network, status,
//! timeout, unparseable reply) the caller gets the current model back with
//! [`FALLBACK_MESSAGE`], and the cause is only logged.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::dispatch::ShapeKind;
use crate::error::AssistantError;
use crate::model::ShapeModel;

pub const FALLBACK_MESSAGE: &str =
    "Unable to connect to the AI service. Please check your API Key configuration.";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// What gets sent to the language model for one turn.
#[derive(Clone, Debug, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub contents: String,
}

/// Transport to a hosted model. Returns the raw JSON text of the reply.
pub trait LanguageModel: Send + Sync {
    fn complete(
        &self,
        prompt: &Prompt,
    ) -> impl Future<Output = Result<String, AssistantError>> + Send;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelUpdate {
    pub model: ShapeModel,
    pub message: String,
    /// Set when `model` is the unchanged input because the call failed.
    #[serde(skip)]
    pub fell_back: bool,
}

impl ModelUpdate {
    pub fn fallback(current: &ShapeModel) -> Self {
        Self {
            model: current.clone(),
            message: FALLBACK_MESSAGE.to_string(),
            fell_back: true,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Reply {
    response_message: String,
    model_config: ShapeModel,
}

pub struct Assistant<M> {
    model: M,
    timeout: Duration,
}

impl<M: LanguageModel> Assistant<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Never fails; see the module docs.
    pub async fn update(
        &self,
        current: &ShapeModel,
        instruction: &str,
        library: &[String],
    ) -> ModelUpdate {
        match self.try_update(current, instruction, library).await {
            Ok(update) => update,
            Err(err) => {
                warn!(error = %err, model = %current.name, "model update failed");
                ModelUpdate::fallback(current)
            }
        }
    }

    async fn try_update(
        &self,
        current: &ShapeModel,
        instruction: &str,
        library: &[String],
    ) -> Result<ModelUpdate, AssistantError> {
        let prompt = build_prompt(current, instruction, library)?;
        let raw = tokio::time::timeout(self.timeout, self.model.complete(&prompt))
            .await
            .map_err(|_| AssistantError::Timeout(self.timeout.as_secs()))??;
        debug!(bytes = raw.len(), "model reply received");
        parse_reply(&raw)
    }
}

fn parse_reply(raw: &str) -> Result<ModelUpdate, AssistantError> {
    let reply: Reply = serde_json::from_str(raw)?;
    if !reply.model_config.is_well_formed() {
        return Err(AssistantError::IncompleteModel);
    }
    if let Some((key, value)) = reply.model_config.params.oversized_sample() {
        return Err(AssistantError::Oversized { key, value });
    }
    Ok(ModelUpdate {
        model: reply.model_config,
        message: reply.response_message,
        fell_back: false,
    })
}

pub fn build_prompt(
    current: &ShapeModel,
    instruction: &str,
    library: &[String],
) -> Result<Prompt, AssistantError> {
    let context = serde_json::to_string(current)?;
    Ok(Prompt {
        system: system_instruction(),
        contents: format!(
            "Current Model Context: {context}\nAvailable Models in Library: {}\nUser Request: {instruction}",
            library.join(", ")
        ),
    })
}

fn system_instruction() -> String {
    let mut shapes = String::new();
    for kind in ShapeKind::KNOWN {
        shapes.push_str(&format!(
            "- {} (params: {})\n",
            kind.tag(),
            kind.param_keys().join(", ")
        ));
    }
    format!(
        "You are a 3D generative artist assistant. Interpret the user's request and \
         produce a JSON configuration for a 3D visualization engine.\n\n\
         Available shape types:\n{shapes}\n\
         Colors are hex codes.\n\
         If the user asks for a shape not in the list, approximate it with one of the \
         available types. If the user wants to modify the current model, update its \
         parameters. If the user wants a new concept, create a new model definition.\n\n\
         Return a JSON object with 'responseMessage', a short creative confirmation, \
         and 'modelConfig', an object with 'name', 'type', 'params' and a simple SVG \
         'thumbnail' string."
    )
}

/// Every parameter key any shape reads, with its schema type.
fn param_properties() -> Map<String, Value> {
    let mut props = Map::new();
    for kind in ShapeKind::KNOWN {
        for key in kind.param_keys() {
            let ty = match *key {
                "color" | "text" => "STRING",
                _ => "NUMBER",
            };
            props.insert(key.to_string(), json!({ "type": ty }));
        }
    }
    props
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "responseMessage": { "type": "STRING" },
            "modelConfig": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING" },
                    "type": { "type": "STRING" },
                    "params": { "type": "OBJECT", "properties": param_properties() },
                    "thumbnail": { "type": "STRING" },
                },
                "required": ["name", "type", "params", "thumbnail"],
            },
        },
        "required": ["responseMessage", "modelConfig"],
    })
}

/// Gemini `generateContent` over HTTPS.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            base_url: GEMINI_ENDPOINT.to_string(),
        }
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn request_body(prompt: &Prompt) -> Value {
        json!({
            "systemInstruction": { "parts": [{ "text": prompt.system }] },
            "contents": [{ "role": "user", "parts": [{ "text": prompt.contents }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            },
        })
    }
}

impl LanguageModel for GeminiClient {
    async fn complete(&self, prompt: &Prompt) -> Result<String, AssistantError> {
        let key = self.api_key.as_deref().ok_or(AssistantError::MissingApiKey)?;
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", key)
            .json(&Self::request_body(prompt))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::Status(status.as_u16()));
        }
        let body: Value = response.json().await?;
        body.pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
            .ok_or(AssistantError::EmptyReply)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Answers every call the same way and records the prompts it saw.
    pub enum Script {
        Reply(String),
        Fail,
        Hang,
    }

    pub struct ScriptedModel {
        pub script: Script,
        pub seen: Mutex<Vec<Prompt>>,
    }

    impl ScriptedModel {
        pub fn new(script: Script) -> Self {
            Self {
                script,
                seen: Mutex::new(Vec::new()),
            }
        }

        pub fn replying(model: &ShapeModel, message: &str) -> Self {
            let raw = json!({ "responseMessage": message, "modelConfig": model }).to_string();
            Self::new(Script::Reply(raw))
        }
    }

    impl LanguageModel for ScriptedModel {
        async fn complete(&self, prompt: &Prompt) -> Result<String, AssistantError> {
            self.seen.lock().unwrap().push(prompt.clone());
            match &self.script {
                Script::Reply(raw) => Ok(raw.clone()),
                Script::Fail => Err(AssistantError::Status(503)),
                Script::Hang => std::future::pending::<Result<String, AssistantError>>().await,
            }
        }
    }
}
