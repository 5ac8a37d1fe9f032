//! Session state behind the front-end: the model library, the current
//! selection and the chat log.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use crate::assistant::{Assistant, LanguageModel, ModelUpdate};
use crate::error::StudioError;
use crate::model::ShapeModel;
use crate::params::{ParamValue, ParameterMap};

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Neon GenAI Sculptor. Select a model or describe a new one to begin!";

/// Chat log length; the oldest messages go first.
pub const MAX_HISTORY: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

struct State {
    library: Vec<Arc<ShapeModel>>,
    selected: Arc<ShapeModel>,
    history: Vec<ChatMessage>,
}

impl State {
    /// Replace the entry with the same name, or append.
    fn store(&mut self, model: Arc<ShapeModel>) {
        match self.library.iter_mut().find(|m| m.name == model.name) {
            Some(slot) => *slot = model,
            None => self.library.push(model),
        }
    }

    fn log(&mut self, message: ChatMessage) {
        self.history.push(message);
        let excess = self.history.len().saturating_sub(MAX_HISTORY);
        self.history.drain(..excess);
    }
}

/// Clears the in-flight flag when the submission ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, StudioError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlight(flag))
            .map_err(|_| StudioError::Busy)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Studio<M> {
    assistant: Assistant<M>,
    state: RwLock<State>,
    in_flight: AtomicBool,
}

impl<M: LanguageModel> Studio<M> {
    /// Starts on the first library entry; an empty library gets a plain sphere.
    pub fn new(assistant: Assistant<M>, library: Vec<ShapeModel>) -> Self {
        let library: Vec<Arc<ShapeModel>> = library.into_iter().map(Arc::new).collect();
        let selected = library.first().cloned().unwrap_or_else(|| {
            Arc::new(ShapeModel::new("Sphere", "sphere", ParameterMap::new(), ""))
        });
        Self {
            assistant,
            state: RwLock::new(State {
                library,
                selected,
                history: vec![ChatMessage::new(Role::Model, WELCOME_MESSAGE)],
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn library(&self) -> Vec<Arc<ShapeModel>> {
        self.state.read().await.library.clone()
    }

    pub async fn selected(&self) -> Arc<ShapeModel> {
        self.state.read().await.selected.clone()
    }

    pub async fn history(&self) -> Vec<ChatMessage> {
        self.state.read().await.history.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn select(&self, name: &str) -> Result<Arc<ShapeModel>, StudioError> {
        let mut state = self.state.write().await;
        let model = state
            .library
            .iter()
            .find(|m| m.name == name)
            .cloned()
            .ok_or_else(|| StudioError::UnknownModel(name.to_string()))?;
        state.selected = model.clone();
        Ok(model)
    }

    /// Slider edit: the selection becomes a copy with one key replaced.
    /// Library entries keep their stored values.
    pub async fn set_param(&self, key: &str, value: ParamValue) -> Arc<ShapeModel> {
        let mut state = self.state.write().await;
        let next = Arc::new(state.selected.with_param(key, value));
        state.selected = next.clone();
        next
    }

    /// Send a chat instruction to the assistant and adopt its model.
    ///
    /// Only one submission runs at a time; a second one gets
    /// [`StudioError::Busy`]. The state lock is not held while waiting, so
    /// readers keep seeing the current selection. When the assistant falls
    /// back, library and selection stay as they were.
    pub async fn submit(&self, prompt: &str) -> Result<ModelUpdate, StudioError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(StudioError::EmptyPrompt);
        }
        let _guard = InFlight::acquire(&self.in_flight)?;

        let (current, names) = {
            let mut state = self.state.write().await;
            state.log(ChatMessage::new(Role::User, prompt));
            let names: Vec<String> = state.library.iter().map(|m| m.name.clone()).collect();
            (state.selected.clone(), names)
        };

        let update = self.assistant.update(&current, prompt, &names).await;

        let mut state = self.state.write().await;
        if !update.fell_back {
            info!(name = %update.model.name, kind = %update.model.kind, "adopting model");
            let model = Arc::new(update.model.clone());
            state.store(model.clone());
            state.selected = model;
        }
        state.log(ChatMessage::new(Role::Model, update.message.clone()));
        Ok(update)
    }
}
