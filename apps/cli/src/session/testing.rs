//! Scripted `Gateway` double for session tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Map;
use tokio::sync::oneshot;

use crate::client::Gateway;
use crate::errors::SessionError;
use crate::models::{FontList, FontName, GenerationRequest, GenerationResult};

type Outcome = Result<GenerationResult, SessionError>;

enum Reply {
    Now(Outcome),
    Later(oneshot::Receiver<Outcome>),
}

impl Reply {
    async fn resolve(self) -> Outcome {
        match self {
            Reply::Now(outcome) => outcome,
            Reply::Later(rx) => rx
                .await
                .unwrap_or_else(|_| Err(SessionError::BackendUnavailable("dropped".into()))),
        }
    }
}

#[derive(Default)]
pub(crate) struct ScriptedGateway {
    fonts: Mutex<VecDeque<Result<FontList, SessionError>>>,
    generate: Mutex<VecDeque<Reply>>,
    random: Mutex<VecDeque<Reply>>,
    generate_calls: Mutex<Vec<GenerationRequest>>,
    random_calls: Mutex<usize>,
    font_calls: Mutex<usize>,
}

pub(crate) fn art(text: &str, font: &str) -> GenerationResult {
    GenerationResult {
        ascii_art: format!("[{font}] {text}"),
        font_used: FontName::from(font),
        metadata: Map::new(),
    }
}

pub(crate) fn unavailable() -> SessionError {
    SessionError::BackendUnavailable("gateway responded with 500".to_string())
}

pub(crate) fn fonts(names: &[&str]) -> FontList {
    FontList::new(names.iter().copied().map(FontName::from).collect())
}

impl ScriptedGateway {
    pub fn push_fonts(&self, outcome: Result<FontList, SessionError>) {
        self.fonts.lock().unwrap().push_back(outcome);
    }

    pub fn push_generate(&self, outcome: Outcome) {
        self.generate.lock().unwrap().push_back(Reply::Now(outcome));
    }

    /// Queues a generate reply that resolves only when the returned sender fires.
    pub fn defer_generate(&self) -> oneshot::Sender<Outcome> {
        let (tx, rx) = oneshot::channel();
        self.generate.lock().unwrap().push_back(Reply::Later(rx));
        tx
    }

    pub fn push_random(&self, outcome: Outcome) {
        self.random.lock().unwrap().push_back(Reply::Now(outcome));
    }

    pub fn generate_calls(&self) -> Vec<GenerationRequest> {
        self.generate_calls.lock().unwrap().clone()
    }

    pub fn random_calls(&self) -> usize {
        *self.random_calls.lock().unwrap()
    }

    pub fn font_calls(&self) -> usize {
        *self.font_calls.lock().unwrap()
    }

    pub async fn wait_for_generate_calls(&self, n: usize) {
        while self.generate_calls.lock().unwrap().len() < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    async fn list_fonts(&self) -> Result<FontList, SessionError> {
        *self.font_calls.lock().unwrap() += 1;
        let next = self.fonts.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(unavailable()))
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, SessionError> {
        self.generate_calls.lock().unwrap().push(request.clone());
        let next = self.generate.lock().unwrap().pop_front();
        match next {
            Some(reply) => reply.resolve().await,
            None => Err(unavailable()),
        }
    }

    async fn random(&self) -> Result<GenerationResult, SessionError> {
        *self.random_calls.lock().unwrap() += 1;
        let next = self.random.lock().unwrap().pop_front();
        match next {
            Some(reply) => reply.resolve().await,
            None => Err(unavailable()),
        }
    }
}
