//! Test narrative services.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use ironhold_core::error::DomainError;
use ironhold_core::narrative::{NarrativeContext, NarrativeReply, NarrativeService};

/// A narrative service that answers with scripted raw outputs, decoded the
/// same way a real backend's output is. Once the script runs out it keeps
/// returning `fallback`. Every context it receives is recorded.
#[derive(Debug)]
pub struct ScriptedNarrativeService {
    replies: Mutex<VecDeque<String>>,
    fallback: String,
    contexts: Mutex<Vec<NarrativeContext>>,
}

impl ScriptedNarrativeService {
    /// Create a service that returns `replies` in order.
    #[must_use]
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            fallback: "Nothing remarkable happens.".to_owned(),
            contexts: Mutex::new(Vec::new()),
        }
    }

    /// Create a service that always answers with `raw`.
    #[must_use]
    pub fn always(raw: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: raw.into(),
            contexts: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of every context received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn contexts(&self) -> Vec<NarrativeContext> {
        self.contexts.lock().unwrap().clone()
    }
}

#[async_trait]
impl NarrativeService for ScriptedNarrativeService {
    async fn generate(&self, context: &NarrativeContext) -> Result<NarrativeReply, DomainError> {
        self.contexts.lock().unwrap().push(context.clone());
        let raw = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        Ok(NarrativeReply::from_raw(&raw))
    }
}

/// A narrative service that always fails. Useful for testing fallback text.
#[derive(Debug)]
pub struct FailingNarrativeService;

#[async_trait]
impl NarrativeService for FailingNarrativeService {
    async fn generate(&self, _context: &NarrativeContext) -> Result<NarrativeReply, DomainError> {
        Err(DomainError::Narrative("connection refused".into()))
    }
}
