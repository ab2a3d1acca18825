//! Mock chat backend for deterministic testing.
//!
//! Returns a canned answer (optionally with citations), can be switched
//! into a failing mode, and records every request it receives so tests can
//! assert on the history framing handed to the collaborator.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use reelroom_core::{
    ChatBackend, ChatTurnRequest, ChatTurnResponse, CitedSegment, Error, Result,
};

#[derive(Clone)]
pub struct MockChatBackend {
    answer: String,
    citations: Vec<CitedSegment>,
    fail: bool,
    calls: Arc<Mutex<Vec<ChatTurnRequest>>>,
}

impl Default for MockChatBackend {
    fn default() -> Self {
        Self {
            answer: "Mock answer".to_string(),
            citations: Vec::new(),
            fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockChatBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canned answer text.
    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = answer.into();
        self
    }

    /// Append a cited video segment to every response.
    pub fn with_citation(mut self, video_id: impl Into<String>, start: i64, end: i64) -> Self {
        self.citations.push(CitedSegment {
            video_id: video_id.into(),
            start,
            end,
        });
        self
    }

    /// Make every call fail, for exercising the generation failure path.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Requests received so far, in call order.
    pub fn calls(&self) -> Vec<ChatTurnRequest> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    async fn answer(&self, request: ChatTurnRequest) -> Result<ChatTurnResponse> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push(request);
        if self.fail {
            return Err(Error::Inference("mock backend failure".to_string()));
        }
        Ok(ChatTurnResponse {
            answer: self.answer.clone(),
            citations: self.citations.clone(),
        })
    }
}
