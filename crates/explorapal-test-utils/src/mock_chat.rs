// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat endpoint stub with queued replies.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use explorapal_core::{ChatProvider, ChatRequest, ExploraError};

/// One queued answer.
#[derive(Debug, Clone)]
pub enum ChatStep {
    Reply(String),
    Fail,
}

/// A [`ChatProvider`] that pops replies from a FIFO queue.
///
/// When the queue is empty a plain `"mock response"` is returned, which is
/// not JSON and so exercises every decoder's prose path.
#[derive(Default)]
pub struct MockChatProvider {
    steps: Arc<Mutex<VecDeque<ChatStep>>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockChatProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_steps(replies.into_iter().map(|r| ChatStep::Reply(r.into())))
    }

    pub fn with_steps(steps: impl IntoIterator<Item = ChatStep>) -> Self {
        Self {
            steps: Arc::new(Mutex::new(steps.into_iter().collect())),
            requests: Arc::default(),
        }
    }

    /// A provider whose every call fails with a transport error.
    pub fn failing() -> Self {
        Self::with_steps(std::iter::repeat_n(ChatStep::Fail, 64))
    }

    /// Requests received so far, in order.
    pub async fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn complete(&self, request: ChatRequest) -> Result<String, ExploraError> {
        self.requests.lock().await.push(request);
        match self.steps.lock().await.pop_front() {
            Some(ChatStep::Reply(text)) => Ok(text),
            Some(ChatStep::Fail) => Err(ExploraError::Transport {
                message: "mock chat failure".into(),
                source: None,
            }),
            None => Ok("mock response".into()),
        }
    }
}
