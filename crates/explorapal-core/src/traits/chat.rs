// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synchronous chat completion provider trait.

use async_trait::async_trait;

use crate::error::ExploraError;
use crate::types::ChatRequest;

/// A single request/response completion endpoint.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Sends `request` and returns the text of the first choice.
    ///
    /// An empty choice list is an error, so callers can treat `Ok` as
    /// "the model said something".
    async fn complete(&self, request: ChatRequest) -> Result<String, ExploraError>;
}
