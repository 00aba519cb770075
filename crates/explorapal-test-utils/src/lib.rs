// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Explorapal integration tests.
//!
//! Deterministic stand-ins for the remote provider, so pipeline behavior can
//! be exercised without network access.
//!
//! - [`ScriptedJobProvider`] - job gateway driven by a status script
//! - [`MockChatProvider`] - chat endpoint with queued replies

pub mod mock_chat;
pub mod scripted_jobs;

pub use mock_chat::{ChatStep, MockChatProvider};
pub use scripted_jobs::{ScriptedJobProvider, StatusStep};
