// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider trait definitions.
//!
//! Both traits use `#[async_trait]` so orchestrators can hold them as
//! `Arc<dyn ...>` and tests can swap in scripted stubs.

pub mod chat;
pub mod job;

pub use chat::ChatProvider;
pub use job::JobProvider;
