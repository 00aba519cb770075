// SPDX-FileCopyrightText: 2026 Explorapal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Asynchronous media generation for Explorapal.
//!
//! [`MediaGenerator`] validates a [`GenerationRequest`](explorapal_core::GenerationRequest),
//! submits it to the job gateway, polls until the job settles, downloads
//! the artifact and normalizes it. Any failure after validation produces a
//! deterministic placeholder flagged as degraded.

pub mod client;
pub mod fallback;
pub mod generator;
pub mod normalize;
pub mod poller;
pub mod request;
pub mod types;

pub use client::{AsyncJobClient, Timeouts};
pub use generator::MediaGenerator;
pub use poller::{CompletedJob, Poller};
pub use request::{ValidatedRequest, validate};
