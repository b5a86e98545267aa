//! Chat-completion client for short book summaries.
//!
//! This crate provides:
//! - `SummaryConfig`: endpoint, credentials and sampling parameters
//! - `SummaryClient`: sends one chat-completion request per book and
//!   memoizes the result per (title, author)
//! - `build_prompt`: the user prompt sent for a book
//!
//! Failures never abort a recommendation: the client returns a fallback
//! `Summary` carrying the error text instead.

pub mod client;
pub mod config;
pub mod prompt;

use thiserror::Error;

pub use client::{Summary, SummaryClient, FALLBACK_SUMMARY};
pub use config::{SummaryConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use prompt::{build_prompt, SYSTEM_PROMPT};

/// Errors that can occur when requesting a summary
#[derive(Error, Debug)]
pub enum LlmClientError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from API: {0}")]
    InvalidResponse(String),

    #[error("API returned an empty summary")]
    EmptyContent,
}

pub type Result<T> = std::result::Result<T, LlmClientError>;
