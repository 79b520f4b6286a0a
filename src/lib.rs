//! parley - conversation analysis service
//!
//! Accepts an uploaded text or audio conversation, transcribes and diarizes
//! audio through a hosted speech backend, and asks an LLM for per-speaker
//! sentiment and psychological insights.

pub mod config;
pub mod error;
pub mod llm;
pub mod server;
pub mod transcription;

pub use error::{ParleyError, Result};
