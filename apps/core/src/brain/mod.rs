//! # Brain Module
//!
//! Fast, non-LLM routing for the community assistant.
//! Decides what a user message asks for BEFORE anything calls the LLM.
//!
//! ## Components
//! - `intent`: Intent classification and residual query extraction using trigger phrases
//! - `prompt`: System and user prompts for messages that fall through to the LLM

pub mod intent;
pub mod prompt;

pub use intent::{Intent, IntentClassifier};
