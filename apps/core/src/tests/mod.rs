//! Test Module
//!
//! End-to-end tests for the community assistant.
//!
//! ## Test Categories
//! - `agent_tests`: message routing, store-backed replies and LLM fallback
//! - `gateway_tests`: HTTP endpoints and error bodies

pub mod gateway_tests;
