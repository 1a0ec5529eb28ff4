//! Preflight Check System
//!
//! Verifies the snapshot file and the LLM backend before the assistant
//! starts serving. Failures are reported, never fatal: the assistant still
//! runs with empty data or apology replies.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::actors::llm::preferred_model;
use crate::actors::traits::LlmActor;
use crate::config::AgentConfig;
use crate::store::DataStore;

/// Result of a single check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub details: Option<String>,
}

impl CheckResult {
    fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            details: None,
        }
    }

    fn fail(name: &str, message: &str, details: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            details,
        }
    }
}

/// Complete preflight check report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreflightReport {
    pub all_passed: bool,
    pub checks: Vec<CheckResult>,
    pub summary: String,
}

impl PreflightReport {
    /// Plain-text rendering for the terminal.
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = self
            .checks
            .iter()
            .map(|c| {
                let mark = if c.passed { "✅" } else { "❌" };
                match &c.details {
                    Some(details) => format!("{} {}: {} ({})", mark, c.name, c.message, details),
                    None => format!("{} {}: {}", mark, c.name, c.message),
                }
            })
            .collect();
        lines.push(String::new());
        lines.push(self.summary.clone());
        lines.join("\n")
    }
}

/// Performs all preflight checks and returns a report
pub async fn run_preflight_checks<L: LlmActor>(config: &AgentConfig, llm: &L) -> PreflightReport {
    info!("Running preflight checks");

    let mut checks = vec![check_snapshot(config)];
    checks.extend(check_llm(config, llm).await);

    let all_passed = checks.iter().all(|c| c.passed);
    let failed = checks.iter().filter(|c| !c.passed).count();
    let summary = if all_passed {
        "All checks passed. System ready.".to_string()
    } else {
        format!("{} check(s) failed. The assistant will run in degraded mode.", failed)
    };

    if !all_passed {
        warn!("{}", summary);
    }

    PreflightReport {
        all_passed,
        checks,
        summary,
    }
}

fn check_snapshot(config: &AgentConfig) -> CheckResult {
    let path = &config.data_file;
    match DataStore::try_load(path) {
        Ok(store) => {
            let stats = store.statistics();
            CheckResult::pass(
                "snapshot",
                &format!(
                    "{} members and {} jobs in {}",
                    stats.total_members,
                    stats.total_jobs,
                    path.display()
                ),
            )
        }
        Err(e) => CheckResult::fail(
            "snapshot",
            &format!("Cannot use {}", path.display()),
            Some(e.to_string()),
        ),
    }
}

async fn check_llm<L: LlmActor>(config: &AgentConfig, llm: &L) -> Vec<CheckResult> {
    let available = match llm.list_models().await {
        Ok(models) => models,
        Err(e) => {
            return vec![
                CheckResult::fail(
                    "ollama",
                    &format!("Ollama not reachable at {}", config.ollama_url),
                    Some(e.to_string()),
                ),
                CheckResult::fail("model", "Skipped - Ollama not reachable", None),
            ];
        }
    };

    let ollama = CheckResult::pass(
        "ollama",
        &format!(
            "{} model(s) installed, preferred: {}",
            available.len(),
            preferred_model(&available)
        ),
    );

    let wanted = config.default_model.provider_id();
    let model = if available.iter().any(|m| m == wanted) {
        CheckResult::pass("model", &format!("{} is installed", wanted))
    } else {
        CheckResult::fail(
            "model",
            &format!("{} is not installed", wanted),
            Some(format!("Run `ollama pull {}`", wanted)),
        )
    };

    vec![ollama, model]
}
