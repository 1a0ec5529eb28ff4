mod actors;
mod agent;
mod brain;
mod config;
mod error;
mod formatter;
mod gateway;
mod logging;
mod models;
mod preflight;
mod store;
mod website;

#[cfg(test)]
mod tests;

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::actors::llm::LlmActorHandle;
use crate::actors::traits::LlmActor;
use crate::agent::CommunityAgent;
use crate::config::{load_env_file, AgentConfig};
use crate::gateway::AppState;
use crate::logging::{init_tracing, LogFormat};
use crate::models::{ChatContext, LlmModel};
use crate::preflight::run_preflight_checks;

#[derive(Parser)]
#[command(name = "garje-core", version, about = "Garje Marathi community AI assistant")]
struct Cli {
    /// Model used for questions the assistant cannot answer from data
    #[arg(long, global = true)]
    model: Option<LlmModel>,
    /// JSON snapshot with `users` and `jobs`
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat in the terminal (default)
    Chat,
    /// Answer a single message and exit
    Ask {
        message: String,
    },
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Check the snapshot file and the Ollama backend
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `.env` may carry RUST_LOG and the log format, so it is read first.
    load_env_file(None);
    init_tracing("garje-core", LogFormat::from_env());

    let mut config = AgentConfig::from_env()?;
    if let Some(model) = cli.model {
        config.default_model = model;
    }
    if let Some(path) = cli.data_file {
        config.data_file = path;
    }

    let llm = Arc::new(LlmActorHandle::new(config.ollama()));

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Check => {
            let report = run_preflight_checks(&config, llm.as_ref()).await;
            println!("{}", report.render());
            if !report.all_passed {
                std::process::exit(1);
            }
        }
        Commands::Ask { message } => {
            let agent = CommunityAgent::bootstrap(&config, llm).await;
            let ctx = ChatContext::new(config.default_model);
            println!("{}", agent.handle_message(&message, &ctx).await);
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            let agent = CommunityAgent::bootstrap(&config, llm).await;
            let state = AppState {
                agent: Arc::new(agent),
                default_model: config.default_model,
            };
            gateway::serve(&config.bind_address(), state).await?;
        }
        Commands::Chat => {
            let agent = CommunityAgent::bootstrap(&config, llm).await;
            interactive_chat(&agent, config.default_model).await?;
        }
    }

    Ok(())
}

async fn interactive_chat<L: LlmActor>(
    agent: &CommunityAgent<L>,
    model: LlmModel,
) -> anyhow::Result<()> {
    let stats = agent.statistics();
    let rule = "=".repeat(60);
    println!("\n{}", rule);
    println!("🤖 Garje Marathi AI Assistant");
    println!("{}", rule);
    println!("Model: {}", model);
    println!("Community: {}", agent.community().name);
    println!("Members: {}", stats.total_members);
    println!("Jobs: {}", stats.total_jobs);
    println!("\n💡 Try asking:");
    println!("  - 'Find member [name]'");
    println!("  - 'Show jobs in [location]'");
    println!("  - 'How many members?'");
    println!("  - 'What is Garje Marathi?'\n");
    println!("Type 'exit' to quit\n");

    let ctx = ChatContext::new(model);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!("\n\n👋 Goodbye!");
                break;
            }
        };

        // EOF
        let Some(line) = line else {
            println!();
            break;
        };

        let input = line.trim();
        if input.eq_ignore_ascii_case("exit") {
            println!("\n👋 Thank you for using Garje Marathi AI Assistant!");
            break;
        }
        if input.is_empty() {
            continue;
        }

        let response = agent.handle_message(input, &ctx).await;
        println!("\nAssistant: {}\n", response);
    }

    info!("Interactive session ended");
    Ok(())
}
