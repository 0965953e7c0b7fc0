use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use pipepilot_cli::build::build_corpus;
use pipepilot_cli::server::{serve, AppState};
use pipepilot_core::config::{resolve_with_base, Config};
use pipepilot_route::resolve;

#[derive(Parser, Debug)]
#[command(name = "pipepilot", version, about = "Grounded Q&A and service routing for a plumbing company")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Answer one question against the corpus
    Ask { question: String },
    /// Classify one customer message
    Route {
        text: String,
        /// Prior conversation as a JSON array of {role, content}
        #[arg(long)]
        history: Option<String>,
    },
    /// Normalize raw text to a taxonomy category without calling a model
    Normalize { raw: String },
    /// Embed a directory of .txt files into a corpus snapshot
    BuildCorpus {
        dir: PathBuf,
        #[arg(long)]
        out: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    pipepilot_cli::init_tracing(cli.verbose);
    let config = Config::load()?;
    let settings = config.settings()?;

    match cli.command {
        Command::Serve { host, port } => {
            let state = Arc::new(AppState::from_settings(&settings)?);
            let host = host.unwrap_or_else(|| settings.server.host.clone());
            serve(state, &host, port.unwrap_or(settings.server.port)).await?;
        }
        Command::Ask { question } => {
            let state = AppState::from_settings(&settings)?;
            let answer = state.rag.answer_question(&question).await?;
            println!("{}\n", answer.answer);
            for (i, source) in answer.sources.iter().enumerate() {
                println!("  [{}] {}  score={:.4}", i + 1, source.id, source.score);
            }
        }
        Command::Route { text, history } => {
            let history: serde_json::Value = match history {
                Some(raw) => serde_json::from_str(&raw)?,
                None => serde_json::json!([]),
            };
            let state = AppState::from_settings(&settings)?;
            let result = state.classifier.classify(&text, &history).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Normalize { raw } => {
            let resolution = resolve(&raw);
            println!("{}  ({:?})", resolution.category, resolution.stage);
        }
        Command::BuildCorpus { dir, out } => {
            let out = out.unwrap_or_else(|| settings.data.corpus_path.clone());
            let out = resolve_with_base(&std::env::current_dir()?, out);
            let embedder = pipepilot_llm::default_embedder(&settings.openai)?;
            let written = build_corpus(&dir, &out, embedder.as_ref()).await?;
            println!("Wrote {written} documents to {}", out.display());
        }
    }
    Ok(())
}
