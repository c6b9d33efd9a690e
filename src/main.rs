use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use agentflow_config::OrchestratorConfig;
use agentflow_engine::{ChannelNotifier, WorkflowOrchestrator, WorkflowRunner};
use agentflow_workflow::TaskStatus;

mod render;

use render::ProgressRenderer;

/// Agentflow - run natural-language instructions through a tool-calling workflow
#[derive(Parser)]
#[command(name = "agentflow")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to a JSON config file (default: <config dir>/agentflow/config.json)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run a single instruction
  Run {
    /// The instruction, e.g. "帮我查一下北京未来三天的气温"
    text: String,

    /// Print the final task as JSON instead of the progress timeline
    #[arg(long)]
    json: bool,
  },

  /// Read instructions from stdin, one per line
  Console,

  /// List the registered tools
  Tools,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    )
    .with_writer(std::io::stderr)
    .init();

  let config = load_config(cli.config)?;

  match cli.command {
    Some(Commands::Run { text, json }) => run_instruction(config, text, json),
    Some(Commands::Console) => run_console(config),
    Some(Commands::Tools) => list_tools(config),
    None => {
      println!("agentflow - use --help to see available commands");
      Ok(())
    }
  }
}

/// Explicit path, else the user config file if present, else defaults.
fn load_config(path: Option<PathBuf>) -> Result<OrchestratorConfig> {
  let path = match path {
    Some(path) => path,
    None => match dirs::config_dir().map(|d| d.join("agentflow").join("config.json")) {
      Some(path) if path.exists() => path,
      _ => return Ok(OrchestratorConfig::default()),
    },
  };

  tracing::debug!(path = %path.display(), "loading config");
  OrchestratorConfig::load(&path)
    .with_context(|| format!("failed to load config: {}", path.display()))
}

fn run_instruction(config: OrchestratorConfig, text: String, json: bool) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { run_instruction_async(config, text, json).await })
}

async fn run_instruction_async(config: OrchestratorConfig, text: String, json: bool) -> Result<()> {
  let orchestrator = WorkflowOrchestrator::new(config);
  let (tx, mut rx) = mpsc::unbounded_channel();
  let notifier = ChannelNotifier::new(tx);

  // Ctrl-C cancels the run; the task still ends with a failed snapshot
  let cancel = CancellationToken::new();
  let ctrl_c = cancel.clone();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      ctrl_c.cancel();
    }
  });

  let printer = tokio::spawn(async move {
    let mut renderer = ProgressRenderer::new();
    while let Some(snapshot) = rx.recv().await {
      if !json {
        renderer.render(snapshot);
      }
    }
  });

  let result = orchestrator.run(&text, &notifier, cancel).await;
  drop(notifier);
  printer.await.context("progress printer panicked")?;

  let task = result.context("workflow run aborted")?;
  if json {
    println!("{}", serde_json::to_string_pretty(&task)?);
  }
  if task.status == TaskStatus::Failed {
    anyhow::bail!("task {} failed", task.task_id);
  }

  Ok(())
}

fn run_console(config: OrchestratorConfig) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { run_console_async(config).await })
}

async fn run_console_async(config: OrchestratorConfig) -> Result<()> {
  let orchestrator = Arc::new(WorkflowOrchestrator::new(config));
  let (tx, mut rx) = mpsc::unbounded_channel();
  let runner = WorkflowRunner::new(orchestrator, ChannelNotifier::new(tx));
  let sender = runner.sender();

  let cancel = CancellationToken::new();
  let runner_cancel = cancel.clone();
  let runner_handle = tokio::spawn(async move { runner.start(runner_cancel).await });

  let printer = tokio::spawn(async move {
    let mut renderer = ProgressRenderer::new();
    while let Some(snapshot) = rx.recv().await {
      renderer.render(snapshot);
    }
  });

  eprintln!("agentflow console - type an instruction, or 'exit' to quit");
  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  loop {
    tokio::select! {
      _ = tokio::signal::ctrl_c() => {
        cancel.cancel();
        break;
      }
      line = lines.next_line() => {
        let Some(line) = line.context("failed to read stdin")? else {
          break;
        };
        let text = line.trim();
        if text.is_empty() {
          continue;
        }
        if matches!(text, "exit" | "quit") {
          break;
        }
        sender
          .send(text.to_string())
          .await
          .context("workflow runner stopped")?;
      }
    }
  }

  // Let queued instructions finish unless cancelled
  drop(sender);
  runner_handle
    .await
    .context("workflow runner panicked")?
    .context("workflow runner failed")?;
  printer.await.context("progress printer panicked")?;

  Ok(())
}

fn list_tools(config: OrchestratorConfig) -> Result<()> {
  let orchestrator = WorkflowOrchestrator::new(config);
  for tool in orchestrator.registry().descriptors() {
    let optional = if tool.optional_params.is_empty() {
      String::new()
    } else {
      format!("; optional: {}", tool.optional_params.join(", "))
    };
    println!(
      "{:<8} {:<20} {} (requires: {}{})",
      tool.category.as_str(),
      tool.name,
      tool.description,
      tool.required_params.join(", "),
      optional
    );
  }
  Ok(())
}
