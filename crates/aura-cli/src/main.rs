mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("AURA_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        output::output_error(&err.to_string());
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "aura", &mut std::io::stdout());
            Ok(())
        }
        Commands::Mapping(args) => handlers::import::handle_mapping(args).await,
        cmd => {
            let mut ctx = CliContext::load(&cli.session).await?;
            match cmd {
                Commands::Import(args) => handlers::import::handle_import(&mut ctx, args).await,
                Commands::Board { summary } => handlers::board::handle_board(&ctx, summary),
                Commands::Move { lead, status } => {
                    handlers::board::handle_move(&mut ctx, &lead, status)
                }
                Commands::Leads(leads_cmd) => {
                    handlers::lead::handle(&mut ctx, leads_cmd.action, cli.session.yes)
                }
                Commands::Lists(lists_cmd) => handlers::list::handle(&mut ctx, lists_cmd.action),
                Commands::Export(args) => handlers::export::handle_export(&ctx, args),
                Commands::Tasks(tasks_cmd) => handlers::task::handle(&mut ctx, tasks_cmd.action),
                Commands::Reconcile => handlers::lead::handle_reconcile(&mut ctx),
                Commands::Completions { .. } | Commands::Mapping(_) => Ok(()),
            }
        }
    }
}
