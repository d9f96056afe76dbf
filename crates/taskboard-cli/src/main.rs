mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("TASKBOARD_DEBUG_LOG") {
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

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "taskboard", &mut std::io::stdout());
        return Ok(());
    }

    if let Err(e) = run(cli).await {
        tracing::debug!("Command failed: {:#}", e);
        output::output_error(&format!("{:#}", e));
    }

    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut ctx = CliContext::open(&cli).await?;

    match cli.command {
        Commands::List(list_cmd) => handlers::list::handle(&mut ctx, list_cmd.action).await,
        Commands::Card(card_cmd) => handlers::card::handle(&mut ctx, card_cmd.action).await,
        Commands::Drag { event } => handlers::drag::handle(&mut ctx, &event).await,
        Commands::Checklist(cmd) => handlers::details::handle_checklist(&mut ctx, cmd.action).await,
        Commands::Comment(cmd) => handlers::details::handle_comment(&mut ctx, cmd.action).await,
        Commands::Assign { card_id, user_id } => {
            handlers::details::handle_assign(&mut ctx, card_id, &user_id).await
        }
        Commands::Attach(args) => handlers::details::handle_attach(&mut ctx, args).await,
        Commands::Completions { .. } => Ok(()),
    }
}
