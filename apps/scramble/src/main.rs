use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{GameClient, LocalGame, RemoteGame};
use game::WordBank;
use shared::{domain::RoundView, protocol::GameAction};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod input;
mod render;

use input::{parse_command, Command};
use render::{render, render_help};

/// Unscramble words from a category, in the terminal.
#[derive(Parser, Debug)]
struct Args {
    /// Play in a session on this game server instead of locally.
    #[arg(long)]
    server_url: Option<String>,
    /// Seed for reproducible local rounds.
    #[arg(long, conflicts_with = "server_url")]
    seed: Option<u64>,
    /// Skip the menu and start with this category.
    #[arg(long)]
    category: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout().lock();

    match args.server_url {
        Some(server_url) => {
            let mut client = RemoteGame::connect(&server_url)
                .await
                .with_context(|| format!("failed to start a session on {server_url}"))?;
            let outcome = play(&mut client, stdin, &mut stdout, args.category).await;
            if let Err(error) = client.close().await {
                warn!(%error, "failed to close remote session");
            }
            outcome
        }
        None => {
            let mut client = LocalGame::new(WordBank::builtin(), args.seed);
            play(&mut client, stdin, &mut stdout, args.category).await
        }
    }
}

/// Read state, render, read a line, dispatch, until the player quits or
/// input ends.
async fn play<C, R, W>(
    client: &mut C,
    input: R,
    out: &mut W,
    initial_category: Option<String>,
) -> Result<()>
where
    C: GameClient,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let categories = client
        .categories()
        .await
        .context("failed to load categories")?;
    let mut view = client.view().await.context("failed to load game state")?;
    if let Some(category) = initial_category {
        view = dispatch(client, GameAction::StartGame { category }, view, out).await?;
    }

    let mut lines = input.lines();
    loop {
        render(out, &view, &categories)?;
        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        writeln!(out)?;
        match parse_command(&line, &view, &categories) {
            Command::Quit => break,
            Command::Help => render_help(out)?,
            Command::Nothing => {}
            Command::Dispatch(action) => {
                view = dispatch(client, action, view, out).await?;
            }
        }
    }
    writeln!(out, "Bye! 👋")?;
    Ok(())
}

/// Unknown categories are reported and leave the screen as it was; any other
/// failure ends the game.
async fn dispatch<C: GameClient, W: Write>(
    client: &mut C,
    action: GameAction,
    current: RoundView,
    out: &mut W,
) -> Result<RoundView> {
    match client.dispatch(action).await {
        Ok(view) => Ok(view),
        Err(error) if error.is_unknown_category() => {
            writeln!(out, "⚠️  {error}")?;
            Ok(current)
        }
        Err(error) => Err(error).context("game action failed"),
    }
}
