//! Terminal adapter that animates a lawn being mowed.

mod cli;

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{select, Receiver};
use mowsim::prelude::*;
use tracing_subscriber::EnvFilter;

use cli::{CliArgs, Command, UnknownCommand, HEADLESS_ENV};

const FINISH_POLL: Duration = Duration::from_millis(50);
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

type Coordinator = MowerCoordinator<Arc<RealtimeMower>, Lawn>;

/// Entry point for the mowsim command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing();

    let env = std::env::var_os(HEADLESS_ENV);
    if cli::is_headless(args.headless, io::stdout().is_terminal(), env.as_deref()) {
        println!("Running in headless mode");
        return Ok(());
    }

    let lawn = Lawn::try_new(args.rows, args.cols).context("lawn too large")?;
    let config = MowerConfig::with_tick_period(args.tick_period());
    let mower = RealtimeMower::with_config(args.rows, args.cols, config)
        .context("invalid mower configuration")?;
    let coordinator = MowerCoordinator::new(Arc::new(mower), lawn);

    // Registered after the coordinator so the lawn is already updated
    // when a frame signal arrives.
    let (frame_tx, frames) = crossbeam_channel::unbounded::<Cell>();
    coordinator.mower().add_listener(Arc::new(move |cell: Cell| {
        let _ = frame_tx.send(cell);
    }));

    let commands = spawn_stdin_reader().context("failed to start input thread")?;

    draw(&coordinator)?;
    if !args.paused {
        coordinator.start_mowing();
    }
    run(&coordinator, &frames, commands)?;

    let mut out = io::stdout().lock();
    write!(out, "{CLEAR_SCREEN}{}", *coordinator.renderer())?;
    writeln!(out, "{}", coordinator.phase())?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn spawn_stdin_reader() -> io::Result<Receiver<Result<Command, UnknownCommand>>> {
    let (tx, rx) = crossbeam_channel::unbounded();
    thread::Builder::new()
        .name("mowsim-stdin".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }
                if tx.send(line.parse()).is_err() {
                    break;
                }
            }
            tracing::debug!("stdin closed");
        })?;
    Ok(rx)
}

/// Redraw on every visited cell and apply commands until the lawn is
/// finished or the user quits.
fn run(
    coordinator: &Coordinator,
    frames: &Receiver<Cell>,
    mut commands: Receiver<Result<Command, UnknownCommand>>,
) -> Result<()> {
    while !coordinator.mower().is_finished() {
        let mut input = None;
        select! {
            recv(frames) -> cell => {
                if cell.is_ok() {
                    draw(coordinator)?;
                }
            }
            recv(commands) -> command => input = Some(command.ok()),
            default(FINISH_POLL) => {}
        }
        match input {
            None => {}
            Some(Some(Ok(Command::Start))) => coordinator.start_mowing(),
            Some(Some(Ok(Command::Stop))) => coordinator.stop_mowing(),
            Some(Some(Ok(Command::Status))) => println!("{}", coordinator.phase()),
            Some(Some(Ok(Command::Quit))) => break,
            Some(Some(Err(err))) => eprintln!("{err}"),
            Some(None) => {
                // Without input a paused mower can never resume.
                if !coordinator.mower().is_running() {
                    break;
                }
                commands = crossbeam_channel::never();
            }
        }
    }
    Ok(())
}

fn draw(coordinator: &Coordinator) -> Result<()> {
    let lawn = coordinator.renderer().clone();
    let mut out = io::stdout().lock();
    write!(out, "{CLEAR_SCREEN}{lawn}")?;
    writeln!(out, "{}", coordinator.phase())?;
    out.flush().context("failed to flush lawn frame")
}
