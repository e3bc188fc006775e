//! `bloch`: single-qubit Bloch sphere animations in the terminal or a window.
use clap::Parser; // trait import enables BlochCli::parse()
use tracing_subscriber::EnvFilter;

use bloch_scope::cli::{BlochCli, Command};
use bloch_scope::commands::animate::{self, Playback};
use bloch_scope::commands::sample::{self, SampleArgs};
use bloch_scope::config::{resolve_config_path, Settings};
use bloch_scope::core::CancelToken;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // stderr only: stdout carries the animated scene
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = BlochCli::parse();
    init_tracing(args.verbose);

    let cfg_path = resolve_config_path(&args.config);
    let settings = Settings::load(cfg_path.as_deref())?;

    let cancel = CancelToken::new();
    if let Err(e) = cancel.install_ctrlc() {
        tracing::warn!("could not install Ctrl-C handler: {e}");
    }

    match args.cmd {
        Some(Command::Rotate { start, end, frames, renderer, delay_ms }) => {
            let playback = Playback { settings: &settings, renderer, delay_ms, cancel };
            animate::rotate(&playback, start, end, frames)
        }

        Some(Command::Flicker { prob_one, frames, shots_per_frame, seed, renderer, delay_ms }) => {
            let playback = Playback { settings: &settings, renderer, delay_ms, cancel };
            animate::flicker(&playback, prob_one, frames, shots_per_frame, seed)
        }

        Some(Command::Sample { gates, alpha, beta, shots, seed, json }) => {
            sample::main(SampleArgs { gates, alpha, beta, shots, seed, json }, &settings)
        }

        None => {
            use clap::CommandFactory;
            BlochCli::command().print_help().ok();
            println!();
            Ok(())
        }
    }
}
