use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use mc_audio_core::{BackendKind, EngineConfig, EngineSettings, PlaybackEngine};

#[derive(Parser, Debug)]
#[command(
    name = "mc_audio_cli",
    about = "Operator console for the Music Create playback core"
)]
struct Cli {
    /// Settings profile (JSON); defaults apply when absent
    #[arg(long)]
    settings: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List backend ids, names, and availability on this platform
    Backends,
    /// Probe a single backend id for availability
    Probe {
        #[arg(long)]
        backend: String,
    },
    /// Play an audio file through the engine
    Play {
        file: PathBuf,
        /// Backend selector (auto, winmm, juce)
        #[arg(long)]
        backend: Option<String>,
        #[arg(long)]
        sample_rate: Option<u32>,
        #[arg(long)]
        buffer_size: Option<u32>,
        /// How long to keep the process alive for the fire-and-forget
        /// playback before stopping
        #[arg(long, default_value_t = 3000)]
        hold_ms: u64,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings = cli
        .settings
        .map(|path| EngineSettings::load_from_file(&path))
        .unwrap_or_default();

    match cli.command {
        Commands::Backends => list_backends(),
        Commands::Probe { backend } => probe_backend(&backend),
        Commands::Play {
            file,
            backend,
            sample_rate,
            buffer_size,
            hold_ms,
        } => play_file(settings, file, backend, sample_rate, buffer_size, hold_ms),
    }
}

fn list_backends() -> Result<ExitCode> {
    let engine = PlaybackEngine::new();
    for kind in [BackendKind::WinMm, BackendKind::Juce] {
        let backend = kind.create();
        let availability = if engine.is_backend_available(kind.id()) {
            "available"
        } else {
            "unavailable"
        };
        println!("{:<8} {:<20} {}", backend.id(), backend.name(), availability);
    }
    Ok(ExitCode::SUCCESS)
}

fn probe_backend(token: &str) -> Result<ExitCode> {
    let engine = PlaybackEngine::new();
    if engine.is_backend_available(token) {
        println!("{token}: available");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{token}: unavailable");
        Ok(ExitCode::from(1))
    }
}

fn play_file(
    settings: EngineSettings,
    file: PathBuf,
    backend: Option<String>,
    sample_rate: Option<u32>,
    buffer_size: Option<u32>,
    hold_ms: u64,
) -> Result<ExitCode> {
    let mut engine = PlaybackEngine::new();

    let selector = backend.unwrap_or(settings.backend);
    if !engine.set_backend(&selector) {
        bail!("unknown backend id '{selector}' (expected auto, winmm or juce)");
    }

    let config = EngineConfig {
        sample_rate: sample_rate.unwrap_or(settings.engine.sample_rate),
        buffer_size: buffer_size.unwrap_or(settings.engine.buffer_size),
        device_id: settings.engine.device_id,
    };
    engine.start(config)?;
    println!("engine running on {}", engine.backend_name());

    if !engine.play_file(&file) {
        engine.stop();
        bail!("backend refused to play {}", file.display());
    }

    // Playback is fire-and-forget on the OS side; keep the process alive
    // long enough to hear it.
    thread::sleep(Duration::from_millis(hold_ms));
    engine.stop();
    Ok(ExitCode::SUCCESS)
}
