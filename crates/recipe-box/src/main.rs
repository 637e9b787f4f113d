//! Recipe Box: a terminal recipe manager with voice-narrated steps.

mod app;
mod app_command;
mod command_parser;
mod config;
mod error;
mod process_speech;
mod view;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    process_speech::ProcessSpeech,
    view::View,
};

use crate::config::Config;

use std::{
    io::{self, BufRead},
    time::Duration,
};

use recipe_box_core::{FileStorage, NullSpeech, RecipeLibrary, SpeechSynth};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Application entry point.
fn main() {
    // Logs go to stderr so they never interleave with the views on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("recipe_box=info,recipe_box_core=info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let data_dir = match config.data_dir() {
        Ok(dir) => dir,
        Err(e) => {
            error!("Failed to resolve data directory: {:?}", e);
            std::process::exit(1);
        }
    };

    // Load before the first render.
    let library = RecipeLibrary::open(FileStorage::new(&data_dir), &config.storage.key);
    info!(data_dir = ?data_dir, recipes = library.store().len(), "Recipe library opened");

    let speech: Box<dyn SpeechSynth + Send> = match &config.speech.command {
        Some(program) => Box::new(ProcessSpeech::new(program, config.speech.args.clone())),
        None => {
            warn!("No speech command configured, narration will be silent");
            Box::new(NullSpeech)
        }
    };

    let app = App::new(library, speech, config.samples.origin(), View::stdout());

    // Stdin is read on a plain thread: a blocked read must not hold up
    // runtime shutdown. The thread ends when the app drops `line_rx`.
    let (line_tx, line_rx) = mpsc::channel(32);
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!(error = ?e, "Failed to read input");
                    break;
                }
            }
        }
    });

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(app.run(line_rx)) {
        error!(error = ?e, "App error");
    }

    // In-flight sample fetches are abandoned; their results have nowhere to go.
    rt.shutdown_timeout(Duration::from_secs(1));
}
