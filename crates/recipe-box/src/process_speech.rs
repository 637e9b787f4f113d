//! Speech backend that shells out to a text-to-speech program.
//!
//! `speak` spawns the configured program with the utterance as its last
//! argument. `cancel` kills every child still running. If the program cannot
//! be started the backend reports itself unavailable from then on.

use std::{
    io::ErrorKind,
    panic::Location,
    process::{Child, Command, Stdio},
};

use error_location::ErrorLocation;
use recipe_box_core::{CoreResult, RecipeError, SpeechSynth};
use tracing::{debug, instrument, warn};

/// [`SpeechSynth`] backed by an external program such as `espeak-ng`.
pub struct ProcessSpeech {
    program: String,
    args: Vec<String>,
    children: Vec<Child>,
    available: bool,
}

impl ProcessSpeech {
    /// Backend invoking `program` with `args` before each utterance.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            children: Vec::new(),
            available: true,
        }
    }

    fn reap_finished(&mut self) {
        self.children
            .retain_mut(|child| !matches!(child.try_wait(), Ok(Some(_))));
    }
}

impl SpeechSynth for ProcessSpeech {
    fn is_available(&self) -> bool {
        self.available
    }

    #[track_caller]
    #[instrument(skip(self, text), fields(program = %self.program))]
    fn speak(&mut self, text: &str) -> CoreResult<()> {
        self.reap_finished();

        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => {
                debug!(pid = child.id(), "Speech process started");
                self.children.push(child);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.available = false;
                warn!("Speech program not found, narration will be silent");
                Ok(())
            }
            Err(e) => {
                self.available = false;
                Err(RecipeError::Speech {
                    reason: format!("Failed to start {}: {}", self.program, e),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn cancel(&mut self) -> CoreResult<()> {
        let mut failure = None;

        for mut child in self.children.drain(..) {
            // InvalidInput means the child already exited.
            if let Err(e) = child.kill() {
                if e.kind() != ErrorKind::InvalidInput {
                    failure = Some(e);
                }
            }
            let _ = child.wait();
        }

        match failure {
            Some(e) => Err(RecipeError::Speech {
                reason: format!("Failed to stop speech process: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }),
            None => Ok(()),
        }
    }
}

impl Drop for ProcessSpeech {
    fn drop(&mut self) {
        let _ = self.cancel();
    }
}
