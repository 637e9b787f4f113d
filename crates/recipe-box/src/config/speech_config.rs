use crate::config::DEFAULT_SPEECH_COMMAND;

use serde::{Deserialize, Serialize};

/// Text-to-speech configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Program invoked with the utterance as its last argument.
    ///
    /// Leaving it out of an existing `[speech]` section disables narration audio.
    #[serde(default)]
    pub command: Option<String>,

    /// Extra arguments passed before the utterance.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: Some(DEFAULT_SPEECH_COMMAND.to_string()),
            args: Vec::new(),
        }
    }
}
