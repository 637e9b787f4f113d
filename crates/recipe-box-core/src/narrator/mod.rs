mod speech;
mod step_narrator;

pub use {
    speech::{NullSpeech, SpeechSynth},
    step_narrator::{NarrationState, NarrationTarget, StepNarrator, utterance},
};
