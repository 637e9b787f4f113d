mod form;
mod narrator;
mod samples;

use crate::{CoreResult, RecipeError, SpeechSynth};

use std::{cell::RefCell, panic::Location, rc::Rc};

use error_location::ErrorLocation;

/// Everything a [`RecordingSpeech`] backend was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SpeechCall {
    Speak(String),
    Cancel,
}

/// Speech backend that records calls instead of producing audio.
#[derive(Debug, Default)]
pub(crate) struct RecordingSpeech {
    pub(crate) calls: Vec<SpeechCall>,
    pub(crate) unavailable: bool,
    pub(crate) failing: bool,
}

impl RecordingSpeech {
    pub(crate) fn spoken(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SpeechCall::Speak(text) => Some(text.as_str()),
                SpeechCall::Cancel => None,
            })
            .collect()
    }
}

impl SpeechSynth for RecordingSpeech {
    fn is_available(&self) -> bool {
        !self.unavailable
    }

    fn speak(&mut self, text: &str) -> CoreResult<()> {
        self.calls.push(SpeechCall::Speak(text.to_string()));
        if self.failing {
            return Err(RecipeError::Speech {
                reason: "synthetic failure".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    fn cancel(&mut self) -> CoreResult<()> {
        self.calls.push(SpeechCall::Cancel);
        Ok(())
    }
}

/// [`RecordingSpeech`] shared between a narrator and the test observing it.
#[derive(Debug, Default, Clone)]
pub(crate) struct SharedSpeech(Rc<RefCell<RecordingSpeech>>);

impl SharedSpeech {
    pub(crate) fn calls(&self) -> Vec<SpeechCall> {
        self.0.borrow().calls.clone()
    }

    pub(crate) fn set_unavailable(&self) {
        self.0.borrow_mut().unavailable = true;
    }
}

impl SpeechSynth for SharedSpeech {
    fn is_available(&self) -> bool {
        self.0.borrow().is_available()
    }

    fn speak(&mut self, text: &str) -> CoreResult<()> {
        self.0.borrow_mut().speak(text)
    }

    fn cancel(&mut self) -> CoreResult<()> {
        self.0.borrow_mut().cancel()
    }
}
