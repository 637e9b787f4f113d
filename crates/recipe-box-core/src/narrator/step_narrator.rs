//! Voice-narrated step playback for the displayed recipe.
//!
//! The narrator tracks a current step index and a play/stop flag. Speech is
//! fire-and-forget: the index only moves on explicit `next`/`previous`, never
//! because an utterance finished.

use crate::{
    narrator::SpeechSynth,
    recipe::{Recipe, RecipeId},
};

use tracing::{debug, instrument, warn};

/// Title spoken when the recipe has none.
const FALLBACK_TITLE: &str = "Recipe";

/// Playback status of the narrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NarrationState {
    /// Nothing is being narrated.
    #[default]
    Stopped,
    /// The current step was handed to the speech backend.
    Playing,
}

/// What the narrator reads from: a recipe's identity, title and steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NarrationTarget {
    /// Recipe the steps belong to.
    pub recipe_id: Option<RecipeId>,
    /// Title prefixed to every utterance.
    pub title: Option<String>,
    /// Steps in order.
    pub steps: Vec<String>,
}

impl NarrationTarget {
    /// Target for a stored recipe.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            recipe_id: Some(recipe.id.clone()),
            title: Some(recipe.title.clone()),
            steps: recipe.steps.clone(),
        }
    }

    fn same_identity(&self, other: &NarrationTarget) -> bool {
        self.recipe_id == other.recipe_id && self.steps == other.steps
    }
}

/// Text handed to the speech backend for step `index` (zero-based).
pub fn utterance(title: Option<&str>, index: usize, step: &str) -> String {
    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(FALLBACK_TITLE);
    format!("{title}, step {}. {step}", index + 1)
}

/// Step-by-step narrator driving a [`SpeechSynth`] backend.
///
/// Dropping the narrator cancels any speech still queued.
pub struct StepNarrator<S: SpeechSynth> {
    speech: S,
    target: NarrationTarget,
    current_index: usize,
    state: NarrationState,
}

impl<S: SpeechSynth> StepNarrator<S> {
    /// A stopped narrator with no steps.
    pub fn new(speech: S) -> Self {
        Self {
            speech,
            target: NarrationTarget::default(),
            current_index: 0,
            state: NarrationState::Stopped,
        }
    }

    /// Speech backend.
    pub fn speech(&self) -> &S {
        &self.speech
    }

    /// Currently loaded target.
    pub fn target(&self) -> &NarrationTarget {
        &self.target
    }

    /// Zero-based index of the current step.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Playback status.
    pub fn state(&self) -> NarrationState {
        self.state
    }

    /// Whether narration is playing.
    pub fn is_playing(&self) -> bool {
        self.state == NarrationState::Playing
    }

    /// Number of loaded steps.
    pub fn step_count(&self) -> usize {
        self.target.steps.len()
    }

    /// Text of the current step, if any steps are loaded.
    pub fn current_step(&self) -> Option<&str> {
        self.target.steps.get(self.current_index).map(String::as_str)
    }

    /// Point the narrator at a recipe.
    ///
    /// A different recipe id or step list resets to the first step, stops
    /// playback and cancels speech. A title-only change keeps the position.
    /// Returns whether a reset happened.
    #[instrument(skip(self, target), fields(recipe_id = ?target.recipe_id, steps = target.steps.len()))]
    pub fn load(&mut self, target: NarrationTarget) -> bool {
        if self.target.same_identity(&target) {
            self.target.title = target.title;
            return false;
        }

        self.target = target;
        self.reset();
        true
    }

    /// Forget the current target, as when no recipe is displayed.
    pub fn unload(&mut self) -> bool {
        self.load(NarrationTarget::default())
    }

    /// Start narrating the current step. No-op without steps.
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        if self.target.steps.is_empty() {
            debug!("Start ignored, no steps");
            return;
        }

        self.cancel_speech();
        self.state = NarrationState::Playing;
        self.speak_current();
    }

    /// Stop narrating.
    #[instrument(skip(self))]
    pub fn stop(&mut self) {
        self.cancel_speech();
        self.state = NarrationState::Stopped;
    }

    /// Advance one step, clamped to the last step.
    #[instrument(skip(self))]
    pub fn next(&mut self) {
        let Some(last) = self.target.steps.len().checked_sub(1) else {
            return;
        };
        self.move_to((self.current_index + 1).min(last));
    }

    /// Go back one step, clamped to the first step.
    #[instrument(skip(self))]
    pub fn previous(&mut self) {
        if self.target.steps.is_empty() {
            return;
        }
        self.move_to(self.current_index.saturating_sub(1));
    }

    fn move_to(&mut self, index: usize) {
        let moved = index != self.current_index;
        self.current_index = index;

        debug!(index, moved, "Step index updated");

        if moved && self.is_playing() {
            self.cancel_speech();
            self.speak_current();
        }
    }

    fn reset(&mut self) {
        self.cancel_speech();
        self.current_index = 0;
        self.state = NarrationState::Stopped;
    }

    fn speak_current(&mut self) {
        if !self.speech.is_available() {
            return;
        }

        let Some(step) = self.target.steps.get(self.current_index) else {
            return;
        };

        let text = utterance(self.target.title.as_deref(), self.current_index, step);
        if let Err(e) = self.speech.speak(&text) {
            warn!(error = %e, index = self.current_index, "Speech backend failed to speak");
        }
    }

    // Not gated on availability: a backend that went unavailable may still
    // have utterances playing from before.
    fn cancel_speech(&mut self) {
        if let Err(e) = self.speech.cancel() {
            warn!(error = %e, "Speech backend failed to cancel");
        }
    }
}

impl<S: SpeechSynth> Drop for StepNarrator<S> {
    fn drop(&mut self) {
        self.cancel_speech();
    }
}
