//! Recipe Box Core Library
//!
//! Persisted recipe collection with filtering, selection and sample import,
//! plus a voice step narrator over a pluggable speech backend.
//!
//! # Example
//!
//! ```no_run
//! use recipe_box_core::{
//!     FileStorage, NarrationTarget, NullSpeech, RecipeDraft, RecipeLibrary, StepNarrator,
//!     DEFAULT_STORAGE_KEY,
//! };
//!
//! let mut library = RecipeLibrary::open(FileStorage::new("data"), DEFAULT_STORAGE_KEY);
//!
//! let mut draft = RecipeDraft::titled("Soup");
//! draft.steps = vec!["chop".into(), "boil".into(), "serve".into()];
//! let id = library.save(draft);
//!
//! let mut narrator = StepNarrator::new(NullSpeech);
//! if let Some(recipe) = library.store().get(&id) {
//!     narrator.load(NarrationTarget::from_recipe(recipe));
//! }
//! narrator.start();
//! narrator.next();
//! assert_eq!(narrator.current_index(), 1);
//! ```

mod error;
mod filter;
mod library;
mod narrator;
mod recipe;
pub mod samples;
mod store;

pub use {
    error::RecipeError,
    error::Result as CoreResult,
    filter::{CategoryFilter, FilterState},
    library::RecipeLibrary,
    narrator::{
        NarrationState, NarrationTarget, NullSpeech, SpeechSynth, StepNarrator, utterance,
    },
    recipe::{
        DEFAULT_DIFFICULTY, DIFFICULTIES, Recipe, RecipeDraft, RecipeForm, RecipeId,
        SampleRecipe, UNTITLED_RECIPE,
    },
    samples::SampleSource,
    store::{DEFAULT_STORAGE_KEY, FileStorage, KeyValueStore, MemoryStorage, RecipeStore},
};

#[cfg(test)]
mod tests;
