pub(crate) mod form;
mod model;

pub use {
    form::{DEFAULT_DIFFICULTY, DIFFICULTIES, RecipeForm, UNTITLED_RECIPE},
    model::{Recipe, RecipeDraft, RecipeId, SampleRecipe},
};
