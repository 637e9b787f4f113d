use recipe_box_core::{CategoryFilter, RecipeId, SampleRecipe};
use uuid::Uuid;

/// How a command refers to a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeRef {
    /// 1-based position in the currently visible list.
    Position(usize),
    /// Recipe id.
    Id(RecipeId),
}

/// Single-line text fields of the recipe form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Recipe title.
    Title,
    /// Preparation time.
    Time,
    /// Difficulty label.
    Difficulty,
    /// Category.
    Category,
    /// Picture URL.
    ImageUrl,
}

/// Commands driving the application, from user input or background tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Show the filtered recipe list.
    List,
    /// Show the distinct categories.
    Categories,
    /// Change the category filter.
    Filter(CategoryFilter),
    /// Turn the favorites-only filter on or off.
    FavoritesOnly(bool),
    /// Select a recipe and show it.
    Select(RecipeRef),
    /// Show the selected recipe.
    Show,
    /// Open the form for a new recipe.
    New,
    /// Open the form for the selected recipe.
    Edit,
    /// Set a single-line form field.
    SetField(FormField, String),
    /// Append an ingredient line to the form.
    AddIngredient(String),
    /// Append a step line to the form.
    AddStep(String),
    /// Remove all ingredient lines from the form.
    ClearIngredients,
    /// Remove all step lines from the form.
    ClearSteps,
    /// Save the form.
    Save,
    /// Close the form without saving.
    Cancel,
    /// Toggle the favorite flag (selected recipe when no reference is given).
    ToggleFavorite(Option<RecipeRef>),
    /// Ask to delete a recipe (selected recipe when no reference is given).
    Delete(Option<RecipeRef>),
    /// Confirm the pending deletion.
    Confirm,
    /// Reject the pending deletion.
    Deny,
    /// Start loading sample recipes in the background.
    LoadSamples,
    /// Sample recipes finished loading.
    SamplesLoaded {
        /// Load request this batch belongs to, for log correlation.
        request_id: Uuid,
        /// Parsed samples.
        samples: Vec<SampleRecipe>,
    },
    /// Start narrating the selected recipe's steps.
    Play,
    /// Stop narration.
    Stop,
    /// Move narration to the next step.
    Next,
    /// Move narration to the previous step.
    Previous,
    /// Show available commands.
    Help,
    /// Exit the application.
    Quit,
}
