//! Form state for creating or editing a recipe.
//!
//! The form keeps raw text exactly as entered. Ingredients and steps are
//! multi-line text, one entry per line; [`RecipeForm::to_draft`] normalizes
//! everything into a [`RecipeDraft`].

use crate::recipe::{Recipe, RecipeDraft};

/// Difficulty levels offered by the form. Any other label is still accepted.
pub const DIFFICULTIES: [&str; 3] = ["Easy", "Normal", "Hard"];

/// Difficulty preselected on an empty form.
pub const DEFAULT_DIFFICULTY: &str = DIFFICULTIES[0];

/// Title given to a recipe saved with a blank title.
pub const UNTITLED_RECIPE: &str = "Untitled recipe";

/// Raw text inputs of the recipe form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeForm {
    /// Title input.
    pub title: String,
    /// Time input.
    pub time: String,
    /// Difficulty selection.
    pub difficulty: String,
    /// Category input.
    pub category: String,
    /// Image URL input.
    pub image_url: String,
    /// Ingredients, one per line.
    pub ingredients_text: String,
    /// Steps, one per line.
    pub steps_text: String,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeForm {
    /// An empty form for a new recipe.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            time: String::new(),
            difficulty: DEFAULT_DIFFICULTY.to_string(),
            category: String::new(),
            image_url: String::new(),
            ingredients_text: String::new(),
            steps_text: String::new(),
        }
    }

    /// A form pre-filled from an existing recipe.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            time: recipe.time.clone().unwrap_or_default(),
            difficulty: recipe
                .difficulty
                .clone()
                .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string()),
            category: recipe.category.clone().unwrap_or_default(),
            image_url: recipe.image_url.clone().unwrap_or_default(),
            ingredients_text: recipe.ingredients.join("\n"),
            steps_text: recipe.steps.join("\n"),
        }
    }

    /// Append one ingredient line.
    pub fn push_ingredient(&mut self, line: &str) {
        push_line(&mut self.ingredients_text, line);
    }

    /// Append one step line.
    pub fn push_step(&mut self, line: &str) {
        push_line(&mut self.steps_text, line);
    }

    /// Remove all ingredient lines.
    pub fn clear_ingredients(&mut self) {
        self.ingredients_text.clear();
    }

    /// Remove all step lines.
    pub fn clear_steps(&mut self) {
        self.steps_text.clear();
    }

    /// Normalize the inputs into a draft.
    ///
    /// Lines are trimmed and blank lines dropped. A blank title becomes
    /// [`UNTITLED_RECIPE`]; other blank text fields become `None`.
    pub fn to_draft(&self) -> RecipeDraft {
        let title = self.title.trim();

        RecipeDraft {
            title: if title.is_empty() {
                UNTITLED_RECIPE.to_string()
            } else {
                title.to_string()
            },
            time: non_blank(&self.time),
            difficulty: non_blank(&self.difficulty),
            category: non_blank(&self.category),
            image_url: non_blank(&self.image_url),
            ingredients: split_lines(&self.ingredients_text),
            steps: split_lines(&self.steps_text),
        }
    }
}

fn push_line(text: &mut String, line: &str) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text.push_str(line);
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// `str::lines` already strips a trailing `\r`.
fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
