use crate::{
    DEFAULT_DIFFICULTY, Recipe, RecipeDraft, RecipeForm, RecipeId, UNTITLED_RECIPE,
};

/// WHAT: Multi-line text becomes trimmed, non-empty entries
/// WHY: Ingredients and steps correspond line for line to what the user typed
#[test]
fn given_multiline_text_when_converting_then_lines_trimmed_and_blanks_dropped() {
    // Given: A form with messy multi-line inputs
    let form = RecipeForm {
        title: "  Soup ".to_string(),
        ingredients_text: "water\r\n\n  salt  \n".to_string(),
        steps_text: "chop\nboil\r\n   \nserve".to_string(),
        ..RecipeForm::new()
    };

    // When: Converting to a draft
    let draft = form.to_draft();

    // Then: Lines are clean and in order
    assert_eq!(draft.title, "Soup");
    assert_eq!(draft.ingredients, vec!["water", "salt"]);
    assert_eq!(draft.steps, vec!["chop", "boil", "serve"]);
}

/// WHAT: Blank title falls back and blank optional fields are dropped
/// WHY: Every saved recipe needs a displayable title
#[test]
fn given_blank_fields_when_converting_then_defaults_applied() {
    // Given: An empty form
    let form = RecipeForm::new();

    // When: Converting to a draft
    let draft = form.to_draft();

    // Then: Title is the fallback, difficulty keeps the preset, others are None
    assert_eq!(draft.title, UNTITLED_RECIPE);
    assert_eq!(draft.difficulty.as_deref(), Some(DEFAULT_DIFFICULTY));
    assert_eq!(draft.time, None);
    assert_eq!(draft.category, None);
    assert_eq!(draft.image_url, None);
}

/// WHAT: A form pre-filled from a recipe converts back to the same draft
/// WHY: Opening and saving the editor without changes must not alter data
#[test]
fn given_recipe_when_editing_without_changes_then_draft_matches() {
    // Given: A fully populated recipe
    let draft = RecipeDraft {
        title: "Cake".to_string(),
        time: Some("1 h".to_string()),
        difficulty: Some("Hard".to_string()),
        category: Some("Dessert".to_string()),
        image_url: Some("data:image/png;base64,AAAA".to_string()),
        ingredients: vec!["flour".to_string(), "eggs".to_string()],
        steps: vec!["mix".to_string(), "bake".to_string()],
    };
    let recipe = Recipe::from_draft(RecipeId::from("c"), draft.clone(), false);

    // When: Round-tripping through the form
    let form = RecipeForm::from_recipe(&recipe);

    // Then: The draft is unchanged
    assert_eq!(form.to_draft(), draft);
}

/// WHAT: Line helpers append entries one per line
/// WHY: A line-oriented front-end builds multi-line text incrementally
#[test]
fn given_line_helpers_when_pushing_then_one_entry_per_line() {
    // Given: An empty form
    let mut form = RecipeForm::new();

    // When: Pushing steps and clearing ingredients
    form.push_step("chop");
    form.push_step("boil");
    form.push_ingredient("water");
    form.clear_ingredients();

    // Then: Steps are separate lines and ingredients are empty
    assert_eq!(form.steps_text, "chop\nboil");
    assert!(form.to_draft().ingredients.is_empty());
}
