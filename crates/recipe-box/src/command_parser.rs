//! Line-oriented command parser.
//!
//! Each input line is one command: a keyword followed by an optional
//! argument that runs to the end of the line. Blank lines parse to `None`.

use crate::{
    AppCommand, AppError, AppResult,
    app_command::{FormField, RecipeRef},
};

use std::panic::Location;

use error_location::ErrorLocation;
use recipe_box_core::{CategoryFilter, RecipeId};

/// Parse one input line.
#[track_caller]
pub fn parse(line: &str) -> AppResult<Option<AppCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let invalid = |reason: &str| AppError::InvalidCommand {
        input: line.to_string(),
        reason: reason.to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    let command = match keyword.to_ascii_lowercase().as_str() {
        "list" | "ls" => AppCommand::List,
        "categories" => AppCommand::Categories,
        "filter" => {
            if rest.is_empty() {
                return Err(invalid("expected a category or 'all'"));
            }
            AppCommand::Filter(CategoryFilter::from(rest))
        }
        "favorites" => match rest.to_ascii_lowercase().as_str() {
            "on" => AppCommand::FavoritesOnly(true),
            "off" => AppCommand::FavoritesOnly(false),
            _ => return Err(invalid("expected 'on' or 'off'")),
        },
        "select" | "open" => match recipe_ref(rest) {
            Some(r) => AppCommand::Select(r),
            None => return Err(invalid("expected a list number or recipe id")),
        },
        "show" => AppCommand::Show,
        "new" => AppCommand::New,
        "edit" => AppCommand::Edit,
        "title" => AppCommand::SetField(FormField::Title, rest.to_string()),
        "time" => AppCommand::SetField(FormField::Time, rest.to_string()),
        "difficulty" => AppCommand::SetField(FormField::Difficulty, rest.to_string()),
        "category" => AppCommand::SetField(FormField::Category, rest.to_string()),
        "image" => AppCommand::SetField(FormField::ImageUrl, rest.to_string()),
        "ingredient" => {
            if rest.is_empty() {
                return Err(invalid("expected ingredient text"));
            }
            AppCommand::AddIngredient(rest.to_string())
        }
        "step" => {
            if rest.is_empty() {
                return Err(invalid("expected step text"));
            }
            AppCommand::AddStep(rest.to_string())
        }
        "clear-ingredients" => AppCommand::ClearIngredients,
        "clear-steps" => AppCommand::ClearSteps,
        "save" => AppCommand::Save,
        "cancel" => AppCommand::Cancel,
        "fav" | "favorite" => AppCommand::ToggleFavorite(recipe_ref(rest)),
        "delete" | "rm" => AppCommand::Delete(recipe_ref(rest)),
        "yes" | "y" => AppCommand::Confirm,
        "no" | "n" => AppCommand::Deny,
        "samples" => AppCommand::LoadSamples,
        "play" | "start" => AppCommand::Play,
        "stop" => AppCommand::Stop,
        "next" => AppCommand::Next,
        "prev" | "previous" => AppCommand::Previous,
        "help" | "?" => AppCommand::Help,
        "quit" | "exit" => AppCommand::Quit,
        _ => return Err(invalid("unknown command, type 'help'")),
    };

    Ok(Some(command))
}

fn recipe_ref(arg: &str) -> Option<RecipeRef> {
    if arg.is_empty() {
        return None;
    }

    match arg.parse::<usize>() {
        Ok(position) => Some(RecipeRef::Position(position)),
        Err(_) => Some(RecipeRef::Id(RecipeId::from(arg))),
    }
}
