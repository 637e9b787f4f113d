//! Recipe records as persisted in the durable store.
//!
//! The JSON layout uses camelCase keys (`imageUrl`, `isFavorite`) and omits
//! absent optional fields, so collections written by older front-ends load
//! unchanged.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Opaque, stable identifier of a recipe record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    /// Generate a fresh globally-unique identifier (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecipeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A stored recipe record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique identifier, immutable once assigned.
    pub id: RecipeId,
    /// Display title. A `null` title loads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Free-form preparation time (e.g. "45 min").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Difficulty label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Category used for filtering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Plain URL or embedded data URL of a picture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Ingredients in entry order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,
    /// Preparation steps in entry order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,
    /// Whether the user marked this recipe as a favorite.
    #[serde(default)]
    pub is_favorite: bool,
}

impl Recipe {
    /// Build a record from a draft with the given identity and favorite flag.
    pub fn from_draft(id: RecipeId, draft: RecipeDraft, is_favorite: bool) -> Self {
        let RecipeDraft {
            title,
            time,
            difficulty,
            category,
            image_url,
            ingredients,
            steps,
        } = draft;

        Self {
            id,
            title,
            time,
            difficulty,
            category,
            image_url,
            ingredients,
            steps,
            is_favorite,
        }
    }

    /// Replace every editable field with the draft's, keeping `id` and `is_favorite`.
    pub fn replace_fields(&mut self, draft: RecipeDraft) {
        *self = Self::from_draft(self.id.clone(), draft, self.is_favorite);
    }

    /// Copy the editable fields out into a draft.
    pub fn to_draft(&self) -> RecipeDraft {
        RecipeDraft {
            title: self.title.clone(),
            time: self.time.clone(),
            difficulty: self.difficulty.clone(),
            category: self.category.clone(),
            image_url: self.image_url.clone(),
            ingredients: self.ingredients.clone(),
            steps: self.steps.clone(),
        }
    }
}

/// Editable recipe fields, without identity or favorite flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    /// Display title. A `null` title loads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Free-form preparation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Difficulty label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Category used for filtering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Plain URL or embedded data URL of a picture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Ingredients in entry order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,
    /// Preparation steps in entry order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,
}

impl RecipeDraft {
    /// Draft with only a title set.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial recipe as found in sample documents.
///
/// `id` may be missing and is backfilled on merge. `isFavorite` accepts any
/// JSON value and is coerced to a boolean by truthiness.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRecipe {
    /// Identifier carried by the sample, if any.
    #[serde(default)]
    pub id: Option<RecipeId>,
    /// Editable fields.
    #[serde(flatten)]
    pub draft: RecipeDraft,
    /// Favorite flag after truthiness coercion.
    #[serde(default, deserialize_with = "truthy")]
    pub is_favorite: bool,
}

impl SampleRecipe {
    /// Turn the sample into a full record, generating an id when it has none.
    pub fn into_recipe(self) -> Recipe {
        let id = match self.id {
            Some(id) if !id.is_empty() => id,
            _ => RecipeId::generate(),
        };
        Recipe::from_draft(id, self.draft, self.is_favorite)
    }
}

impl From<Recipe> for SampleRecipe {
    fn from(recipe: Recipe) -> Self {
        let draft = recipe.to_draft();
        Self {
            id: Some(recipe.id),
            draft,
            is_favorite: recipe.is_favorite,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}
