//! The canonical recipe collection and its persistence policy.
//!
//! Every mutation replaces the whole collection in memory and immediately
//! re-persists it under a single storage key. Persistence is best effort: a
//! failed write is logged and remembered, but the in-memory collection stays
//! authoritative for the session.

use crate::{
    CoreResult, RecipeError,
    filter::{CategoryFilter, FilterState},
    recipe::{Recipe, RecipeDraft, RecipeId, SampleRecipe},
    store::KeyValueStore,
};

use std::{collections::HashSet, panic::Location};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Storage key the collection is persisted under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "recipes";

/// Owns the recipe collection and persists it after every mutation.
pub struct RecipeStore<S: KeyValueStore> {
    storage: S,
    key: String,
    recipes: Vec<Recipe>,
    last_persist_failed: bool,
}

impl<S: KeyValueStore> RecipeStore<S> {
    /// Load the collection stored under `key`.
    ///
    /// An absent, unreadable or malformed value yields an empty collection.
    #[instrument(skip(storage))]
    pub fn open(storage: S, key: &str) -> Self {
        let recipes = match Self::read(&storage, key) {
            Ok(Some(recipes)) => {
                info!(count = recipes.len(), "Recipe collection loaded");
                recipes
            }
            Ok(None) => {
                info!("No stored recipes, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Stored recipes unusable, starting empty");
                Vec::new()
            }
        };

        Self {
            storage,
            key: key.to_string(),
            recipes,
            last_persist_failed: false,
        }
    }

    #[track_caller]
    fn read(storage: &S, key: &str) -> CoreResult<Option<Vec<Recipe>>> {
        let Some(raw) = storage.load(key)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| RecipeError::Serialization {
                source,
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// The whole collection in stored order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Number of stored recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Look up a recipe by id.
    pub fn get(&self, id: &RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| &r.id == id)
    }

    /// Whether a recipe with this id exists.
    pub fn contains(&self, id: &RecipeId) -> bool {
        self.get(id).is_some()
    }

    /// Storage key the collection lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Whether the most recent persist attempt failed.
    pub fn last_persist_failed(&self) -> bool {
        self.last_persist_failed
    }

    /// Append a new recipe built from `draft` and return its fresh id.
    ///
    /// New recipes are never favorites.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub fn create(&mut self, draft: RecipeDraft) -> RecipeId {
        let mut id = RecipeId::generate();
        while self.contains(&id) {
            id = RecipeId::generate();
        }

        self.recipes
            .push(Recipe::from_draft(id.clone(), draft, false));
        self.persist();

        info!(recipe_id = %id, "Recipe created");

        id
    }

    /// Replace every editable field of recipe `id`. Returns `false` if absent.
    #[instrument(skip(self, draft))]
    pub fn update(&mut self, id: &RecipeId, draft: RecipeDraft) -> bool {
        let Some(recipe) = self.recipes.iter_mut().find(|r| &r.id == id) else {
            debug!(recipe_id = %id, "Update ignored, recipe not found");
            return false;
        };

        recipe.replace_fields(draft);
        self.persist();

        info!(recipe_id = %id, "Recipe updated");

        true
    }

    /// Remove recipe `id`. Returns `false` if absent.
    #[instrument(skip(self))]
    pub fn delete(&mut self, id: &RecipeId) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|r| &r.id != id);

        if self.recipes.len() == before {
            debug!(recipe_id = %id, "Delete ignored, recipe not found");
            return false;
        }

        self.persist();

        info!(recipe_id = %id, "Recipe deleted");

        true
    }

    /// Flip the favorite flag of recipe `id`. Returns the new flag, or `None` if absent.
    #[instrument(skip(self))]
    pub fn toggle_favorite(&mut self, id: &RecipeId) -> Option<bool> {
        let recipe = self.recipes.iter_mut().find(|r| &r.id == id)?;
        recipe.is_favorite = !recipe.is_favorite;
        let is_favorite = recipe.is_favorite;

        self.persist();

        debug!(recipe_id = %id, is_favorite, "Favorite toggled");

        Some(is_favorite)
    }

    /// Append sample recipes whose ids are not already present.
    ///
    /// Samples without an id get a fresh one. Persists once and returns how
    /// many recipes were added.
    #[instrument(skip(self, samples), fields(incoming = samples.len()))]
    pub fn merge_samples(&mut self, samples: Vec<SampleRecipe>) -> usize {
        let mut known: HashSet<RecipeId> = self.recipes.iter().map(|r| r.id.clone()).collect();

        let incoming: Vec<Recipe> = samples
            .into_iter()
            .map(SampleRecipe::into_recipe)
            .filter(|r| known.insert(r.id.clone()))
            .collect();

        let added = incoming.len();
        self.recipes.extend(incoming);
        self.persist();

        info!(added, total = self.recipes.len(), "Sample recipes merged");

        added
    }

    /// Distinct non-empty categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.recipes
            .iter()
            .filter_map(|r| r.category.as_deref())
            .filter(|c| !c.is_empty() && seen.insert(*c))
            .map(str::to_string)
            .collect()
    }

    /// Recipes matching both the category and the favorite predicate, in stored order.
    pub fn filter(&self, category: &CategoryFilter, only_favorites: bool) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|r| category.matches(r) && (!only_favorites || r.is_favorite))
            .collect()
    }

    /// [`filter`](Self::filter) driven by a [`FilterState`].
    pub fn visible(&self, state: &FilterState) -> Vec<&Recipe> {
        self.filter(&state.category, state.only_favorites)
    }

    /// Serialize and write the whole collection, swallowing failures.
    pub fn persist(&mut self) {
        match self.write() {
            Ok(()) => {
                self.last_persist_failed = false;
            }
            Err(e) => {
                self.last_persist_failed = true;
                warn!(error = %e, key = %self.key, "Failed to persist recipes, keeping in-memory state");
            }
        }
    }

    #[track_caller]
    fn write(&mut self) -> CoreResult<()> {
        let json =
            serde_json::to_string(&self.recipes).map_err(|source| RecipeError::Serialization {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.storage.save(&self.key, &json)
    }
}
