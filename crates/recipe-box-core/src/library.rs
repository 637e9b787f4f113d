//! Session state around the recipe store: filter, selection, editing and
//! deletion confirmation.
//!
//! Derived views ([`RecipeLibrary::visible`], [`RecipeLibrary::categories`],
//! [`RecipeLibrary::selected`]) are recomputed from the current state on every
//! call, so a caller observing them after any mutation always sees a view
//! consistent with the latest collection and filter.

use crate::{
    filter::{CategoryFilter, FilterState},
    recipe::{Recipe, RecipeDraft, RecipeId, SampleRecipe},
    store::{KeyValueStore, RecipeStore},
};

use tracing::{debug, info, instrument};

/// Recipe store plus the ephemeral UI state that depends on it.
pub struct RecipeLibrary<S: KeyValueStore> {
    store: RecipeStore<S>,
    filter: FilterState,
    selected_id: Option<RecipeId>,
    editing: bool,
    pending_delete: Option<RecipeId>,
}

impl<S: KeyValueStore> RecipeLibrary<S> {
    /// Load the collection stored under `key` and start with default UI state.
    pub fn open(storage: S, key: &str) -> Self {
        Self::from_store(RecipeStore::open(storage, key))
    }

    /// Wrap an already loaded store.
    pub fn from_store(store: RecipeStore<S>) -> Self {
        Self {
            store,
            filter: FilterState::default(),
            selected_id: None,
            editing: false,
            pending_delete: None,
        }
    }

    /// Underlying store.
    pub fn store(&self) -> &RecipeStore<S> {
        &self.store
    }

    /// Whether any recipe is stored, regardless of the filter.
    pub fn has_recipes(&self) -> bool {
        !self.store.is_empty()
    }

    /// Current filter.
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Change the category predicate.
    pub fn set_category(&mut self, category: CategoryFilter) {
        debug!(category = %category, "Category filter changed");
        self.filter.category = category;
    }

    /// Change the favorites-only predicate.
    pub fn set_only_favorites(&mut self, only_favorites: bool) {
        debug!(only_favorites, "Favorites filter changed");
        self.filter.only_favorites = only_favorites;
    }

    /// Recipes passing the current filter, in stored order.
    pub fn visible(&self) -> Vec<&Recipe> {
        self.store.visible(&self.filter)
    }

    /// Distinct categories across the whole collection.
    pub fn categories(&self) -> Vec<String> {
        self.store.categories()
    }

    /// Id of the selected recipe, even if it no longer resolves.
    pub fn selected_id(&self) -> Option<&RecipeId> {
        self.selected_id.as_ref()
    }

    /// The selected recipe, or `None` if nothing is selected or it was removed.
    pub fn selected(&self) -> Option<&Recipe> {
        self.selected_id.as_ref().and_then(|id| self.store.get(id))
    }

    /// Select a recipe by id.
    pub fn select(&mut self, id: RecipeId) {
        debug!(recipe_id = %id, "Recipe selected");
        self.selected_id = Some(id);
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }

    /// Whether the editing form is open.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Open the form for a brand new recipe. Clears the selection.
    pub fn begin_create(&mut self) {
        self.selected_id = None;
        self.editing = true;
    }

    /// Open the form for the selected recipe. Returns `false` with no selection.
    pub fn begin_edit(&mut self) -> bool {
        if self.selected().is_none() {
            return false;
        }
        self.editing = true;
        true
    }

    /// Close the form without saving.
    pub fn cancel_edit(&mut self) {
        self.editing = false;
    }

    /// Save the form's draft and close the form.
    ///
    /// Updates the selected recipe when editing one; otherwise creates a new
    /// recipe and selects it. Returns the id of the saved recipe.
    #[instrument(skip(self, draft))]
    pub fn save(&mut self, draft: RecipeDraft) -> RecipeId {
        let existing = if self.editing {
            self.selected().map(|r| r.id.clone())
        } else {
            None
        };

        let id = match existing {
            Some(id) => {
                self.store.update(&id, draft);
                id
            }
            None => {
                let id = self.store.create(draft);
                self.selected_id = Some(id.clone());
                id
            }
        };

        self.editing = false;
        id
    }

    /// Flip the favorite flag of a recipe.
    pub fn toggle_favorite(&mut self, id: &RecipeId) -> Option<bool> {
        self.store.toggle_favorite(id)
    }

    /// Ask to delete a recipe; nothing is removed until [`confirm_delete`](Self::confirm_delete).
    ///
    /// Returns the recipe awaiting confirmation, or `None` if it does not exist.
    pub fn request_delete(&mut self, id: &RecipeId) -> Option<&Recipe> {
        if !self.store.contains(id) {
            self.pending_delete = None;
            return None;
        }
        self.pending_delete = Some(id.clone());
        self.store.get(id)
    }

    /// Recipe awaiting deletion confirmation.
    pub fn pending_delete(&self) -> Option<&RecipeId> {
        self.pending_delete.as_ref()
    }

    /// Apply the pending deletion. Returns whether a recipe was removed.
    pub fn confirm_delete(&mut self) -> bool {
        match self.pending_delete.take() {
            Some(id) => self.delete(&id),
            None => false,
        }
    }

    /// Discard the pending deletion.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete a recipe immediately, clearing the selection if it pointed at it.
    #[instrument(skip(self))]
    pub fn delete(&mut self, id: &RecipeId) -> bool {
        let removed = self.store.delete(id);

        if self.selected_id.as_ref() == Some(id) {
            self.selected_id = None;
            self.editing = false;
            info!(recipe_id = %id, "Selection cleared after delete");
        }

        if self.pending_delete.as_ref() == Some(id) {
            self.pending_delete = None;
        }

        removed
    }

    /// Merge sample recipes into the collection, see [`RecipeStore::merge_samples`].
    pub fn merge_samples(&mut self, samples: Vec<SampleRecipe>) -> usize {
        self.store.merge_samples(samples)
    }
}
