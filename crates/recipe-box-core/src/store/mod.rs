mod file_storage;
mod recipe_store;
mod storage;

pub use {
    file_storage::FileStorage,
    recipe_store::{DEFAULT_STORAGE_KEY, RecipeStore},
    storage::{KeyValueStore, MemoryStorage},
};
