use crate::recipe::Recipe;

use std::{convert::Infallible, fmt, str::FromStr};

/// Category predicate of the recipe list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every recipe passes.
    #[default]
    All,
    /// Only recipes whose category equals this exactly.
    Category(String),
}

impl CategoryFilter {
    /// Text that selects [`CategoryFilter::All`].
    pub const ALL: &'static str = "all";

    /// Whether `recipe` passes the category predicate.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(c) => recipe.category.as_deref() == Some(c.as_str()),
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == Self::ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value.to_string())
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(Self::ALL),
            CategoryFilter::Category(c) => f.write_str(c),
        }
    }
}

/// Session-only filter over the recipe list. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Category predicate.
    pub category: CategoryFilter,
    /// When set, only favorites pass.
    pub only_favorites: bool,
}

impl FilterState {
    /// Whether `recipe` passes both predicates.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.category.matches(recipe) && (!self.only_favorites || recipe.is_favorite)
    }
}
