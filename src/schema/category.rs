use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// A descriptive grouping for an appearance property. Each rule belongs to
/// exactly one category; rendering processes categories in a fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    RaceSex,
    Build,
    Hair,
    Clothing,
    Extras,
}

impl Category {
    /// Every category, in rendering order. `Extras` properties are matched
    /// and returned but neither renderer emits output for them.
    pub const ALL: [Category; 5] = [
        Category::RaceSex,
        Category::Build,
        Category::Hair,
        Category::Clothing,
        Category::Extras,
    ];

    /// Parse a category from its metadata spelling (e.g. `"RaceSex"`).
    pub fn parse(s: &str) -> Option<Category> {
        match s {
            "RaceSex" => Some(Category::RaceSex),
            "Build" => Some(Category::Build),
            "Hair" => Some(Category::Hair),
            "Clothing" => Some(Category::Clothing),
            "Extras" => Some(Category::Extras),
            _ => None,
        }
    }

    /// The metadata spelling of this category.
    pub fn name(&self) -> &'static str {
        match self {
            Category::RaceSex => "RaceSex",
            Category::Build => "Build",
            Category::Hair => "Hair",
            Category::Clothing => "Clothing",
            Category::Extras => "Extras",
        }
    }
}

/// The set of categories a caller wants rendered. A category absent from the
/// set is skipped entirely, never rendered as an empty placeholder. Callers
/// describing a vague suspect can pass fewer categories than normal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    categories: FxHashSet<Category>,
}

impl CategorySet {
    /// The empty set. Rendering with it produces an empty string.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every category.
    pub fn all() -> Self {
        Self::of(&Category::ALL)
    }

    /// A set of exactly the given categories.
    pub fn of(categories: &[Category]) -> Self {
        Self {
            categories: categories.iter().copied().collect(),
        }
    }

    pub fn insert(&mut self, category: Category) {
        self.categories.insert(category);
    }

    pub fn contains(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        Self {
            categories: iter.into_iter().collect(),
        }
    }
}
