use serde_derive::{Deserialize, Serialize};

use crate::domain::logic::utils::{new_id, pick_index};

use super::collection::Collection;

/// Fallback color for transactions whose category name no longer resolves.
pub const UNCATEGORIZED_COLOR: &str = "#94a3b8";

pub const CATEGORY_PALETTE: [&str; 10] = [
    "#f87171", "#60a5fa", "#fbbf24", "#a78bfa", "#34d399", "#fb7185", "#94a3b8", "#818cf8",
    "#c084fc", "#fb923c",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Hex color, ex. "#f87171".
    pub color: String,
}

impl Category {
    /// New category with a fresh id and a color drawn from the palette.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            color: CATEGORY_PALETTE[pick_index(CATEGORY_PALETTE.len())].to_string(),
        }
    }

    pub fn with_color(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Seed categories, used until the category collection is first persisted.
pub fn default_categories() -> Vec<Category> {
    [
        ("1", "Food & Dining", "#f87171"),
        ("2", "Transportation", "#60a5fa"),
        ("3", "Shopping", "#fbbf24"),
        ("4", "Entertainment", "#a78bfa"),
        ("5", "Health", "#34d399"),
        ("6", "Bills", "#fb7185"),
        ("7", "Others", "#94a3b8"),
    ]
    .into_iter()
    .map(|(id, name, color)| Category {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
    })
    .collect()
}

impl Collection for Category {
    const STORAGE_KEY: &'static str = "spendwise_categories";
    const NAME: &'static str = "categories";
    const FLOOR: usize = 1;

    fn id(&self) -> &str {
        &self.id
    }

    fn default_collection() -> Vec<Self> {
        default_categories()
    }
}
