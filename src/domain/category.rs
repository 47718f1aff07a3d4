use serde::{Deserialize, Serialize};

/// Glyph shown for categories without a dedicated icon.
pub const DEFAULT_ICON: &str = "📦";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }

    /// Case-insensitive lookup by name. Surrounding whitespace is ignored.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(Category::Food),
            "transport" => Some(Category::Transport),
            "shopping" => Some(Category::Shopping),
            "other" => Some(Category::Other),
            _ => None,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Food => "🍔",
            Category::Transport => "🚗",
            Category::Shopping => "🛍️",
            Category::Other => DEFAULT_ICON,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Icon for a category given by name. Unknown names get [`DEFAULT_ICON`].
pub fn category_icon(category: &str) -> &'static str {
    Category::from_str(category)
        .map(|c| c.icon())
        .unwrap_or(DEFAULT_ICON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(Category::from_str("food"), Some(Category::Food));
        assert_eq!(Category::from_str(" TRANSPORT "), Some(Category::Transport));
        assert_eq!(Category::from_str(""), None);
        assert_eq!(Category::from_str("Groceries"), None);
    }

    #[test]
    fn test_category_icons() {
        assert_eq!(category_icon("Food"), "🍔");
        assert_eq!(category_icon("Transport"), "🚗");
        assert_eq!(category_icon("Shopping"), "🛍️");
        assert_eq!(category_icon("Other"), "📦");
    }

    #[test]
    fn test_unknown_category_gets_default_icon() {
        assert_eq!(category_icon("Rent"), DEFAULT_ICON);
        assert_eq!(category_icon(""), DEFAULT_ICON);
    }
}
