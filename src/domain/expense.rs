use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Category, Cents};

/// Expense ids are UUIDv7: time-derived, so later records sort after earlier ones.
pub type ExpenseId = Uuid;

/// A single expense. Records are immutable once created; the only way to
/// change the ledger is to add or remove whole records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    /// Trimmed, never empty
    pub description: String,
    /// Amount in cents (always positive)
    pub amount_cents: Cents,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Build a record. Validation is the ledger's job, see [`super::Ledger::add`].
    pub(crate) fn new(
        description: String,
        amount_cents: Cents,
        category: Category,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            description,
            amount_cents,
            category,
            created_at,
        }
    }

    pub fn icon(&self) -> &'static str {
        self.category.icon()
    }

    /// Last eight hex digits of the id, as shown in listings. The leading
    /// digits are the creation timestamp and repeat within a session.
    pub fn short_id(&self) -> String {
        let simple = self.id.simple().to_string();
        simple[simple.len() - 8..].to_string()
    }

    /// True if `reference` is this id (any case, hyphens optional) or its
    /// trailing digits.
    pub fn matches_ref(&self, reference: &str) -> bool {
        let needle: String = reference
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        !needle.is_empty() && self.id.simple().to_string().ends_with(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let now = Utc::now();
        let first = Expense::new("Coffee".into(), 450, Category::Food, now);
        let second = Expense::new("Bus".into(), 200, Category::Transport, now);

        assert_ne!(first.id, second.id);
        assert!(second.id > first.id);
    }

    #[test]
    fn test_short_id_is_suffix_of_id() {
        let expense = Expense::new("Coffee".into(), 450, Category::Food, Utc::now());
        let short = expense.short_id();

        assert_eq!(short.len(), 8);
        assert!(expense.id.to_string().ends_with(&short));
    }

    #[test]
    fn test_short_ids_differ_within_a_session() {
        let now = Utc::now();
        let first = Expense::new("Coffee".into(), 450, Category::Food, now);
        let second = Expense::new("Bus".into(), 200, Category::Transport, now);

        assert_ne!(first.short_id(), second.short_id());
    }

    #[test]
    fn test_matches_ref() {
        let expense = Expense::new("Coffee".into(), 450, Category::Food, Utc::now());

        assert!(expense.matches_ref(&expense.short_id()));
        assert!(expense.matches_ref(&expense.id.to_string()));
        assert!(expense.matches_ref(&expense.id.hyphenated().to_string().to_uppercase()));
        assert!(expense.matches_ref(&format!(" {} ", expense.id.simple())));
        assert!(!expense.matches_ref(""));
        assert!(!expense.matches_ref("zz"));
    }
}
