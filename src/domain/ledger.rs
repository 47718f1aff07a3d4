use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{Category, Cents, Expense, ExpenseId};

/// Input field an error refers to, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Description,
    Amount,
    Category,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Description => "description",
            Field::Amount => "amount",
            Field::Category => "category",
        };
        write!(f, "{}", name)
    }
}

/// Rejected input. A failed add never touches the ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a description")]
    EmptyDescription,

    #[error("Please enter a valid amount greater than 0 (got '{0}')")]
    InvalidAmount(String),

    #[error("Please enter a valid amount greater than 0")]
    NonPositiveAmount,

    #[error("Amount must be at least 0.01")]
    BelowSmallestUnit,

    #[error("Amount is too large for the running total")]
    AmountOverflow,

    #[error("Please select a category")]
    MissingCategory,

    #[error("Unknown category '{0}' (expected one of Food, Transport, Shopping, Other)")]
    UnknownCategory(String),
}

impl ValidationError {
    /// The field the user has to correct.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::EmptyDescription => Field::Description,
            ValidationError::InvalidAmount(_)
            | ValidationError::NonPositiveAmount
            | ValidationError::BelowSmallestUnit
            | ValidationError::AmountOverflow => Field::Amount,
            ValidationError::MissingCategory | ValidationError::UnknownCategory(_) => {
                Field::Category
            }
        }
    }
}

/// In-memory expense ledger.
///
/// Records are kept newest first. The running total is cached and is always
/// the sum of the stored amounts: both are only changed together by
/// [`Ledger::add_at`] and [`Ledger::remove`].
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    expenses: Vec<Expense>,
    total: Cents,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and record an expense created now.
    pub fn add(
        &mut self,
        description: &str,
        amount_cents: Cents,
        category: Option<Category>,
    ) -> Result<Expense, ValidationError> {
        self.add_at(description, amount_cents, category, Utc::now())
    }

    /// Validate and record an expense with an explicit creation time.
    ///
    /// Checks run in form order (description, amount, category) and the first
    /// failure is returned.
    pub fn add_at(
        &mut self,
        description: &str,
        amount_cents: Cents,
        category: Option<Category>,
        created_at: DateTime<Utc>,
    ) -> Result<Expense, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if amount_cents <= 0 {
            return Err(ValidationError::NonPositiveAmount);
        }
        let category = category.ok_or(ValidationError::MissingCategory)?;
        let total = self
            .total
            .checked_add(amount_cents)
            .ok_or(ValidationError::AmountOverflow)?;

        let expense = Expense::new(description.to_string(), amount_cents, category, created_at);
        self.expenses.insert(0, expense.clone());
        self.total = total;

        tracing::debug!(
            id = %expense.id,
            amount_cents,
            category = %category,
            total = self.total,
            "expense added"
        );
        Ok(expense)
    }

    /// Remove an expense by id, returning it. Unknown ids are ignored.
    ///
    /// The total is reduced by the stored record's own amount.
    pub fn remove(&mut self, id: ExpenseId) -> Option<Expense> {
        let index = self.expenses.iter().position(|e| e.id == id)?;
        let expense = self.expenses.remove(index);
        self.total -= expense.amount_cents;

        tracing::debug!(
            id = %expense.id,
            amount_cents = expense.amount_cents,
            total = self.total,
            "expense removed"
        );
        Some(expense)
    }

    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn total(&self) -> Cents {
        self.total
    }

    pub fn count(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// All expenses, most recent first.
    pub fn list(&self) -> &[Expense] {
        &self.expenses
    }
}
