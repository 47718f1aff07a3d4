use chrono::{DateTime, Utc};

use crate::domain::{
    parse_cents, Category, Cents, Expense, ExpenseId, Ledger, ParseCentsError, ValidationError,
};

use super::AppError;

/// Snapshot handed to the render callback after every change.
pub struct LedgerView<'a> {
    /// Most recent first
    pub expenses: &'a [Expense],
    pub total: Cents,
    pub count: usize,
    /// Reference time for relative dates
    pub now: DateTime<Utc>,
}

impl<'a> LedgerView<'a> {
    pub fn new(ledger: &'a Ledger, now: DateTime<Utc>) -> Self {
        Self {
            expenses: ledger.list(),
            total: ledger.total(),
            count: ledger.count(),
            now,
        }
    }

    /// True when the empty-state indicator should be shown.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Render callback. Implementations must not keep state derived from earlier
/// views: every call receives the complete current state.
pub trait Render {
    fn render(&mut self, view: &LedgerView<'_>) -> Result<(), AppError>;
}

/// Owns the ledger and its renderer. This is the primary interface for any
/// front end (interactive session, tests, ...).
pub struct ExpenseTracker<R: Render> {
    ledger: Ledger,
    renderer: R,
}

impl<R: Render> ExpenseTracker<R> {
    /// Create a tracker with an empty ledger and render the empty state once.
    pub fn new(renderer: R) -> Result<Self, AppError> {
        let mut tracker = Self {
            ledger: Ledger::new(),
            renderer,
        };
        tracker.refresh()?;
        Ok(tracker)
    }

    /// Submit handler: validates raw form input and records the expense.
    ///
    /// On a validation error nothing is recorded and nothing is rendered; the
    /// error's [`ValidationError::field`] tells the caller which input to
    /// return to.
    pub fn submit(
        &mut self,
        raw_description: &str,
        raw_amount: &str,
        raw_category: &str,
    ) -> Result<Expense, AppError> {
        let (amount_cents, category) = parse_form(raw_description, raw_amount, raw_category)?;
        let expense = self.ledger.add(raw_description, amount_cents, category)?;
        self.refresh()?;
        Ok(expense)
    }

    /// Delete handler. Unknown ids leave the ledger as it is.
    pub fn delete(&mut self, id: ExpenseId) -> Result<Option<Expense>, AppError> {
        let removed = self.ledger.remove(id);
        if removed.is_none() {
            tracing::debug!(%id, "delete ignored, no such expense");
        }
        self.refresh()?;
        Ok(removed)
    }

    /// Find the expense a user-typed id refers to: the full id or the short
    /// id shown in listings (see [`Expense::matches_ref`]). A reference that
    /// fits several expenses is an error.
    pub fn find(&self, reference: &str) -> Result<Option<&Expense>, AppError> {
        let mut matches = self
            .ledger
            .list()
            .iter()
            .filter(|e| e.matches_ref(reference));

        match (matches.next(), matches.next()) {
            (Some(_), Some(_)) => Err(AppError::AmbiguousId(reference.trim().to_string())),
            (found, _) => Ok(found),
        }
    }

    /// Re-render the current state.
    pub fn refresh(&mut self) -> Result<(), AppError> {
        let view = LedgerView::new(&self.ledger, Utc::now());
        tracing::trace!(count = view.count, total = view.total, "rendering ledger");
        self.renderer.render(&view)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

/// Turn raw amount and category text into typed values, checking fields in
/// form order so that the first offending field is the one reported.
fn parse_form(
    raw_description: &str,
    raw_amount: &str,
    raw_category: &str,
) -> Result<(Cents, Option<Category>), ValidationError> {
    if raw_description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }

    let amount_cents = match parse_cents(raw_amount) {
        Ok(cents) => cents,
        Err(ParseCentsError::Overflow) => return Err(ValidationError::AmountOverflow),
        Err(ParseCentsError::InvalidFormat) => {
            return Err(ValidationError::InvalidAmount(raw_amount.trim().to_string()));
        }
    };
    if amount_cents == 0 && is_positive_fraction(raw_amount) {
        return Err(ValidationError::BelowSmallestUnit);
    }
    if amount_cents <= 0 {
        return Err(ValidationError::NonPositiveAmount);
    }

    let raw_category = raw_category.trim();
    if raw_category.is_empty() {
        return Ok((amount_cents, None));
    }
    let category = Category::from_str(raw_category)
        .ok_or_else(|| ValidationError::UnknownCategory(raw_category.to_string()))?;

    Ok((amount_cents, Some(category)))
}

/// True for text like "0.004": greater than zero, but lost when cut to cents.
fn is_positive_fraction(raw_amount: &str) -> bool {
    let raw_amount = raw_amount.trim();
    !raw_amount.starts_with('-') && raw_amount.chars().any(|c| ('1'..='9').contains(&c))
}
