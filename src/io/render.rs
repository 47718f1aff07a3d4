use serde::Serialize;
use std::io::Write;

use crate::application::{AppError, LedgerView, Render};
use crate::domain::{format_cents, relative_date, Cents, Expense};

/// Shown instead of the list when there are no expenses.
pub const EMPTY_STATE: &str = "No expenses yet. Add one to get started.";

const DESCRIPTION_WIDTH: usize = 24;
const META_WIDTH: usize = 24;

/// Human-readable list with totals, for interactive use.
pub struct TableRenderer<W: Write> {
    out: W,
    currency: String,
}

impl<W: Write> TableRenderer<W> {
    pub fn new(out: W, currency: impl Into<String>) -> Self {
        Self {
            out,
            currency: currency.into(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn money(&self, cents: Cents) -> String {
        format!("{}{}", self.currency, format_cents(cents))
    }
}

impl<W: Write> Render for TableRenderer<W> {
    fn render(&mut self, view: &LedgerView<'_>) -> Result<(), AppError> {
        writeln!(self.out)?;
        if view.is_empty() {
            writeln!(self.out, "{}", EMPTY_STATE)?;
        } else {
            for expense in view.expenses {
                let meta = format!(
                    "{} · {}",
                    expense.category,
                    relative_date(expense.created_at, view.now)
                );
                let line = format!(
                    "{} {:<desc_w$} {:<meta_w$} {:>12}  [{}]",
                    expense.icon(),
                    truncate(&expense.description, DESCRIPTION_WIDTH),
                    meta,
                    self.money(expense.amount_cents),
                    expense.short_id(),
                    desc_w = DESCRIPTION_WIDTH,
                    meta_w = META_WIDTH,
                );
                writeln!(self.out, "{}", line)?;
            }
        }
        let summary = format!(
            "Total: {}   Expenses: {}",
            self.money(view.total),
            view.count
        );
        writeln!(self.out, "{}", "-".repeat(72))?;
        writeln!(self.out, "{}", summary)?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonView<'a> {
    expenses: &'a [Expense],
    total: String,
    total_cents: Cents,
    count: usize,
}

/// One pretty-printed JSON document per render.
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Render for JsonRenderer<W> {
    fn render(&mut self, view: &LedgerView<'_>) -> Result<(), AppError> {
        let doc = JsonView {
            expenses: view.expenses,
            total: format_cents(view.total),
            total_cents: view.total,
            count: view.count,
        };
        serde_json::to_writer_pretty(&mut self.out, &doc)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Full CSV table (header included) per render.
pub struct CsvRenderer<W: Write> {
    out: W,
}

impl<W: Write> CsvRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Render for CsvRenderer<W> {
    fn render(&mut self, view: &LedgerView<'_>) -> Result<(), AppError> {
        let mut csv_writer = csv::Writer::from_writer(&mut self.out);

        csv_writer.write_record([
            "id",
            "created_at",
            "description",
            "category",
            "amount_cents",
            "amount",
        ])?;

        for expense in view.expenses {
            csv_writer.write_record([
                expense.id.to_string(),
                expense.created_at.to_rfc3339(),
                expense.description.clone(),
                expense.category.to_string(),
                expense.amount_cents.to_string(),
                format_cents(expense.amount_cents),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Renderer picked at runtime from the output format.
pub enum OutputRenderer<W: Write> {
    Table(TableRenderer<W>),
    Json(JsonRenderer<W>),
    Csv(CsvRenderer<W>),
}

impl<W: Write> Render for OutputRenderer<W> {
    fn render(&mut self, view: &LedgerView<'_>) -> Result<(), AppError> {
        match self {
            OutputRenderer::Table(r) => r.render(view),
            OutputRenderer::Json(r) => r.render(view),
            OutputRenderer::Csv(r) => r.render(view),
        }
    }
}

/// Cut `s` to at most `max_chars` characters, marking the cut with "...".
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
