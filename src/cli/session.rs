use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};

use crate::application::{AppError, ExpenseTracker, Render};
use crate::domain::{format_cents, Category, Cents, Expense, Field};

/// One line of session input.
#[derive(Parser, Debug)]
#[command(name = "spendlog", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Add an expense (missing fields are asked for)
    Add {
        /// What the money was spent on
        description: Option<String>,

        /// Amount (e.g., "4.50" or "4")
        #[arg(allow_hyphen_values = true)]
        amount: Option<String>,

        /// Food, Transport, Shopping or Other
        category: Option<String>,
    },

    /// Delete an expense by id (the short id from the list is enough)
    #[command(alias = "rm")]
    Delete {
        /// Expense id as shown in the list
        id: String,
    },

    /// Show the expense list again
    List,

    /// Show the running total and count
    Total,

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

/// Field values of the add form, in form order.
struct Form {
    values: [Option<String>; 3],
}

impl Form {
    fn slot(field: Field) -> usize {
        match field {
            Field::Description => 0,
            Field::Amount => 1,
            Field::Category => 2,
        }
    }

    fn label(slot: usize) -> String {
        match slot {
            0 => "Description".to_string(),
            1 => "Amount".to_string(),
            _ => {
                let names: Vec<_> = Category::ALL.iter().map(|c| c.as_str()).collect();
                format!("Category ({})", names.join("/"))
            }
        }
    }

    fn value(&self, slot: usize) -> &str {
        self.values[slot].as_deref().unwrap_or("")
    }
}

/// Line-driven front end over an [`ExpenseTracker`].
///
/// Reads commands from `input`, writes messages to `output` and leaves the
/// expense list itself to the tracker's renderer.
pub struct Session<R: Render, I: BufRead, O: Write> {
    tracker: ExpenseTracker<R>,
    input: I,
    output: O,
    currency: String,
    prompt: bool,
}

impl<R: Render, I: BufRead, O: Write> Session<R, I, O> {
    pub fn new(
        tracker: ExpenseTracker<R>,
        input: I,
        output: O,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            tracker,
            input,
            output,
            currency: currency.into(),
            prompt: false,
        }
    }

    /// Print a prompt before reading each line (for terminals).
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn tracker(&self) -> &ExpenseTracker<R> {
        &self.tracker
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Process commands until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        while let Some(line) = self.read_line("> ")? {
            let args = match split_args(&line) {
                Ok(args) => args,
                Err(err) => {
                    writeln!(self.output, "Error: {}", err)?;
                    continue;
                }
            };
            if args.is_empty() {
                continue;
            }

            let command = match SessionLine::try_parse_from(&args) {
                Ok(parsed) => parsed.command,
                Err(err) => {
                    write!(self.output, "{}", err.render())?;
                    continue;
                }
            };

            if !self.dispatch(command)? {
                break;
            }
        }
        Ok(())
    }

    /// Run one command. Returns false when the session should end.
    fn dispatch(&mut self, command: SessionCommand) -> Result<bool> {
        match command {
            SessionCommand::Add {
                description,
                amount,
                category,
            } => {
                let form = Form {
                    values: [description, amount, category],
                };
                if form.values.iter().all(Option::is_some) {
                    self.add_once(&form)?;
                } else {
                    self.add_guided(form)?;
                }
            }

            SessionCommand::Delete { id } => self.delete(&id)?,

            SessionCommand::List => self.tracker.refresh()?,

            SessionCommand::Total => {
                let ledger = self.tracker.ledger();
                let line = format!(
                    "Total: {}   Expenses: {}",
                    self.money(ledger.total()),
                    ledger.count()
                );
                writeln!(self.output, "{}", line)?;
            }

            SessionCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn add_once(&mut self, form: &Form) -> Result<()> {
        match self.submit(form)? {
            Ok(expense) => self.report_added(&expense)?,
            Err(field) => writeln!(self.output, "(check the {})", field)?,
        }
        Ok(())
    }

    /// Ask for every missing field, submit, and on a validation error go back
    /// to the offending field only. End of input cancels the form.
    fn add_guided(&mut self, mut form: Form) -> Result<()> {
        loop {
            for slot in 0..form.values.len() {
                if form.values[slot].is_some() {
                    continue;
                }
                let prompt = format!("{}: ", Form::label(slot));
                match self.read_line(&prompt)? {
                    Some(value) => form.values[slot] = Some(value),
                    None => {
                        writeln!(self.output, "Cancelled.")?;
                        return Ok(());
                    }
                }
            }

            match self.submit(&form)? {
                Ok(expense) => return self.report_added(&expense),
                Err(field) => form.values[Form::slot(field)] = None,
            }
        }
    }

    /// Submit the form. Validation errors are reported to the user and
    /// returned as the field to correct; other errors abort.
    fn submit(&mut self, form: &Form) -> Result<std::result::Result<Expense, Field>> {
        match self
            .tracker
            .submit(form.value(0), form.value(1), form.value(2))
        {
            Ok(expense) => Ok(Ok(expense)),
            Err(AppError::Validation(err)) => {
                writeln!(self.output, "{}", err)?;
                Ok(Err(err.field()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn report_added(&mut self, expense: &Expense) -> Result<()> {
        let line = format!(
            "Added {} {} {} [{}]",
            expense.icon(),
            expense.description,
            self.money(expense.amount_cents),
            expense.short_id()
        );
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    fn delete(&mut self, raw_id: &str) -> Result<()> {
        let id = match self.tracker.find(raw_id) {
            Ok(Some(expense)) => expense.id,
            Ok(None) => {
                writeln!(self.output, "No expense matches '{}'", raw_id)?;
                return Ok(());
            }
            Err(err @ AppError::AmbiguousId(_)) => {
                writeln!(self.output, "{}", err)?;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        if let Some(removed) = self.tracker.delete(id)? {
            let line = format!(
                "Deleted {} {}",
                removed.description,
                self.money(removed.amount_cents)
            );
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    /// Read the next line. Lines that are not valid UTF-8 are reported and
    /// skipped; `None` means end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        loop {
            if self.prompt {
                write!(self.output, "{}", prompt)?;
                self.output.flush()?;
            }
            let mut buf = Vec::new();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }
            match String::from_utf8(buf) {
                Ok(line) => return Ok(Some(line.trim_end_matches(['\r', '\n']).to_string())),
                Err(_) => writeln!(self.output, "Error: input is not valid UTF-8")?,
            }
        }
    }

    fn money(&self, cents: Cents) -> String {
        format!("{}{}", self.currency, format_cents(cents))
    }
}

/// Split a command line into arguments. Single or double quotes group words;
/// a backslash inside double quotes escapes the next character.
fn split_args(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' => {
                in_arg = true;
                let quote = c;
                loop {
                    match chars.next() {
                        Some(ch) if ch == quote => break,
                        Some('\\') if quote == '"' => match chars.next() {
                            Some(escaped) => current.push(escaped),
                            None => bail!("unterminated quote"),
                        },
                        Some(ch) => current.push(ch),
                        None => bail!("unterminated quote"),
                    }
                }
            }
            c if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            c => {
                in_arg = true;
                current.push(c);
            }
        }
    }
    if in_arg {
        args.push(current);
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_args_plain() {
        assert_eq!(
            split_args("add Coffee 4.50 Food").unwrap(),
            vec!["add", "Coffee", "4.50", "Food"]
        );
        assert!(split_args("   ").unwrap().is_empty());
    }

    #[test]
    fn test_split_args_quotes() {
        assert_eq!(
            split_args(r#"add "Coffee beans" 4.50 'Food'"#).unwrap(),
            vec!["add", "Coffee beans", "4.50", "Food"]
        );
        assert_eq!(
            split_args(r#"add "Say \"hi\"" 1 Other"#).unwrap(),
            vec!["add", r#"Say "hi""#, "1", "Other"]
        );
        assert_eq!(split_args(r#"add "" 1 Food"#).unwrap(), vec!["add", "", "1", "Food"]);
    }

    #[test]
    fn test_split_args_unterminated_quote() {
        assert!(split_args(r#"add "Coffee 4.50 Food"#).is_err());
    }

    #[test]
    fn test_session_line_parsing() {
        let parsed = SessionLine::try_parse_from(["add", "Coffee", "-2", "Food"]).unwrap();
        assert!(matches!(
            parsed.command,
            SessionCommand::Add { amount: Some(ref a), .. } if a == "-2"
        ));

        let parsed = SessionLine::try_parse_from(["rm", "9f3c21ab"]).unwrap();
        assert!(matches!(parsed.command, SessionCommand::Delete { ref id } if id == "9f3c21ab"));

        let parsed = SessionLine::try_parse_from(["exit"]).unwrap();
        assert!(matches!(parsed.command, SessionCommand::Quit));

        assert!(SessionLine::try_parse_from(["frobnicate"]).is_err());
    }
}
