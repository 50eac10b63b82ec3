//! Terminal presentation of the quiz flow.
//!
//! The flow driver talks to a `View`; the state machine stays free of any
//! I/O. The terminal implementation paces page swaps with the fixed
//! animation delay applied by the driver and re-prompts only the controls
//! the previous attempt marked invalid.

use std::io::BufRead;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use truthcheck_core::flow::Choice;
use truthcheck_core::form::{DemographicForm, Field, Selection};
use truthcheck_core::model::{QuizPage, DEFAULT_OPTION};

/// Presentation seam for the quiz flow driver.
pub trait View {
    /// Show the intro; returns once the participant continues.
    fn intro(&mut self, count: usize) -> Result<()>;

    /// Show a question page and collect the participant's verdict.
    fn ask(&mut self, index: usize, count: usize, page: &QuizPage) -> Result<Choice>;

    /// Show the outro form and collect the next attempt. `invalid` holds
    /// the controls marked by the previous attempt; it is empty on the
    /// first pass.
    fn outro(&mut self, previous: &DemographicForm, invalid: &[Field]) -> Result<DemographicForm>;

    /// The submission started: hide the confirm control, show a loading
    /// indicator.
    fn submitting(&mut self);

    /// The submission finished.
    fn submitted(&mut self);
}

/// Interactive view reading answers from an input stream.
pub struct TerminalView<R> {
    input: R,
    spinner: Option<ProgressBar>,
}

impl TerminalView<std::io::BufReader<std::io::Stdin>> {
    pub fn new() -> Self {
        Self::with_reader(std::io::BufReader::new(std::io::stdin()))
    }
}

impl<R: BufRead> TerminalView<R> {
    pub fn with_reader(input: R) -> Self {
        Self {
            input,
            spinner: None,
        }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let bytes = self.input.read_line(&mut line)?;
        anyhow::ensure!(bytes > 0, "input closed");
        Ok(line)
    }

    /// Prompt for a select-style control. Empty input keeps the current
    /// value (or the placeholder when there is none).
    fn select(&mut self, prompt: &str, current: Option<&str>) -> Result<Selection> {
        println!("{prompt} [{}]", current.unwrap_or(DEFAULT_OPTION));
        let line = self.read_line()?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Ok(current
                .map(Selection::chosen)
                .unwrap_or(Selection::Placeholder))
        } else {
            Ok(Selection::chosen(trimmed))
        }
    }

    /// Like `select`, but constrained to yes/no.
    fn yes_no(&mut self, prompt: &str, current: Option<&str>) -> Result<Selection> {
        loop {
            match self.select(prompt, current)? {
                Selection::Chosen(v) if v != "yes" && v != "no" => {
                    println!("Please answer \"yes\" or \"no\".");
                }
                selection => return Ok(selection),
            }
        }
    }
}

impl<R: BufRead> View for TerminalView<R> {
    fn intro(&mut self, count: usize) -> Result<()> {
        println!("You will see {count} claims. Decide whether each one is fake or real.");
        println!("Press Enter to start.");
        self.read_line()?;
        Ok(())
    }

    fn ask(&mut self, index: usize, count: usize, page: &QuizPage) -> Result<Choice> {
        println!();
        println!("[{}/{count}] {}", index + 1, page.text);
        loop {
            println!("Fake or real?");
            let line = self.read_line()?;
            match line.trim().to_lowercase().as_str() {
                "fake" | "f" => return Ok(Choice::Fake),
                "real" | "r" => return Ok(Choice::Real),
                _ => println!("Please answer \"fake\" or \"real\"."),
            }
        }
    }

    fn outro(&mut self, previous: &DemographicForm, invalid: &[Field]) -> Result<DemographicForm> {
        let mut form = previous.clone();
        let prompt_all = invalid.is_empty();

        if !prompt_all {
            println!();
            for field in invalid {
                println!("✗ {}", field_label(*field));
            }
        } else {
            println!();
            println!("A few questions about you before the results.");
        }

        if prompt_all || invalid.contains(&Field::InUs) {
            form.in_us = self.yes_no(
                "Are you located in the United States? (yes/no)",
                previous.in_us.value(),
            )?;
        }

        // The specific-country selector only shows when the toggle is "no".
        if form.in_us.value() == Some("no") {
            if prompt_all || invalid.contains(&Field::Country) || form.country.value().is_none() {
                form.country =
                    self.select("Which country are you located in?", previous.country.value())?;
            }
        } else {
            form.country = Selection::Placeholder;
        }

        if prompt_all || invalid.contains(&Field::Side) {
            form.side = self.select("Which side do you lean towards?", previous.side.value())?;
        }

        if prompt_all || invalid.contains(&Field::Age) {
            let current = if previous.age.is_empty() {
                None
            } else {
                Some(previous.age.as_str())
            };
            match current {
                Some(age) => println!("How old are you? [{age}]"),
                None => println!("How old are you?"),
            }
            let line = self.read_line()?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                form.age = trimmed.to_string();
            }
        }

        Ok(form)
    }

    fn submitting(&mut self) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        spinner.set_message("Submitting results...");
        spinner.enable_steady_tick(Duration::from_millis(120));
        self.spinner = Some(spinner);
    }

    fn submitted(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        println!("Results submitted.");
    }
}

fn field_label(field: Field) -> &'static str {
    match field {
        Field::InUs => "the United States question needs a yes or no",
        Field::Country => "a specific country is needed",
        Field::Side => "a side is needed",
        Field::Age => "age must be a number",
    }
}
