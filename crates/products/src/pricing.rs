//! Operator channel for guarded price changes.
//!
//! Lowering a price needs a human "yes"; rejected writes are reported back to
//! the same operator. The channel is a trait so the console can be swapped for
//! scripted answers in automation and tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use storefront_core::Price;

/// Notice shown when a non-positive price is written.
pub const NON_POSITIVE_PRICE_NOTICE: &str = "Цена не должна быть нулевая или отрицательная";

/// Notice shown when the operator declines a price decrease.
pub const DECREASE_CANCELLED_NOTICE: &str = "Понижение цены отменено.";

/// Prompt asking the operator to confirm a price decrease.
pub fn decrease_prompt(old: Price, new: Price) -> String {
    format!("Подтвердите понижение цены с {old} до {new} (y/n): ")
}

/// Only a case-insensitive `y` counts as consent. The line terminator is
/// dropped; any other surrounding text (spaces included) is a refusal.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim_end_matches(['\r', '\n']).eq_ignore_ascii_case("y")
}

/// Human (or automated) party that approves price decreases.
pub trait PricingOperator {
    /// Ask a yes/no question and return the raw answer.
    fn ask(&self, prompt: &str) -> String;

    /// Report a rejected price write.
    fn notify(&self, _notice: &str) {}
}

impl<F> PricingOperator for F
where
    F: Fn(&str) -> String,
{
    fn ask(&self, prompt: &str) -> String {
        self(prompt)
    }
}

/// Interactive operator on stdin/stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleOperator;

impl ConsoleOperator {
    pub fn new() -> Self {
        Self
    }
}

impl PricingOperator for ConsoleOperator {
    fn ask(&self, prompt: &str) -> String {
        let mut stdout = io::stdout().lock();
        if let Err(e) = write!(stdout, "{prompt}").and_then(|_| stdout.flush()) {
            tracing::warn!(error = %e, "failed to write confirmation prompt");
        }

        let mut answer = String::new();
        if let Err(e) = io::stdin().lock().read_line(&mut answer) {
            // An unreadable answer is treated as "no".
            tracing::warn!(error = %e, "failed to read confirmation answer");
            return String::new();
        }
        answer
    }

    fn notify(&self, notice: &str) {
        println!("{notice}");
    }
}

/// Operator with pre-recorded answers.
///
/// Answers are consumed in order; once they run out every question is
/// answered with an empty string (a decline). Prompts and notices are kept
/// for inspection.
#[derive(Debug, Default)]
pub struct ScriptedOperator {
    answers: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    notices: Mutex<Vec<String>>,
}

impl ScriptedOperator {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Operator that declines everything.
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }
}

impl PricingOperator for ScriptedOperator {
    fn ask(&self, prompt: &str) -> String {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.pop_front())
            .unwrap_or_default()
    }

    fn notify(&self, notice: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.to_string());
        }
    }
}

/// Why a price write did not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceRejection {
    NonPositive,
    DecreaseCancelled,
}

impl PriceRejection {
    pub fn notice(self) -> &'static str {
        match self {
            PriceRejection::NonPositive => NON_POSITIVE_PRICE_NOTICE,
            PriceRejection::DecreaseCancelled => DECREASE_CANCELLED_NOTICE,
        }
    }
}

impl core::fmt::Display for PriceRejection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.notice())
    }
}

/// Outcome of a guarded price write. Neither variant is an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceUpdate {
    Applied { old: Price, new: Price },
    Rejected(PriceRejection),
}

impl PriceUpdate {
    pub fn is_applied(&self) -> bool {
        matches!(self, PriceUpdate::Applied { .. })
    }
}
