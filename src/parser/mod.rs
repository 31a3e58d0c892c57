//! Handles parsing of roll requests.
// This is put inside a module for organization with the pest grammar file.

use pest::error::{Error, ErrorVariant, LineColLocation};
use pest::iterators::Pair;
use pest::{Parser, Span};
use crate::roll::DrawBudget;

mod request {
    #![allow(missing_docs)]

    use std::fmt::{Display, Formatter};
    use pest_derive::Parser;
    #[derive(Parser)]
    #[grammar = "parser/request.pest"]
    pub struct Parser;

    impl Display for Rule {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", match self {
                Rule::request => "a roll request",
                Rule::spark => "\"spark\"",
                Rule::until => "\"until\"",
                Rule::target => "an item name",
                Rule::budget => "a budget",
                Rule::amount => "an amount",
                Rule::number => "a number",
                Rule::crystals => "crystals",
                Rule::ten_parts => "ten-parts",
                Rule::singles => "singles",
                Rule::EOI => "the end of the input",
                _ => "<internal token>"
            })
        }
    }
}
pub use request::Rule;

/// What a roll command asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollCommand {
    /// Spend a budget.
    Budget(DrawBudget),
    /// Roll until the named item shows up.
    Until(String),
}

/// Joins a list of things into English.
fn list(mut things: Vec<String>) -> String {
    match things.len() {
        0 | 1 => things.pop().unwrap_or_default(),
        2 => things.join(" or "),
        _ => {
            let last = things.pop().unwrap_or_default();
            format!("{}, or {last}", things.join(", "))
        }
    }
}

/// Formats a pest error for better readability.
fn handle_error(error: Error<Rule>) -> Error<Rule> {
    let ErrorVariant::ParsingError { positives, negatives } = &error.variant else {
        return error;
    };
    let needed = positives
        .iter()
        .map(|rule| format!("{rule}"))
        .collect::<Vec<String>>();
    let unexpected = negatives
        .iter()
        .map(|rule| format!("{rule}"))
        .collect::<Vec<String>>();
    // Construct error messages for both needed and unexpected tokens
    let needed_message = if needed.is_empty() {
        String::new()
    } else {
        format!("expected {} here\n", list(needed))
    };
    let unexpected_message = if unexpected.is_empty() {
        String::new()
    } else {
        format!("did not expect {} here", list(unexpected))
    };
    let mut formatted_error = error.clone();
    formatted_error.variant = ErrorVariant::CustomError {
        message: format!("{needed_message}{unexpected_message}").trim_end().to_string()
    };
    formatted_error
}

/// Describes a parse error without echoing the input back.
#[must_use]
pub fn describe(error: &Error<Rule>) -> String {
    let (LineColLocation::Pos((line, column)) | LineColLocation::Span((line, column), _)) = &error.line_col;
    format!("at {line}:{column}: {}", error.variant.message())
}

/// Creates an error pointing at part of the input.
fn span_error(span: Span<'_>, message: &str) -> Error<Rule> {
    Error::new_from_span(
        ErrorVariant::CustomError { message: message.to_string() },
        span
    )
}

/// Adds one `<number> <unit>` amount to a budget.
#[allow(clippy::result_large_err)]
fn add_amount(budget: &mut DrawBudget, amount: Pair<'_, Rule>) -> Result<(), Error<Rule>> {
    let span = amount.as_span();
    let mut parts = amount.into_inner();
    let (Some(number), Some(unit)) = (parts.next(), parts.next()) else {
        unreachable!("the grammar gives every amount a number and a unit")
    };
    let value = number.as_str()
        .replace(',', "")
        .parse::<u32>()
        .map_err(|_| span_error(number.as_span(), "this number is too big"))?;
    let slot = match unit.as_rule() {
        Rule::crystals => &mut budget.crystals,
        Rule::ten_parts => &mut budget.ten_parts,
        Rule::singles => &mut budget.singles,
        rule => unreachable!("{rule:?} is not a unit")
    };
    *slot = slot.checked_add(value)
        .ok_or_else(|| span_error(span, "this adds up to too much"))?;
    Ok(())
}

/// Parses the text of a roll command.
///
/// # Errors
/// Errors if the request fails to parse.
#[allow(clippy::result_large_err)]
pub fn parse(text: &str) -> Result<RollCommand, Error<Rule>> {
    let mut pairs = request::Parser::parse(Rule::request, text).map_err(handle_error)?;
    let Some(command) = pairs.next().and_then(|request| request.into_inner().next()) else {
        unreachable!("the grammar always gives a request a command")
    };
    match command.as_rule() {
        Rule::spark => Ok(RollCommand::Budget(DrawBudget::spark())),
        Rule::until => {
            let target = command.into_inner()
                .next()
                .map(|target| target.as_str().trim().to_string())
                .unwrap_or_default();
            Ok(RollCommand::Until(target))
        },
        Rule::budget => {
            let mut budget = DrawBudget::default();
            for amount in command.into_inner() {
                add_amount(&mut budget, amount)?;
            }
            Ok(RollCommand::Budget(budget))
        },
        rule => unreachable!("{rule:?} is not a command")
    }
}
