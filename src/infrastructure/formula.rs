// Chemical formula parsing
// Nested ( ) / [ ] groups with multipliers, decimal amounts, repeats summed in first-appearance order

use crate::domain::error::{Error, Result};

use super::periodic_table;

/// Parses `formula` into `(symbol, amount)` pairs.
///
/// # Errors
///
/// - [`Error::FormulaParse`] for empty input, stray characters, unbalanced
///   or empty groups, and malformed amounts
/// - [`Error::UnknownElement`] for a well-formed symbol missing from the
///   periodic table
pub fn parse_formula(formula: &str) -> Result<Vec<(String, f64)>> {
    let mut parser = Parser {
        formula,
        chars: formula.chars().filter(|c| !c.is_whitespace()).collect(),
        pos: 0,
    };
    let amounts = parser.sequence(None)?;
    if amounts.is_empty() {
        return Err(Error::formula_parse(formula, "formula contains no elements"));
    }
    Ok(amounts)
}

struct Parser<'a> {
    formula: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        Error::formula_parse(self.formula, reason)
    }

    /// Parses terms until `closing` (or end of input at top level).
    fn sequence(&mut self, closing: Option<char>) -> Result<Vec<(String, f64)>> {
        let mut amounts = Vec::new();
        loop {
            match self.peek() {
                None => match closing {
                    Some(c) => return Err(self.error(format!("missing closing '{c}'"))),
                    None => break,
                },
                Some(c) if Some(c) == closing => {
                    self.pos += 1;
                    break;
                }
                Some(open @ ('(' | '[')) => {
                    self.pos += 1;
                    let close = if open == '(' { ')' } else { ']' };
                    let inner = self.sequence(Some(close))?;
                    if inner.is_empty() {
                        return Err(self.error(format!("empty group '{open}{close}'")));
                    }
                    let multiplier = self.amount()?.unwrap_or(1.0);
                    for (symbol, amount) in inner {
                        merge(&mut amounts, symbol, amount * multiplier);
                    }
                }
                Some(c) if c.is_ascii_uppercase() => {
                    let symbol = self.symbol();
                    if periodic_table::lookup(&symbol).is_none() {
                        return Err(Error::UnknownElement(symbol));
                    }
                    let amount = self.amount()?.unwrap_or(1.0);
                    merge(&mut amounts, symbol, amount);
                }
                Some(c) => {
                    return Err(self.error(format!(
                        "unexpected character '{c}' at position {}",
                        self.pos
                    )))
                }
            }
        }
        Ok(amounts)
    }

    fn symbol(&mut self) -> String {
        let start = self.pos;
        self.pos += 1;
        while self.peek().is_some_and(|c| c.is_ascii_lowercase()) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn amount(&mut self) -> Result<Option<f64>> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.peek() == Some('.') {
            self.pos += 1;
            let fraction = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
            if fraction == self.pos {
                return Err(self.error("decimal point without digits"));
            }
        }
        if start == self.pos {
            return Ok(None);
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse()
            .map(Some)
            .map_err(|_| self.error(format!("invalid amount '{text}'")))
    }
}

fn merge(amounts: &mut Vec<(String, f64)>, symbol: String, amount: f64) {
    match amounts.iter_mut().find(|(s, _)| *s == symbol) {
        Some((_, total)) => *total += amount,
        None => amounts.push((symbol, amount)),
    }
}
