//! Calculator tool
//!
//! Validates input against a strict character allowlist, then evaluates
//! with a recursive-descent parser. Supports `+ - * /`, parentheses,
//! unary minus, and decimal numbers.

use crate::agent::tool::Tool;
use crate::error::{Error, Result};
use async_trait::async_trait;
use regex::Regex;

/// A tool for exact arithmetic the model should not attempt itself
pub struct CalculatorTool {
    allowed: Regex,
}

impl Default for CalculatorTool {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorTool {
    pub fn new() -> Self {
        Self {
            // Same allowlist the expression grammar accepts; anything
            // else is rejected before parsing.
            allowed: Regex::new(r"^[0-9+\-*/().\s]+$").expect("static regex"),
        }
    }

    /// Evaluate an arithmetic expression
    pub fn evaluate(&self, expression: &str) -> Result<f64> {
        // Models sometimes wrap the expression in quotes; strip them.
        let expression = expression.trim().trim_matches(|c| c == '\'' || c == '"');

        if expression.is_empty() || !self.allowed.is_match(expression) {
            return Err(Error::ToolFailed {
                tool_name: "calculator".to_string(),
                message: format!("invalid expression: {:?}", expression),
            });
        }

        let mut parser = ExprParser::new(expression);
        let value = parser.parse_expr()?;
        parser.expect_end()?;
        Ok(value)
    }
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "For mathematical calculations. Evaluates an arithmetic expression exactly."
    }

    fn usage(&self) -> &str {
        "Provide a plain expression WITHOUT quotes, using only numbers, + - * /, \
         parentheses, and decimal points. Example: (1234 * 567) / 2"
    }

    async fn call(&self, args: &str) -> Result<String> {
        let value = self.evaluate(args)?;
        // Render integers without a trailing ".0" for readability
        if value.fract() == 0.0 && value.abs() < 1e15 {
            Ok(format!("The result is: {}", value as i64))
        } else {
            Ok(format!("The result is: {}", value))
        }
    }
}

/// Recursive-descent parser over the byte slice of the expression
struct ExprParser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::ToolFailed {
            tool_name: "calculator".to_string(),
            message: message.into(),
        }
    }

    fn skip_ws(&mut self) {
        while self.pos < self.input.len() && self.input[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_ws();
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    /// expr := term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<f64> {
        let mut value = self.parse_term()?;
        while let Some(op) = self.peek() {
            match op {
                b'+' => {
                    self.bump();
                    value += self.parse_term()?;
                }
                b'-' => {
                    self.bump();
                    value -= self.parse_term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    /// term := factor (('*' | '/') factor)*
    fn parse_term(&mut self) -> Result<f64> {
        let mut value = self.parse_factor()?;
        while let Some(op) = self.peek() {
            match op {
                b'*' => {
                    self.bump();
                    value *= self.parse_factor()?;
                }
                b'/' => {
                    self.bump();
                    let divisor = self.parse_factor()?;
                    if divisor == 0.0 {
                        return Err(self.error("division by zero"));
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    /// factor := '-' factor | '(' expr ')' | number
    fn parse_factor(&mut self) -> Result<f64> {
        match self.peek() {
            Some(b'-') => {
                self.bump();
                Ok(-self.parse_factor()?)
            }
            Some(b'(') => {
                self.bump();
                let value = self.parse_expr()?;
                if self.peek() != Some(b')') {
                    return Err(self.error("missing closing parenthesis"));
                }
                self.bump();
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == b'.' => self.parse_number(),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c as char))),
            None => Err(self.error("unexpected end of expression")),
        }
    }

    fn parse_number(&mut self) -> Result<f64> {
        self.skip_ws();
        let start = self.pos;
        while self.pos < self.input.len()
            && (self.input[self.pos].is_ascii_digit() || self.input[self.pos] == b'.')
        {
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| self.error("invalid number"))?;
        text.parse::<f64>()
            .map_err(|_| self.error(format!("invalid number: {:?}", text)))
    }

    fn expect_end(&mut self) -> Result<()> {
        if let Some(c) = self.peek() {
            return Err(self.error(format!("trailing input at '{}'", c as char)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_basic_arithmetic() {
        let calc = CalculatorTool::new();
        assert_eq!(calc.evaluate("25 * 67").unwrap(), 1675.0);
        assert_eq!(calc.evaluate("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(calc.evaluate("(2 + 3) * 4").unwrap(), 20.0);
        assert_eq!(calc.evaluate("10 / 4").unwrap(), 2.5);
    }

    #[test]
    fn handles_unary_minus_and_decimals() {
        let calc = CalculatorTool::new();
        assert_eq!(calc.evaluate("-3 + 5").unwrap(), 2.0);
        assert_eq!(calc.evaluate("2 * -3").unwrap(), -6.0);
        assert_eq!(calc.evaluate("0.15 * 50000").unwrap(), 7500.0);
    }

    #[test]
    fn strips_surrounding_quotes() {
        let calc = CalculatorTool::new();
        assert_eq!(calc.evaluate("'1 + 1'").unwrap(), 2.0);
        assert_eq!(calc.evaluate("\"6 / 2\"").unwrap(), 3.0);
    }

    #[test]
    fn rejects_disallowed_characters() {
        let calc = CalculatorTool::new();
        assert!(calc.evaluate("2 + two").is_err());
        assert!(calc.evaluate("import os").is_err());
        assert!(calc.evaluate("").is_err());
    }

    #[test]
    fn rejects_malformed_syntax() {
        let calc = CalculatorTool::new();
        assert!(calc.evaluate("1 +").is_err());
        assert!(calc.evaluate("(1 + 2").is_err());
        assert!(calc.evaluate("1 2").is_err());
        assert!(calc.evaluate("1..2").is_err());
    }

    #[test]
    fn division_by_zero_is_an_error_not_a_panic() {
        let calc = CalculatorTool::new();
        assert!(calc.evaluate("1 / 0").is_err());
        assert!(calc.evaluate("1 / (2 - 2)").is_err());
    }

    #[tokio::test]
    async fn tool_output_formats_integers_cleanly() {
        let calc = CalculatorTool::new();
        assert_eq!(calc.call("1234 * 567").await.unwrap(), "The result is: 699678");
        assert_eq!(calc.call("10 / 4").await.unwrap(), "The result is: 2.5");
    }
}
