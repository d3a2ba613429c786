//! Token cursor abstraction and the default token dispenser.
//!
//! The directive parser never touches raw text. It walks a [`TokenCursor`],
//! which a host can implement over its own configuration tokens. [`Dispenser`]
//! is the implementation used when loading from text.

use crate::error::{LocaleError, Position};
use crate::lexer::{Token, lex};
use std::sync::Arc;

/// Line-oriented walk over the tokens of one or more directive occurrences.
pub trait TokenCursor {
    /// Advance to the next token, regardless of line. At the top level this
    /// lands on the name of the next directive occurrence.
    fn next(&mut self) -> bool;

    /// Advance to the next token only if it is on the current line.
    fn next_arg(&mut self) -> bool;

    /// Advance to the first token of the next line inside a `{ ... }` block.
    ///
    /// Opens the block when called on the line that carries the `{`.
    /// Returns `false` once the block is closed or if there is none.
    fn next_block(&mut self) -> bool;

    /// Consume and return every remaining argument on the current line,
    /// stopping before an opening brace.
    fn remaining_args(&mut self) -> Vec<String>;

    /// Text of the current token.
    fn val(&self) -> &str;

    /// Position of the current token.
    fn position(&self) -> Position;

    /// Error for a line that is missing an argument or carries an unexpected
    /// token.
    fn arg_err(&self) -> LocaleError {
        if self.val() == "{" {
            return LocaleError::argument(
                self.position(),
                "Unexpected token '{', expecting argument",
            );
        }
        LocaleError::argument(
            self.position(),
            format!(
                "Wrong argument count or unexpected line ending after '{}'",
                self.val()
            ),
        )
    }
}

/// [`TokenCursor`] over an in-memory token list.
#[derive(Debug, Clone)]
pub struct Dispenser {
    origin: Arc<str>,
    tokens: Vec<Token>,
    cursor: Option<usize>,
    nesting: usize,
    directive_start: Option<usize>,
}

impl Dispenser {
    /// Create a dispenser over already lexed tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        let origin = tokens
            .first()
            .map(|t| t.file.clone())
            .unwrap_or_else(|| Arc::from("<input>"));
        Self::with_origin(origin, tokens)
    }

    /// Lex `input` and create a dispenser over the result.
    pub fn from_source(file: &str, input: &str) -> Self {
        Self::with_origin(Arc::from(file), lex(file, input))
    }

    fn with_origin(origin: Arc<str>, tokens: Vec<Token>) -> Self {
        Self {
            origin,
            tokens,
            cursor: None,
            nesting: 0,
            directive_start: None,
        }
    }

    /// Name of the directive whose occurrence is being walked.
    pub fn directive_name(&self) -> &str {
        self.directive_start
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.text.as_str())
            .unwrap_or("")
    }

    /// All tokens held by this dispenser.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn current(&self) -> Option<&Token> {
        self.cursor.and_then(|i| self.tokens.get(i))
    }

    fn advance(&mut self) -> bool {
        let next = self.cursor.map_or(0, |i| i + 1);
        if next < self.tokens.len() {
            self.cursor = Some(next);
            true
        } else {
            false
        }
    }

    fn back(&mut self) {
        self.cursor = match self.cursor {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }

    fn continues_line(&self, index: usize) -> bool {
        let (Some(current), Some(next)) = (self.tokens.get(index), self.tokens.get(index + 1))
        else {
            return false;
        };
        current.file == next.file && current.line + current.line_breaks() == next.line
    }
}

impl TokenCursor for Dispenser {
    fn next(&mut self) -> bool {
        if !self.advance() {
            return false;
        }
        if self.nesting == 0 {
            self.directive_start = self.cursor;
        }
        true
    }

    fn next_arg(&mut self) -> bool {
        let Some(index) = self.cursor else {
            return self.advance();
        };

        if !self.continues_line(index) {
            return false;
        }
        // Inside a block the closing brace belongs to next_block.
        if self.nesting > 0 && self.tokens[index + 1].text == "}" {
            return false;
        }
        self.cursor = Some(index + 1);
        true
    }

    fn next_block(&mut self) -> bool {
        if self.nesting > 0 {
            if !self.advance() {
                return false;
            }
            if self.val() == "}" {
                self.nesting -= 1;
                return false;
            }
            return true;
        }

        if !self.next_arg() {
            return false;
        }
        if self.val() != "{" {
            self.back();
            return false;
        }
        if !self.advance() {
            return false;
        }
        // Opened and closed right away.
        if self.val() == "}" {
            return false;
        }
        self.nesting += 1;
        true
    }

    fn remaining_args(&mut self) -> Vec<String> {
        let mut args = Vec::new();
        while self.next_arg() {
            if self.val() == "{" {
                self.back();
                break;
            }
            args.push(self.val().to_string());
        }
        args
    }

    fn val(&self) -> &str {
        self.current().map(|t| t.text.as_str()).unwrap_or("")
    }

    fn position(&self) -> Position {
        match self.current() {
            Some(token) => Position::new(token.file.clone(), token.line),
            None => Position::new(self.origin.clone(), 0),
        }
    }
}
