//! Tokenizer for directive source text.
//!
//! Splits configuration text into whitespace-separated tokens, tracking the
//! line each token starts on. Double-quoted strings form a single token and
//! may contain whitespace and line breaks; `\"` inside quotes yields a literal
//! quote. A `#` at the start of a token comments out the rest of the line.
//! Outside quotes, `{` and `}` always stand alone.

use std::sync::Arc;

/// A single token of directive source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// File the token was read from
    pub file: Arc<str>,
    /// Line on which the token starts (1-based)
    pub line: usize,
    /// Token text with quotes removed
    pub text: String,
}

impl Token {
    /// Create a new token.
    pub fn new(file: impl Into<Arc<str>>, line: usize, text: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            text: text.into(),
        }
    }

    /// Number of line breaks embedded in the token text.
    pub(crate) fn line_breaks(&self) -> usize {
        self.text.matches('\n').count()
    }
}

/// Tokenize `input`, attributing every token to `file`.
///
/// # Example
///
/// ```
/// use armature_locale::lex;
///
/// let tokens = lex("Caddyfile", "locale en {\n  detect header\n}");
/// let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
/// assert_eq!(texts, ["locale", "en", "{", "detect", "header", "}"]);
/// assert_eq!(tokens[3].line, 2);
/// ```
pub fn lex(file: &str, input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(Arc::from(file));

    for ch in input.chars() {
        lexer.feed(ch);
    }

    lexer.finish()
}

struct Lexer {
    file: Arc<str>,
    tokens: Vec<Token>,
    text: String,
    line: usize,
    start_line: usize,
    quoted: bool,
    escaped: bool,
    comment: bool,
    // A closed pair of quotes produces a token even when empty.
    pending: bool,
}

impl Lexer {
    fn new(file: Arc<str>) -> Self {
        Self {
            file,
            tokens: Vec::new(),
            text: String::new(),
            line: 1,
            start_line: 1,
            quoted: false,
            escaped: false,
            comment: false,
            pending: false,
        }
    }

    fn feed(&mut self, ch: char) {
        if self.quoted {
            self.feed_quoted(ch);
            return;
        }

        if self.comment {
            if ch == '\n' {
                self.comment = false;
                self.line += 1;
            }
            return;
        }

        match ch {
            c if c.is_whitespace() => {
                self.flush();
                if c == '\n' {
                    self.line += 1;
                }
            }
            '#' if !self.pending => self.comment = true,
            '"' if !self.pending => {
                self.quoted = true;
                self.pending = true;
                self.start_line = self.line;
            }
            '{' | '}' => {
                self.flush();
                self.tokens
                    .push(Token::new(self.file.clone(), self.line, ch.to_string()));
            }
            _ => {
                if !self.pending {
                    self.pending = true;
                    self.start_line = self.line;
                }
                self.text.push(ch);
            }
        }
    }

    fn feed_quoted(&mut self, ch: char) {
        if self.escaped {
            self.escaped = false;
            if ch != '"' {
                self.text.push('\\');
            }
        } else if ch == '\\' {
            self.escaped = true;
            return;
        } else if ch == '"' {
            self.quoted = false;
            self.flush();
            return;
        }

        if ch == '\n' {
            self.line += 1;
        }
        self.text.push(ch);
    }

    fn flush(&mut self) {
        if !self.pending {
            return;
        }
        self.pending = false;
        let text = std::mem::take(&mut self.text);
        self.tokens
            .push(Token::new(self.file.clone(), self.start_line, text));
    }

    fn finish(mut self) -> Vec<Token> {
        // An unterminated quote still yields what was read.
        if self.escaped {
            self.text.push('\\');
        }
        self.flush();
        self.tokens
    }
}
