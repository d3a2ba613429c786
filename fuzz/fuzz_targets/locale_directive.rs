//! Fuzz target for structured locale directives.
//!
//! Builds well-formed directive text from arbitrary block lines so the
//! fuzzer spends its time in keyword dispatch rather than in the lexer.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use armature_locale::{LocaleError, MethodRegistry, parse_source};

#[derive(Debug, Arbitrary)]
struct FuzzDirective {
    inline: Vec<FuzzWord>,
    lines: Vec<FuzzLine>,
}

#[derive(Debug, Arbitrary)]
struct FuzzLine {
    keyword: FuzzKeyword,
    args: Vec<FuzzWord>,
}

#[derive(Debug, Arbitrary)]
enum FuzzKeyword {
    Available,
    Detect,
    Cookie,
    Path,
    Other(FuzzWord),
}

#[derive(Debug, Arbitrary)]
enum FuzzWord {
    Header,
    Cookie,
    Path,
    Locale(u8),
    Quoted(String),
}

impl FuzzWord {
    fn render(&self) -> String {
        match self {
            FuzzWord::Header => "header".to_string(),
            FuzzWord::Cookie => "Cookie".to_string(),
            FuzzWord::Path => "\" path \"".to_string(),
            FuzzWord::Locale(n) => format!("l{}", n),
            FuzzWord::Quoted(s) => {
                // Braces inside quotes still read as block delimiters.
                let cleaned: String = s
                    .chars()
                    .filter(|c| !matches!(c, '\\' | '{' | '}'))
                    .collect();
                format!("\"{}\"", cleaned.replace('"', "\\\""))
            }
        }
    }
}

impl FuzzDirective {
    fn render(&self) -> String {
        let mut out = String::from("locale");
        for word in &self.inline {
            out.push(' ');
            out.push_str(&word.render());
        }
        out.push_str(" {\n");
        for line in &self.lines {
            let keyword = match &line.keyword {
                FuzzKeyword::Available => "available".to_string(),
                FuzzKeyword::Detect => "detect".to_string(),
                FuzzKeyword::Cookie => "cookie".to_string(),
                FuzzKeyword::Path => "path".to_string(),
                FuzzKeyword::Other(word) => word.render(),
            };
            out.push_str(&keyword);
            for arg in &line.args {
                out.push(' ');
                out.push_str(&arg.render());
            }
            out.push('\n');
        }
        out.push_str("}\n");
        out
    }
}

fuzz_target!(|directive: FuzzDirective| {
    let source = directive.render();
    let registry = MethodRegistry::builtin();

    match parse_source("fuzz", &source, &registry) {
        Ok(config) => {
            assert!(!config.available_locales.is_empty());
            assert!(!config.methods.is_empty());
            assert!(!config.cookie_name.trim().is_empty());
            assert!(!config.path_scope.trim().is_empty());
        }
        Err(err) => {
            // Well-formed text only fails inside the directive itself.
            assert!(err.position().is_some(), "{err}");
            assert!(!matches!(err, LocaleError::UnknownDirective { .. }));
        }
    }
});
