//! Integration tests for armature-locale

use armature_locale::*;
use std::io::Write;

fn parse(input: &str) -> Result<LocaleConfig> {
    parse_source("Testfile", input, &MethodRegistry::builtin())
}

// =============================================================================
// Directive Scenarios
// =============================================================================

#[test]
fn test_inline_locales_with_detect_block() {
    let config = parse("locale en fr {\n    detect cookie header\n}").unwrap();

    assert_eq!(
        config,
        LocaleConfig {
            available_locales: vec!["en".to_string(), "fr".to_string()],
            methods: vec![Method::Cookie, Method::Header],
            cookie_name: "locale".to_string(),
            path_scope: "/".to_string(),
        }
    );
}

#[test]
fn test_cookie_and_path_overrides() {
    let config = parse("locale en {\n    cookie mylocale\n    path /i18n\n}").unwrap();

    assert_eq!(config.available_locales, ["en"]);
    assert_eq!(config.methods, [Method::Header]);
    assert_eq!(config.cookie_name, "mylocale");
    assert_eq!(config.path_scope, "/i18n");
}

#[test]
fn test_unknown_detect_method() {
    let err = parse("locale {\n    detect bogus\n}").unwrap_err();

    match &err {
        LocaleError::UnknownMethod { name, .. } => assert_eq!(name, "bogus"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "Testfile:2 - Parse error: could not find detect method [bogus]"
    );
}

#[test]
fn test_empty_directives_fail() {
    for input in ["locale {}", "locale", "locale {\n}"] {
        let err = parse(input).unwrap_err();
        assert!(matches!(err, LocaleError::NoLocales { .. }), "{input:?}");
        assert!(err.to_string().ends_with("no available locales specified"));
    }
}

#[test]
fn test_occurrences_concatenate_in_order() {
    let config = parse("locale en {\n    available fr de\n}\nlocale es").unwrap();
    assert_eq!(config.available_locales, ["en", "fr", "de", "es"]);
}

#[test]
fn test_no_deduplication() {
    let config = parse(
        "locale en {\n    available en fr\n    detect cookie cookie\n}\nlocale fr {\n    detect cookie\n}",
    )
    .unwrap();

    assert_eq!(config.available_locales, ["en", "en", "fr", "fr"]);
    assert_eq!(
        config.methods,
        [Method::Cookie, Method::Cookie, Method::Cookie]
    );
}

#[test]
fn test_whitespace_overrides_keep_defaults() {
    let config = parse("locale en {\n    cookie \" \"\n    path \"\t\"\n}").unwrap();
    assert_eq!(config.cookie_name, DEFAULT_COOKIE_NAME);
    assert_eq!(config.path_scope, DEFAULT_PATH_SCOPE);
}

#[test]
fn test_last_path_wins_across_occurrences() {
    let config = parse(
        "locale en {\n    path /first\n}\nlocale fr {\n    path /second\n}\nlocale de {\n    path \" \"\n}",
    )
    .unwrap();
    assert_eq!(config.path_scope, "/second");
}

#[test]
fn test_unknown_keyword_is_argument_error() {
    let err = parse("locale en {\n    fallback en\n}").unwrap_err();
    assert!(matches!(err, LocaleError::Argument { .. }));
    assert_eq!(err.position().map(|p| p.line), Some(2));
}

#[test]
fn test_detect_needs_arguments() {
    let err = parse("locale en {\n    detect\n}").unwrap_err();
    assert!(matches!(err, LocaleError::Argument { .. }));
}

#[test]
fn test_parsed_config_always_validates() {
    let inputs = [
        "locale en",
        "locale en fr {\n    detect path cookie header\n}",
        "locale {\n    available de\n    cookie c\n    path p\n}",
    ];
    for input in inputs {
        let config = parse(input).unwrap();
        assert!(config.validate().is_ok(), "{input:?}");
    }
}

// =============================================================================
// Host Token Cursor
// =============================================================================

/// Cursor over pre-split lines, the way a host with its own configuration
/// tokenizer would expose them. Each occurrence is a header line plus block
/// lines.
struct LineCursor {
    occurrences: Vec<(Vec<&'static str>, Vec<Vec<&'static str>>)>,
    occurrence: Option<usize>,
    line: Option<usize>,
    column: usize,
}

impl LineCursor {
    fn new(occurrences: Vec<(Vec<&'static str>, Vec<Vec<&'static str>>)>) -> Self {
        Self {
            occurrences,
            occurrence: None,
            line: None,
            column: 0,
        }
    }

    fn current_line(&self) -> &[&'static str] {
        let Some(occurrence) = self.occurrence else {
            return &[];
        };
        let (header, block) = &self.occurrences[occurrence];
        match self.line {
            None => header.as_slice(),
            Some(line) => block[line].as_slice(),
        }
    }
}

impl TokenCursor for LineCursor {
    fn next(&mut self) -> bool {
        let next = self.occurrence.map_or(0, |o| o + 1);
        if next >= self.occurrences.len() {
            return false;
        }
        self.occurrence = Some(next);
        self.line = None;
        self.column = 0;
        true
    }

    fn next_arg(&mut self) -> bool {
        if self.column + 1 < self.current_line().len() {
            self.column += 1;
            true
        } else {
            false
        }
    }

    fn next_block(&mut self) -> bool {
        let Some(occurrence) = self.occurrence else {
            return false;
        };
        let next = self.line.map_or(0, |l| l + 1);
        if next >= self.occurrences[occurrence].1.len() {
            return false;
        }
        self.line = Some(next);
        self.column = 0;
        true
    }

    fn remaining_args(&mut self) -> Vec<String> {
        let mut args = Vec::new();
        while self.next_arg() {
            args.push(self.val().to_string());
        }
        args
    }

    fn val(&self) -> &str {
        self.current_line().get(self.column).copied().unwrap_or("")
    }

    fn position(&self) -> Position {
        Position::new("host", self.line.map_or(1, |l| l + 2))
    }
}

#[test]
fn test_host_cursor() {
    let mut cursor = LineCursor::new(vec![
        (
            vec!["locale", "en", "fr"],
            vec![vec!["detect", "Path", "header"], vec!["cookie", "lang"]],
        ),
        (vec!["locale", "es"], Vec::new()),
    ]);

    let config = parse_locale(&mut cursor, &MethodRegistry::builtin()).unwrap();
    assert_eq!(config.available_locales, ["en", "fr", "es"]);
    assert_eq!(config.methods, [Method::Path, Method::Header]);
    assert_eq!(config.cookie_name, "lang");
}

#[test]
fn test_host_cursor_error_position() {
    let mut cursor = LineCursor::new(vec![(
        vec!["locale", "en"],
        vec![vec!["available", "fr"], vec!["cookie"]],
    )]);

    let err = parse_locale(&mut cursor, &MethodRegistry::builtin()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "host:3 - Parse error: Wrong argument count or unexpected line ending after 'cookie'"
    );
}

// =============================================================================
// File Loading
// =============================================================================

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_directive_file() {
    let file = write_temp(".conf", "locale en {\n    detect cookie\n}\n");
    let config = load_file(file.path(), &MethodRegistry::builtin()).unwrap();
    assert_eq!(config.available_locales, ["en"]);
    assert_eq!(config.methods, [Method::Cookie]);
}

#[test]
fn test_load_directive_file_error_names_file() {
    let file = write_temp(".conf", "locale {\n    detect nope\n}\n");
    let err = load_file(file.path(), &MethodRegistry::builtin()).unwrap_err();
    let position = err.position().cloned().unwrap();
    assert_eq!(&*position.file, file.path().display().to_string());
    assert_eq!(position.line, 2);
}

#[test]
fn test_load_toml_file() {
    let file = write_temp(
        ".toml",
        "available_locales = [\"en\", \"pt-BR\"]\nmethods = [\"path\"]\npath_scope = \"/app\"\n",
    );
    let config = load_file(file.path(), &MethodRegistry::builtin()).unwrap();
    assert_eq!(config.available_locales, ["en", "pt-BR"]);
    assert_eq!(config.methods, [Method::Path]);
    assert_eq!(config.path_scope, "/app");
    assert_eq!(config.cookie_name, "locale");
}

#[test]
fn test_load_json_file() {
    let file = write_temp(".json", r#"{"available_locales": ["fr-CA"]}"#);
    let config = load_file(file.path(), &MethodRegistry::builtin()).unwrap();
    assert_eq!(config.available_locales, ["fr-CA"]);
    assert_eq!(config.methods, [Method::Header]);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_file(dir.path().join("missing.conf"), &MethodRegistry::builtin()).unwrap_err();
    assert!(matches!(err, LocaleError::Io(_)));
}

#[test]
fn test_config_round_trips_through_json() {
    let config = parse("locale en {\n    detect cookie path\n    cookie lang\n}").unwrap();
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["methods"], serde_json::json!(["cookie", "path"]));
    assert_eq!(json["cookie_name"], "lang");
}
