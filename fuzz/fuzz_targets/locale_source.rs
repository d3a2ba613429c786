//! Fuzz target for locale directive text.
//!
//! Feeds arbitrary text through the lexer and the directive parser. Neither
//! may panic, and every configuration that parses must validate.

#![no_main]

use libfuzzer_sys::fuzz_target;

use armature_locale::{Dispenser, MethodRegistry, Validate, lex, parse_locale, parse_source};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let registry = MethodRegistry::builtin();

    // Token lines never go backwards.
    let tokens = lex("fuzz", input);
    assert!(tokens.windows(2).all(|w| w[0].line <= w[1].line));

    let mut cursor = Dispenser::new(tokens);
    if let Ok(config) = parse_locale(&mut cursor, &registry) {
        assert!(config.validate().is_ok());
    }

    if let Ok(config) = parse_source("fuzz", input, &registry) {
        assert!(!config.available_locales.is_empty());
        assert!(config.validate().is_ok());
    }
});
