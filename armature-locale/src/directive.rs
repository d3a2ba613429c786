//! The `locale` directive parser.
//!
//! ```text
//! locale [locale-id ...] {
//!     available <locale-id> [<locale-id> ...]
//!     detect <method-name> [<method-name> ...]
//!     cookie <name>
//!     path <url-path>
//! }
//! ```
//!
//! Every occurrence of the directive feeds one configuration. Inline
//! arguments count as `available` entries.

use crate::config::{LocaleConfig, LocaleConfigBuilder};
use crate::cursor::{Dispenser, TokenCursor};
use crate::error::{LocaleError, Position};
use crate::method::MethodRegistry;
use crate::Result;
use tracing::{debug, trace};

/// Name of the directive this crate parses.
pub const DIRECTIVE_NAME: &str = "locale";

/// Recognized block keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Available,
    Detect,
    Cookie,
    Path,
}

impl Keyword {
    /// Match a block keyword exactly (keywords are case-sensitive).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "available" => Some(Keyword::Available),
            "detect" => Some(Keyword::Detect),
            "cookie" => Some(Keyword::Cookie),
            "path" => Some(Keyword::Path),
            _ => None,
        }
    }

    /// Keyword as written in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Available => "available",
            Keyword::Detect => "detect",
            Keyword::Cookie => "cookie",
            Keyword::Path => "path",
        }
    }
}

/// Parse every `locale` occurrence the cursor yields into one configuration.
///
/// Fails on the first problem; nothing partially parsed is returned.
///
/// # Example
///
/// ```
/// use armature_locale::{Dispenser, Method, MethodRegistry, parse_locale};
///
/// let registry = MethodRegistry::builtin();
/// let mut cursor = Dispenser::from_source("Caddyfile", "locale en fr {\n  detect cookie header\n}");
/// let config = parse_locale(&mut cursor, &registry).unwrap();
///
/// assert_eq!(config.available_locales, ["en", "fr"]);
/// assert_eq!(config.methods, [Method::Cookie, Method::Header]);
/// assert_eq!(config.cookie_name, "locale");
/// assert_eq!(config.path_scope, "/");
/// ```
pub fn parse_locale<C>(cursor: &mut C, registry: &MethodRegistry) -> Result<LocaleConfig>
where
    C: TokenCursor + ?Sized,
{
    let mut builder = LocaleConfigBuilder::new();

    while cursor.next() {
        builder.add_locales(cursor.remaining_args());

        while cursor.next_block() {
            parse_block_line(cursor, registry, &mut builder)?;
        }
    }

    let config = builder
        .finalize(registry)
        .map_err(|err| LocaleError::from_build(err, cursor.position()))?;

    debug!(
        locales = config.available_locales.len(),
        methods = config.methods.len(),
        cookie_name = %config.cookie_name,
        path_scope = %config.path_scope,
        "Parsed locale directive"
    );

    Ok(config)
}

fn parse_block_line<C>(
    cursor: &mut C,
    registry: &MethodRegistry,
    builder: &mut LocaleConfigBuilder,
) -> Result<()>
where
    C: TokenCursor + ?Sized,
{
    let Some(keyword) = Keyword::from_token(cursor.val()) else {
        return Err(cursor.arg_err());
    };
    trace!(keyword = keyword.as_str(), line = cursor.position().line, "Locale block line");

    match keyword {
        Keyword::Available => {
            builder.add_locales(cursor.remaining_args());
        }
        Keyword::Detect => {
            let names = cursor.remaining_args();
            if names.is_empty() {
                return Err(cursor.arg_err());
            }
            for name in names {
                let method = registry
                    .lookup(&name)
                    .ok_or_else(|| LocaleError::unknown_method(cursor.position(), name))?;
                builder.add_method(method);
            }
        }
        Keyword::Cookie => {
            if !cursor.next_arg() {
                return Err(cursor.arg_err());
            }
            builder.cookie_name(cursor.val());
        }
        Keyword::Path => {
            if !cursor.next_arg() {
                return Err(cursor.arg_err());
            }
            builder.path_scope(cursor.val());
        }
    }

    Ok(())
}

/// Parse configuration text made up solely of `locale` directives.
///
/// `file` names the source in error positions.
///
/// # Example
///
/// ```
/// use armature_locale::{MethodRegistry, parse_source};
///
/// let source = "locale en {\n  cookie mylocale\n  path /i18n\n}";
/// let config = parse_source("Caddyfile", source, &MethodRegistry::builtin()).unwrap();
/// assert_eq!(config.cookie_name, "mylocale");
/// assert_eq!(config.path_scope, "/i18n");
/// ```
pub fn parse_source(file: &str, input: &str, registry: &MethodRegistry) -> Result<LocaleConfig> {
    let mut dispenser = Dispenser::from_source(file, input);
    check_directives(&dispenser)?;
    parse_locale(&mut dispenser, registry)
}

/// Ensure braces balance, blocks open on their directive's line, and every
/// top-level token that starts a line or follows a closing brace is the
/// `locale` directive.
fn check_directives(dispenser: &Dispenser) -> Result<()> {
    let mut depth = 0usize;
    // Line the previous token ended on, and whether it was `}`.
    let mut previous: Option<(usize, bool)> = None;

    for token in dispenser.tokens() {
        let position = Position::new(token.file.clone(), token.line);
        let same_line = previous.is_some_and(|(line, _)| line == token.line);
        let after_close = same_line && previous.is_some_and(|(_, closed)| closed);

        match token.text.as_str() {
            "{" => {
                if depth > 0 || !same_line || after_close {
                    return Err(LocaleError::argument(
                        position,
                        "Unexpected '{', a block must open on its directive line",
                    ));
                }
                depth += 1;
            }
            "}" => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| LocaleError::argument(position, "Unexpected '}'"))?;
            }
            name if depth == 0 && (!same_line || after_close) => {
                if name != DIRECTIVE_NAME {
                    return Err(LocaleError::UnknownDirective {
                        position,
                        name: name.to_string(),
                    });
                }
            }
            _ => {}
        }
        previous = Some((token.line + token.line_breaks(), token.text == "}"));
    }

    if depth > 0 {
        if let Some(token) = dispenser.tokens().last() {
            return Err(LocaleError::argument(
                Position::new(token.file.clone(), token.line),
                "Unexpected EOF, expecting '}'",
            ));
        }
    }

    Ok(())
}
