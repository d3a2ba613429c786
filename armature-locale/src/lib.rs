//! Locale Directive Support for Armature
//!
//! Parses and validates the `locale` configuration directive that tells the
//! locale middleware which locales a site serves and how a request's locale
//! is detected:
//!
//! - **Directive Parsing**: Walk `locale { ... }` blocks through a [`TokenCursor`]
//! - **Method Registry**: Resolve detection method names (`header`, `cookie`, `path`)
//! - **Validation**: Reject empty locale lists and unknown methods with source positions
//! - **File Loading**: Read directive text, TOML or JSON configuration files
//!
//! # Quick Start
//!
//! ```rust
//! use armature_locale::{Method, MethodRegistry, parse_source};
//!
//! let registry = MethodRegistry::builtin();
//! let source = r#"
//! locale en fr {
//!     available de
//!     detect cookie header
//!     cookie lang
//! }
//! "#;
//!
//! let config = parse_source("Caddyfile", source, &registry)?;
//! assert_eq!(config.available_locales, ["en", "fr", "de"]);
//! assert_eq!(config.methods, [Method::Cookie, Method::Header]);
//! assert_eq!(config.cookie_name, "lang");
//! assert_eq!(config.path_scope, "/");
//! # Ok::<(), armature_locale::LocaleError>(())
//! ```
//!
//! # Custom Token Sources
//!
//! Hosts with their own configuration tokens implement [`TokenCursor`] and
//! call [`parse_locale`] directly:
//!
//! ```rust,ignore
//! let config = parse_locale(&mut host_cursor, &registry)?;
//! ```

mod config;
mod cursor;
mod directive;
mod error;
mod lexer;
mod loader;
mod method;

pub use config::{
    DEFAULT_COOKIE_NAME, DEFAULT_PATH_SCOPE, LocaleConfig, LocaleConfigBuilder, Validate,
};
pub use cursor::{Dispenser, TokenCursor};
pub use directive::{DIRECTIVE_NAME, Keyword, parse_locale, parse_source};
pub use error::{BuildError, LocaleError, Position};
pub use lexer::{Token, lex};
pub use loader::{ConfigLoader, FileFormat, load_file};
pub use method::{Method, MethodRegistry};

/// Result type for locale configuration operations
pub type Result<T> = std::result::Result<T, LocaleError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        LocaleConfig, LocaleError, Method, MethodRegistry, Result, TokenCursor, Validate,
        load_file, parse_locale, parse_source,
    };
}
