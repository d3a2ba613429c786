//! Loading locale configuration from files.
//!
//! Besides directive text, a configuration can be written as a TOML or JSON
//! document using the [`LocaleConfig`] field names. Omitted `methods`,
//! `cookie_name` and `path_scope` take the same defaults the directive
//! parser applies. Method names are resolved through the [`MethodRegistry`]
//! exactly as `detect` arguments are.

use crate::config::{
    DEFAULT_COOKIE_NAME, DEFAULT_PATH_SCOPE, LocaleConfig, LocaleConfigBuilder, Validate,
};
use crate::directive::parse_source;
use crate::method::MethodRegistry;
use crate::{LocaleError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `locale { ... }` directive text
    Directive,
    Toml,
    Json,
}

impl FileFormat {
    /// Pick a format from a file extension. Unknown extensions are read as
    /// directive text.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "toml" => FileFormat::Toml,
            "json" => FileFormat::Json,
            _ => FileFormat::Directive,
        }
    }
}

/// Locale configuration loader
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Detect the format from the file extension.
    pub fn auto(path: impl AsRef<Path>) -> Self {
        let format = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .map(FileFormat::from_extension)
            .unwrap_or(FileFormat::Directive);

        Self::new(format)
    }

    /// Format this loader reads.
    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Read, parse and validate a configuration file.
    pub fn load_file(
        &self,
        path: impl AsRef<Path>,
        registry: &MethodRegistry,
    ) -> Result<LocaleConfig> {
        let path = path.as_ref();
        debug!(path = %path.display(), format = ?self.format, "Loading locale configuration");

        let content = fs::read_to_string(path)?;
        self.parse(&path.display().to_string(), &content, registry)
    }

    /// Parse and validate configuration text. `name` labels error positions
    /// for directive text.
    pub fn parse(
        &self,
        name: &str,
        content: &str,
        registry: &MethodRegistry,
    ) -> Result<LocaleConfig> {
        let config = match self.format {
            FileFormat::Directive => parse_source(name, content, registry)?,
            FileFormat::Toml => complete(toml::from_str(content)?, registry)?,
            FileFormat::Json => complete(serde_json::from_str(content)?, registry)?,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Load a configuration file, choosing the format by extension.
///
/// # Example
///
/// ```no_run
/// use armature_locale::{MethodRegistry, load_file};
///
/// let config = load_file("config/locale.toml", &MethodRegistry::builtin())?;
/// println!("serving {:?}", config.available_locales);
/// # Ok::<(), armature_locale::LocaleError>(())
/// ```
pub fn load_file(path: impl AsRef<Path>, registry: &MethodRegistry) -> Result<LocaleConfig> {
    let path = path.as_ref();
    ConfigLoader::auto(path).load_file(path, registry)
}

/// Locale configuration as written in a TOML or JSON document.
#[derive(Debug, Deserialize)]
struct LocaleDocument {
    available_locales: Vec<String>,
    #[serde(default)]
    methods: Vec<String>,
    cookie_name: Option<String>,
    path_scope: Option<String>,
}

fn complete(document: LocaleDocument, registry: &MethodRegistry) -> Result<LocaleConfig> {
    let methods = document
        .methods
        .iter()
        .map(|name| {
            registry.lookup(name).ok_or_else(|| {
                LocaleError::validation(format!("could not find detect method [{}]", name))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let config = LocaleConfig {
        available_locales: document.available_locales,
        methods,
        cookie_name: document
            .cookie_name
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string()),
        path_scope: document
            .path_scope
            .unwrap_or_else(|| DEFAULT_PATH_SCOPE.to_string()),
    };

    LocaleConfigBuilder::from(config)
        .finalize(registry)
        .map_err(|err| LocaleError::validation(err.to_string()))
}
