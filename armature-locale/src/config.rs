//! Locale configuration and its builder.

use crate::error::BuildError;
use crate::method::{Method, MethodRegistry};
use crate::{LocaleError, Result};
use serde::{Deserialize, Serialize};

/// Cookie read by the cookie detection method unless overridden.
pub const DEFAULT_COOKIE_NAME: &str = "locale";

/// Path prefix the locale middleware applies to unless overridden.
pub const DEFAULT_PATH_SCOPE: &str = "/";

/// Validated locale configuration handed to the request pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Locales the site can serve, in the order they were declared
    pub available_locales: Vec<String>,
    /// Detection methods in priority order
    #[serde(default)]
    pub methods: Vec<Method>,
    /// Cookie consulted by [`Method::Cookie`]
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Path prefix the configuration applies to
    #[serde(default = "default_path_scope")]
    pub path_scope: String,
}

fn default_cookie_name() -> String {
    DEFAULT_COOKIE_NAME.to_string()
}

fn default_path_scope() -> String {
    DEFAULT_PATH_SCOPE.to_string()
}

impl LocaleConfig {
    /// Start building a configuration.
    pub fn builder() -> LocaleConfigBuilder {
        LocaleConfigBuilder::new()
    }

    /// The locale listed first, used when nothing else matches.
    pub fn default_locale(&self) -> Option<&str> {
        self.available_locales.first().map(String::as_str)
    }
}

/// Trait for checking configuration invariants after construction.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for LocaleConfig {
    fn validate(&self) -> Result<()> {
        if self.available_locales.is_empty() {
            return Err(LocaleError::validation(
                "available_locales cannot be empty",
            ));
        }
        if self.methods.is_empty() {
            return Err(LocaleError::validation("methods cannot be empty"));
        }
        not_blank(&self.cookie_name, "cookie_name")?;
        not_blank(&self.path_scope, "path_scope")?;
        Ok(())
    }
}

fn not_blank(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LocaleError::validation(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(())
}

/// Accumulates locale settings before the invariants are enforced.
///
/// Accumulation never fails. [`finalize`](Self::finalize) is the only step
/// that checks the configuration and fills in the default method.
#[derive(Debug, Clone)]
pub struct LocaleConfigBuilder {
    available_locales: Vec<String>,
    methods: Vec<Method>,
    cookie_name: String,
    path_scope: String,
}

impl Default for LocaleConfigBuilder {
    fn default() -> Self {
        Self {
            available_locales: Vec::new(),
            methods: Vec::new(),
            cookie_name: default_cookie_name(),
            path_scope: default_path_scope(),
        }
    }
}

impl LocaleConfigBuilder {
    /// Create a builder with no locales, no methods and default cookie/path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append locales verbatim, keeping order and duplicates.
    pub fn add_locales<I, S>(&mut self, locales: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_locales
            .extend(locales.into_iter().map(Into::into));
        self
    }

    /// Append a detection method, keeping order and duplicates.
    pub fn add_method(&mut self, method: Method) -> &mut Self {
        self.methods.push(method);
        self
    }

    /// Override the cookie name. Blank values leave it unchanged.
    pub fn cookie_name(&mut self, value: &str) -> &mut Self {
        if let Some(value) = non_blank(value) {
            self.cookie_name = value;
        }
        self
    }

    /// Override the path scope. Blank values leave it unchanged.
    pub fn path_scope(&mut self, value: &str) -> &mut Self {
        if let Some(value) = non_blank(value) {
            self.path_scope = value;
        }
        self
    }

    /// Locales accumulated so far.
    pub fn locales(&self) -> &[String] {
        &self.available_locales
    }

    /// Methods accumulated so far.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Enforce the invariants and produce the configuration.
    ///
    /// Fails if no locale was added. An empty method list becomes the
    /// registry's default method.
    pub fn finalize(
        self,
        registry: &MethodRegistry,
    ) -> std::result::Result<LocaleConfig, BuildError> {
        if self.available_locales.is_empty() {
            return Err(BuildError::NoLocales);
        }

        let methods = if self.methods.is_empty() {
            vec![
                registry
                    .default_method()
                    .ok_or(BuildError::MissingDefaultMethod)?,
            ]
        } else {
            self.methods
        };

        Ok(LocaleConfig {
            available_locales: self.available_locales,
            methods,
            cookie_name: self.cookie_name,
            path_scope: self.path_scope,
        })
    }
}

impl From<LocaleConfig> for LocaleConfigBuilder {
    fn from(config: LocaleConfig) -> Self {
        Self {
            available_locales: config.available_locales,
            methods: config.methods,
            cookie_name: config.cookie_name,
            path_scope: config.path_scope,
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
