//! Locale detection methods and the registry that names them.
//!
//! A [`Method`] identifies a strategy for finding a request's locale. This
//! crate only records which methods to try and in what order; running them is
//! left to the request pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A locale detection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Negotiate from the `Accept-Language` request header
    Header,
    /// Read the locale from a cookie
    Cookie,
    /// Take the locale from the first request path segment
    Path,
}

impl Method {
    /// Every built-in method.
    pub const ALL: [Method; 3] = [Method::Header, Method::Cookie, Method::Path];

    /// Canonical registry name of the method.
    pub fn name(&self) -> &'static str {
        match self {
            Method::Header => "header",
            Method::Cookie => "cookie",
            Method::Path => "path",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable lookup from method name to [`Method`].
///
/// Names are stored normalized (trimmed, lowercase), and lookups normalize
/// their input the same way, so `" Header "` finds `header`.
///
/// # Example
///
/// ```
/// use armature_locale::{Method, MethodRegistry};
///
/// let registry = MethodRegistry::builtin();
/// assert_eq!(registry.lookup("COOKIE"), Some(Method::Cookie));
/// assert_eq!(registry.lookup("bogus"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MethodRegistry {
    methods: HashMap<String, Method>,
}

impl MethodRegistry {
    /// Name of the method used when a configuration lists none.
    pub const DEFAULT_METHOD: &'static str = "header";

    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in method under its own name.
    pub fn builtin() -> Self {
        Method::ALL
            .into_iter()
            .fold(Self::new(), |registry, method| {
                registry.with_method(method.name(), method)
            })
    }

    /// Register `method` under `name`, replacing any previous entry.
    pub fn with_method(mut self, name: &str, method: Method) -> Self {
        self.methods.insert(normalize(name), method);
        self
    }

    /// Resolve a method name.
    pub fn lookup(&self, name: &str) -> Option<Method> {
        self.methods.get(&normalize(name)).copied()
    }

    /// Resolve the method used when a configuration lists none.
    pub fn default_method(&self) -> Option<Method> {
        self.lookup(Self::DEFAULT_METHOD)
    }

    /// Check whether `name` resolves.
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(&normalize(name))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
