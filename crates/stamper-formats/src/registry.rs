//! The ordered format registry.
//!
//! Formats are kept in registration order, which is also the order suffix
//! inference scans them in. Two formats may claim the same suffix; the one
//! registered first wins.
//!
//! # Replacement
//!
//! Registering a name that already exists replaces the earlier format in
//! place: the newcomer takes over the name *and* the original position, so a
//! plugin overriding `json` does not change which format `.yml` files
//! resolve to.

use std::sync::Arc;

use crate::formats;
use crate::{Format, FormatError};

/// Name-to-format mapping with a stable iteration order.
#[derive(Default, Clone)]
pub struct FormatRegistry {
    formats: Vec<Arc<dyn Format>>,
}

impl FormatRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in formats: ini, json, yaml, env.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for format in formats::builtin() {
            registry.register(format);
        }
        registry
    }

    /// Add a format, replacing any format of the same name in place.
    pub fn register(&mut self, format: Arc<dyn Format>) -> &mut Self {
        match self.position(format.name()) {
            Some(index) => {
                tracing::debug!(format = format.name(), "replacing registered format");
                self.formats[index] = format;
            }
            None => {
                tracing::debug!(format = format.name(), "registering format");
                self.formats.push(format);
            }
        }
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn add(mut self, format: impl Format + 'static) -> Self {
        self.register(Arc::new(format));
        self
    }

    /// Look up a format by name.
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.position(name)
            .map(|index| self.formats[index].as_ref())
            .ok_or_else(|| FormatError::UnknownFormat(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// All formats as `(name, format)` in registration order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &dyn Format)> {
        self.formats.iter().map(|f| (f.name(), f.as_ref()))
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.formats.iter().map(|f| f.name()).collect()
    }

    /// The first format, in registration order, claiming `suffix`.
    pub fn find_by_suffix(&self, suffix: &str) -> Option<&dyn Format> {
        self.all()
            .map(|(_, format)| format)
            .find(|format| format.suffixes().contains(&suffix))
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.formats.iter().position(|f| f.name() == name)
    }
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
