//! Filters, tests and global functions contributed to the engine.
//!
//! Extensions are plain closures over [`minijinja::Value`]. They are collected
//! from the built-ins and from plugins into one [`Extensions`] value, where a
//! later registration under the same name replaces the earlier one, and then
//! installed on the engine in a single step.

use std::collections::BTreeMap;
use std::sync::Arc;

use minijinja::value::Rest;
use minijinja::{Environment, Error, Value};

/// `value|name(args...)`
pub type FilterFn = Arc<dyn Fn(Value, &[Value]) -> Result<Value, Error> + Send + Sync>;

/// `value is name(args...)`
pub type TestFn = Arc<dyn Fn(&Value, &[Value]) -> bool + Send + Sync>;

/// `name(args...)`
pub type GlobalFn = Arc<dyn Fn(&[Value]) -> Result<Value, Error> + Send + Sync>;

pub type Filters = BTreeMap<String, FilterFn>;
pub type Tests = BTreeMap<String, TestFn>;
pub type Globals = BTreeMap<String, GlobalFn>;

/// Wrap a closure as a [`FilterFn`].
pub fn filter_fn<F>(f: F) -> FilterFn
where
    F: Fn(Value, &[Value]) -> Result<Value, Error> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a closure as a [`TestFn`].
pub fn test_fn<F>(f: F) -> TestFn
where
    F: Fn(&Value, &[Value]) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a closure as a [`GlobalFn`].
pub fn global_fn<F>(f: F) -> GlobalFn
where
    F: Fn(&[Value]) -> Result<Value, Error> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Everything to install on an engine beyond MiniJinja's own builtins.
#[derive(Clone, Default)]
pub struct Extensions {
    filters: Filters,
    tests: Tests,
    globals: Globals,
}

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, name: impl Into<String>, filter: FilterFn) -> Self {
        self.filters.insert(name.into(), filter);
        self
    }

    pub fn with_test(mut self, name: impl Into<String>, test: TestFn) -> Self {
        self.tests.insert(name.into(), test);
        self
    }

    pub fn with_global(mut self, name: impl Into<String>, global: GlobalFn) -> Self {
        self.globals.insert(name.into(), global);
        self
    }

    pub fn extend_filters(&mut self, filters: Filters) {
        self.filters.extend(filters);
    }

    pub fn extend_tests(&mut self, tests: Tests) {
        self.tests.extend(tests);
    }

    pub fn extend_globals(&mut self, globals: Globals) {
        self.globals.extend(globals);
    }

    /// Fold `other` into `self`; `other` wins on name clashes.
    pub fn merge(&mut self, other: Extensions) {
        self.extend_filters(other.filters);
        self.extend_tests(other.tests);
        self.extend_globals(other.globals);
    }

    pub fn filter_names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    pub fn test_names(&self) -> impl Iterator<Item = &str> {
        self.tests.keys().map(String::as_str)
    }

    pub fn global_names(&self) -> impl Iterator<Item = &str> {
        self.globals.keys().map(String::as_str)
    }

    pub(crate) fn install(&self, env: &mut Environment<'static>) {
        for (name, filter) in &self.filters {
            let filter = Arc::clone(filter);
            env.add_filter(name.clone(), move |value: Value, args: Rest<Value>| {
                filter(value, &args)
            });
        }
        for (name, test) in &self.tests {
            let test = Arc::clone(test);
            env.add_test(name.clone(), move |value: Value, args: Rest<Value>| -> bool {
                test(&value, &args)
            });
        }
        for (name, global) in &self.globals {
            let global = Arc::clone(global);
            env.add_function(name.clone(), move |args: Rest<Value>| global(&args));
        }
        tracing::debug!(
            filters = self.filters.len(),
            tests = self.tests.len(),
            globals = self.globals.len(),
            "installed template extensions"
        );
    }
}

impl std::fmt::Debug for Extensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extensions")
            .field("filters", &self.filters.keys().collect::<Vec<_>>())
            .field("tests", &self.tests.keys().collect::<Vec<_>>())
            .field("globals", &self.globals.keys().collect::<Vec<_>>())
            .finish()
    }
}
