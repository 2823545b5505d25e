//! Plugins: formats, filters, tests and globals registered at startup.
//!
//! A plugin is any value implementing [`Plugin`]. The [`PluginSet`] always
//! starts from the built-ins (the ini, json, yaml and env formats, and the
//! `env` filter and global) and layers user plugins on top in the order they
//! were added. On a name clash the later registration wins, for formats and
//! extensions alike.
//!
//! Two hooks run per render, in registration order: [`Plugin::alter_context`]
//! once the context is built, and [`Plugin::configure_engine`] once the
//! engine exists. Both run before the template is rendered.
//!
//! ```rust
//! use std::sync::Arc;
//! use stamper::{Plugin, PluginSet};
//! use stamper_formats::{Context, FnFormat, Format};
//!
//! struct Spam;
//!
//! impl Plugin for Spam {
//!     fn identity(&self) -> String {
//!         "spam 1.0.0".into()
//!     }
//!
//!     fn formats(&self) -> Vec<Arc<dyn Format>> {
//!         let spam: Arc<dyn Format> =
//!             Arc::new(FnFormat::new("spam", |_, _| Ok(Context::new())).with_suffixes(&[".spam"]));
//!         vec![spam]
//!     }
//! }
//!
//! let plugins = PluginSet::new().with(Spam);
//! assert_eq!(plugins.identities(), vec!["spam 1.0.0"]);
//! assert!(plugins.registry().contains("spam"));
//! ```

use std::sync::Arc;

use stamper_formats::{Context, Format, FormatRegistry};
use stamper_input::EnvReader;
use stamper_render::{builtin_extensions, Engine, Extensions, Filters, Globals, Tests};

/// A bundle of extensions for stamper.
pub trait Plugin: Send + Sync {
    /// Human-readable name and version, listed by `--version`.
    fn identity(&self) -> String;

    fn formats(&self) -> Vec<Arc<dyn Format>> {
        Vec::new()
    }

    fn filters(&self) -> Filters {
        Filters::new()
    }

    fn tests(&self) -> Tests {
        Tests::new()
    }

    fn globals(&self) -> Globals {
        Globals::new()
    }

    /// Rewrite the context after parsing and environment import.
    fn alter_context(&self, ctx: Context) -> Context {
        ctx
    }

    /// Adjust the engine after the built-in settings and extensions are in.
    fn configure_engine(&self, _engine: &mut Engine) {}
}

/// The built-ins plus user plugins, in registration order.
#[derive(Default)]
pub struct PluginSet {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginSet {
    /// Only the built-ins.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, plugin: impl Plugin + 'static) -> &mut Self {
        tracing::debug!(plugin = %plugin.identity(), "registering plugin");
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, plugin: impl Plugin + 'static) -> Self {
        self.register(plugin);
        self
    }

    /// Identities of the user plugins; built-ins are not listed.
    pub fn identities(&self) -> Vec<String> {
        self.plugins.iter().map(|p| p.identity()).collect()
    }

    /// A fresh format registry: built-ins, then every plugin's formats.
    pub fn registry(&self) -> FormatRegistry {
        let mut registry = FormatRegistry::with_builtins();
        for format in self.plugins.iter().flat_map(|p| p.formats()) {
            registry.register(format);
        }
        registry
    }

    /// All template extensions, with `env` reading through `env`.
    pub fn extensions(&self, env: Arc<dyn EnvReader>) -> Extensions {
        let mut extensions = builtin_extensions(env);
        for plugin in &self.plugins {
            extensions.extend_filters(plugin.filters());
            extensions.extend_tests(plugin.tests());
            extensions.extend_globals(plugin.globals());
        }
        extensions
    }

    /// Pass `ctx` through every plugin's [`Plugin::alter_context`].
    pub fn alter_context(&self, ctx: Context) -> Context {
        self.plugins.iter().fold(ctx, |ctx, plugin| plugin.alter_context(ctx))
    }

    /// Let every plugin adjust `engine`.
    pub fn configure_engine(&self, engine: &mut Engine) {
        for plugin in &self.plugins {
            plugin.configure_engine(engine);
        }
    }
}

impl std::fmt::Debug for PluginSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.identities()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stamper_formats::{Context, FnFormat};
    use stamper_input::MockEnv;
    use stamper_render::{filter_fn, global_fn, Value};

    struct Shadow;

    impl Plugin for Shadow {
        fn identity(&self) -> String {
            "shadow 0.1".into()
        }

        fn formats(&self) -> Vec<Arc<dyn Format>> {
            let json: Arc<dyn Format> = Arc::new(FnFormat::new("json", |_, _| Ok(Context::new())));
            vec![json]
        }

        fn filters(&self) -> Filters {
            Filters::from([(
                "env".to_string(),
                filter_fn(|_, _| Ok(Value::from("shadowed"))),
            )])
        }

        fn globals(&self) -> Globals {
            Globals::from([("answer".to_string(), global_fn(|_| Ok(Value::from(42))))])
        }
    }

    #[test]
    fn builtins_only() {
        let plugins = PluginSet::new();
        assert!(plugins.identities().is_empty());
        assert_eq!(plugins.registry().names(), vec!["ini", "json", "yaml", "env"]);
        let ext = plugins.extensions(Arc::new(MockEnv::new()));
        assert_eq!(ext.filter_names().collect::<Vec<_>>(), vec!["env"]);
        assert_eq!(ext.global_names().collect::<Vec<_>>(), vec!["env"]);
    }

    #[test]
    fn plugin_formats_replace_builtins_in_place() {
        let plugins = PluginSet::new().with(Shadow);
        let registry = plugins.registry();
        assert_eq!(registry.names(), vec!["ini", "json", "yaml", "env"]);
        assert!(registry.get("json").unwrap().suffixes().is_empty());
    }

    #[test]
    fn plugin_extensions_are_added() {
        let plugins = PluginSet::new().with(Shadow);
        let ext = plugins.extensions(Arc::new(MockEnv::new()));
        assert_eq!(
            ext.global_names().collect::<Vec<_>>(),
            vec!["answer", "env"]
        );
    }

    #[test]
    fn context_hooks_chain_in_order() {
        struct Tag(&'static str);

        impl Plugin for Tag {
            fn identity(&self) -> String {
                self.0.into()
            }

            fn alter_context(&self, mut ctx: Context) -> Context {
                let trail = match ctx.get("trail").and_then(|v| v.as_str()) {
                    Some(prev) => format!("{}{}", prev, self.0),
                    None => self.0.to_string(),
                };
                ctx.insert("trail".into(), trail.into());
                ctx
            }
        }

        let plugins = PluginSet::new().with(Tag("a")).with(Tag("b"));
        let ctx = plugins.alter_context(Context::new());
        assert_eq!(ctx.get("trail").and_then(|v| v.as_str()), Some("ab"));
        assert!(PluginSet::new().alter_context(Context::new()).is_empty());
    }

    #[test]
    fn identities_in_order() {
        let mut plugins = PluginSet::new();
        plugins.register(Shadow).register(Shadow);
        assert_eq!(plugins.identities(), vec!["shadow 0.1", "shadow 0.1"]);
    }
}
