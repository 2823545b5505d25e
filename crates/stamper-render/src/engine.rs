//! The MiniJinja-backed template engine.
//!
//! Templates are named by file path. A relative name resolves against the
//! engine's base directory (the working directory for the CLI), an absolute
//! one is used as is, and `{% include %}`/`{% extends %}` follow the same
//! rule. Output is never auto-escaped and the template's trailing newline is
//! kept unless a customization file says otherwise.
//!
//! Beyond MiniJinja's default syntax and builtins, `{% break %}` and
//! `{% continue %}` are enabled and the `tojson` filter is available.

use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};
use serde::Serialize;

use crate::customize::Customization;
use crate::error::RenderError;
use crate::extensions::Extensions;

/// How the engine treats variables the context does not define.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Undefined {
    /// Any use of an undefined variable fails the render.
    #[default]
    Strict,
    /// Undefined variables render as empty strings.
    Lenient,
}

impl Undefined {
    fn behavior(self) -> UndefinedBehavior {
        match self {
            Undefined::Strict => UndefinedBehavior::Strict,
            Undefined::Lenient => UndefinedBehavior::Lenient,
        }
    }
}

/// Everything that shapes the engine before the first render.
#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    pub undefined: Undefined,
    pub customization: Customization,
}

/// Renders file templates against a context.
///
/// # Example
///
/// ```rust
/// use stamper_render::{Engine, EngineSettings, Extensions};
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("hello.j2"), "Hello, {{ name }}!\n").unwrap();
///
/// let engine = Engine::new(dir.path(), &EngineSettings::default(), &Extensions::new()).unwrap();
/// let out = engine.render("hello.j2", &serde_json::json!({"name": "World"})).unwrap();
/// assert_eq!(out, "Hello, World!\n");
/// ```
pub struct Engine {
    env: Environment<'static>,
}

impl Engine {
    /// Build an engine loading templates relative to `base_dir`.
    pub fn new(
        base_dir: impl Into<PathBuf>,
        settings: &EngineSettings,
        extensions: &Extensions,
    ) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        let custom = &settings.customization;

        env.set_undefined_behavior(settings.undefined.behavior());
        env.set_keep_trailing_newline(custom.keep_trailing_newline.unwrap_or(true));
        env.set_trim_blocks(custom.trim_blocks.unwrap_or(false));
        env.set_lstrip_blocks(custom.lstrip_blocks.unwrap_or(false));
        env.set_auto_escape_callback(|_| AutoEscape::None);
        if let Some(syntax) = custom.syntax().map_err(|e| RenderError::Template(e.to_string()))? {
            env.set_syntax(syntax);
        }

        let base_dir = base_dir.into();
        tracing::debug!(base = %base_dir.display(), undefined = ?settings.undefined, "template engine ready");
        env.set_loader(move |name: &str| load_template(&base_dir, name));

        extensions.install(&mut env);
        Ok(Self { env })
    }

    /// Render the template at `template` with `ctx`.
    pub fn render<S: Serialize + ?Sized>(&self, template: &str, ctx: &S) -> Result<String, RenderError> {
        let tmpl = self.env.get_template(template)?;
        Ok(tmpl.render(ctx)?)
    }

    /// Render a template given as source text rather than a file.
    pub fn render_str<S: Serialize + ?Sized>(&self, source: &str, ctx: &S) -> Result<String, RenderError> {
        Ok(self.env.render_str(source, ctx)?)
    }

    /// The underlying MiniJinja environment.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

/// Where a template name points on disk.
pub fn template_path(base_dir: &Path, name: &str) -> PathBuf {
    let path = Path::new(name);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn load_template(base_dir: &Path, name: &str) -> Result<Option<String>, minijinja::Error> {
    let path = template_path(base_dir, name);
    if !path.is_file() {
        return Ok(None);
    }
    std::fs::read_to_string(&path).map(Some).map_err(|err| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("could not read template '{}'", path.display()),
        )
        .with_source(err)
    })
}
