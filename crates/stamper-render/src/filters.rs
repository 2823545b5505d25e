//! Built-in extensions.
//!
//! The `env` filter and global read a variable from the environment, so a
//! template can reach the environment whatever its data source:
//!
//! ```jinja
//! Pass: {{ "USER_PASSWORD"|env }}
//! Pass: {{ "USER_PASSWORD"|env("-none-") }}
//! User: {{ env("USER_LOGIN", "nobody") }}
//! ```
//!
//! Without a default, an unset variable fails the render.

use std::sync::Arc;

use minijinja::{Error, ErrorKind, Value};
use stamper_input::EnvReader;

use crate::extensions::{filter_fn, global_fn, Extensions};

/// Register the built-in extensions, reading variables through `env`.
pub fn builtin_extensions(env: Arc<dyn EnvReader>) -> Extensions {
    let for_filter = Arc::clone(&env);
    Extensions::new()
        .with_filter(
            "env",
            filter_fn(move |name, args| lookup(for_filter.as_ref(), &name, args)),
        )
        .with_global(
            "env",
            global_fn(move |args| match args.split_first() {
                Some((name, rest)) => lookup(env.as_ref(), name, rest),
                None => Err(Error::new(
                    ErrorKind::MissingArgument,
                    "env() needs a variable name",
                )),
            }),
        )
}

fn lookup(env: &dyn EnvReader, name: &Value, rest: &[Value]) -> Result<Value, Error> {
    let default = match rest {
        [] => None,
        [default] => Some(default),
        _ => {
            return Err(Error::new(
                ErrorKind::TooManyArguments,
                "env takes a variable name and an optional default",
            ))
        }
    };
    let Some(name) = name.as_str() else {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("env expects a variable name, got {}", name.kind()),
        ));
    };
    match (env.var(name), default) {
        (Some(value), _) => Ok(Value::from(value)),
        (None, Some(default)) => Ok(default.clone()),
        (None, None) => Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("environment variable '{}' is not set", name),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::Environment;
    use stamper_input::MockEnv;

    fn render(source: &str) -> Result<String, Error> {
        let reader = MockEnv::new().with_var("USER_LOGIN", "kolypto");
        let mut env = Environment::new();
        builtin_extensions(Arc::new(reader)).install(&mut env);
        env.render_str(source, ())
    }

    #[test]
    fn filter_reads_variable() {
        assert_eq!(render(r#"{{ "USER_LOGIN"|env }}"#).unwrap(), "kolypto");
    }

    #[test]
    fn filter_default() {
        assert_eq!(render(r#"{{ "MISSING"|env("-none-") }}"#).unwrap(), "-none-");
        assert_eq!(render(r#"{{ "USER_LOGIN"|env("-none-") }}"#).unwrap(), "kolypto");
    }

    #[test]
    fn filter_unset_fails() {
        let err = render(r#"{{ "MISSING"|env }}"#).unwrap_err();
        assert!(err.to_string().contains("MISSING"));
    }

    #[test]
    fn global_function() {
        assert_eq!(render(r#"{{ env("USER_LOGIN") }}"#).unwrap(), "kolypto");
        assert_eq!(render(r#"{{ env("MISSING", "x") }}"#).unwrap(), "x");
        assert!(render(r#"{{ env("MISSING") }}"#).is_err());
    }

    #[test]
    fn global_without_name() {
        assert!(render("{{ env() }}").is_err());
    }

    #[test]
    fn non_string_name() {
        assert!(render("{{ 42|env }}").is_err());
    }
}
