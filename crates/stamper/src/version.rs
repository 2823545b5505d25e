//! The version banner.

/// This crate's version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `stamper <version>`, then the user plugins, if any, under `Plugins:`.
pub fn banner(plugin_identities: &[String]) -> String {
    let mut text = format!("stamper {}\n", VERSION);
    if !plugin_identities.is_empty() {
        text.push_str("Plugins:\n");
        for identity in plugin_identities {
            text.push_str("   ");
            text.push_str(identity);
            text.push('\n');
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_plugins() {
        assert_eq!(banner(&[]), format!("stamper {}\n", VERSION));
    }

    #[test]
    fn with_plugins() {
        let text = banner(&["spam 1.0".into(), "eggs 2.1".into()]);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[1..], ["Plugins:", "   spam 1.0", "   eggs 2.1"]);
    }
}
