//! Where the rendered text goes.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// `--output-file`, or stdout when it is absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputDestination {
    #[default]
    Stdout,
    File(PathBuf),
}

impl OutputDestination {
    /// `--output-file`, anchored at `cwd` when relative.
    pub fn from_arg(path: Option<&Path>, cwd: &Path) -> Self {
        path.map_or(OutputDestination::Stdout, |path| {
            OutputDestination::File(cwd.join(path))
        })
    }

    /// Write `content` byte for byte; nothing is added or trimmed.
    ///
    /// A file is created (or truncated), written and closed within this
    /// call, so callers invoke it only once the render has succeeded.
    pub fn write_text(&self, content: &str, stdout: &mut dyn Write) -> io::Result<()> {
        match self {
            OutputDestination::Stdout => {
                stdout.write_all(content.as_bytes())?;
                stdout.flush()
            }
            OutputDestination::File(path) => {
                ensure_parent_dir(path)?;
                tracing::debug!(path = %path.display(), bytes = content.len(), "writing output file");
                std::fs::write(path, content)
            }
        }
    }
}

/// Fail early, with the directory in the message, when the parent is missing.
fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("directory {} does not exist", parent.display()),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdout_gets_exact_bytes() {
        let mut out = Vec::new();
        OutputDestination::Stdout.write_text("no newline", &mut out).unwrap();
        assert_eq!(out, b"no newline");
    }

    #[test]
    fn file_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let conf = dir.path().join("nginx.conf");
        std::fs::write(&conf, "old contents that are longer").unwrap();

        let mut out = Vec::new();
        OutputDestination::File(conf.clone())
            .write_text("server {}\n", &mut out)
            .unwrap();

        assert_eq!(std::fs::read_to_string(conf).unwrap(), "server {}\n");
        assert!(out.is_empty());
    }

    #[test]
    fn missing_directory_is_named() {
        let dir = tempfile::tempdir().unwrap();
        let conf = dir.path().join("sites").join("nginx.conf");
        let err = OutputDestination::File(conf)
            .write_text("x", &mut Vec::new())
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("sites"));
    }

    #[test]
    fn relative_paths_anchor_at_cwd() {
        let cwd = Path::new("/work");
        assert_eq!(
            OutputDestination::from_arg(Some(Path::new("out.conf")), cwd),
            OutputDestination::File(PathBuf::from("/work/out.conf"))
        );
        assert_eq!(
            OutputDestination::from_arg(Some(Path::new("/etc/out.conf")), cwd),
            OutputDestination::File(PathBuf::from("/etc/out.conf"))
        );
        assert_eq!(OutputDestination::from_arg(None, cwd), OutputDestination::Stdout);
    }
}
