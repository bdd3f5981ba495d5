use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

/// File extension of every written chart.
const IMAGE_EXTENSION: &str = "png";

/// Create the output directory (and parents) if it does not exist yet.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))
}

/// Write one encoded chart to `<dir>/<action>.png` and return its absolute path.
pub fn write_chart(dir: &Path, action: &str, image: &[u8]) -> Result<PathBuf> {
    let dir = std::fs::canonicalize(dir)
        .with_context(|| format!("resolving output directory {}", dir.display()))?;
    let path = dir.join(format!("{action}.{IMAGE_EXTENSION}"));
    std::fs::write(&path, image).with_context(|| format!("writing {}", path.display()))?;
    info!("wrote: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn output_dir_creation_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("graph").join("linux");
        ensure_output_dir(&dir).unwrap();
        ensure_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn chart_lands_at_absolute_action_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_chart(tmp.path(), "bubble", b"png bytes").unwrap();

        assert!(path.is_absolute());
        assert_eq!(path.file_name().unwrap(), "bubble.png");
        assert_eq!(std::fs::read(&path).unwrap(), b"png bytes");
    }

    #[test]
    fn missing_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(write_chart(&tmp.path().join("absent"), "bubble", b"x").is_err());
    }
}
