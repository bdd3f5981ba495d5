use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use super::model::{ResultFile, Series};
use crate::catalog::LanguageCatalog;

/// Separator between the action and language parts of a file name.
const KEY_SEPARATOR: char = '-';

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("file name {name:?} is not of the form <action>-<language>.<ext>")]
    FileName { name: String },
    #[error("{name:?}: language {language:?} has no catalog entry (known: {known})")]
    UnknownLanguage {
        name: String,
        language: String,
        known: String,
    },
}

// ---------------------------------------------------------------------------
// File naming
// ---------------------------------------------------------------------------

/// Split `<action>-<language>.<ext>` into `(action, language)`.
///
/// Everything from the first `.` on is dropped; the rest must split into
/// exactly two non-empty tokens.
pub fn parse_file_name(name: &str) -> Result<(&str, &str), LoadError> {
    let stem = name.split('.').next().unwrap_or_default();
    let mut parts = stem.split(KEY_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(action), Some(language), None) if !action.is_empty() && !language.is_empty() => {
            Ok((action, language))
        }
        _ => Err(LoadError::FileName {
            name: name.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load one result file from `dir`.
pub fn load_file(dir: &Path, name: &str, languages: &LanguageCatalog) -> Result<Series, LoadError> {
    let (action, language) = parse_file_name(name)?;
    if !languages.contains(language) {
        return Err(LoadError::UnknownLanguage {
            name: name.to_string(),
            language: language.to_string(),
            known: languages.ids().join(", "),
        });
    }

    let path = dir.join(name);
    let text = std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;
    let file: ResultFile =
        serde_json::from_str(&text).map_err(|source| LoadError::Parse { path, source })?;

    let series = Series::from_results(action, language, file);
    debug!("loaded {name}: {} points", series.len());
    Ok(series)
}

/// Load every regular file in `dir`, in file-name order.
///
/// Hidden files (`.gitkeep`, editor swap files) are skipped. The first
/// failing file aborts the whole load.
pub fn load_dir(dir: &Path, languages: &LanguageCatalog) -> Result<Vec<Series>, LoadError> {
    let io_err = |source: std::io::Error| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if !entry.file_type().map_err(io_err)?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            debug!("skipping hidden file {name}");
            continue;
        }
        names.push(name);
    }
    names.sort();

    names
        .iter()
        .map(|name| load_file(dir, name, languages))
        .collect()
}
