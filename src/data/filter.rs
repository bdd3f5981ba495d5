use super::model::Series;
use crate::catalog::{Language, LanguageCatalog};

/// A selected series together with its catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct Selected<'a> {
    pub language: &'a Language,
    pub series: &'a Series,
}

/// Return the series of one action, ordered by the language catalog.
///
/// Discovery order of `series` only matters between series that share a
/// language: every match is kept, so duplicate (action, language) files show
/// up as separate lines.
pub fn select_action<'a>(
    series: &'a [Series],
    action: &str,
    languages: &'a LanguageCatalog,
) -> Vec<Selected<'a>> {
    let mut selected = Vec::new();
    for language in languages.iter() {
        for s in series {
            if s.action == action && s.language == language.id {
                selected.push(Selected {
                    language,
                    series: s,
                });
            }
        }
    }
    selected
}
