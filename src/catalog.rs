use std::str::FromStr;

use anyhow::{Context, Result};
use palette::Srgb;

// ---------------------------------------------------------------------------
// Action catalog: benchmark id → chart title
// ---------------------------------------------------------------------------

/// One benchmark action that gets its own chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub id: String,
    pub title: String,
}

/// Ordered set of known actions. Charts are produced in this order.
#[derive(Debug, Clone)]
pub struct ActionCatalog {
    actions: Vec<Action>,
}

impl ActionCatalog {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let actions = entries
            .into_iter()
            .map(|(id, title)| Action {
                id: id.into(),
                title: title.into(),
            })
            .collect();
        ActionCatalog { actions }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

impl Default for ActionCatalog {
    fn default() -> Self {
        ActionCatalog::new([
            ("bubble", "Bubble Sort"),
            ("dictionary", "Map (Create & Lookup)"),
            ("intmap", "IntMap (Create & Lookup)"),
        ])
    }
}

// ---------------------------------------------------------------------------
// Language catalog: implementation id → legend label + line colour
// ---------------------------------------------------------------------------

/// An implementation variant with its legend label and line colour.
#[derive(Debug, Clone, PartialEq)]
pub struct Language {
    pub id: String,
    pub name: String,
    pub color: Srgb<u8>,
}

impl Language {
    /// Build a language entry from a `#rrggbb` hex colour.
    pub fn new(id: &str, name: &str, hex: &str) -> Result<Self> {
        let color = Srgb::<u8>::from_str(hex)
            .with_context(|| format!("invalid colour {hex:?} for language {id:?}"))?;
        Ok(Language {
            id: id.to_string(),
            name: name.to_string(),
            color,
        })
    }
}

/// Built-in languages: `(id, legend label, colour)`.
const BUILTIN_LANGUAGES: [(&str, &str, &str); 2] = [
    ("hs", "Haskell", "#8e82b2"),
    ("nt", "Neut", "#37acac"),
];

/// Ordered set of known languages.
///
/// The order is the plot order inside every chart: series of the first
/// language are drawn (and listed in the legend) first.
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
}

impl LanguageCatalog {
    pub fn new(languages: Vec<Language>) -> Self {
        LanguageCatalog { languages }
    }

    pub fn builtin() -> Result<Self> {
        let languages = BUILTIN_LANGUAGES
            .iter()
            .map(|&(id, name, hex)| Language::new(id, name, hex))
            .collect::<Result<Vec<_>>>()?;
        Ok(LanguageCatalog::new(languages))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.languages.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.languages.iter().map(|l| l.id.as_str()).collect()
    }
}

/// Both catalogs, handed to the pipeline as one immutable configuration.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub actions: ActionCatalog,
    pub languages: LanguageCatalog,
}

impl Catalogs {
    pub fn builtin() -> Result<Self> {
        Ok(Catalogs {
            actions: ActionCatalog::default(),
            languages: LanguageCatalog::builtin()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_languages_keep_plot_order() {
        let languages = LanguageCatalog::builtin().unwrap();
        assert_eq!(languages.ids(), vec!["hs", "nt"]);
        assert_eq!(
            languages.get("hs").map(|l| l.color),
            Some(Srgb::new(0x8e, 0x82, 0xb2))
        );
        assert_eq!(languages.get("nt").map(|l| l.name.as_str()), Some("Neut"));
        assert!(!languages.contains("slow"));
    }

    #[test]
    fn hex_colours_are_parsed() {
        let lang = Language::new("slow", "Neut (Slower)", "#acac37").unwrap();
        assert_eq!(lang.color, Srgb::new(0xac, 0xac, 0x37));
        assert!(Language::new("bad", "Bad", "#zzzzzz").is_err());
    }

    #[test]
    fn action_titles() {
        let actions = ActionCatalog::default();
        assert_eq!(actions.len(), 3);
        let ids: Vec<&str> = actions.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["bubble", "dictionary", "intmap"]);
    }
}
