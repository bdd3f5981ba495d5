use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// On-disk result file (hyperfine-style JSON export)
// ---------------------------------------------------------------------------

/// Top level of a result file. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct ResultFile {
    pub results: Vec<ResultEntry>,
}

/// One measured run of a benchmark at a single input size.
#[derive(Debug, Deserialize)]
pub struct ResultEntry {
    pub parameters: Parameters,
    /// Mean elapsed time in seconds.
    pub mean: f64,
}

/// Benchmark parameters. hyperfine writes parameter values as strings
/// (`"SIZE": "10"`), hand-written files often use plain numbers.
#[derive(Debug, Deserialize)]
pub struct Parameters {
    #[serde(rename = "SIZE", deserialize_with = "number_or_numeric_string")]
    pub size: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(v) => Ok(v),
        NumberOrText::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::invalid_value(Unexpected::Str(&text), &"a number")),
    }
}

// ---------------------------------------------------------------------------
// Series – one loaded result file
// ---------------------------------------------------------------------------

/// Timing series for one (action, language) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub action: String,
    pub language: String,
    /// Input sizes (x), in file order.
    pub sizes: Vec<f64>,
    /// Mean times (y) – same length as `sizes`.
    pub means: Vec<f64>,
}

impl Series {
    /// Project a parsed result file onto its size/mean columns.
    pub fn from_results(action: &str, language: &str, file: ResultFile) -> Self {
        let (sizes, means) = file
            .results
            .into_iter()
            .map(|r| (r.parameters.size, r.mean))
            .unzip();
        Series {
            action: action.to_string(),
            language: language.to_string(),
            sizes,
            means,
        }
    }

    /// Number of measured points.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }
}
