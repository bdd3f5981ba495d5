use palette::Srgb;
use thiserror::Error;

use crate::data::filter::Selected;

/// Line thickness of every dataset, in pixels.
pub const BORDER_WIDTH: u32 = 4;

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("{action}: {language} was measured at sizes {found:?}, expected {expected:?}")]
    SizeMismatch {
        action: String,
        language: String,
        expected: Vec<f64>,
        found: Vec<f64>,
    },
}

// ---------------------------------------------------------------------------
// Declarative chart description
// ---------------------------------------------------------------------------

/// Title text of one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTitle {
    pub text: String,
    /// Gap between the axis and its title, in pixels.
    pub padding: u32,
}

/// Corner of the plotting area that holds the legend box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
}

impl LegendPosition {
    /// Pick the upper corner the lines stay away from: rising lines leave
    /// the upper left free.
    fn clear_of(datasets: &[Dataset]) -> Self {
        let rising = datasets.iter().all(|d| match (d.data.first(), d.data.last()) {
            (Some(first), Some(last)) => last >= first,
            _ => true,
        });
        if rising {
            LegendPosition::UpperLeft
        } else {
            LegendPosition::UpperRight
        }
    }
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub color: Srgb<u8>,
    /// y values, one per x label.
    pub data: Vec<f64>,
    pub border_width: u32,
}

/// Everything the renderer needs to draw one action's chart.
///
/// `labels` are categories: dataset value `i` is drawn above `labels[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDescription {
    pub title: String,
    pub labels: Vec<f64>,
    pub datasets: Vec<Dataset>,
    pub x_axis: AxisTitle,
    pub y_axis: AxisTitle,
    /// Both axis titles share one font; this picks its weight.
    pub axis_titles_bold: bool,
    pub legend: LegendPosition,
}

impl ChartDescription {
    /// A chart with title and axes but nothing plotted.
    pub fn empty(title: &str) -> Self {
        ChartDescription {
            title: title.to_string(),
            labels: Vec::new(),
            datasets: Vec::new(),
            x_axis: AxisTitle {
                text: "N".to_string(),
                padding: 20,
            },
            y_axis: AxisTitle {
                text: "Elapsed Time [s]".to_string(),
                padding: 25,
            },
            axis_titles_bold: true,
            legend: LegendPosition::UpperLeft,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Largest y value over all datasets (0 when nothing is plotted).
    pub fn max_value(&self) -> f64 {
        self.datasets
            .iter()
            .flat_map(|d| d.data.iter().copied())
            .fold(0.0, f64::max)
    }
}

/// Build the chart for one action from its selected, ordered series.
///
/// All series must share the size sweep of the first one; it becomes the
/// x-axis.
pub fn describe(title: &str, group: &[Selected]) -> Result<ChartDescription, ChartError> {
    let mut chart = ChartDescription::empty(title);
    let Some(first) = group.first().map(|s| s.series) else {
        return Ok(chart);
    };

    for &Selected { language, series } in group {
        if series.sizes != first.sizes {
            return Err(ChartError::SizeMismatch {
                action: series.action.clone(),
                language: series.language.clone(),
                expected: first.sizes.clone(),
                found: series.sizes.clone(),
            });
        }

        chart.datasets.push(Dataset {
            label: language.name.clone(),
            color: language.color,
            data: series.means.clone(),
            border_width: BORDER_WIDTH,
        });
    }
    chart.labels = first.sizes.clone();
    chart.legend = LegendPosition::clear_of(&chart.datasets);

    Ok(chart)
}
