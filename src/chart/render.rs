use std::io::Cursor;
use std::panic::{self, AssertUnwindSafe};

use anyhow::{Context, Result};
use image::{ImageFormat, RgbImage};
use log::warn;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontStyle};

use super::description::{ChartDescription, LegendPosition};

/// Room for tick labels next to an axis, before the title padding.
const TICK_LABEL_AREA: i32 = 40;

/// Turns a chart description into an encoded image.
pub trait ChartRenderer {
    fn render(&self, chart: &ChartDescription) -> Result<Vec<u8>>;
}

// ---------------------------------------------------------------------------
// PNG renderer (plotters bitmap backend → image PNG encoder)
// ---------------------------------------------------------------------------

/// Rasterizes charts onto an opaque white canvas and encodes them as PNG.
#[derive(Debug, Clone, Copy)]
pub struct PngRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for PngRenderer {
    fn default() -> Self {
        PngRenderer {
            width: 1200,
            height: 600,
        }
    }
}

impl ChartRenderer for PngRenderer {
    fn render(&self, chart: &ChartDescription) -> Result<Vec<u8>> {
        let mut pixels = vec![0u8; self.width as usize * self.height as usize * 3];

        // Font lookup can fail (or panic inside the font backend) on hosts
        // without system fonts; the lines alone are still worth writing.
        let styled = panic::catch_unwind(AssertUnwindSafe(|| {
            self.draw(&mut pixels, chart, true)
        }));
        match styled {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                warn!("{}: drawing text failed ({err:#}), rendering lines only", chart.title);
                self.draw(&mut pixels, chart, false)?;
            }
            Err(_) => {
                warn!("{}: font backend panicked, rendering lines only", chart.title);
                self.draw(&mut pixels, chart, false)?;
            }
        }

        encode_png(pixels, self.width, self.height)
    }
}

impl PngRenderer {
    fn draw(&self, pixels: &mut [u8], chart: &ChartDescription, with_text: bool) -> Result<()> {
        let root = BitMapBackend::with_buffer(pixels, (self.width, self.height))
            .into_drawing_area();
        // Paint the whole canvas before plotting; the buffer has no alpha.
        root.fill(&WHITE)?;
        draw_chart(&root, chart, with_text)?;
        root.present()?;
        Ok(())
    }
}

fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    chart: &ChartDescription,
    with_text: bool,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let x_max = chart.labels.len().saturating_sub(1).max(1) as f64;
    let y_max = match chart.max_value() {
        v if v > 0.0 => v * 1.1,
        _ => 1.0,
    };

    let mut builder = ChartBuilder::on(root);
    builder.margin(20);
    if with_text {
        builder
            .caption(&chart.title, ("sans-serif", 28).into_font())
            .x_label_area_size(TICK_LABEL_AREA + chart.x_axis.padding as i32)
            .y_label_area_size(2 * TICK_LABEL_AREA + chart.y_axis.padding as i32);
    }
    let mut ctx = builder.build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    if with_text {
        let labels = &chart.labels;
        let x_formatter = |v: &f64| category_label(labels, *v);
        ctx.configure_mesh()
            .x_labels(labels.len().max(2))
            .x_label_formatter(&x_formatter)
            .x_desc(chart.x_axis.text.as_str())
            .y_desc(chart.y_axis.text.as_str())
            .axis_desc_style(title_font(chart.axis_titles_bold))
            .label_style(("sans-serif", 16).into_font())
            .draw()?;
    }

    for dataset in &chart.datasets {
        let color = RGBColor(dataset.color.red, dataset.color.green, dataset.color.blue);
        let style = color.stroke_width(dataset.border_width);
        let points = dataset
            .data
            .iter()
            .enumerate()
            .map(|(i, &mean)| (i as f64, mean));

        let series = ctx.draw_series(LineSeries::new(points, style))?;
        if with_text {
            series
                .label(dataset.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], style));
        }
    }

    if with_text && !chart.is_empty() {
        let position = match chart.legend {
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
        };
        ctx.configure_series_labels()
            .position(position)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(("sans-serif", 18).into_font())
            .draw()?;
    }

    Ok(())
}

/// Shared font of both axis titles. A bold face is only used when the
/// system font source has one for the sans-serif family.
fn title_font(bold: bool) -> FontDesc<'static> {
    let font = ("sans-serif", 22).into_font();
    if bold {
        font.style(FontStyle::Bold)
    } else {
        font
    }
}

/// Tick text for x position `position`: the size at that category, blank
/// between categories.
fn category_label(labels: &[f64], position: f64) -> String {
    let index = position.round();
    if index < 0.0 || (position - index).abs() > 1e-9 {
        return String::new();
    }
    labels
        .get(index as usize)
        .map(|size| size.to_string())
        .unwrap_or_default()
}

fn encode_png(pixels: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let image = RgbImage::from_raw(width, height, pixels)
        .context("pixel buffer does not match the canvas size")?;
    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, ImageFormat::Png)
        .context("encoding PNG")?;
    Ok(png.into_inner())
}
