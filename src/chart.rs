// Copyright 2025 The framegraph Authors.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use log::debug;
use plotters::prelude::*;
use plotters::style::FontStyle;

use crate::error::{Error, Result};
use crate::resample::{resample, time_axis};
use crate::run::Run;

use std::path::Path;

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            (($colour & 0x0000FF) >> 0) as u8,
        )
    };
}

const COLOURS: &[RGBColor] = &[
    hexcolour!(0x332288),
    hexcolour!(0x117733),
    hexcolour!(0x44AA99),
    hexcolour!(0x88CCEE),
    hexcolour!(0xDDCC77),
    hexcolour!(0x999933),
    hexcolour!(0xCC6677),
    hexcolour!(0x882255),
    hexcolour!(0xAA4499),
    hexcolour!(0x888888),
];

/// Register the bundled DejaVu face for the `sans-serif` family. Must run
/// once before any chart is drawn; the ab_glyph backend has no system font
/// lookup.
pub fn register_fonts() -> Result<()> {
    plotters::style::register_font("sans-serif", FontStyle::Normal, dejavu::sans_mono::regular())
        .map_err(|_| Error::Draw("failed to register builtin font".to_string()))
}

/// Per-render chart settings. One `Settings` describes one output image.
#[derive(Clone, Debug)]
pub struct Settings {
    caption: String,
    x_desc: String,
    y_desc: String,
    size: (u32, u32),
    interval_s: f64,
    compare_opacity: f64,
}

impl Settings {
    pub fn new() -> Settings {
        Settings {
            caption: String::new(),
            x_desc: "Time (seconds)".to_string(),
            y_desc: "Time (ms)".to_string(),
            size: (1600, 1000),
            interval_s: 0.1,
            compare_opacity: 0.5,
        }
    }

    pub fn caption(mut self, caption: impl AsRef<str>) -> Self {
        self.caption = caption.as_ref().to_string();
        self
    }

    pub fn x_desc(mut self, x_desc: impl AsRef<str>) -> Self {
        self.x_desc = x_desc.as_ref().to_string();
        self
    }

    pub fn y_desc(mut self, y_desc: impl AsRef<str>) -> Self {
        self.y_desc = y_desc.as_ref().to_string();
        self
    }

    pub fn size(mut self, size: (u32, u32)) -> Self {
        self.size = size;
        self
    }

    pub fn interval_s(mut self, interval_s: f64) -> Self {
        self.interval_s = interval_s;
        self
    }

    pub fn compare_opacity(mut self, compare_opacity: f64) -> Self {
        self.compare_opacity = compare_opacity;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

/// Comparison series reprojected onto the primary run's time axis: one
/// entry per metric present in both runs, carrying the palette slot of its
/// primary counterpart. Metrics unique to the comparison run are dropped.
pub fn comparison_series(
    primary: &Run,
    comparison: &Run,
    target_len: usize,
) -> Result<Vec<(usize, String, Vec<f64>)>> {
    let mut out = Vec::new();
    for (index, metric) in primary.metrics().iter().enumerate() {
        if let Some(other) = comparison.get(metric.name()) {
            out.push((
                index,
                metric.name().to_string(),
                resample(other.samples(), target_len)?,
            ));
        }
    }
    Ok(out)
}

fn value_bounds(primary: &Run, compared: &[(usize, String, Vec<f64>)]) -> (f64, f64) {
    let mut min = 0.0f64;
    let mut max = 0.0f64;
    let primary_values = primary.metrics().iter().flat_map(|m| m.samples().iter());
    let compared_values = compared.iter().flat_map(|(_, _, samples)| samples.iter());
    for value in primary_values.chain(compared_values) {
        min = min.min(*value);
        max = max.max(*value);
    }
    (min, max)
}

/// Draw one line per metric of `primary`, overlay `comparison` (if any) at
/// reduced opacity, and write the image to `path`. The drawing context is
/// owned by this call and released once the backing file is written.
pub fn render(
    primary: &Run,
    comparison: Option<&Run>,
    path: &Path,
    settings: &Settings,
) -> Result<()> {
    let target_len = primary.sample_count();
    let compared = match comparison {
        Some(other) if target_len > 0 => comparison_series(primary, other, target_len)?,
        Some(_) => {
            debug!("primary run is empty, nothing to align the comparison to");
            Vec::new()
        }
        None => Vec::new(),
    };

    let max_len = primary
        .metrics()
        .iter()
        .map(|m| m.samples().len())
        .max()
        .unwrap_or(0);
    let x_max = if max_len > 1 {
        (max_len - 1) as f64 * settings.interval_s
    } else {
        1.0
    };

    let (min, max) = value_bounds(primary, &compared);
    let y_min = if min < 0.0 { min * 1.05 } else { 0.0 };
    let y_max = if max > 0.0 { max * 1.05 } else { 1.0 };

    let root = BitMapBackend::new(path, settings.size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&settings.caption, ("sans-serif", 40))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 100)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(&settings.x_desc)
        .y_desc(&settings.y_desc)
        .x_label_style(("sans-serif", 20))
        .y_label_style(("sans-serif", 20))
        .draw()?;

    let mut drawn = 0;

    for (index, metric) in primary.metrics().iter().enumerate() {
        if metric.samples().is_empty() {
            continue;
        }
        let colour = COLOURS[index % COLOURS.len()];
        let axis = time_axis(metric.samples().len(), settings.interval_s);
        let points: Vec<(f64, f64)> = axis
            .into_iter()
            .zip(metric.samples().iter().copied())
            .collect();
        chart
            .draw_series(LineSeries::new(points, colour.stroke_width(2)))?
            .label(metric.name())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], colour.stroke_width(2))
            });
        drawn += 1;
    }

    for (index, name, samples) in &compared {
        let colour = COLOURS[index % COLOURS.len()].mix(settings.compare_opacity);
        let axis = time_axis(samples.len(), settings.interval_s);
        let points: Vec<(f64, f64)> = axis.into_iter().zip(samples.iter().copied()).collect();
        chart
            .draw_series(LineSeries::new(points, colour.stroke_width(2)))?
            .label(format!("compare: {}", name))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], colour.stroke_width(2))
            });
        drawn += 1;
    }

    if drawn > 0 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    root.present()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::run::Metric;

    fn run(name: &str, metrics: Vec<(&str, Vec<f64>)>) -> Run {
        Run::new(
            name,
            metrics
                .into_iter()
                .map(|(name, samples)| Metric::new(name, samples))
                .collect(),
        )
    }

    #[test]
    fn comparison_drops_metrics_unique_to_second_run() {
        let primary = run(
            "p",
            vec![
                ("a", vec![1.0, 2.0]),
                ("b", vec![3.0, 4.0]),
                ("c", vec![5.0, 6.0]),
            ],
        );
        let comparison = run(
            "q",
            vec![
                ("a", vec![1.0, 1.0]),
                ("c", vec![2.0, 2.0]),
                ("d", vec![9.0, 9.0]),
            ],
        );

        let compared = comparison_series(&primary, &comparison, 2).unwrap();
        let names: Vec<&str> = compared.iter().map(|(_, name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);

        // palette slots follow the primary metric positions
        let slots: Vec<usize> = compared.iter().map(|(slot, _, _)| *slot).collect();
        assert_eq!(slots, vec![0, 2]);
    }

    #[test]
    fn comparison_resamples_onto_primary_axis() {
        let primary = run("p", vec![("a", vec![0.0; 5])]);
        let comparison = run("q", vec![("a", vec![1.0, 2.0, 3.0])]);

        let compared = comparison_series(&primary, &comparison, 5).unwrap();
        assert_eq!(compared[0].2, vec![1.0, 1.5, 2.0, 2.5, 3.0]);
    }

    #[test]
    fn empty_comparison_series_is_an_input_error() {
        let primary = run("p", vec![("a", vec![1.0, 2.0])]);
        let comparison = run("q", vec![("a", vec![])]);

        match comparison_series(&primary, &comparison, 2) {
            Err(Error::Input(_)) => {}
            other => panic!("expected input error, got {:?}", other),
        }
    }

    #[test]
    fn value_bounds_cover_both_runs() {
        let primary = run("p", vec![("a", vec![1.0, 8.0])]);
        let compared = vec![(0usize, "a".to_string(), vec![-2.0, 12.0])];

        let (min, max) = value_bounds(&primary, &compared);
        assert_eq!(min, -2.0);
        assert_eq!(max, 12.0);

        let (min, max) = value_bounds(&run("e", vec![("a", vec![])]), &[]);
        assert_eq!(min, 0.0);
        assert_eq!(max, 0.0);
    }

    #[test]
    fn render_writes_a_png() {
        register_fonts().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("scene.png");

        let primary = run(
            "scene",
            vec![("frame", vec![1.0, 2.0, 1.5]), ("physics", vec![0.5, 0.25, 0.75])],
        );
        let comparison = run("other", vec![("frame", vec![2.0, 1.0])]);
        let settings = Settings::new().caption("scene").size((320, 240));

        render(&primary, Some(&comparison), &out, &settings).unwrap();
        assert!(out.metadata().unwrap().len() > 0);
    }

    #[test]
    fn render_tolerates_an_empty_run() {
        register_fonts().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("empty.png");

        let empty = run("empty", vec![("a", vec![]), ("b", vec![])]);
        let settings = Settings::new().caption("empty").size((320, 240));

        render(&empty, None, &out, &settings).unwrap();
        assert!(out.exists());
    }
}
