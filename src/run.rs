// Copyright 2025 The framegraph Authors.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use csv::{ReaderBuilder, Trim};
use log::warn;

use crate::error::{Error, Result};

use std::path::Path;

/// Ordered samples for one metric across a run's duration.
#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    name: String,
    samples: Vec<f64>,
}

impl Metric {
    pub fn new(name: &str, samples: Vec<f64>) -> Metric {
        Metric {
            name: name.to_string(),
            samples,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
}

/// Parsed contents of one benchmark CSV file: named metric series in header
/// order, immutable after load.
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    name: String,
    metrics: Vec<Metric>,
}

impl Run {
    pub fn new(name: &str, metrics: Vec<Metric>) -> Run {
        Run {
            name: name.to_string(),
            metrics,
        }
    }

    /// Load a run from a comma-separated file with a header row of metric
    /// names. The first data row is discarded as a warm-up sample captured
    /// while the scene was still loading.
    pub fn from_csv_path(path: &Path) -> Result<Run> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_path(path)
            .map_err(|e| Error::path(path, e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| Error::path(path, e.to_string()))?
            .clone();

        // Metric slots in first-occurrence order. A duplicate header name
        // maps its column onto the existing slot, so the later column wins.
        let mut metrics: Vec<Metric> = Vec::new();
        let mut slots: Vec<usize> = Vec::with_capacity(headers.len());
        for name in headers.iter() {
            if let Some(slot) = metrics.iter().position(|m| m.name == name) {
                warn!(
                    "{}: duplicate metric `{}` in header, keeping the later column",
                    path.display(),
                    name
                );
                slots.push(slot);
            } else {
                metrics.push(Metric::new(name, Vec::new()));
                slots.push(metrics.len() - 1);
            }
        }

        let mut row_values = vec![0.0; metrics.len()];
        for (index, record) in reader.records().enumerate() {
            // header is file row 1, so data record `index` is row `index + 2`
            let row = index + 2;
            let record = record.map_err(|e| Error::format(path, row, "", e.to_string()))?;

            if index == 0 {
                continue;
            }

            for (col, field) in record.iter().enumerate() {
                let value: f64 = field.parse().map_err(|_| {
                    Error::format(
                        path,
                        row,
                        &headers[col],
                        format!("invalid number `{}`", field),
                    )
                })?;
                row_values[slots[col]] = value;
            }
            for (slot, value) in row_values.iter().enumerate() {
                metrics[slot].samples.push(*value);
            }
        }

        Ok(Run {
            name: stem(path),
            metrics,
        })
    }

    /// Load the older headerless trace format: all frametime samples on a
    /// single row. Later rows replace earlier ones, and nothing is skipped.
    pub fn from_fps_trace_path(path: &Path) -> Result<Run> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_path(path)
            .map_err(|e| Error::path(path, e.to_string()))?;

        let mut samples = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let row = index + 1;
            let record = record.map_err(|e| Error::format(path, row, "", e.to_string()))?;

            if record.iter().all(|field| field.is_empty()) {
                continue;
            }

            samples = record
                .iter()
                .enumerate()
                .map(|(col, field)| {
                    field.parse::<f64>().map_err(|_| {
                        Error::format(
                            path,
                            row,
                            &format!("{}", col + 1),
                            format!("invalid number `{}`", field),
                        )
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
        }

        Ok(Run {
            name: stem(path),
            metrics: vec![Metric::new("frametime", samples)],
        })
    }

    /// The scene name, taken from the file stem.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn get(&self, name: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.name == name)
    }

    /// Length of the first series, which anchors the run's time axis.
    pub fn sample_count(&self) -> usize {
        self.metrics.first().map(|m| m.samples.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.iter().all(|m| m.samples.is_empty())
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("run")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::path::PathBuf;

    fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_skips_first_data_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "scene.csv", "a,b\n1,2\n3,4\n5,6\n");

        let run = Run::from_csv_path(&path).unwrap();
        assert_eq!(run.name(), "scene");
        assert_eq!(run.metrics().len(), 2);
        assert_eq!(run.get("a").unwrap().samples(), &[3.0, 5.0]);
        assert_eq!(run.get("b").unwrap().samples(), &[4.0, 6.0]);
    }

    #[test]
    fn metric_order_follows_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "order.csv", "z,a,m\n0,0,0\n1,2,3\n");

        let run = Run::from_csv_path(&path).unwrap();
        let names: Vec<&str> = run.metrics().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn width_and_length_properties() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "wide.csv", "a,b,c,d\n1,1,1,1\n2,2,2,2\n3,3,3,3\n4,4,4,4\n");

        let run = Run::from_csv_path(&path).unwrap();
        assert_eq!(run.metrics().len(), 4);
        for metric in run.metrics() {
            assert_eq!(metric.samples().len(), 3);
        }
        assert_eq!(run.sample_count(), 3);
    }

    #[test]
    fn header_only_yields_empty_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "empty.csv", "a,b\n");

        let run = Run::from_csv_path(&path).unwrap();
        assert_eq!(run.metrics().len(), 2);
        assert!(run.is_empty());
        assert_eq!(run.sample_count(), 0);
    }

    #[test]
    fn single_data_row_yields_empty_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "single.csv", "a,b\n1,2\n");

        let run = Run::from_csv_path(&path).unwrap();
        assert!(run.is_empty());
    }

    #[test]
    fn invalid_field_reports_row_and_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "bad.csv", "a,b\n1,2\n3,oops\n");

        match Run::from_csv_path(&path) {
            Err(Error::Format { row, column, .. }) => {
                assert_eq!(row, 3);
                assert_eq!(column, "b");
            }
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn missing_field_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "short.csv", "a,b\n1,2\n3\n");

        match Run::from_csv_path(&path) {
            Err(Error::Format { row, .. }) => assert_eq!(row, 3),
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_a_path_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");

        match Run::from_csv_path(&path) {
            Err(Error::Path { .. }) => {}
            other => panic!("expected path error, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_header_keeps_later_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "dup.csv", "a,b,a\n1,2,3\n4,5,6\n7,8,9\n");

        let run = Run::from_csv_path(&path).unwrap();
        assert_eq!(run.metrics().len(), 2);
        assert_eq!(run.get("a").unwrap().samples(), &[6.0, 9.0]);
        assert_eq!(run.get("b").unwrap().samples(), &[5.0, 8.0]);
    }

    #[test]
    fn fps_trace_reads_single_row_without_skip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "last-run-fps.csv", "1.0,2.0,3.0\n");

        let run = Run::from_fps_trace_path(&path).unwrap();
        assert_eq!(run.metrics().len(), 1);
        assert_eq!(run.get("frametime").unwrap().samples(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn fps_trace_last_row_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "trace.csv", "1,2\n3,4,5\n");

        let run = Run::from_fps_trace_path(&path).unwrap();
        assert_eq!(run.get("frametime").unwrap().samples(), &[3.0, 4.0, 5.0]);
    }

    #[test]
    fn fps_trace_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "garbage.csv", "1.0,wat\n");

        match Run::from_fps_trace_path(&path) {
            Err(Error::Format { row, column, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "2");
            }
            other => panic!("expected format error, got {:?}", other),
        }
    }
}
