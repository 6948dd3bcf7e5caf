// Copyright 2025 The framegraph Authors.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use log::{debug, info, warn};

use crate::chart;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::run::Run;

use std::fs;
use std::path::{Path, PathBuf};

/// Render one chart per CSV file in the configured input directory. The
/// first failing file aborts the whole batch.
pub fn process_directory(config: &Config) -> Result<()> {
    let input_dir = config
        .input_dir()
        .ok_or_else(|| Error::Input("no input directory given".to_string()))?;

    let files = csv_files(&input_dir)?;
    if files.is_empty() {
        warn!("no csv files in {}", input_dir.display());
        return Ok(());
    }

    fs::create_dir_all(config.output())?;

    for file in &files {
        process_file(file, config)?;
    }

    Ok(())
}

/// CSV files in `dir`, sorted by file name so batch order is deterministic.
pub fn csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::path(dir, e.to_string()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::path(dir, e.to_string()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

fn process_file(path: &Path, config: &Config) -> Result<()> {
    info!("processing {}", path.display());

    let run = Run::from_csv_path(path)?;
    let comparison = load_comparison(path, config)?;

    let out = output_path(path, config);
    let settings = config
        .chart_settings()
        .caption(format!("{}: Performance Metrics Over Time", run.name()))
        .x_desc("Time (seconds)")
        .y_desc("Time (ms)");

    chart::render(&run, comparison.as_ref(), &out, &settings)?;
    info!("wrote {}", out.display());

    Ok(())
}

/// The run with the same file name in the comparison directory. A missing
/// comparison file is tolerated; a malformed one is not.
fn load_comparison(path: &Path, config: &Config) -> Result<Option<Run>> {
    let dir = match config.compare_to() {
        Some(dir) => dir,
        None => return Ok(None),
    };
    let file_name = match path.file_name() {
        Some(file_name) => file_name,
        None => return Ok(None),
    };

    let candidate = dir.join(file_name);
    if candidate.is_file() {
        Ok(Some(Run::from_csv_path(&candidate)?))
    } else {
        debug!("no comparison run at {}", candidate.display());
        Ok(None)
    }
}

/// Render the older single-row frametime trace format as one chart.
pub fn process_fps_trace(path: &Path, config: &Config) -> Result<()> {
    info!("processing {}", path.display());

    let run = Run::from_fps_trace_path(path)?;

    fs::create_dir_all(config.output())?;
    let out = output_path(path, config);
    let settings = config
        .chart_settings()
        .caption("Complete frametime over runtime")
        .x_desc("Elapsed time (Seconds)")
        .y_desc("Frametime (Milliseconds)");

    chart::render(&run, None, &out, &settings)?;
    info!("wrote {}", out.display());

    Ok(())
}

fn output_path(input: &Path, config: &Config) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("chart");
    config.output().join(format!("{}.png", stem))
}
