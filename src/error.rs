// Copyright 2025 The framegraph Authors.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A data row with a missing or non-numeric field.
    #[error("{}: row {row}: column `{column}`: {detail}", .path.display())]
    Format {
        path: PathBuf,
        row: usize,
        column: String,
        detail: String,
    },

    /// A missing or unreadable input file or directory.
    #[error("{}: {detail}", .path.display())]
    Path { path: PathBuf, detail: String },

    /// A request the resampler cannot satisfy, such as an empty source.
    #[error("{0}")]
    Input(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("chart rendering failed: {0}")]
    Draw(String),
}

impl Error {
    pub fn format(path: &Path, row: usize, column: &str, detail: String) -> Error {
        Error::Format {
            path: path.to_path_buf(),
            row,
            column: column.to_string(),
            detail,
        }
    }

    pub fn path(path: &Path, detail: String) -> Error {
        Error::Path {
            path: path.to_path_buf(),
            detail,
        }
    }
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for Error {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        Error::Draw(e.to_string())
    }
}
