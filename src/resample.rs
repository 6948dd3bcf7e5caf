// Copyright 2025 The framegraph Authors.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::{Error, Result};

/// Uniform time axis for a series of `len` samples captured every
/// `interval_s` seconds, starting at zero.
pub fn time_axis(len: usize, interval_s: f64) -> Vec<f64> {
    (0..len).map(|i| i as f64 * interval_s).collect()
}

/// Project `src` onto `target_len` evenly spaced positions over the
/// normalized domain [0, 1], linearly interpolating between the bracketing
/// source samples. First and last values are always preserved.
pub fn resample(src: &[f64], target_len: usize) -> Result<Vec<f64>> {
    if src.is_empty() {
        return Err(Error::Input("cannot resample an empty series".to_string()));
    }
    if target_len == 0 {
        return Err(Error::Input("cannot resample to zero samples".to_string()));
    }
    if src.len() == 1 {
        return Ok(vec![src[0]; target_len]);
    }

    let last = (src.len() - 1) as f64;
    let out = (0..target_len)
        .map(|j| {
            let pos = if target_len == 1 {
                0.0
            } else {
                j as f64 / (target_len - 1) as f64
            };
            let x = pos * last;
            let i = (x.floor() as usize).min(src.len() - 2);
            let frac = x - i as f64;
            src[i] * (1.0 - frac) + src[i + 1] * frac
        })
        .collect();

    Ok(out)
}
