// Copyright 2025 The framegraph Authors.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_derive::*;

fn default_interval_ms() -> u64 {
    100
}

fn default_width() -> u32 {
    1600
}

fn default_height() -> u32 {
    1000
}

fn default_output() -> String {
    "plots".to_string()
}

fn default_compare_opacity() -> f64 {
    0.5
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct General {
    #[serde(default = "default_interval_ms")]
    interval_ms: u64,
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
    #[serde(default = "default_output")]
    output: String,
    #[serde(default = "default_compare_opacity")]
    compare_opacity: f64,
}

impl General {
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn set_interval_ms(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    pub fn output(&self) -> String {
        self.output.clone()
    }

    pub fn set_output(&mut self, output: String) {
        self.output = output;
    }

    pub fn compare_opacity(&self) -> f64 {
        self.compare_opacity
    }

    pub fn set_compare_opacity(&mut self, compare_opacity: f64) {
        self.compare_opacity = compare_opacity;
    }
}

impl Default for General {
    fn default() -> General {
        General {
            interval_ms: default_interval_ms(),
            width: default_width(),
            height: default_height(),
            output: default_output(),
            compare_opacity: default_compare_opacity(),
        }
    }
}
