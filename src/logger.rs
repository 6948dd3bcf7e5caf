// Copyright 2025 The framegraph Authors.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Builder for the process-wide logger.
pub struct Logger {
    label: String,
    level: LevelFilter,
}

impl Logger {
    pub fn new() -> Logger {
        Logger {
            label: "framegraph".to_string(),
            level: LevelFilter::Info,
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn init(self) -> Result<(), SetLoggerError> {
        log::set_max_level(self.level);
        log::set_boxed_logger(Box::new(SimpleLogger {
            label: self.label,
            level: self.level,
        }))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

struct SimpleLogger {
    label: String,
    level: LevelFilter,
}

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // module path at debug and below, program label otherwise
            let target = if record.level() >= Level::Debug {
                record.target()
            } else {
                self.label.as_str()
            };
            println!(
                "{} {:<5} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                target,
                record.args()
            );
        }
    }

    fn flush(&self) {}
}
