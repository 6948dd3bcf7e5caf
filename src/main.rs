// Copyright 2025 The framegraph Authors.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use framegraph::batch;
use framegraph::chart;
use framegraph::config::Config;
use framegraph::fatal;
use framegraph::logger::Logger;
use framegraph::{NAME, VERSION};

use log::info;

fn main() {
    let config = Config::new();

    Logger::new()
        .label(NAME)
        .level(config.logging())
        .init()
        .expect("Failed to initialize logger");

    chart::register_fonts().expect("Failed to register builtin font");

    info!("{} {} initializing...", NAME, VERSION);
    config.print();

    let result = match config.fps_trace() {
        Some(trace) => batch::process_fps_trace(&trace, &config),
        None => batch::process_directory(&config),
    };

    if let Err(e) = result {
        fatal!("{}", e);
    }
}
