// Copyright 2025 The framegraph Authors.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod general;

pub use self::general::General;

use clap::{App, Arg, ArgMatches};
use log::LevelFilter;
use serde_derive::*;

use crate::chart;
use crate::{NAME, VERSION};

use std::io::Read;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

fn default_logging() -> LevelFilter {
    LevelFilter::Info
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    general: General,
    #[serde(skip_deserializing)]
    input_dir: Option<PathBuf>,
    #[serde(skip_deserializing)]
    compare_to: Option<PathBuf>,
    #[serde(skip_deserializing)]
    fps_trace: Option<PathBuf>,
    #[serde(skip_deserializing, default = "default_logging")]
    logging: LevelFilter,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            general: Default::default(),
            input_dir: None,
            compare_to: None,
            fps_trace: None,
            logging: default_logging(),
        }
    }
}

impl Config {
    /// parse command line options and return `Config`
    pub fn new() -> Config {
        let matches = App::new(NAME)
            .version(VERSION)
            .about("Renders frametime charts from benchmark metrics")
            .arg(
                Arg::with_name("input_dir")
                    .value_name("DIR")
                    .help("Directory of benchmark CSV files")
                    .index(1)
                    .required_unless("fps-trace"),
            )
            .arg(
                Arg::with_name("compare-to")
                    .long("compare-to")
                    .value_name("DIR")
                    .help("Second directory of runs to overlay for comparison")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("output")
                    .long("output")
                    .value_name("DIR")
                    .help("Output directory for rendered charts")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("config")
                    .long("config")
                    .value_name("FILE")
                    .help("TOML config file")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("interval")
                    .long("interval")
                    .value_name("Milliseconds")
                    .help("Sampling interval of the input data")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("width")
                    .long("width")
                    .value_name("Pixels")
                    .help("Canvas width")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("height")
                    .long("height")
                    .value_name("Pixels")
                    .help("Canvas height")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("fps-trace")
                    .long("fps-trace")
                    .value_name("FILE")
                    .help("Render a headerless single-row frametime trace")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("verbose")
                    .short("v")
                    .long("verbose")
                    .help("Increase verbosity by one level. Can be used more than once")
                    .multiple(true),
            )
            .get_matches();

        let mut config = if let Some(file) = matches.value_of("config") {
            Config::load_from_file(file)
        } else {
            Default::default()
        };

        if let Some(input_dir) = matches.value_of("input_dir") {
            config.input_dir = Some(PathBuf::from(input_dir));
        }

        if let Some(compare_to) = matches.value_of("compare-to") {
            config.compare_to = Some(PathBuf::from(compare_to));
        }

        if let Some(fps_trace) = matches.value_of("fps-trace") {
            config.fps_trace = Some(PathBuf::from(fps_trace));
        }

        if let Some(output) = matches.value_of("output") {
            config.general.set_output(output.to_string());
        }

        if let Some(interval) = parse_numeric_arg(&matches, "interval") {
            config.general.set_interval_ms(interval);
        }

        if let Some(width) = parse_numeric_arg(&matches, "width") {
            config.general.set_width(width);
        }

        if let Some(height) = parse_numeric_arg(&matches, "height") {
            config.general.set_height(height);
        }

        config.logging = match matches.occurrences_of("verbose") {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        if config.general.interval_ms() == 0 {
            println!("ERROR: interval must be greater than zero");
            process::exit(1);
        }

        if config.general.width() == 0 || config.general.height() == 0 {
            println!("ERROR: canvas dimensions must be greater than zero");
            process::exit(1);
        }

        if config.general.compare_opacity() < 0.0 || config.general.compare_opacity() > 1.0 {
            println!("ERROR: compare_opacity must be within [0.0, 1.0]");
            process::exit(1);
        }

        config
    }

    fn load_from_file(file: &str) -> Config {
        let mut file = std::fs::File::open(file).expect("failed to open config file");
        let mut content = String::new();
        file.read_to_string(&mut content).expect("failed to read");
        let toml: Config = toml::from_str(&content).expect("failed to parse toml");
        toml
    }

    pub fn input_dir(&self) -> Option<PathBuf> {
        self.input_dir.clone()
    }

    pub fn set_input_dir(&mut self, input_dir: Option<PathBuf>) {
        self.input_dir = input_dir;
    }

    pub fn compare_to(&self) -> Option<PathBuf> {
        self.compare_to.clone()
    }

    pub fn set_compare_to(&mut self, compare_to: Option<PathBuf>) {
        self.compare_to = compare_to;
    }

    pub fn fps_trace(&self) -> Option<PathBuf> {
        self.fps_trace.clone()
    }

    pub fn set_fps_trace(&mut self, fps_trace: Option<PathBuf>) {
        self.fps_trace = fps_trace;
    }

    pub fn logging(&self) -> LevelFilter {
        self.logging
    }

    pub fn set_logging(&mut self, level: LevelFilter) {
        self.logging = level;
    }

    pub fn output(&self) -> PathBuf {
        PathBuf::from(self.general.output())
    }

    pub fn set_output(&mut self, output: String) {
        self.general.set_output(output);
    }

    pub fn interval_ms(&self) -> u64 {
        self.general.interval_ms()
    }

    pub fn set_interval_ms(&mut self, interval_ms: u64) {
        self.general.set_interval_ms(interval_ms);
    }

    pub fn width(&self) -> u32 {
        self.general.width()
    }

    pub fn set_width(&mut self, width: u32) {
        self.general.set_width(width);
    }

    pub fn height(&self) -> u32 {
        self.general.height()
    }

    pub fn set_height(&mut self, height: u32) {
        self.general.set_height(height);
    }

    pub fn compare_opacity(&self) -> f64 {
        self.general.compare_opacity()
    }

    /// chart settings shared by every render in this invocation
    pub fn chart_settings(&self) -> chart::Settings {
        chart::Settings::new()
            .size((self.general.width(), self.general.height()))
            .interval_s(self.general.interval_ms() as f64 / 1000.0)
            .compare_opacity(self.general.compare_opacity())
    }

    pub fn print(&self) {
        log::info!("interval: {} ms", self.general.interval_ms());
        log::info!(
            "canvas: {}x{}",
            self.general.width(),
            self.general.height()
        );
        log::info!("output: {}", self.general.output());
        if let Some(compare_to) = &self.compare_to {
            log::info!("comparing against: {}", compare_to.display());
        }
    }
}

/// a helper function to parse a numeric argument by name from `ArgMatches`
fn parse_numeric_arg<T: FromStr>(matches: &ArgMatches, key: &str) -> Option<T> {
    matches.value_of(key).map(|f| {
        f.parse().unwrap_or_else(|_| {
            println!("ERROR: could not parse {}", key);
            process::exit(1);
        })
    })
}
