extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate mandelbmp;

use clap::{App, Arg, ArgMatches};
use env_logger::Builder;
use log::LevelFilter;
use mandelbmp::config::Arguments;
use mandelbmp::RenderConfig;
use std::str::FromStr;

const XLEFT: &str = "xleft";
const XRIGHT: &str = "xright";
const YLOWER: &str = "ylower";
const YUPPER: &str = "yupper";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const OUTPUT: &str = "output";
const THREADS: &str = "threads";
const THRESHOLD: &str = "threshold";
const VERBOSITY: &str = "verbosity";

// A floating-point edge of the region.  Values may be negative, so
// leading hyphens are not taken as flags.
fn edge(name: &'static str, help: &'static str) -> Arg<'static, 'static> {
    Arg::with_name(name)
        .required(false)
        .long(name)
        .takes_value(true)
        .allow_hyphen_values(true)
        .value_name("REAL")
        .help(help)
}

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandelbmp")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Renders the Mandelbrot set to a 24-bit bitmap")
        .after_help(
            "Give three region edges and the fourth is derived from the image's \
             aspect ratio. Give all four and they are used as-is. Give fewer than \
             three and the default region is used.",
        )
        .arg(edge(XLEFT, "Real part of the left edge of the region"))
        .arg(edge(XRIGHT, "Real part of the right edge of the region"))
        .arg(edge(YLOWER, "Imaginary part of the lower edge of the region"))
        .arg(edge(YUPPER, "Imaginary part of the upper edge of the region"))
        .arg(
            Arg::with_name(WIDTH)
                .required(false)
                .long(WIDTH)
                .takes_value(true)
                .allow_hyphen_values(true)
                .value_name("PIXELS")
                .help("Image width in pixels, below 20000 (default 1920)"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .required(false)
                .long(HEIGHT)
                .takes_value(true)
                .allow_hyphen_values(true)
                .value_name("PIXELS")
                .help("Image height in pixels, below 20000 (default 1080)"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (default mandelbrot.bmp)"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .allow_hyphen_values(true)
                .help("Number of worker threads (default: one per CPU)"),
        )
        .arg(
            Arg::with_name(THRESHOLD)
                .required(false)
                .long(THRESHOLD)
                .takes_value(true)
                .allow_hyphen_values(true)
                .help("Escape counts above this darken the background (default 4)"),
        )
        .arg(
            Arg::with_name(VERBOSITY)
                .required(false)
                .long(VERBOSITY)
                .short("v")
                .takes_value(true)
                .help("Set verbosity level for output (trace, debug, info, warn (default), error)"),
        )
        .get_matches()
}

fn init_logging(verbosity: Option<&str>) {
    let parsed = verbosity.map(|v| (v, LevelFilter::from_str(v)));
    let level = match parsed {
        Some((_, Ok(level))) => level,
        _ => LevelFilter::Warn,
    };
    Builder::from_default_env().filter_level(level).init();
    if let Some((v, Err(_))) = parsed {
        warn!("Unknown verbosity '{}', using warn", v);
    }
}

fn main() {
    let matches = args();
    init_logging(matches.value_of(VERBOSITY));

    let config = RenderConfig::from_arguments(&Arguments {
        x_left: matches.value_of(XLEFT),
        x_right: matches.value_of(XRIGHT),
        y_lower: matches.value_of(YLOWER),
        y_upper: matches.value_of(YUPPER),
        width: matches.value_of(WIDTH),
        height: matches.value_of(HEIGHT),
        threads: matches.value_of(THREADS),
        threshold: matches.value_of(THRESHOLD),
        output: matches.value_of(OUTPUT),
    });

    if let Err(e) = mandelbmp::run(&config) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
