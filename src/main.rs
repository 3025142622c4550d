extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate feigenbaum;
#[macro_use]
extern crate log;
extern crate num_cpus;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use failure::Error;
use feigenbaum::canvas::Canvas;
use feigenbaum::cobweb::CobwebMovie;
use feigenbaum::julia::JuliaMovie;
use feigenbaum::rainbow::RainbowMovie;
use feigenbaum::zoom::ZoomMovie;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::str::FromStr;

fn validate_number<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTDIR: &str = "outdir";
const FRAMES: &str = "frames";
const LAMBDA: &str = "LAMBDA";
const THREADS: &str = "threads";
const SEED: &str = "seed";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("feigenbaum")
        .version("0.1.0")
        .about("Logistic map movie renderer")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name(OUTDIR)
                .long(OUTDIR)
                .short("o")
                .takes_value(true)
                .default_value("/tmp")
                .global(true)
                .help("Directory that receives the numbered frame files"),
        )
        .arg(
            Arg::with_name(FRAMES)
                .long(FRAMES)
                .takes_value(true)
                .global(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1usize,
                        1_000_000,
                        "Could not parse frame count",
                        "Frame count must be between 1 and 1000000",
                    )
                })
                .help("Override the frame count of the selected mode"),
        )
        .subcommand(
            SubCommand::with_name("cobweb")
                .about("Cobweb diagram with a sweeping starting point")
                .arg(
                    Arg::with_name(LAMBDA)
                        .required(true)
                        .validator(|s| {
                            validate_number::<f64>(&s, "Could not parse the lambda parameter")
                        })
                        .help("Map parameter, e.g. 3.9"),
                ),
        )
        .subcommand(
            SubCommand::with_name("sweep")
                .about("Cobweb diagram of the critical orbit, lambda swept 2 to 4"),
        )
        .subcommand(
            SubCommand::with_name("rainbow")
                .about("Bifurcation diagram painting itself in column by column"),
        )
        .subcommand(
            SubCommand::with_name("zoom")
                .about("Adaptive zoom onto the period-3 accumulation point")
                .arg(
                    Arg::with_name(THREADS)
                        .long(THREADS)
                        .short("t")
                        .takes_value(true)
                        .validator(move |s| {
                            validate_range(
                                &s,
                                1,
                                max_threads,
                                "Could not parse thread count",
                                &format!("Thread count must be between 1 and {}", max_threads),
                            )
                        })
                        .help("Number of worker threads per frame"),
                ),
        )
        .subcommand(
            SubCommand::with_name("julia")
                .about("Julia sets of the inverse map, walked backwards")
                .arg(
                    Arg::with_name(SEED)
                        .long(SEED)
                        .takes_value(true)
                        .default_value("42")
                        .validator(|s| validate_number::<u64>(&s, "Could not parse seed"))
                        .help("Seed for the branch-choice stream"),
                ),
        )
        .get_matches()
}

fn outdir(m: &ArgMatches) -> PathBuf {
    PathBuf::from(m.value_of(OUTDIR).unwrap())
}

fn frames_override(m: &ArgMatches) -> Option<usize> {
    m.value_of(FRAMES)
        .map(|s| usize::from_str(s).expect("validated frame count"))
}

/// One named artifact per frame index, zero-padded so downstream
/// assembly tools sort them correctly.
fn write_frame(dir: &Path, frame: usize, canvas: &Canvas) -> Result<(), Error> {
    let path = dir.join(format!("frame_{:04}.ppm", frame));
    let file = File::create(&path)?;
    let mut out = BufWriter::new(file);
    canvas.write_ppm(&mut out)?;
    Ok(())
}

fn run() -> Result<(), Error> {
    let matches = args();

    match matches.subcommand() {
        ("cobweb", Some(m)) => {
            let lambda = f64::from_str(m.value_of(LAMBDA).unwrap()).expect("validated lambda");
            let mut movie = CobwebMovie::seed_sweep(lambda);
            if let Some(frames) = frames_override(m) {
                movie.config.frames = frames;
            }
            info!(
                "generating {} frames for lambda = {}",
                movie.frames(),
                lambda
            );
            let dir = outdir(m);
            movie.render(&mut |frame, canvas: &Canvas| write_frame(&dir, frame, canvas))
        }
        ("sweep", Some(m)) => {
            let mut movie = CobwebMovie::lambda_sweep();
            if let Some(frames) = frames_override(m) {
                movie.config.frames = frames;
            }
            info!("generating {} frames, lambda swept 2 to 4", movie.frames());
            let dir = outdir(m);
            movie.render(&mut |frame, canvas: &Canvas| write_frame(&dir, frame, canvas))
        }
        ("rainbow", Some(m)) => {
            let movie = RainbowMovie::new();
            if frames_override(m).is_some() {
                warn!("the rainbow scan derives its frame count from the canvas width; --frames ignored");
            }
            info!("scanning {} columns", movie.config.width);
            let dir = outdir(m);
            movie.render(&mut |frame, canvas: &Canvas| write_frame(&dir, frame, canvas))
        }
        ("zoom", Some(m)) => {
            let mut movie = ZoomMovie::new();
            if let Some(threads) = m.value_of(THREADS) {
                movie.config.threads = usize::from_str(threads).expect("validated thread count");
            }
            if let Some(frames) = frames_override(m) {
                movie.config.frames = frames;
            }
            info!(
                "generating {} frames on {} threads",
                movie.frames(),
                movie.config.threads
            );
            let dir = outdir(m);
            movie.render(&mut |frame, canvas: &Canvas| write_frame(&dir, frame, canvas))
        }
        ("julia", Some(m)) => {
            let mut movie = JuliaMovie::new();
            movie.config.seed = u64::from_str(m.value_of(SEED).unwrap()).expect("validated seed");
            if let Some(frames) = frames_override(m) {
                movie.config.frames = frames;
            }
            info!("generating {} inverse-iteration frames", movie.frames());
            let dir = outdir(m);
            movie.render(&mut |frame, canvas: &Canvas| write_frame(&dir, frame, canvas))
        }
        _ => unreachable!("subcommand is required"),
    }
}

fn main() {
    env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run() {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
