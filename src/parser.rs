use std::path::PathBuf;

use clap::{ArgAction, Parser};
use topography::{Interpolation, ResampleParameters, DEFAULT_GRID_STEPS};

/// Triangulate scattered elevation samples and resample them onto a regular grid
#[derive(Parser, Clone, Debug)]
pub struct Args {
    /// Path to input, a comma separated table with the columns x, y and z
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to output, the resampled points are written in the same format as the input
    #[arg(short, long, default_value = "resampled.csv")]
    pub output: PathBuf,

    /// Number of grid nodes along each axis of the resampled surface, min value 2
    #[arg(short, long, default_value_t = DEFAULT_GRID_STEPS)]
    pub grid_steps: usize,

    /// Interpolation between the samples, "linear" or "natural"
    #[arg(long, default_value_t = Interpolation::Linear)]
    pub interpolation: Interpolation,

    /// Number of threads used in resampling, defaults to all available threads
    #[arg(short, long, default_value_t = std::thread::available_parallelism().map_or(1, |n| n.get()))]
    pub threads: usize,

    /// Triangulate a random subset of this many points instead of the whole input
    #[arg(long)]
    pub sample: Option<usize>,

    /// Seed for the random subset
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Keep the input coordinates, by default the minimum corner is moved to the origin
    #[clap(long, action)]
    pub keep_origin: bool,

    /// Log more, repeat for even more
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn parse_cli() -> Args {
        let mut args = Args::parse();

        args.threads = args.threads.max(1);

        args
    }

    pub fn resample_parameters(&self) -> ResampleParameters {
        ResampleParameters {
            grid_steps: self.grid_steps,
            interpolation: self.interpolation,
            threads: self.threads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_arguments() {
        let args = Args::try_parse_from([
            "topography",
            "-i",
            "terrain.csv",
            "--grid-steps",
            "20",
            "--interpolation",
            "natural",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.input, PathBuf::from("terrain.csv"));
        assert_eq!(args.output, PathBuf::from("resampled.csv"));
        assert_eq!(args.verbose, 2);

        let params = args.resample_parameters();
        assert_eq!(params.grid_steps, 20);
        assert_eq!(params.interpolation, Interpolation::NaturalNeighbor);
    }

    #[test]
    fn input_is_required() {
        assert!(Args::try_parse_from(["topography"]).is_err());
    }
}
