mod parser;

use parser::Args;
use topography::{io, PointCloud, Result};

use log::{log, Level};
use std::time::Instant;
use tracing_subscriber::filter::LevelFilter;

fn main() -> Result<()> {
    let args = Args::parse_cli();

    let level = match args.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    // read and clean the samples

    let mut cloud = PointCloud::new(io::read_xyz(&args.input)?);
    log!(Level::Info, "This file has {} rows", cloud.len());

    if let Some(n) = args.sample {
        cloud = cloud.sample(n, args.seed);
        log!(Level::Info, "Sampled {} rows", cloud.len());
    }

    cloud.drop_non_finite();
    cloud.dedup();
    cloud.dedup_xy();
    log!(Level::Info, "Number of rows after cleaning: {}", cloud.len());

    if !args.keep_origin {
        let offset = cloud.shift_to_origin();
        log!(Level::Info, "Moved the points by -{offset}");
    }

    // triangulate

    let surface = cloud.into_surface()?;
    log!(
        Level::Info,
        "Triangulated into {} faces, surface area {:.3}, projected area {:.3}",
        surface.num_faces(),
        surface.area(),
        surface.projected_area()
    );

    // resample onto a regular grid

    let params = args.resample_parameters();
    log!(
        Level::Info,
        "Resampling onto a {0}x{0} grid with {1} interpolation...",
        params.grid_steps,
        params.interpolation
    );
    let now = Instant::now();
    let resampled = surface.resample_with(&params)?;
    log!(
        Level::Info,
        "Elapsed time in resampling: {:?}",
        now.elapsed()
    );

    log!(Level::Info, "Writing {}...", args.output.display());
    resampled.save(&args.output)?;
    log!(Level::Info, "Done!");

    Ok(())
}
