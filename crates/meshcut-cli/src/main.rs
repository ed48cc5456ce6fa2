//! meshcut - cuts a closed STL solid along a plane into two capped halves.
//!
//! ```text
//! meshcut part.stl --normal 0,0,1 --offset -10 --upper top.stl --lower bottom.stl
//! ```
//!
//! The kept half above the plane (on the side its normal points to) goes to `--upper`,
//! the other one to `--lower`. Set `RUST_LOG=debug` to follow the pipeline.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::{Path, PathBuf};

use meshcut3d_f64::io::{read_stl, write_ascii_stl, write_binary_stl};
use meshcut3d_f64::math::Vector;
use meshcut3d_f64::shape::{Facet, Plane};
use meshcut3d_f64::transformation::{
    cut_facets, repair, CutParameters, RepairParameters, Triangulator,
};

const SOLID_NAME: &str = "meshcut";

#[derive(Parser, Debug)]
#[command(name = "meshcut", version)]
#[command(about = "Cut an STL solid in two capped halves along a plane", long_about = None)]
struct Cli {
    /// Input STL file, ASCII or binary
    input: PathBuf,

    /// Normal of the cutting plane, as X,Y,Z
    #[arg(long, value_parser = parse_vector, default_value = "0,0,1", allow_hyphen_values = true)]
    normal: Vector<f64>,

    /// Offset D of the cutting plane `normal · p + D = 0`
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    offset: f64,

    /// Output path of the half above the plane
    #[arg(long, default_value = "upper.stl")]
    upper: PathBuf,

    /// Output path of the half below the plane
    #[arg(long, default_value = "lower.stl")]
    lower: PathBuf,

    /// Write binary instead of ASCII STL files
    #[arg(long)]
    binary: bool,

    /// Cap with the first loop found when the cross-section doesn't close
    #[arg(long)]
    allow_partial_contour: bool,

    /// Triangulate the caps by ear clipping instead of constrained Delaunay
    #[arg(long)]
    ear_clipping: bool,

    /// Skip the cleanup of the halves before writing them
    #[arg(long)]
    no_repair: bool,
}

fn parse_vector(s: &str) -> Result<Vector<f64>, String> {
    let coords = s
        .split(',')
        .map(|c| c.trim().parse::<f64>().map_err(|e| format!("`{}`: {}", c, e)))
        .collect::<Result<Vec<_>, _>>()?;

    match coords[..] {
        [x, y, z] => Ok(Vector::new(x, y, z)),
        _ => Err(format!("expected 3 comma-separated numbers, got {}", coords.len())),
    }
}

fn write_half(cli: &Cli, path: &Path, facets: &[Facet<u16>]) -> Result<()> {
    let result = if cli.binary {
        write_binary_stl(path, SOLID_NAME, facets)
    } else {
        write_ascii_stl(path, SOLID_NAME, facets)
    };
    result.with_context(|| format!("Failed to write {}", path.display()))
}

fn run(cli: &Cli) -> Result<()> {
    let plane = Plane::new(cli.normal, cli.offset).context("Invalid cutting plane")?;
    let facets = read_stl(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    log::info!("loaded {} facets from {}", facets.len(), cli.input.display());

    let params = CutParameters {
        triangulator: if cli.ear_clipping {
            Triangulator::EarClipping
        } else {
            Triangulator::default()
        },
        allow_partial_contour: cli.allow_partial_contour,
    };
    let mut cut = cut_facets(&facets, &plane, &params).context("Failed to cut the mesh")?;
    log::info!(
        "{} border edges, {} cap facets per half",
        cut.stats.border_edges,
        cut.stats.cap_facets
    );

    if !cli.no_repair {
        let repair_params = RepairParameters::default();
        for (name, half) in [("upper", &mut cut.upper), ("lower", &mut cut.lower)] {
            let report = repair(half, &repair_params);
            log::info!("{} half: {:?}", name, report);
        }
    }

    write_half(cli, &cli.upper, &cut.upper)?;
    write_half(cli, &cli.lower, &cut.lower)?;
    log::info!(
        "wrote {} facets to {} and {} facets to {}",
        cut.upper.len(),
        cli.upper.display(),
        cut.lower.len(),
        cli.lower.display()
    );

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    run(&cli)
}
