//! dualmesh CLI - inspect triangulations and their Voronoi duals.
//!
//! Usage: dualmesh <COMMAND> [OPTIONS] <INPUT>
//!
//! Run `dualmesh --help` for available commands. Set `RUST_LOG=info` for
//! timing logs.

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};

use dualmesh::algo::circulate::{edges_around_point, incoming_halfedge, PointIndex};
use dualmesh::algo::edges::edges;
use dualmesh::algo::voronoi::{voronoi_cells_with_progress, VoronoiOptions};
use dualmesh::algo::Progress;
use dualmesh::error::MeshError;
use dualmesh::io;
use dualmesh::mesh::{DualPoint, PointId, Triangulation};

#[derive(Parser)]
#[command(name = "dualmesh")]
#[command(author, version, about = "Triangulation traversal and Voronoi CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display triangulation information
    Info {
        /// Input triangulation file
        input: PathBuf,

        /// Run the full consistency check
        #[arg(long)]
        validate: bool,
    },

    /// List every undirected edge once
    Edges {
        /// Input triangulation file
        input: PathBuf,
    },

    /// Show the fan of half-edges and triangles around a point
    Circulate {
        /// Input triangulation file
        input: PathBuf,

        /// Point id
        point: usize,
    },

    /// Print the Voronoi cell of every point
    Cells {
        /// Input triangulation file
        input: PathBuf,

        /// Dual point formula
        #[arg(short, long, value_enum, default_value = "circumcenter")]
        dual: DualMethod,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum DualMethod {
    /// Circumcenter (true Voronoi diagram)
    Circumcenter,
    /// Triangle centroid
    Centroid,
    /// Triangle incenter
    Incenter,
}

impl From<DualMethod> for DualPoint {
    fn from(method: DualMethod) -> Self {
        match method {
            DualMethod::Circumcenter => DualPoint::Circumcenter,
            DualMethod::Centroid => DualPoint::Centroid,
            DualMethod::Incenter => DualPoint::Incenter,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input, validate } => {
            cmd_info(&input, validate)?;
        }

        Commands::Edges { input } => {
            cmd_edges(&input)?;
        }

        Commands::Circulate { input, point } => {
            cmd_circulate(&input, point)?;
        }

        Commands::Cells {
            input,
            dual,
            sequential,
        } => {
            cmd_cells(&input, dual, sequential)?;
        }
    }

    Ok(())
}

fn load(input: &PathBuf) -> Result<Triangulation, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let tri: Triangulation = io::load(input)?;
    log::info!(
        "Loaded {}: {} points, {} triangles ({:.2?})",
        input.display(),
        tri.num_points(),
        tri.num_triangles(),
        start.elapsed()
    );
    Ok(tri)
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0)); // Track highest percent seen (monotonic)

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };

        // Only redraw when the percentage grows
        let previous = max_percent.fetch_max(percent, Ordering::Relaxed);
        if percent <= previous && percent != 100 {
            return;
        }

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        // Use carriage return to overwrite the line
        eprint!("\r[{}{}] {:3}% {}", bar, space, percent, message);
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn cmd_info(input: &PathBuf, validate: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tri = load(input)?;

    println!("File: {}", input.display());
    println!("Points: {}", tri.num_points());
    println!("Triangles: {}", tri.num_triangles());
    println!("Half-edges: {}", tri.num_halfedges());

    let boundary = tri.hull_halfedges().count();
    let mut edge_count = 0;
    for edge in edges(&tri) {
        edge?;
        edge_count += 1;
    }
    println!("Edges: {} ({} on the boundary)", edge_count, boundary);

    let index = PointIndex::build(&tri)?;
    let mut interior = 0;
    let mut on_boundary = 0;
    let mut unused = 0;
    for p in tri.point_ids() {
        match index.get(p) {
            Some(e) if tri.is_boundary(e)? => on_boundary += 1,
            Some(_) => interior += 1,
            None => unused += 1,
        }
    }
    println!(
        "Points by position: {} interior, {} boundary, {} unused",
        interior, on_boundary, unused
    );

    let mut min_area = f64::INFINITY;
    let mut max_area = f64::NEG_INFINITY;
    for t in tri.triangle_ids() {
        let area = tri.triangle_area(t)?;
        min_area = min_area.min(area);
        max_area = max_area.max(area);
    }
    if tri.num_triangles() > 0 {
        println!("Triangle area range: [{:.6}, {:.6}]", min_area, max_area);
    }

    if validate {
        match tri.validate() {
            Ok(()) => println!("Validation: OK"),
            Err(e) => println!("Validation: FAILED ({})", e),
        }
    }

    Ok(())
}

fn cmd_edges(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let tri = load(input)?;

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    writeln!(out, "# halfedge twin from to")?;
    for edge in edges(&tri) {
        let edge = edge?;
        let twin = edge
            .twin
            .map_or_else(|| "-".to_string(), |t| t.index().to_string());
        writeln!(
            out,
            "{} {} {} {}",
            edge.halfedge,
            twin,
            tri.point_of(edge.halfedge)?,
            tri.end_point_of(edge.halfedge)?
        )?;
    }
    out.flush()?;

    Ok(())
}

/// Convert a user-supplied point number into an id of `tri`.
fn point_arg(tri: &Triangulation, point: usize) -> Result<PointId, MeshError> {
    PointId::try_new(point)
        .filter(|p| p.index() < tri.num_points())
        .ok_or_else(|| MeshError::invalid_param("point", point, "out of range"))
}

fn cmd_circulate(input: &PathBuf, point: usize) -> Result<(), Box<dyn std::error::Error>> {
    let tri = load(input)?;
    let p = point_arg(&tri, point)?;

    let Some(start) = incoming_halfedge(&tri, p)? else {
        println!("Point {} has no incident triangles", point);
        return Ok(());
    };

    let fan = edges_around_point(&tri, start)?;
    let triangles = fan.triangles(&tri)?;
    let outgoing = fan.outgoing(&tri)?;

    println!(
        "Point {}: {} triangles, {}",
        point,
        fan.len(),
        if fan.is_closed() { "closed (interior)" } else { "open (boundary)" }
    );
    println!("# incoming outgoing triangle");
    for ((e, o), t) in fan.halfedges().iter().zip(&outgoing).zip(&triangles) {
        println!("{} {} {}", e, o, t);
    }

    Ok(())
}

fn cmd_cells(
    input: &PathBuf,
    dual: DualMethod,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let tri = load(input)?;

    let options = VoronoiOptions::default()
        .with_dual(dual.into())
        .with_parallel(!sequential);
    let mode = if sequential { "sequential" } else { "parallel" };
    log::info!("Building Voronoi cells ({:?}, {})", options.dual, mode);

    let progress = create_progress();
    let start = Instant::now();
    let cells = voronoi_cells_with_progress(&tri, &options, &progress)?;
    log::info!("Built {} cells ({:.2?})", cells.len(), start.elapsed());

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    writeln!(out, "# point closed x0,y0 x1,y1 ...")?;
    for cell in &cells {
        write!(out, "{} {}", cell.point, if cell.closed { 1 } else { 0 })?;
        for v in &cell.vertices {
            write!(out, " {},{}", v.x, v.y)?;
        }
        writeln!(out)?;
    }
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dualmesh::nalgebra::Point2;

    #[test]
    fn test_point_arg_range() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)];
        let tri: Triangulation =
            Triangulation::from_signed(points, &[0, 1, 2], &[-1, -1, -1]).unwrap();

        assert_eq!(point_arg(&tri, 2).unwrap(), PointId::new(2));
        for point in [3, usize::MAX] {
            assert!(matches!(
                point_arg(&tri, point),
                Err(MeshError::InvalidParameter { name: "point", .. })
            ));
        }
    }
}
