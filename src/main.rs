use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use treemap_rs::config::ViewConfig;
use treemap_rs::layout::{self, Point};
use treemap_rs::render::{glyph_for, render_ascii};
use treemap_rs::scanner::{self, population, types::ScannedTree};
use treemap_rs::ui::input::parse_action;
use treemap_rs::ui::session::Session;

#[derive(Parser, Debug)]
#[command(name = "treemap-rs", about = "Slice-and-dice treemaps of folders or world population")]
struct Args {
    #[command(subcommand)]
    source: Source,

    /// Window width (px)
    #[arg(long, global = true, default_value_t = ViewConfig::default().width)]
    width: u32,

    /// Window height (px), status line included
    #[arg(long, global = true, default_value_t = ViewConfig::default().height)]
    height: u32,

    /// Status line height (px)
    #[arg(long, global = true, default_value_t = ViewConfig::default().status_height)]
    status_height: u32,

    /// Report the leaf under X,Y
    #[arg(long, global = true, value_parser = parse_point)]
    at: Option<Point>,

    /// Draw the treemap as a COLSxROWS character grid
    #[arg(long, global = true, value_parser = parse_grid)]
    ascii: Option<(usize, usize)>,

    /// Scripted input, applied in order: "click X Y", "delete X Y", "up", "down", "resize W H"
    #[arg(long = "action", global = true)]
    actions: Vec<String>,

    /// Check every folder's size against its contents before laying out
    #[arg(long, global = true)]
    verify: bool,

    /// Print every rectangle
    #[arg(long, global = true)]
    rects: bool,
}

#[derive(Subcommand, Debug)]
enum Source {
    /// Files and folders under PATH, sized in bytes
    Fs { path: PathBuf },
    /// World Bank population payloads (JSON files)
    Population {
        #[arg(long)]
        populations: PathBuf,
        #[arg(long)]
        regions: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("treemap_rs=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let scanned: ScannedTree = match &args.source {
        Source::Fs { path } => scanner::scan_path(path)?,
        Source::Population {
            populations,
            regions,
        } => population::load_population_files(populations, regions)?,
    };

    let stats = scanned.tree.stats(scanned.root);
    println!(
        "Tree: {} nodes ({} leaves, {} folders, depth {}), total size {}",
        stats.nodes,
        stats.leaves,
        stats.internal,
        stats.depth,
        scanned.tree.size(scanned.root)
    );

    if args.verify {
        scanned
            .tree
            .check_aggregates(scanned.root)
            .context("aggregate check failed")?;
        println!("Aggregates: ok");
    }

    let config = ViewConfig {
        width: args.width,
        height: args.height,
        status_height: args.status_height,
    };
    let mut session = Session::new(scanned, config);

    for line in &args.actions {
        let action = parse_action(line)?;
        session
            .apply(action)
            .with_context(|| format!("action '{line}' failed"))?;
        println!("> {line}: {}", session.status());
    }

    let area = session.config().treemap_area();
    let rect_count = session.layout().len();
    println!("Layout: {} rectangles in {}x{}", rect_count, area.w, area.h);

    if args.rects {
        let rects = session.layout().to_vec();
        let tree = session.tree();
        for (i, r) in rects.iter().enumerate() {
            println!(
                "  [{}] ({}, {}, {}, {}) {} {} ({})",
                i,
                r.rect.x,
                r.rect.y,
                r.rect.w,
                r.rect.h,
                r.colour.to_hex(),
                tree.breadcrumb(r.node),
                tree.size(r.node)
            );
        }
    }

    if let Some(point) = args.at {
        match layout::find_leaf(session.tree(), session.root(), point, area.w, area.h) {
            Some(leaf) => println!(
                "At ({}, {}): {} ({})",
                point.x,
                point.y,
                session.tree().breadcrumb(leaf),
                session.tree().size(leaf)
            ),
            None => println!("At ({}, {}): nothing", point.x, point.y),
        }
    }

    if let Some((cols, rows)) = args.ascii {
        let rects = session.layout().to_vec();
        println!("{}", render_ascii(&rects, area, cols, rows));
        let tree = session.tree();
        for (i, r) in rects.iter().enumerate().take(20) {
            println!("  {} {}", glyph_for(i), tree.breadcrumb(r.node));
        }
        if rects.len() > 20 {
            println!("  ... ({} more)", rects.len() - 20);
        }
    }

    Ok(())
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x: u32 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: u32 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok(Point::new(x, y))
}

fn parse_grid(s: &str) -> Result<(usize, usize), String> {
    let (cols, rows) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected COLSxROWS, got '{s}'"))?;
    let cols: usize = cols.trim().parse().map_err(|e| format!("bad columns '{cols}': {e}"))?;
    let rows: usize = rows.trim().parse().map_err(|e| format!("bad rows '{rows}': {e}"))?;
    if cols == 0 || rows == 0 {
        return Err("grid must be at least 1x1".to_string());
    }
    Ok((cols, rows))
}
