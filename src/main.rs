mod cli;

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use voxedit_blocks::TypeId;
use voxedit_edit::{Brush, EditOp, EditSession, EditorConfig};
use voxedit_io::{BlockReport, LoadReport};

use crate::cli::{Cli, Command};

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_env("RUST_LOG")
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn open_session(cli: &Cli) -> Result<EditSession, Box<dyn Error>> {
    let mut config = EditorConfig::load_or_default(&cli.config);
    if let Some(p) = &cli.catalog {
        config.catalog_path = Some(p.clone());
    }
    let catalog = EditSession::open_catalog(&config)?;
    log::debug!("catalog: {} voxel types", catalog.len());
    Ok(EditSession::new(catalog, config))
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut session = open_session(&cli)?;
    match cli.command {
        Command::New { file } => {
            session.save(&file)?;
            println!("wrote blank document {}", file.display());
        }
        Command::Info { file } => {
            let file = document_path(file, session.config())?;
            let report = session.load(&file)?;
            print_info(&session, &report);
        }
        Command::Mesh { file } => {
            let file = document_path(file, session.config())?;
            let report = session.load(&file)?;
            print_warnings(&report);
            print_mesh(&mut session);
        }
        Command::Place {
            file,
            x,
            y,
            z,
            voxel,
            yaw,
            flip,
        } => {
            print_warnings(&session.load(&file)?);
            let id = resolve_type(&session, &voxel)?;
            let mut brush = Brush::new(id);
            for _ in 0..yaw % 4 {
                brush.rotate_ccw();
            }
            if flip {
                brush.toggle_flip();
            }
            session.apply_edit([x, y, z], brush.op());
            session.save(&file)?;
            println!("placed {} at ({x}, {y}, {z})", voxel);
        }
        Command::Erase { file, x, y, z } => {
            print_warnings(&session.load(&file)?);
            session.apply_edit([x, y, z], EditOp::Erase);
            session.save(&file)?;
            println!("erased ({x}, {y}, {z})");
        }
    }
    Ok(())
}

/// The explicit file, else the configured startup document.
fn document_path(file: Option<PathBuf>, config: &EditorConfig) -> Result<PathBuf, Box<dyn Error>> {
    file.or_else(|| config.startup_file.clone())
        .ok_or_else(|| "no file given and no startup_file configured".into())
}

fn resolve_type(session: &EditSession, s: &str) -> Result<TypeId, Box<dyn Error>> {
    let cat = session.catalog();
    if let Some(id) = cat.id_by_name(s) {
        return Ok(id);
    }
    match s.parse::<TypeId>() {
        Ok(id) if cat.is_known(id) => Ok(id),
        Ok(id) => Err(format!("voxel type {id} is not in the catalog").into()),
        Err(_) => Err(format!("unknown voxel type '{s}'").into()),
    }
}

fn describe(name: &str, b: &BlockReport) {
    for issue in &b.issues {
        println!("  warning: {name} block: {issue}");
    }
}

fn print_warnings(report: &LoadReport) {
    if report.legacy {
        println!("  note: legacy volume file (no light or render settings)");
    }
    describe("volume", &report.volume);
    describe("light", &report.light);
    describe("render", &report.render);
    for (id, n) in &report.unknown_types {
        println!("  warning: {n} cell(s) use unknown voxel type {id}");
    }
}

fn print_info(session: &EditSession, report: &LoadReport) {
    let vol = session.volume();
    let (min, max) = vol.bounds();
    let name = session
        .current_file()
        .map(Path::display)
        .map(|d| d.to_string())
        .unwrap_or_default();
    println!("{name}");
    println!("  size      {:?}", vol.size());
    println!("  bounds    {:?} ..= {:?}", min, max);
    println!("  occupied  {}", vol.occupied_count());
    let l = session.light();
    println!(
        "  light     yaw {:.1} pitch {:.1} ambient {:.2} sun {} shadows {}",
        l.sun_yaw_deg, l.sun_pitch_deg, l.ambient_energy, l.sun_visible, l.shadows
    );
    let r = session.render_config();
    println!(
        "  render    pixel scale {} ui {} gizmos {}",
        r.pixel_scale, r.ui_visible, r.gizmos_visible
    );
    print_warnings(report);
}

fn print_mesh(session: &mut EditSession) {
    let voxel_size = session.params().voxel_size;
    let mesh = session.rebuild();
    let s = &mesh.stats;
    println!("  voxel size      {voxel_size}");
    println!("  cells           {} ({} unknown)", s.occupied_cells, s.unknown_cells);
    println!("  faces           {} emitted, {} culled", s.faces_emitted, s.faces_culled);
    println!(
        "  vertices        {} raw, {} welded ({} degenerate dropped)",
        s.raw_vertices, s.welded_vertices, s.degenerate_dropped
    );
    println!("  triangles       {}", mesh.render.triangle_count());
    println!("  collision tris  {}", mesh.collision.triangle_count());
    if let Some(bb) = mesh.render.bounds() {
        println!("  extent          {:?} .. {:?}", bb.min.to_array(), bb.max.to_array());
    }
}
