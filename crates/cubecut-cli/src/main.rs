//! cubecut CLI - inspect snap addresses, box geometry and cut results
//!
//! Provides canonicalization, resolution and validation from the shell.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use cubecut::{
    validate_raw, BoxScene, FaceKey, FaceName, FacePolygon, Point3, RawMesh, SceneConfig,
    ValidationReport,
};

#[derive(Parser)]
#[command(name = "cubecut")]
#[command(about = "Symbolic box-section toolkit", long_about = None)]
struct Cli {
    /// Log debug output (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical form of snap addresses
    Canonicalize {
        /// Address text, e.g. E:2-1@3/10
        addresses: Vec<String>,
    },
    /// Resolve snap addresses to world positions
    Resolve {
        /// Scene config (.json or .toml); default is a unit box
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Address text
        addresses: Vec<String>,
    },
    /// Show the corners, normal and frame of a face
    Face {
        /// Scene config (.json or .toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Face key, e.g. 0154
        key: String,
    },
    /// List every snap point of the box with its position
    SnapPoints {
        /// Scene config (.json or .toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a cut result or a raw triangle mesh
    Validate {
        /// JSON file: a list of face polygons, or a raw mesh with --raw
        input: PathBuf,
        /// Treat the input as `{ "positions": [...], "indices": [...] }`
        #[arg(long)]
        raw: bool,
        /// Scene config for geometric checks on face polygons
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Canonicalize { addresses } => canonicalize(&addresses),
        Commands::Resolve { config, addresses } => {
            resolve(&load_scene(config.as_deref())?, &addresses)
        }
        Commands::Face { config, key } => show_face(&load_scene(config.as_deref())?, &key),
        Commands::SnapPoints { config } => {
            for (addr, p) in load_scene(config.as_deref())?.snap_points() {
                println!("{addr}\t{}", format_point(&p));
            }
            Ok(())
        }
        Commands::Validate { input, raw, config } => validate(&input, raw, config.as_deref()),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::WARN.into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &Path) -> Result<SceneConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => SceneConfig::from_toml(&text)?,
        _ => SceneConfig::from_json(&text)?,
    };
    Ok(config)
}

fn load_scene(config: Option<&Path>) -> Result<BoxScene> {
    let config = match config {
        Some(path) => load_config(path)?,
        None => SceneConfig::default(),
    };
    Ok(BoxScene::from_config(&config)?)
}

fn format_point(p: &Point3) -> String {
    format!("({:.6}, {:.6}, {:.6})", p.x, p.y, p.z)
}

fn canonicalize(addresses: &[String]) -> Result<()> {
    let mut invalid = 0;
    for text in addresses {
        match cubecut::canonicalize(text) {
            Some(canonical) => println!("{canonical}"),
            None => {
                eprintln!("invalid address: {text}");
                invalid += 1;
            }
        }
    }
    if invalid > 0 {
        bail!("{invalid} address(es) could not be canonicalized");
    }
    Ok(())
}

fn resolve(scene: &BoxScene, addresses: &[String]) -> Result<()> {
    let mut unresolved = 0;
    for text in addresses {
        match scene.resolver().resolve_text(text) {
            Some(p) => println!("{text}\t{}", format_point(&p)),
            None => {
                eprintln!("cannot resolve: {text}");
                unresolved += 1;
            }
        }
    }
    if unresolved > 0 {
        bail!("{unresolved} address(es) did not resolve");
    }
    Ok(())
}

fn show_face(scene: &BoxScene, key: &str) -> Result<()> {
    let Some(face_key) = FaceKey::new(key) else {
        bail!("invalid face key: {key}");
    };
    let Some(face) = scene.resolver().resolve_face(&face_key) else {
        bail!("face {key} does not resolve to four known corners");
    };
    for (i, v) in face.vertices.iter().enumerate() {
        println!("v{i}\t{}", format_point(v));
    }
    println!("center\t{}", format_point(&face.center()));
    println!("normal\t{}", format_point(&Point3::from(face.normal)));
    println!("u\t{}", format_point(&Point3::from(face.basis_u)));
    println!("v\t{}", format_point(&Point3::from(face.basis_v)));
    if let Some(name) = FaceName::of_normal(&face.normal, 1e-9) {
        println!("side\t{name}");
    }
    Ok(())
}

/// Either shape accepted by `validate`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PolygonInput {
    List(Vec<FacePolygon>),
    Wrapped { polygons: Vec<FacePolygon> },
}

fn validate(input: &Path, raw: bool, config: Option<&Path>) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;

    let report: ValidationReport = if raw {
        let mesh: RawMesh = serde_json::from_str(&text).context("parsing raw mesh")?;
        validate_raw(&mesh)?
    } else {
        let polygons = match serde_json::from_str(&text).context("parsing face polygons")? {
            PolygonInput::List(polygons) | PolygonInput::Wrapped { polygons } => polygons,
        };
        match config {
            Some(path) => BoxScene::from_config(&load_config(path)?)?.validate(&polygons),
            None => cubecut::validate_structure(&polygons, None),
        }
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    if !report.is_sound_solid() {
        bail!("mesh failed validation");
    }
    Ok(())
}
