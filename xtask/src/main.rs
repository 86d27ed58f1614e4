//! Build automation tasks for Orange Rush
//!
//! Usage:
//!   cargo xtask build-web [--dev]   # WASM, index.html and JS bundle in dist/web
//!   cargo xtask package-itch        # dist/orange-rush-itch.zip from dist/web
//!   cargo xtask package-native      # Release binary plus tuning file in dist/native

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const BIN_NAME: &str = "orange-rush";
/// Optional tuning override shipped next to every build
const TUNING_FILE: &str = "assets/rush.ron";
const MQ_JS_BUNDLE: &str = "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js";

#[derive(Parser)]
#[command(name = "xtask", about = "Build automation for Orange Rush")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Build the browser version
    BuildWeb {
        /// Prefix the page title with [DEV]
        #[arg(long)]
        dev: bool,
    },
    /// Zip the browser version for itch.io
    PackageItch,
    /// Build a native release
    PackageNative,
}

fn main() -> Result<()> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")?;

    match Cli::parse().task {
        Task::BuildWeb { dev } => build_web(&root, dev).map(|_| ()),
        Task::PackageItch => package_itch(&root),
        Task::PackageNative => package_native(&root),
    }
}

fn run(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().with_context(|| format!("spawning {:?}", cmd.get_program()))?;
    if !status.success() {
        bail!("{:?} exited with {}", cmd.get_program(), status);
    }
    Ok(())
}

fn cargo_release(root: &Path, extra: &[&str]) -> Result<()> {
    println!("cargo build --release {}", extra.join(" "));
    run(Command::new("cargo").current_dir(root).args(["build", "--release"]).args(extra))
}

/// Empty `dist/<name>` and return its path
fn fresh_dist(root: &Path, name: &str) -> Result<PathBuf> {
    let dir = root.join("dist").join(name);
    if dir.exists() {
        fs::remove_dir_all(&dir).with_context(|| format!("cleaning {}", dir.display()))?;
    }
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn copy_into(from: &Path, dir: &Path, name: &str) -> Result<()> {
    let to = dir.join(name);
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, &to).with_context(|| format!("copying {}", from.display()))?;
    Ok(())
}

/// The game runs fine without the tuning file, so a missing one is skipped
fn copy_tuning(root: &Path, dir: &Path) -> Result<()> {
    let tuning = root.join(TUNING_FILE);
    if tuning.is_file() {
        copy_into(&tuning, dir, TUNING_FILE)?;
    }
    Ok(())
}

fn build_web(root: &Path, dev: bool) -> Result<PathBuf> {
    cargo_release(root, &["--target", "wasm32-unknown-unknown"])?;
    let dist = fresh_dist(root, "web")?;

    let wasm = format!("{}.wasm", BIN_NAME);
    copy_into(&root.join("target/wasm32-unknown-unknown/release").join(&wasm), &dist, &wasm)?;
    copy_tuning(root, &dist)?;

    let page = fs::read_to_string(root.join("web/index.html")).context("reading web/index.html")?;
    let page = if dev {
        page.replace("<title>Orange Rush", "<title>[DEV] Orange Rush")
    } else {
        page
    };
    fs::write(dist.join("index.html"), page)?;

    println!("fetching {}", MQ_JS_BUNDLE);
    run(Command::new("curl")
        .args(["-sSL", "-o"])
        .arg(dist.join("mq_js_bundle.js"))
        .arg(MQ_JS_BUNDLE))?;

    println!("web build ready in {}", dist.display());
    Ok(dist)
}

fn package_itch(root: &Path) -> Result<()> {
    let web = build_web(root, false)?;
    let zip = root.join("dist").join(format!("{}-itch.zip", BIN_NAME));
    if zip.exists() {
        fs::remove_file(&zip)?;
    }
    run(Command::new("zip").current_dir(&web).arg("-r").arg(&zip).arg("."))?;
    println!("itch.io upload ready: {}", zip.display());
    Ok(())
}

fn package_native(root: &Path) -> Result<()> {
    cargo_release(root, &["--bin", BIN_NAME])?;
    let dist = fresh_dist(root, "native")?;

    let binary = format!("{}{}", BIN_NAME, std::env::consts::EXE_SUFFIX);
    copy_into(&root.join("target/release").join(&binary), &dist, &binary)?;
    copy_tuning(root, &dist)?;

    println!("native build ready in {}", dist.display());
    Ok(())
}
