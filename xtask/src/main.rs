use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Files the desktop app reads at startup, relative to its assets directory.
const REQUIRED_ASSETS: &[&str] = &[
    "author.png",
    "shaders/basic.vert.wgsl",
    "shaders/basic.frag.wgsl",
    "shaders/texture.vert.wgsl",
    "shaders/texture.frag.wgsl",
];

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for towerworks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: assets, fmt, clippy, tests
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Verify the desktop app's bundled shaders and overlay image exist
    Assets,
    /// Launch the desktop app, forwarding any extra arguments
    Run {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            check_assets(&assets_dir())?;
            run_fmt()?;
            run_clippy()?;
            run_tests()?;
        }
        Commands::Fmt => run_fmt()?,
        Commands::Clippy => run_clippy()?,
        Commands::Test => run_tests()?,
        Commands::Doc => cargo("doc", &["doc", "--workspace", "--no-deps"])?,
        Commands::Build => cargo("build", &["build", "--workspace"])?,
        Commands::Assets => check_assets(&assets_dir())?,
        Commands::Run { args } => {
            let mut full = vec!["run", "-p", "towerworks-desktop", "--"];
            full.extend(args.iter().map(String::as_str));
            cargo("run", &full)?;
        }
    }

    Ok(())
}

fn run_fmt() -> Result<()> {
    cargo("fmt --check", &["fmt", "--all", "--", "--check"])
}

fn run_clippy() -> Result<()> {
    cargo(
        "clippy",
        &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
    )
}

fn run_tests() -> Result<()> {
    cargo("test", &["test", "--workspace"])
}

fn cargo(step: &str, args: &[&str]) -> Result<()> {
    println!("==> Running cargo {step}");
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("failed to spawn cargo {step}"))?;
    if !status.success() {
        anyhow::bail!("cargo {step} failed");
    }
    Ok(())
}

fn assets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("apps/towerworks-desktop/assets")
}

fn missing_assets(dir: &Path) -> Vec<&'static str> {
    REQUIRED_ASSETS
        .iter()
        .copied()
        .filter(|rel| !dir.join(rel).is_file())
        .collect()
}

fn check_assets(dir: &Path) -> Result<()> {
    println!("==> Checking bundled assets in {}", dir.display());
    let missing = missing_assets(dir);
    if !missing.is_empty() {
        anyhow::bail!("missing assets: {}", missing.join(", "));
    }
    Ok(())
}
