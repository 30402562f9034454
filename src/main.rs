#![allow(clippy::enum_variant_names)]

use clap::Parser as _;
use colored::Colorize;
use snafu::{ResultExt, Snafu};
use tracing::debug;

use vdisk::disk::Disk;
use vdisk::error::FsError;
use vdisk::fixture::{self, FixtureError, FixtureLoadError};
use vdisk::path::{PathError, VPath};
use vdisk::tree::{self, Node};

use crate::cli::Cli;

mod cli;

#[compio::main]
#[snafu::report]
async fn main() -> Result<(), InspectError> {
    let cli_args = Cli::parse();
    setup_tracing(&cli_args);
    debug!("Parsed CLI arguments: {cli_args:?}");

    let entries = fixture::from_path(cli_args.fixture.clone())
        .await
        .context(LoadSnafu)?;
    let disk = Disk::from_entries(entries).context(BuildSnafu)?;

    let start = VPath::parse(&cli_args.path).context(BadPathSnafu {
        path: cli_args.path.clone(),
    })?;
    let root = disk.snapshot();
    let node = tree::resolve_dir(&root, &start).context(ListSnafu)?;

    setup_color();
    println!("{}", start.to_string().blue().bold());
    print_tree(node, &start);

    Ok(())
}

fn setup_tracing(cli_args: &Cli) {
    if let Some(level) = cli_args.log_level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .without_time()
            .compact()
            .init();
    }
}

fn setup_color() {
    if supports_color::on(supports_color::Stream::Stdout).is_none() {
        colored::control::set_override(false);
    }
}

fn print_tree(node: &Node, path: &VPath) {
    if let Some(children) = node.children() {
        for (name, child) in children {
            let child_path = path.join(name);
            if child.is_directory() {
                println!("{}", child_path.to_string().blue().bold());
                print_tree(child, &child_path);
            } else {
                println!("{}", child_path);
            }
        }
    }
}

#[derive(Debug, Snafu)]
enum InspectError {
    #[snafu(display("Failed to load the fixture"))]
    LoadError { source: FixtureLoadError },
    #[snafu(display("The fixture does not describe a valid disk"))]
    BuildError { source: FixtureError },
    #[snafu(display("Invalid listing path '{}'", path))]
    BadPath { path: String, source: PathError },
    #[snafu(display("Failed to list the requested directory"))]
    ListError { source: FsError },
}
