//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod generate;
pub mod status;
pub mod verify;

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge manifests into the catalog and build missing releases
    Generate {
        /// Directory containing application manifests
        #[arg(long, value_name = "DIR", env = "XDCREPO_APPS_DIR")]
        apps: Option<PathBuf>,

        /// Publish directory (catalog and artifacts)
        #[arg(long, value_name = "DIR", env = "XDCREPO_BUILD_DIR")]
        build: Option<PathBuf>,

        /// Container runtime to build with (docker or podman)
        #[arg(long, env = "XDCREPO_RUNTIME")]
        runtime: Option<String>,
    },

    /// Show the applications and builds recorded in the catalog
    Status {
        /// Publish directory (catalog and artifacts)
        #[arg(long, value_name = "DIR", env = "XDCREPO_BUILD_DIR")]
        build: Option<PathBuf>,

        /// Output the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check published artifacts against the catalog's checksums
    Verify {
        /// Publish directory (catalog and artifacts)
        #[arg(long, value_name = "DIR", env = "XDCREPO_BUILD_DIR")]
        build: Option<PathBuf>,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(self, quiet: bool) -> Result<()> {
        let current_dir = std::env::current_dir()?;
        match self {
            Self::Generate {
                apps,
                build,
                runtime,
            } => {
                let options = generate::GenerateOptions {
                    apps,
                    build,
                    runtime,
                    quiet,
                };
                generate::execute(&current_dir, options).await
            }
            Self::Status { build, json } => status::execute(&current_dir, build, json).await,
            Self::Verify { build } => verify::execute(&current_dir, build, quiet).await,
        }
    }
}
