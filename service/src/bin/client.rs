//! image-client: rotate and edge-detect local images via the image service.
//!
//! For each input `foo.png` this writes `foo.png_rotated.png` and
//! `foo.png_edges.png` next to it.

use std::path::PathBuf;

use clap::Parser;
use image_client::files::{check_extension, check_input};
use image_client::{DEFAULT_SERVER_URL, ImageServiceClient};
use image_wire::Rotation;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "image-client")]
#[command(about = "Process some images via RPC")]
#[command(version)]
struct Cli {
    /// Image files to transform (png or jpg)
    #[arg(required = true, value_parser = parse_image_path)]
    images: Vec<PathBuf>,

    /// Base URL of the image service
    #[arg(long, env = "IMAGE_SERVICE_URL", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Counterclockwise rotation in degrees (0, 90, 180 or 270)
    #[arg(long, default_value = "180", value_parser = parse_rotation)]
    rotation: Rotation,

    /// Send images as grayscale instead of RGB
    #[arg(long)]
    gray: bool,
}

fn parse_image_path(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    check_extension(&path).map_err(|e| e.to_string())?;
    Ok(path)
}

fn parse_rotation(s: &str) -> Result<Rotation, String> {
    let degrees: i32 = s.parse().map_err(|_| format!("{s} is not a number"))?;
    Rotation::from_degrees(degrees).ok_or_else(|| format!("{s} is not a multiple of 90"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Fail fast on missing inputs before any call is made
    for path in &cli.images {
        check_input(path)?;
    }

    let client = ImageServiceClient::new(cli.server);
    for path in &cli.images {
        let written = client
            .transform_file(path, cli.rotation, !cli.gray)
            .await?;
        println!("wrote {}", written.rotated.display());
        println!("wrote {}", written.edges.display());
    }

    Ok(())
}
