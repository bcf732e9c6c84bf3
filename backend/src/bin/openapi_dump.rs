//! Print the OpenAPI document as JSON, or write it to `--output`.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use course_market::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Export the course marketplace OpenAPI document")]
struct Args {
    /// Destination file; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .context("serialise OpenAPI document")?;
    match args.output {
        Some(path) => fs::write(&path, json)
            .with_context(|| format!("write OpenAPI document to {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
