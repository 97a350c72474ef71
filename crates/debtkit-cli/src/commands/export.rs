//! Export command implementation.
//!
//! Writes the full history with summary, insights and recommendations as a
//! JSON document.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::commands::Context;
use crate::output::print_success;

/// Arguments for the export command.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the export command.
pub fn execute(args: ExportArgs, ctx: &Context) -> Result<()> {
    let export = ctx.tracker()?.export()?;
    let json = export.to_json_pretty()?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)?;
            print_success(&format!(
                "Exported {} calculation(s) to {}",
                export.calculations.len(),
                path.display()
            ));
        }
        None => println!("{}", json),
    }

    Ok(())
}
