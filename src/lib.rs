pub mod component;
pub mod config;
pub mod error;
pub mod init;
pub mod menu;
pub mod tools;

use anyhow::Result;
use component::media_cleaner::RunResult;
use console::{Term, style};

pub fn pause(term: &Term) -> Result<()> {
    println!("\n{}", style("Press Enter to continue...").dim());
    term.read_line()?;
    Ok(())
}

pub fn print_summary(result: &RunResult) {
    println!();
    let title = if result.dry_run {
        "Dry run finished (nothing was written)"
    } else {
        "Finished"
    };
    println!("{}", style(title).green().bold());
    println!("  Output:    {}", result.output_dir.display());
    println!("  Processed: {}", result.processed);
    println!("  Scrubbed:  {}", result.scrubbed);

    if result.has_failures() {
        println!("  Failed:    {}", style(result.failed).red().bold());
        for failure in result.failures() {
            eprintln!(
                "  {} {}: {}",
                style("✗").red(),
                failure.source.display(),
                failure.message.as_deref().unwrap_or("unknown error")
            );
        }
    } else {
        println!("  Failed:    0");
    }
}
