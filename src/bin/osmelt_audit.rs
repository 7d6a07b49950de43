//! osmelt-audit: print data-quality tallies for an OSM XML extract.
//!
//! Usage:
//!   # Categorize and count tag keys
//!   osmelt-audit keys ruegen.osm
//!
//!   # Street names: abbreviations, trailing house numbers, street types
//!   osmelt-audit streets ruegen.osm
//!
//!   # City names with extra describing words
//!   osmelt-audit cities ruegen.osm
//!
//!   # Postal codes outside the regional range
//!   osmelt-audit postcodes ruegen.osm
//!
//!   # Count raw XML element names
//!   osmelt-audit count ruegen.osm

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use osmelt::audit::{count_element_names, TagAudits};
use osmelt::ElementReader;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "osmelt-audit")]
#[command(about = "Audit tag quality in an OSM extract", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Categorize and count tag keys
    Keys { extract: PathBuf },
    /// Audit street names (abbreviations, house numbers, types)
    Streets { extract: PathBuf },
    /// List city names with extra describing words
    Cities { extract: PathBuf },
    /// List postal codes outside the regional range
    Postcodes { extract: PathBuf },
    /// Count raw element names across the whole document
    Count { extract: PathBuf },
}

fn run_tag_audits(extract: &Path) -> Result<TagAudits> {
    let mut audits = TagAudits::new();
    for element in ElementReader::open(extract)? {
        let element = element.context("audit stopped on malformed extract")?;
        audits.observe_element(&element);
    }
    Ok(audits)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Keys { extract } => {
            let audits = run_tag_audits(&extract)?;
            print!("{}", audits.keys);
        }
        Command::Streets { extract } => {
            let audits = run_tag_audits(&extract)?;
            print!("{}", audits.streets);
        }
        Command::Cities { extract } => {
            let audits = run_tag_audits(&extract)?;
            print!("{}", audits.cities);
        }
        Command::Postcodes { extract } => {
            let audits = run_tag_audits(&extract)?;
            print!("{}", audits.postcodes);
        }
        Command::Count { extract } => {
            let file = File::open(&extract)
                .with_context(|| format!("cannot open {}", extract.display()))?;
            let counts = count_element_names(BufReader::new(file))?;
            for (name, count) in &counts {
                println!("{name}: {count}");
            }
        }
    }
    Ok(())
}
