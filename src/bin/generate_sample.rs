use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use csv_filter_viewer::data::model::SCHEMA;

/// Write the sample dataset: the numbers 1..=N with their residues mod 3..6.
#[derive(Debug, Parser)]
struct Args {
    /// How many rows to write.
    #[arg(short = 'n', long, default_value_t = 1000)]
    rows: u64,

    #[arg(short, long, default_value = "data/dataset_small.csv")]
    output: PathBuf,
}

fn sample_row(number: u64) -> [String; 5] {
    [
        number.to_string(),
        (number % 3).to_string(),
        (number % 4).to_string(),
        (number % 5).to_string(),
        (number % 6).to_string(),
    ]
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(dir) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer
        .write_record(SCHEMA.iter().map(|c| c.name))
        .context("writing header")?;
    for number in 1..=args.rows {
        writer
            .write_record(sample_row(number))
            .with_context(|| format!("writing row {number}"))?;
    }
    writer.flush().context("flushing CSV")?;

    log::info!("wrote {} rows to {}", args.rows, args.output.display());
    println!("Wrote {} rows to {}", args.rows, args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_matches_schema_order() {
        assert_eq!(sample_row(7), ["7", "1", "3", "2", "1"]);
        assert_eq!(sample_row(7).len(), SCHEMA.len());
    }
}
