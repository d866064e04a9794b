use anyhow::{bail, Result};
use chrono::{Datelike, Utc};
use std::env;
use std::path::PathBuf;

use venture_metrics::pipeline::{self, PipelineConfig};

fn main() -> Result<()> {
    let config = parse_args(env::args().skip(1).collect())?;

    println!("📊 Venture Metrics - CSV → dashboard JSON");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("\n📂 Input:  {}", config.input.display());
    println!("📁 Output: {}", config.output_dir.display());

    let summary = pipeline::run(&config)?;

    println!("\n✓ Rows read:      {}", summary.rows_read);
    println!("✓ Records kept:   {}", summary.records_accepted);
    if !summary.rejected.is_empty() {
        println!("⚠ Rows rejected:  {}", summary.rejected.len());
        for rejection in summary.rejected.iter().take(10) {
            println!("⚠   row {}: {}", rejection.row_number, rejection.reason);
        }
        if summary.rejected.len() > 10 {
            println!("⚠   ... {} more rejections", summary.rejected.len() - 10);
        }
    }
    for warning in summary.warnings.iter().take(10) {
        println!("⚠ {}", warning);
    }
    if summary.warnings.len() > 10 {
        println!("⚠ ... {} more warnings", summary.warnings.len() - 10);
    }
    println!("\n✅ Published {} documents", summary.documents_written);

    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<PipelineConfig> {
    if args.len() < 2 {
        bail!("usage: venture-metrics <input.csv> <output-dir> [--rules <rules.json>] [--year <YYYY>]");
    }

    let mut config = PipelineConfig {
        input: PathBuf::from(&args[0]),
        output_dir: PathBuf::from(&args[1]),
        rules_path: None,
        current_year: Utc::now().year(),
    };

    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--rules" => match rest.next() {
                Some(path) => config.rules_path = Some(PathBuf::from(path)),
                None => bail!("--rules requires a file path"),
            },
            "--year" => match rest.next() {
                Some(year) => config.current_year = year.parse()?,
                None => bail!("--year requires a value"),
            },
            other => bail!("unknown argument: {}", other),
        }
    }

    Ok(config)
}
