use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::{info, warn};

use pubtrack::tables::{download_name, load_publications, load_roster, TrackingWorkbook};
use pubtrack::{reconcile, RosterIndex, RunContext};

#[derive(Parser, Debug)]
#[command(name = "pubtrack-cli")]
#[command(about = "Append reconciled publications to a tracking workbook")]
struct Args {
    /// Faculty roster (XLSX or CSV)
    #[arg(long)]
    roster: PathBuf,

    /// Publication export (CSV)
    #[arg(long)]
    publications: PathBuf,

    /// Tracking workbook to extend (XLSX)
    #[arg(long)]
    template: PathBuf,

    /// Directory for the dated output workbook (default: current directory)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Text marking the tracked institution in affiliations
    #[arg(long, env = "PUBTRACK_INSTITUTION", default_value = pubtrack::config::DEFAULT_INSTITUTION)]
    institution: String,

    /// Dry run - print the rows instead of writing a workbook
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let roster = load_roster(&args.roster)
        .with_context(|| format!("Failed to read roster: {}", args.roster.display()))?;
    let publications = load_publications(&args.publications).with_context(|| {
        format!("Failed to read publication export: {}", args.publications.display())
    })?;
    info!(
        "Loaded {} roster entries and {} publications",
        roster.len(),
        publications.len()
    );

    let index = RosterIndex::build(&roster);
    for collision in index.collisions() {
        warn!(
            "{} and {} share \"{}\"; keeping {}",
            collision.kept, collision.ignored, collision.key, collision.kept
        );
    }

    let ctx = RunContext::new(&index, &args.institution);
    let report = reconcile(&ctx, &publications);
    info!(
        "{} publications reconciled, {} without department authors",
        report.rows.len(),
        report.skipped_publications
    );

    if args.dry_run {
        for reconciled in &report.rows {
            let row = &reconciled.row;
            info!(
                "  - {} | corresponding: {} | other: {} [{:?}/{:?}]",
                row.title,
                row.corresponding_names,
                row.non_corresponding_names,
                reconciled.parsing_flag,
                reconciled.correspondence_flag
            );
        }
        return Ok(());
    }

    let template_bytes = fs::read(&args.template)
        .with_context(|| format!("Failed to read template: {}", args.template.display()))?;
    let mut workbook =
        TrackingWorkbook::from_template(&template_bytes).context("Invalid tracking workbook")?;
    for reconciled in &report.rows {
        workbook.append_reconciled(reconciled);
    }
    let bytes = workbook.to_xlsx().context("Failed to build workbook")?;

    let template_name = args
        .template
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("tracking.xlsx");
    let out_dir = args.out_dir.unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let out_path = out_dir.join(download_name(template_name, Local::now().date_naive()));
    fs::write(&out_path, bytes)
        .with_context(|| format!("Failed to write workbook: {}", out_path.display()))?;

    info!("Wrote {}", out_path.display());
    Ok(())
}
