use anyhow::{Context, Result};
use salarybench::{
    aggregate::{aggregate_table, ColumnTotal},
    columns::RoleMap,
    extract::parse_table,
    history::{ReportHistory, ReportRecord},
};
use std::{env, fs, path::Path, process::exit};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();

    // ─── 2) parse args ───────────────────────────────────────────────
    let mut roles = RoleMap::default();
    let mut report_paths: Vec<String> = Vec::new();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--roles" => {
                let path = match args.next() {
                    Some(p) => p,
                    None => {
                        eprintln!("--roles requires a YAML file path");
                        exit(1);
                    }
                };
                roles = RoleMap::from_yaml_file(&path)?;
                info!(%path, "loaded column role map");
            }
            _ => report_paths.push(arg),
        }
    }
    if report_paths.is_empty() {
        eprintln!("Usage: salarybench [--roles ROLES_YAML] <REPORT_FILE>...");
        exit(1);
    }

    // ─── 3) parse + aggregate each report ────────────────────────────
    let mut history = ReportHistory::new();
    for path in &report_paths {
        let raw = fs::read_to_string(path).with_context(|| format!("reading report `{}`", path))?;
        let table = parse_table(&raw);
        if table.headers.is_empty() {
            warn!(%path, "no table found; printing raw text");
            println!("--- {} (לא זוהתה טבלה) ---", path);
            println!("{}", raw);
            continue;
        }

        let resolved = roles.resolve(&table.headers);
        let summary = aggregate_table(&table, &resolved);
        info!(%path, rows = table.rows.len(), "aggregated report");

        println!("--- {} ({} רכיבים) ---", path, table.rows.len());
        print_total("שכר ברוטו כולל", &summary.gross);
        print_total("עלות מעסיק כוללת", &summary.employer_cost);

        let job_title = Path::new(path)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.clone());
        history.add(ReportRecord::new(job_title, 0, raw, summary));
    }

    // ─── 4) dump session history as JSON ─────────────────────────────
    if !history.is_empty() {
        println!("{}", serde_json::to_string_pretty(&history)?);
    }
    Ok(())
}

fn print_total(label: &str, total: &ColumnTotal) {
    match total {
        ColumnTotal::Total(v) => println!("  {}: {:.0} ₪", label, v),
        ColumnTotal::NoNumericValues => println!("  {}: לא נמצאו ערכים מספריים", label),
        ColumnTotal::ColumnNotFound => println!("  {}: עמודה לא זוהתה", label),
    }
}
