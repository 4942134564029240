//! Sheetport - background spreadsheet exporter
//!
//! Exports a CSV row set to a styled spreadsheet artifact in a background
//! worker and opens the result with the platform's default viewer.
//!
//! # Features
//!
//! - Cancellable background export with task supersession
//! - Incremental progress events rendered as a progress bar
//! - Styled header row and auto-fit column widths
//! - Output-folder retention pruning
//! - Configuration management
//!
//! # Usage
//!
//! ```bash
//! sheetport results.csv --table-name "T 1" --output-dir output
//! ```

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

use sheetport::cli::CliInterface;
use sheetport::error::{InputError, Result};
use sheetport::export::{ExportCoordinator, ExportEvent, ExportRequest};

/// Application entry point
#[tokio::main]
async fn main() {
    // Initialize the application and handle any errors
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// This function orchestrates the application startup:
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands (version, completion, config)
/// 4. Read the input CSV and run one export to completion
///
/// # Returns
/// * `Result<()>` - Success or error
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand()? {
        return Ok(());
    }

    let file = cli.input_file()?;
    let request = read_request(file, cli.resolve_table_name())?;
    cli.print_banner(request.rows.len(), &request.table_name);

    let total = request.rows.len() as u64;
    let (mut coordinator, mut events) = ExportCoordinator::new(cli.export_settings());
    coordinator.start_export(request);

    // Render events while the task runs; the channel closes once the
    // coordinator is dropped and the relay has drained
    let bar = progress_bar(total, cli.args().quiet);
    let printer = tokio::spawn(async move {
        let mut failed = false;
        while let Some(event) = events.recv().await {
            match event {
                ExportEvent::Progress { rows_written } => bar.set_position(rows_written),
                ExportEvent::Error { message } => {
                    failed = true;
                    bar.suspend(|| eprintln!("{}", message));
                }
            }
        }
        bar.finish_and_clear();
        failed
    });

    coordinator.join_current().await;
    drop(coordinator);

    if printer.await.unwrap_or(true) {
        std::process::exit(1);
    }
    Ok(())
}

/// Read a CSV file into an export request.
///
/// The first record is taken as the header row; every following record
/// becomes one data row.
fn read_request(path: &Path, table_name: String) -> Result<ExportRequest> {
    let mut reader = csv::Reader::from_path(path)?;
    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if header.is_empty() {
        return Err(InputError::EmptyInput(path.display().to_string()).into());
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(ExportRequest {
        rows,
        header,
        table_name,
    })
}

/// Build the progress bar for export feedback
fn progress_bar(total: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} rows")
            .unwrap()
            .progress_chars("#>-"),
    );
    bar
}

/// Initialize logging based on the effective configuration
fn initialize_logging(cli: &CliInterface) {
    let level = cli.config().logging.level.to_tracing_level();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_request_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        std::fs::write(&path, "Name,Val\na,1\nb,2\n").unwrap();

        let request = read_request(&path, "T 1".to_string()).unwrap();
        assert_eq!(request.header, vec!["Name", "Val"]);
        assert_eq!(
            request.rows,
            vec![vec!["a", "1"], vec!["b", "2"]]
        );
        assert_eq!(request.table_name, "T 1");
    }

    #[test]
    fn test_read_request_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        assert!(read_request(&path, "t".to_string()).is_err());
    }
}
