use anyhow::{Context, Result};
use property_analytics::config::AppConfig;
use property_analytics::ingest::{self, csv::read_rows};
use property_analytics::report::build_report;
use property_analytics::InMemoryStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🏠 Property Analytics - batch report");

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // Read and import the listing file
    info!("Reading listings from {}", config.import_path.display());
    let raw = tokio::fs::read_to_string(&config.import_path)
        .await
        .with_context(|| format!("Failed to read {}", config.import_path.display()))?;
    let rows = read_rows(raw.as_bytes()).context("Failed to parse listing CSV")?;

    let store = InMemoryStore::new();
    let summary = ingest::import_rows(&store, &rows, config.commit_policy).await;

    // Compute analytics
    let report = build_report(&store, summary, &config)
        .await
        .context("Failed to compute analytics")?;

    // Display results
    let import = &report.import;
    println!(
        "Imported {} of {} rows ({} rejected)",
        import.rows_committed,
        import.rows_processed,
        import.rejections.len()
    );
    for rejection in &import.rejections {
        println!("   row {}: {}", rejection.row_index, rejection.reason);
    }

    let stats = &report.statistics;
    println!();
    println!("Properties: {}", stats.total_properties);
    println!("   Average price: {:.2}", stats.average_price);
    println!("   Median price: {:.2}", stats.median_price);
    println!("   Average price/sqft: {:.2}", stats.average_price_per_sqft);

    if let Some(fence) = &report.outlier_fence {
        println!(
            "   Outlier fence: {:.2} .. {:.2} ({} shown)",
            fence.lower,
            fence.upper,
            report.outliers.len()
        );
    }
    for outlier in &report.outliers {
        println!("   ! {} {} ({:.0})", outlier.property_id, outlier.address, outlier.price);
    }

    println!();
    for month in &report.history {
        println!(
            "{}-{:02}: {} listed, avg {:.2}, avg {:.2} sqft",
            month.year, month.month, month.count, month.average_price, month.average_square_feet
        );
    }

    // Save the full report
    let json = serde_json::to_string_pretty(&report)?;
    tokio::fs::write(&config.report_path, json)
        .await
        .with_context(|| format!("Failed to write {}", config.report_path.display()))?;
    info!("💾 Saved report to {}", config.report_path.display());

    Ok(())
}
