//! Formatted run summary printed after a crawl completes

use crate::crawler::CrawlReport;
use crate::url::Category;

/// Prints the run report to stdout
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");

    println!("Documents extracted: {}", report.documents.len());
    println!("URLs visited: {}", report.total_visited);
    println!();

    println!("URLs by category:");
    for category in Category::ALL {
        let count = report.category_counts.get(&category).copied().unwrap_or(0);
        println!("  {}: {}", category.label(), count);
    }
    println!();

    println!(
        "Total execution time: {:.2} seconds",
        report.elapsed.as_secs_f64()
    );
}
