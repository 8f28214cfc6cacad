//! File logging example
//!
//! Demonstrates writing to a file, swapping the output at runtime and the
//! stdout fallback taking over when the file cannot be written.
//!
//! Run with: cargo run --example file_logging

use llog::kv;
use llog::prelude::*;

fn main() -> Result<()> {
    println!("=== llog - File Logging Example ===\n");

    let logger = Logger::builder()
        .min_level(LogLevel::Debug)
        .output(FileSink::new("application.log")?)
        .build();

    println!("1. Logging to 'application.log':");
    logger.info("Application started", &[]);
    logger.debug("Loading configuration", &[kv!("path" => "config.toml")]);
    logger.warn("Using default settings for some options", &[]);

    for i in 1..=5 {
        logger.info("Processing item", &[kv!("item" => i, "total" => 5)]);
        if i == 3 {
            logger.warn("Item took longer than expected", &[kv!("item" => i)]);
        }
    }

    // Flush to ensure all logs are written
    logger.flush()?;

    println!("\n2. Switching back to stdout:");
    logger.reset_output()?;
    logger.info("Now writing to the fallback", &[]);
    logger.flush()?;

    println!("\n3. Writing to a second file:");
    logger.set_output(FileSink::new("application-2.log")?)?;
    logger.error("Failed to load optional plugin", &[kv!("plugin" => "metrics")]);
    logger.flush()?;

    let metrics = logger.metrics();
    println!(
        "\n   written={} failures={} fallback={}",
        metrics.entries_written(),
        metrics.write_failures(),
        metrics.fallback_writes()
    );

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' and 'application-2.log' for the output");

    Ok(())
}
