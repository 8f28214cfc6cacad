//! Basic logger usage example
//!
//! Demonstrates the process-wide logger, level thresholds and attribute sets.
//!
//! Run with: cargo run --example basic_usage

use llog::prelude::*;
use llog::{info, kv, warn};

fn main() -> Result<()> {
    println!("=== llog - Basic Usage Example ===\n");

    // The global logger writes to stdout at INFO until told otherwise
    println!("1. Logging at different levels:");
    llog::debug("This is a debug message (hidden)", &[]);
    llog::info("This is an info message", &[]);
    llog::warn("This is a warning message", &[]);
    llog::error("This is an error message", &[]);
    llog::flush()?;

    println!("\n2. Lowering the threshold by name:");
    llog::set_level_from_str("debug")?;
    llog::debug("Debug message (visible)", &[]);
    if let Err(e) = llog::set_level_from_str("BOGUS") {
        println!("   rejected: {} (level is still {})", e, llog::get_level());
    }
    llog::flush()?;

    println!("\n3. Attribute sets:");
    let request = kv!("request_id" => "abc-123", "method" => "GET");
    llog::info("Request received", &[request.clone()]);
    // Later sets override earlier ones
    llog::info("Request handled", &[request.clone(), kv!("status" => 200, "method" => "HEAD")]);
    llog::error(
        "Could not open file",
        &[kv!("filename" => "app.toml", "err" => "permission \"denied\"")],
    );
    llog::flush()?;

    println!("\n4. Timestamps and a dedicated logger:");
    let logger = Logger::builder()
        .min_level(LogLevel::Warn)
        .display_timestamp(true)
        .build();
    info!(logger, "Dropped by the WARN threshold");
    warn!(logger, "Disk usage high", kv!("percent" => 91.5));
    logger.flush()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
