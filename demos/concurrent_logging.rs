//! Concurrent logging example
//!
//! Demonstrates many threads sharing one logger. Every line comes out whole
//! and each thread's lines keep their order.
//!
//! Run with: cargo run --example concurrent_logging

use llog::kv;
use llog::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

fn main() -> Result<()> {
    println!("=== llog - Concurrent Logging Example ===\n");

    let logger = Arc::new(
        Logger::builder()
            .min_level(LogLevel::Info)
            .queue_capacity(256)
            .build(),
    );

    let start = Instant::now();
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                let context = kv!("worker" => worker);
                for job in 0..5 {
                    logger.info("Job finished", &[context.clone(), kv!("job" => job)]);
                }
                logger.debug("Worker idle (hidden)", &[context]);
            })
        })
        .collect();

    for handle in handles {
        let _ = handle.join();
    }
    logger.flush()?;

    println!(
        "\n{} entries written in {:?}",
        logger.metrics().entries_written(),
        start.elapsed()
    );
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
