//! CREATE2 Vanity Salt Miner CLI
//!
//! Usage:
//!   create2_vanity mine -d <deployer> -i <init-code-hash> -n 1000000 -p 0000
//!   create2_vanity predict -d <deployer> -s 42 --init-code 0x6080...
//!   create2_vanity keccak "hello"

use std::panic;
use std::process;
use std::thread;
use std::time::Instant;

use clap::Parser;
use crossbeam_channel::{bounded, RecvTimeoutError};
use tracing_subscriber::EnvFilter;

use create2_vanity::config::{Command, KeccakArgs, MineArgs, PredictArgs};
use create2_vanity::{create2_address, Config, OutputRow, ResultStream, ScanProgress, WorkerPool};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    let outcome = match &config.command {
        Command::Mine(args) => mine(args),
        Command::Predict(args) => predict(args),
        Command::Keccak(args) => keccak(args),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn mine(args: &MineArgs) -> create2_vanity::Result<()> {
    args.validate()?;
    let request = args.to_request()?;
    let workers = args.worker_count(request.effective_count());

    println!("CREATE2 Vanity Salt Miner");
    println!("=========================");
    println!("Deployer:   {}", request.deployer());
    println!("Init hash:  0x{}", hex::encode(request.init_code_hash()));
    println!("Pattern:    {}", request.pattern());
    println!("Difficulty: {}", request.pattern().difficulty_description());
    println!(
        "Range:      {} .. {} ({} salts)",
        request.salt_start(),
        request.salt_end(),
        format_number(request.effective_count())
    );
    println!("Workers:    {}", workers);
    println!("Target:     {} address(es)", request.max_results());
    println!();

    let pool = WorkerPool::new(request, workers);
    let progress = pool.progress();
    let started = Instant::now();

    let (tx, rx) = bounded(1);
    let scan = thread::Builder::new()
        .name("create2-scan".into())
        .spawn(move || {
            let _ = tx.send(pool.run());
        })?;

    println!("Searching...\n");

    let report_interval = args.report_interval();
    let results = loop {
        match rx.recv_timeout(report_interval) {
            Ok(results) => break results?,
            Err(RecvTimeoutError::Timeout) => print_progress(&progress, started),
            Err(RecvTimeoutError::Disconnected) => match scan.join() {
                Err(payload) => panic::resume_unwind(payload),
                Ok(()) => unreachable!("scan thread exits only after sending"),
            },
        }
    };

    println!(
        "Scan finished: {} match(es) in {} salts.\n",
        results.len(),
        format_number(results.salts_scanned())
    );

    let salts_scanned = results.salts_scanned();
    let elapsed = results.elapsed();
    let rate = results.salts_per_second();

    let mut index = 0;
    for batch in ResultStream::new(results, args.batch_size)? {
        for row in &batch {
            index += 1;
            print_result(row, index);
        }
    }

    println!("--- Final Statistics ---");
    println!("Total salts scanned: {}", format_number(salts_scanned));
    println!("Total matches:       {}", index);
    println!("Time elapsed:        {:.2}s", elapsed.as_secs_f64());
    println!("Average speed:       {}/s", format_number(rate as u64));

    Ok(())
}

fn predict(args: &PredictArgs) -> create2_vanity::Result<()> {
    let deployer = args.deployer()?;
    let salt = args.salt()?;
    let init_code_hash = args.init_code_hash()?;
    let address = create2_address(&deployer, &salt, &init_code_hash);

    println!("Address:    {}", address);
    println!("Lowercase:  {}", address.to_hex_prefixed());
    println!("Salt:       {}", salt.to_hex_prefixed());
    println!("Init hash:  0x{}", hex::encode(init_code_hash));
    Ok(())
}

fn keccak(args: &KeccakArgs) -> create2_vanity::Result<()> {
    println!("0x{}", hex::encode(args.digest()?));
    Ok(())
}

fn print_result(row: &OutputRow, index: usize) {
    println!("=== Match #{} ===", index);
    println!("Address:    {}", row.address);
    println!("Salt (hex): {}", row.salt);
    println!("Salt (dec): {}", row.salt_lo);
    println!("Zero bits:  {} leading, {} trailing", row.lz_bits, row.tz_bits);
    println!();
}

fn print_progress(progress: &ScanProgress, started: Instant) {
    let salts = progress.salts_scanned();
    let elapsed = started.elapsed();
    let secs = elapsed.as_secs_f64();
    let rate = if secs > 0.0 { salts as f64 / secs } else { 0.0 };
    println!(
        "[{:>4}s] {:>3}% Scanned {} salts ({}/s), {} match(es)",
        elapsed.as_secs(),
        progress.percent(),
        format_number(salts),
        format_number(rate as u64),
        progress.results_found()
    );
}

fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1e9)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1e6)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1e3)
    } else {
        n.to_string()
    }
}
