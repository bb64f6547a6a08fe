/*
cargo run --bin compare_responses --release -- \
  --gemini-dir "data/Gemini Responses" \
  --gpt-dir "data/GPT Responses" \
  --out-dir results
*/

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use model_compare::corpus::{load_corpus, Response};
use model_compare::registry::TASKS;
use model_compare::report::write_report;
use model_compare::scorer::{cross_scores, self_scores};
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};
use std::{fs, fs::File, path::PathBuf};

// CLI parameters
#[derive(Parser, Debug)]
#[command(version, about = "Score model response similarity with BLEU and CodeBLEU")]
struct Cli {
    /// Directory with the Gemini task files
    #[arg(long, default_value = "data/Gemini Responses")]
    gemini_dir: PathBuf,

    /// Directory with the GPT task files
    #[arg(long, default_value = "data/GPT Responses")]
    gpt_dir: PathBuf,

    /// Where the four CSV reports go
    #[arg(long, default_value = "results")]
    out_dir: PathBuf,

    /// Where the run log goes
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    fs::create_dir_all(&cli.log_dir)
        .with_context(|| format!("cannot create {}", cli.log_dir.display()))?;
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let log_path = cli.log_dir.join(format!("compare_responses_{ts}.log"));
    WriteLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        File::create(&log_path)
            .with_context(|| format!("cannot create log file {}", log_path.display()))?,
    )?;
    info!(
        "Started - gemini: {:?}, gpt: {:?}, out: {:?}",
        cli.gemini_dir, cli.gpt_dir, cli.out_dir
    );

    // load both corpora
    let gemini = load_corpus(&cli.gemini_dir)?;
    let gpt = load_corpus(&cli.gpt_dir)?;
    info!(
        "Loaded {} Gemini and {} GPT task files",
        gemini.len(),
        gpt.len()
    );

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("cannot create {}", cli.out_dir.display()))?;

    // progress bar
    let bar = ProgressBar::new(4);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap(),
    );

    // four score tables
    bar.set_message("Gemini self-consistency");
    let gemini_self = self_scores(&gemini, TASKS)?;
    bar.inc(1);

    bar.set_message("GPT self-consistency");
    let gpt_self = self_scores(&gpt, TASKS)?;
    bar.inc(1);

    bar.set_message("Gemini vs GPT on R1");
    let cross_r1 = cross_scores(&gemini, &gpt, Response::R1, TASKS)?;
    bar.inc(1);

    bar.set_message("Gemini vs GPT on R2");
    let cross_r2 = cross_scores(&gemini, &gpt, Response::R2, TASKS)?;
    bar.inc(1);
    bar.finish_and_clear();

    // four reports
    write_report(&gemini_self, &cli.out_dir.join("gemini.csv"))?;
    write_report(&gpt_self, &cli.out_dir.join("gpt.csv"))?;
    write_report(&cross_r1, &cli.out_dir.join("gpt-gemini-R1.csv"))?;
    write_report(&cross_r2, &cli.out_dir.join("gpt-gemini-R2.csv"))?;
    info!("Wrote 4 reports to {}", cli.out_dir.display());

    println!("Done -> {}", cli.out_dir.display());
    Ok(())
}
