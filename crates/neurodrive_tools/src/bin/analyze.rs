use clap::Parser;
use neurodrive_data::GenerationReport;
use neurodrive_io::history::{read_generation_reports, HistoryLogger};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarise a neurodrive training history", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "logs/live.jsonl")]
    input: String,

    /// Print the summary as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug, PartialEq)]
struct Summary {
    generations: usize,
    first_best: f32,
    last_best: f32,
    peak_best: f32,
    peak_generation: u64,
    improvement: f32,
    degenerate_pairs: usize,
    history_hash: String,
}

fn summarize(reports: &[GenerationReport]) -> anyhow::Result<Option<Summary>> {
    let (Some(first), Some(last)) = (reports.first(), reports.last()) else {
        return Ok(None);
    };
    let peak = reports
        .iter()
        .max_by(|a, b| a.best_fitness.total_cmp(&b.best_fitness))
        .unwrap_or(last);

    Ok(Some(Summary {
        generations: reports.len(),
        first_best: first.best_fitness,
        last_best: last.best_fitness,
        peak_best: peak.best_fitness,
        peak_generation: peak.generation,
        improvement: last.best_fitness - first.best_fitness,
        degenerate_pairs: reports.iter().map(|r| r.degenerate_pairs).sum(),
        history_hash: HistoryLogger::compute_history_hash(reports)?,
    }))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let reports = read_generation_reports(&args.input)?;

    let Some(summary) = summarize(&reports)? else {
        println!("No generations found in {}. Nothing to analyze.", args.input);
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{:>6} {:>10} {:>10} {:>10}", "gen", "best", "mean", "worst");
    for r in &reports {
        println!(
            "{:>6} {:>10.2} {:>10.2} {:>10.2}",
            r.generation, r.best_fitness, r.mean_fitness, r.worst_fitness
        );
    }
    println!();
    println!("Generations:      {}", summary.generations);
    println!(
        "Peak fitness:     {:.2} (generation {})",
        summary.peak_best, summary.peak_generation
    );
    println!("Improvement:      {:+.2}", summary.improvement);
    println!("Degenerate pairs: {}", summary.degenerate_pairs);
    println!("History hash:     {}", summary.history_hash);

    Ok(())
}
