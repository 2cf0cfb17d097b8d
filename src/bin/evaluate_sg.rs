//! Rank a JSON file of performance records for one SG (or all of them)
//!
//! Usage: evaluate_sg <records.json> <TYPE|all> [--margin N] [--show-all]
//!
//! The records file is a JSON array of performance records (camelCase keys).
//! Output is a plain-text table per tournament.

use anyhow::{bail, Context};
use sg_qualifier::{
    criteria_for, evaluate, evaluate_all, with_margin, MarginSummary, PerformanceRecord,
    QualificationResult, TournamentType, DEFAULT_MARGIN,
};
use std::time::Instant;

struct Args {
    records_path: String,
    target: Option<TournamentType>,
    margin: usize,
    show_all: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut positional = Vec::new();
    let mut margin = DEFAULT_MARGIN;
    let mut show_all = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--margin" => {
                let value = args.next().context("--margin needs a value")?;
                margin = value
                    .parse()
                    .with_context(|| format!("invalid margin: {}", value))?;
            }
            "--show-all" => show_all = true,
            _ => positional.push(arg),
        }
    }

    if positional.len() != 2 {
        bail!("usage: evaluate_sg <records.json> <TYPE|all> [--margin N] [--show-all]");
    }

    let target = if positional[1].eq_ignore_ascii_case("all") {
        None
    } else {
        Some(positional[1].parse::<TournamentType>()?)
    };

    Ok(Args {
        records_path: positional.remove(0),
        target,
        margin,
        show_all,
    })
}

fn print_results(tournament: TournamentType, results: &[QualificationResult], args: &Args) {
    let criteria = criteria_for(tournament);
    let shown = if args.show_all {
        results
    } else {
        with_margin(results, args.margin)
    };
    let summary = MarginSummary::new(results, shown);

    println!("\n{} ({})", criteria.name, tournament);
    println!(
        "  slots {} | qualified {} | borderline {} | total {}",
        criteria.total_slots, summary.qualified_count, summary.borderline_count, summary.total
    );
    println!("{}", "-".repeat(80));

    for r in shown {
        println!(
            "{:>4} {} {:<6} {:<16} {:>+10.2}  {}",
            r.rank,
            if r.qualified { "✓" } else { " " },
            r.racer_id,
            r.racer.name,
            r.borderline_distance,
            r.qualification_reason
        );
    }
}

fn main() -> anyhow::Result<()> {
    let args = parse_args()?;

    let raw = std::fs::read_to_string(&args.records_path)
        .with_context(|| format!("reading {}", args.records_path))?;
    let records: Vec<PerformanceRecord> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", args.records_path))?;

    println!("Loaded {} records from {}", records.len(), args.records_path);

    let start = Instant::now();
    let evaluated = match args.target {
        Some(t) => vec![(t, evaluate(&records, t))],
        None => evaluate_all(&records),
    };
    let elapsed = start.elapsed();

    for (tournament, results) in &evaluated {
        print_results(*tournament, results, &args);
    }

    println!("\nEvaluated in {:.2?}", elapsed);
    Ok(())
}
