use log::{debug, info, warn};

use party_scheduling::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::sched::config_reader::*;
use crate::sched::io_common::{format_score, parse_weights};
use crate::sched::io_csv::CsvStorage;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;

#[derive(Debug, Snafu)]
pub enum SchedError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("{source}"))]
    Scheduling { source: SchedulingError },
    #[snafu(display("Error writing summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing the ranking"))]
    WritingRanking { source: std::io::Error },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},
    #[snafu(display("Could not understand weight {value:?} (expected 0, 0.5, 1, no, maybe or yes)"))]
    InvalidWeight { value: String },
    #[snafu(display("Quorum must be a non-negative number, got {value}"))]
    InvalidQuorum { value: f64 },
    #[snafu(display("--participant and --weights must be given together"))]
    MissingWeights {},
}

pub type SchedResult<T> = Result<T, SchedError>;

/// The `--out` value that sends the JSON summary to standard output.
pub const STDOUT: &str = "stdout";

fn summary_scores_to_json(summary: &ScheduleSummary) -> Vec<JSValue> {
    summary
        .scores
        .iter()
        .map(|s| {
            json!({
                "slot": s.slot,
                "score": format_score(s.score),
                "quorum": s.quorum,
            })
        })
        .collect()
}

fn build_summary_js(config: &PartyConfig, rules: &ScoringRules, summary: &ScheduleSummary) -> JSValue {
    let c = OutputConfig {
        title: config.title(),
        organizer: config.organizer.clone(),
        quorum: format_score(rules.quorum_threshold),
    };
    json!({
        "config": c,
        "results": {
            "scores": summary_scores_to_json(summary),
            "bestSlot": summary.best.slot,
            "bestScore": format_score(summary.best.score),
            "organizerPresent": summary.organizer_present,
            "absentees": summary.absentees,
        }
    })
}

/// Writes the human-readable ranking.
fn write_ranking(w: &mut dyn Write, title: &str, summary: &ScheduleSummary) -> io::Result<()> {
    writeln!(w, "{}", title)?;
    writeln!(w, "Ranking:")?;
    let mut ranked: Vec<&ScoredSlot> = summary.scores.iter().collect();
    // Stable sort: equal scores keep the slot order.
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    for s in ranked {
        let mark = if s.quorum { " (quorum)" } else { "" };
        writeln!(w, "  {:>5}  {}{}", format_score(s.score), s.slot, mark)?;
    }
    writeln!(
        w,
        "Best slot: {} (score {})",
        summary.best.slot,
        format_score(summary.best.score)
    )?;
    writeln!(
        w,
        "Organizer: {}",
        if summary.organizer_present {
            "present"
        } else {
            "ABSENT"
        }
    )?;
    if summary.absentees.is_empty() {
        writeln!(w, "Absent at the best slot: nobody")?;
    } else {
        writeln!(w, "Absent at the best slot: {}", summary.absentees.join(", "))?;
    }
    Ok(())
}

/// The ranking goes to stderr when stdout carries the JSON summary.
fn print_summary(title: &str, summary: &ScheduleSummary, out: Option<&str>) -> SchedResult<()> {
    let res = if out == Some(STDOUT) {
        write_ranking(&mut io::stderr().lock(), title, summary)
    } else {
        write_ranking(&mut io::stdout().lock(), title, summary)
    };
    res.context(WritingRankingSnafu {})
}

fn write_summary(pretty_js: &str, out: &str) -> SchedResult<()> {
    if out == STDOUT {
        println!("{}", pretty_js);
        return Ok(());
    }
    fs::write(out, pretty_js).context(WritingSummarySnafu { path: out })?;
    info!("Summary written to {}", out);
    Ok(())
}

/// Loads the configuration, applies the submission if any, and reports the ranking.
pub fn run_scheduler(args: &Args) -> SchedResult<ScheduleSummary> {
    let (config, root_p): (PartyConfig, PathBuf) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root_p = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            (config, root_p)
        }
        None => {
            info!("No configuration given, using the built-in group");
            (PartyConfig::builtin(), PathBuf::from("."))
        }
    };
    info!("config: {:?}", config);

    let roster = config.roster()?;
    let rules = config.rules()?;

    let data_path: PathBuf = match &args.data {
        Some(p) => PathBuf::from(p),
        None => root_p.join(&config.data_file),
    };
    info!("Using availability table {:?}", data_path);

    let mut scheduler = Scheduler::new(
        AvailabilityStore::new(roster, CsvStorage::new(data_path)),
        rules,
    );
    if scheduler
        .initialize_if_absent()
        .context(SchedulingSnafu {})?
    {
        info!("No availability table found, created an empty one");
    }

    match (&args.participant, &args.weights) {
        (Some(participant), Some(weights)) => {
            let values = parse_weights(weights)?;
            debug!("run_scheduler: {} submits {:?}", participant, values);
            scheduler
                .submit_availability(participant, &values)
                .context(SchedulingSnafu {})?;
            info!("Saved availability for {}", participant);
        }
        (None, None) => {}
        _ => return MissingWeightsSnafu {}.fail(),
    }

    let summary = scheduler.get_summary().context(SchedulingSnafu {})?;

    let out = match &args.out {
        Some(out) => Some(out.clone()),
        None => config
            .output_file()
            .map(|f| root_p.join(f).display().to_string()),
    };
    print_summary(&config.title(), &summary, out.as_deref())?;

    let result_js = build_summary_js(&config, &rules, &summary);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    if let Some(out) = out {
        write_summary(&pretty_js_stats, &out)?;
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return ReferenceMismatchSnafu {}.fail();
        }
    }

    Ok(summary)
}
