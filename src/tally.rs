//! Draws repeatedly from a configured set of choices and reports how often each came up
use clap::Parser;
use env_logger::fmt::Formatter;
use log::Record;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::{fs, process, thread};
use weightedrand::{Choice, Chooser, Error};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file with `picks`, optional `seed` and the list of `choices`
    #[arg()]
    config_file: String,
    /// Write a JSON report of the counts
    #[arg(short, long)]
    report: bool,
    /// Where to write the report. Defaults to a timestamped file under reports/
    #[arg(long)]
    report_path: Option<String>,
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

#[derive(Debug, Deserialize)]
struct TallySettings {
    picks: usize,
    seed: Option<u64>,
    choices: Vec<Choice<String>>,
}

#[derive(Debug, Serialize)]
struct TallyCount<'a> {
    item: &'a str,
    weight: u64,
    count: usize,
}

#[derive(Debug, Serialize)]
struct TallyReport<'a> {
    total: u64,
    picks: usize,
    counts: Vec<TallyCount<'a>>,
}

fn fail(message: String) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn run_tally(settings: &TallySettings) -> Result<(u64, Vec<usize>), Error> {
    // Pick positions so the counts come back in config order
    let chooser = Chooser::new(
        settings
            .choices
            .iter()
            .enumerate()
            .map(|(i, choice)| Choice::new(i, choice.weight)),
    )?;
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut counts = vec![0; settings.choices.len()];
    for _ in 0..settings.picks {
        counts[*chooser.pick_with(&mut rng)?] += 1;
    }
    Ok((chooser.total(), counts))
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::new()
        .format(|buf: &mut Formatter, record: &Record| {
            let thread_id = thread::current().id();
            let timestamp = buf.timestamp_millis();
            writeln!(
                buf,
                "[{}] [Thread: {:?}] [{}] - {}",
                timestamp,
                thread_id,
                record.level(),
                record.args()
            )
        })
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config_file = fs::read_to_string(&args.config_file)
        .unwrap_or_else(|err| fail(format!("Failed to read config file {}: {}", args.config_file, err)));
    let settings: TallySettings = serde_json::from_str(&config_file)
        .unwrap_or_else(|err| fail(format!("Failed to parse config file: {}", err)));
    log::info!(
        "Drawing {} picks from {} choices",
        settings.picks,
        settings.choices.len()
    );

    let (total, counts) =
        run_tally(&settings).unwrap_or_else(|err| fail(format!("Failed to draw: {}", err)));

    println!("Item\tCount\tExpected\tObserved");
    for (choice, count) in settings.choices.iter().zip(counts.iter()) {
        println!(
            "{}\t{}\t{:>5.2}%\t{:>5.2}%",
            choice.item,
            count,
            (100.0 * choice.weight as f64) / total as f64,
            (100.0 * *count as f64) / settings.picks.max(1) as f64
        );
    }

    if args.report || args.report_path.is_some() {
        let report_path = args.report_path.unwrap_or_else(|| {
            format!(
                "reports/{}.json",
                chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
            )
        });
        if let Some(parent) = std::path::Path::new(&report_path).parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                fail(format!("Failed to create reports folder {}: {}", parent.display(), err));
            }
        }
        let report = TallyReport {
            total,
            picks: settings.picks,
            counts: settings
                .choices
                .iter()
                .zip(counts.iter())
                .map(|(choice, count)| TallyCount {
                    item: &choice.item,
                    weight: choice.weight,
                    count: *count,
                })
                .collect(),
        };
        let serialized = serde_json::to_string_pretty(&report)
            .unwrap_or_else(|err| fail(format!("Failed to serialise report: {}", err)));
        if let Err(err) = fs::write(&report_path, serialized) {
            fail(format!("Failed to write report {}: {}", report_path, err));
        }
        println!("Report written to {}", report_path);
    }
}
