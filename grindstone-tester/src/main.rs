mod harness;
mod reports;
mod scenarios;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use harness::ScenarioCtx;
use reports::ScenarioResult;
use scenarios::{get_scenario, list_scenarios};

#[derive(Debug, Parser)]
#[command(name = "grindstone-tester", version = "0.1.0")]
#[command(about = "Automated QA scenarios for the Grindstone engine - deterministic, no UI")]
struct Args {
    /// Scenarios to run (comma-separated)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Simulated days for day-driven scenarios
    #[arg(long, default_value_t = 7)]
    days: u32,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "console"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Keep saves on disk under this directory instead of in memory
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let scenario_names = expand_scenarios(&args.scenarios);
    let seeds = parse_seeds(&args.seeds)?;

    let results = run_scenarios(&args, &scenario_names, &seeds);

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:12} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "⚙️  Grindstone Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenario_names = split_csv(scenarios_arg);
    if scenario_names.contains(&"all".to_string()) {
        scenario_names.retain(|s| s != "all");
        scenario_names.extend_from_slice(&[
            "smoke".to_string(),
            "streaks".to_string(),
            "roadmap".to_string(),
            "grind".to_string(),
            "persistence".to_string(),
        ]);
    }
    scenario_names
}

fn parse_seeds(seeds_arg: &str) -> Result<Vec<u64>> {
    let mut seeds = Vec::new();
    for token in split_csv(seeds_arg) {
        let seed = token
            .parse::<u64>()
            .with_context(|| format!("invalid seed '{token}'"))?;
        seeds.push(seed);
    }
    if seeds.is_empty() {
        seeds.push(1337);
    }
    Ok(seeds)
}

fn run_scenarios(args: &Args, scenario_names: &[String], seeds: &[u64]) -> Vec<ScenarioResult> {
    println!("{}", "🧠 Running Engine Scenarios".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let mut results = Vec::new();
    for scenario_name in scenario_names {
        let Some(scenario) = get_scenario(scenario_name) else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
            continue;
        };
        for &seed in seeds {
            let ctx = ScenarioCtx::new(
                scenario.name,
                seed,
                args.days,
                args.verbose,
                args.save_dir.clone(),
            );

            let scenario_start = Instant::now();
            let outcome = (scenario.run)(&ctx);
            let duration = scenario_start.elapsed();

            match &outcome {
                Ok(()) => {
                    println!("✅ [seed {seed}] {} - {duration:?}", scenario.name.green());
                }
                Err(err) => {
                    eprintln!(
                        "❌ [seed {seed}] {} - {duration:?}: {err:#}",
                        scenario.name.red()
                    );
                }
            }

            results.push(ScenarioResult {
                scenario_name: scenario.name.to_string(),
                seed,
                passed: outcome.is_ok(),
                failures: match outcome {
                    Ok(()) => Vec::new(),
                    Err(err) => vec![format!("{err:#}")],
                },
                duration,
            });
        }
    }
    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => {
            if results.is_empty() {
                writeln!(&mut output_target, "[]")?;
            } else {
                reports::generate_json_report(&mut output_target, results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
        }
    }

    let duration = start_time.elapsed();
    writeln!(&mut output_target)?;
    writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
