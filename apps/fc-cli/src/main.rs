use clap::{Parser, Subcommand};
use fc_app::catalog::{builtin_scenarios, find_scenario};
use fc_app::export::{self, ExportFormat};
use fc_app::{
    AppError, AppResult, RunOptions, RunProgressEvent, RunStage, ScenarioDef, load_scenario,
    run_service, save_scenario, scenario_yaml, summarize,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fc-cli")]
#[command(about = "Feedback-loop simulator for queues, caches and speed regulators", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in scenarios
    List,
    /// Print a built-in scenario as YAML
    Show {
        /// Built-in scenario name
        name: String,
    },
    /// Run one scenario and write its observations
    Run {
        /// Built-in scenario name (ignored when --file is given)
        name: Option<String>,
        /// Scenario YAML file
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Override the number of observations
        #[arg(long)]
        length: Option<usize>,
        /// Override the random seed
        #[arg(long)]
        seed: Option<u64>,
        /// Output format: print, csv or json
        #[arg(long, default_value = "print")]
        format: ExportFormat,
        /// Output file (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Sleep this long after each written observation
        #[arg(long)]
        pace_ms: Option<u64>,
    },
    /// Run every built-in scenario in parallel and summarize
    RunAll {
        /// Override the random seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Validate a scenario file
    Validate {
        /// Path to the scenario YAML file
        path: PathBuf,
    },
    /// Write a built-in scenario to a YAML file
    Export {
        /// Built-in scenario name
        name: String,
        /// Destination YAML file
        output: PathBuf,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => cmd_list(),
        Commands::Show { name } => cmd_show(&name),
        Commands::Run {
            name,
            file,
            length,
            seed,
            format,
            output,
            pace_ms,
        } => {
            let def = resolve_scenario(name.as_deref(), file.as_deref())?;
            let opts = RunOptions { length, seed };
            let pace = pace_ms.map(Duration::from_millis);
            cmd_run(&def, &opts, format, output.as_deref(), pace)
        }
        Commands::RunAll { seed } => cmd_run_all(seed),
        Commands::Validate { path } => cmd_validate(&path),
        Commands::Export { name, output } => cmd_export(&name, &output),
    }
}

fn resolve_scenario(name: Option<&str>, file: Option<&Path>) -> AppResult<ScenarioDef> {
    match (file, name) {
        (Some(path), _) => load_scenario(path),
        (None, Some(name)) => find_scenario(name),
        (None, None) => Err(AppError::Validation(
            "give a built-in scenario name or --file".into(),
        )),
    }
}

fn cmd_list() -> AppResult<()> {
    println!("Built-in scenarios:");
    for def in builtin_scenarios() {
        let controller = def
            .controller
            .as_ref()
            .map(|c| c.label())
            .unwrap_or("open loop");
        println!(
            "  {:<20} {:<13} {:<10} {}",
            def.name,
            def.plant.label(),
            controller,
            def.description
        );
    }
    Ok(())
}

fn cmd_show(name: &str) -> AppResult<()> {
    let def = find_scenario(name)?;
    print!("{}", scenario_yaml(&def)?);
    Ok(())
}

fn open_output(output: Option<&Path>) -> AppResult<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(io::BufWriter::new(std::fs::File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    })
}

fn cmd_run(
    def: &ScenarioDef,
    opts: &RunOptions,
    format: ExportFormat,
    output: Option<&Path>,
    pace: Option<Duration>,
) -> AppResult<()> {
    let unbounded = opts.length.or(def.length).is_none();
    if pace.is_some() || unbounded {
        return cmd_stream(def, opts, format, output, pace);
    }

    let mut last_emit = Instant::now();
    let response = run_service::run_scenario(
        def,
        opts,
        None,
        Some(&mut |event| {
            let finished = matches!(event.stage, RunStage::Completed | RunStage::Cancelled);
            if finished || last_emit.elapsed().as_millis() >= 100 {
                render_progress(&event);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    let summary = summarize(&response.scenario, response.seed, &response.run);
    let text = export::render(format, &response.scenario, &response.run, &summary)?;
    let mut out = open_output(output)?;
    out.write_all(text.as_bytes())?;
    out.flush()?;

    eprintln!(
        "✓ {} finished: {} points, seed {}, final value {}",
        response.scenario,
        summary.points,
        response.seed,
        summary
            .final_value
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".into())
    );
    if let Some(path) = output {
        eprintln!("  written to {}", path.display());
    }
    Ok(())
}

/// Write observations as they are produced, optionally paced.
fn cmd_stream(
    def: &ScenarioDef,
    opts: &RunOptions,
    format: ExportFormat,
    output: Option<&Path>,
    pace: Option<Duration>,
) -> AppResult<()> {
    let mut out = open_output(output)?;
    match format {
        ExportFormat::Print => writeln!(out, "{}:", def.name)?,
        ExportFormat::Csv => writeln!(out, "step,value")?,
        ExportFormat::Json => {
            return Err(AppError::Validation(
                "json export needs a bounded, unpaced run".into(),
            ));
        }
    }

    let outcome = run_service::stream_scenario(def, opts, None, |obs| {
        writeln!(out, "{}", export::observation_line(obs))?;
        if let Some(pace) = pace {
            out.flush()?;
            std::thread::sleep(pace);
        }
        Ok(())
    })?;
    out.flush()?;

    eprintln!(
        "✓ {} finished: {} points, seed {}",
        def.name, outcome.emitted, outcome.seed
    );
    Ok(())
}

fn cmd_run_all(seed: Option<u64>) -> AppResult<()> {
    let defs = builtin_scenarios();
    let opts = RunOptions { length: None, seed };
    let started = Instant::now();
    let results = run_service::run_batch(&defs, &opts);

    println!(
        "{:<20} {:>6} {:>12} {:>12} {:>12} {:>12}",
        "scenario", "points", "min", "max", "mean", "final"
    );
    let mut failures = 0;
    for (def, result) in defs.iter().zip(results) {
        match result {
            Ok(response) => {
                let s = summarize(&response.scenario, response.seed, &response.run);
                println!(
                    "{:<20} {:>6} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
                    s.scenario,
                    s.points,
                    s.min.unwrap_or(f64::NAN),
                    s.max.unwrap_or(f64::NAN),
                    s.mean.unwrap_or(f64::NAN),
                    s.final_value.unwrap_or(f64::NAN),
                );
            }
            Err(e) => {
                failures += 1;
                println!("{:<20} failed: {}", def.name, e);
            }
        }
    }
    eprintln!(
        "\n{} scenarios in {:.3}s, {} failed",
        defs.len(),
        started.elapsed().as_secs_f64(),
        failures
    );
    Ok(())
}

fn cmd_validate(path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", path.display());
    let def = load_scenario(path)?;
    let mode = if def.is_closed_loop() {
        "closed loop"
    } else {
        "open loop"
    };
    println!("✓ Scenario '{}' is valid ({})", def.name, mode);
    Ok(())
}

fn cmd_export(name: &str, output: &Path) -> AppResult<()> {
    let def = find_scenario(name)?;
    save_scenario(output, &def)?;
    println!("✓ Wrote {} to {}", def.name, output.display());
    Ok(())
}

fn clear_progress_line() {
    eprint!("\r{}\r", " ".repeat(80));
    let _ = io::stderr().flush();
}

fn render_progress(event: &RunProgressEvent) {
    let width = 28usize;
    let fraction = event.fraction_complete().unwrap_or(0.0);
    let filled = ((fraction * width as f64).round() as usize).min(width);
    eprint!(
        "\r[{}{}] {:>6.2}%  {}  {:?}  emitted={}",
        "#".repeat(filled),
        "-".repeat(width - filled),
        fraction * 100.0,
        event.scenario,
        event.stage,
        event.emitted
    );
    let _ = io::stderr().flush();
}
