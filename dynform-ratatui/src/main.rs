use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use dynform::{
    FieldList, FormConfig, JsonFileStore, JsonLinesSink, LogSink, Submission, SubmissionSink,
};
use dynform_ratatui::{RatatuiForm, RatatuiFormError};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser)]
#[command(name = "dynform")]
#[command(about = "Fill in a form described by a JSON field list")]
struct Cli {
    /// JSON file with the field descriptions (`{"fields": [...]}`)
    fields: PathBuf,

    /// File the field values are persisted to
    #[arg(long, default_value = "dynform-store.json")]
    store: PathBuf,

    /// Append each submission as a JSON line to this file instead of logging it
    #[arg(long)]
    submissions: Option<PathBuf>,

    /// Simulated loading delay in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// Chance that loading fails, between 0 and 1
    #[arg(long, default_value_t = 0.1)]
    failure_probability: f64,

    /// Log file (the terminal is taken by the form)
    #[arg(long, default_value = "dynform.log")]
    log_file: PathBuf,

    /// Title shown at the top of the form
    #[arg(long, default_value = "Form")]
    title: String,
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    Ok(())
}

fn run<K: SubmissionSink>(
    host: &RatatuiForm,
    fields: FieldList,
    store: JsonFileStore,
    sink: K,
) -> anyhow::Result<Option<Submission>> {
    match host.run(fields, store, sink) {
        Ok(submission) => Ok(Some(submission)),
        Err(RatatuiFormError::Cancelled) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let json = fs::read_to_string(&cli.fields)
        .with_context(|| format!("Failed to read {}", cli.fields.display()))?;
    let fields = FieldList::from_json_str(&json)
        .with_context(|| format!("Invalid field list in {}", cli.fields.display()))?;
    let store = JsonFileStore::open(&cli.store)
        .with_context(|| format!("Failed to open store {}", cli.store.display()))?;

    let config = FormConfig::new()
        .with_readiness_delay(Duration::from_millis(cli.delay_ms))
        .with_failure_probability(cli.failure_probability);
    let host = RatatuiForm::new().with_title(cli.title).with_config(config);

    let submission = match &cli.submissions {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            run(&host, fields, store, JsonLinesSink::new(file))?
        }
        None => run(&host, fields, store, LogSink)?,
    };

    match submission {
        Some(submission) => println!("{}", serde_json::to_string_pretty(&submission)?),
        None => eprintln!("Form cancelled"),
    }
    Ok(())
}
