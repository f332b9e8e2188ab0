use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use scriptlink::actions::{RUN_INTERVAL_UUID, RUN_SCRIPT_UUID};
use scriptlink::{
    JsonLinesButton, RunInterval, RunIntervalSettings, ScriptRunner, parse_arguments,
};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Run scripts and show their output the way a Stream Deck key would.
///
/// Button updates are printed to stdout as JSON lines. Logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "scriptlink", version)]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the argument vector for an argument string as a JSON array.
    Split { input: String },

    /// Run a script once and print the button updates it produces.
    Run {
        script: Option<PathBuf>,
        /// Argument string, split the same way as the settings field.
        #[arg(long = "args")]
        arguments: Option<String>,
        /// Button settings file (JSON, property inspector format).
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Directory to run the script from.
        #[arg(long)]
        cwd: Option<PathBuf>,
    },

    /// Re-run a script on an interval. Each line on stdin acts as a key press;
    /// EOF stops the interval.
    Watch {
        script: Option<PathBuf>,
        #[arg(long = "args")]
        arguments: Option<String>,
        /// Seconds between runs.
        #[arg(long)]
        every: Option<f64>,
        #[arg(long)]
        settings: Option<PathBuf>,
        #[arg(long)]
        cwd: Option<PathBuf>,
    },
}

fn init_tracing(default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<RunIntervalSettings> {
    match path {
        Some(path) => Ok(RunIntervalSettings::load(path)?),
        None => Ok(RunIntervalSettings::default()),
    }
}

fn runner(cwd: Option<PathBuf>) -> ScriptRunner {
    match cwd {
        Some(dir) => ScriptRunner::new().with_working_dir(dir),
        None => ScriptRunner::new(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Command::Split { input } => {
            println!("{}", serde_json::to_string(&parse_arguments(&input))?);
        }
        Command::Run {
            script,
            arguments,
            settings,
            cwd,
        } => {
            let mut settings = load_settings(settings.as_ref())?.script;
            if let Some(script) = script {
                settings.script_path = script.display().to_string();
            }
            if arguments.is_some() {
                settings.script_arguments = arguments;
            }
            if settings.script_path.is_empty() {
                bail!("no script given; pass a path or a settings file with scriptPath");
            }

            let display = runner(cwd)
                .run(&settings.script_path, settings.script_arguments.as_deref())
                .with_context(|| format!("running {}", settings.script_path))?;
            let mut button = JsonLinesButton::new(RUN_SCRIPT_UUID, io::stdout().lock());
            display.apply(&mut button)?;
        }
        Command::Watch {
            script,
            arguments,
            every,
            settings,
            cwd,
        } => {
            let mut settings = load_settings(settings.as_ref())?;
            if let Some(script) = script {
                settings.interval_script_path = script.display().to_string();
            }
            if arguments.is_some() {
                settings.interval_script_arguments = arguments;
            }
            if let Some(every) = every {
                settings.interval_delay = every;
            }
            if !settings.is_interval_valid() {
                bail!("watch needs a script and a positive --every");
            }

            let button = JsonLinesButton::new(RUN_INTERVAL_UUID, io::stdout());
            let button = Arc::new(Mutex::new(button));
            let mut action = RunInterval::new(runner(cwd), button);
            action.on_did_receive_settings(&settings)?;

            for line in io::stdin().lock().lines() {
                line?;
                if settings.script.script_path.is_empty() {
                    info!("no key script configured, ignoring key press");
                    continue;
                }
                action.on_key_down(&settings)?;
            }
            action.on_will_disappear();
        }
    }
    Ok(())
}
