use crate::display::DisplaySettings;
use crate::parser::arguments_from_setting;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to run script {path}: {source}")]
    Spawn {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("script {path} exited with status {status:?}: {stderr}")]
    Failed {
        path: PathBuf,
        status: Option<i32>,
        stderr: String,
    },
    #[error("script {path} returned invalid JSON '{output}': {source}")]
    InvalidOutput {
        path: PathBuf,
        output: String,
        source: serde_json::Error,
    },
}

/// Runs a script directly (no shell) and reads the display settings it prints.
#[derive(Debug, Clone, Default)]
pub struct ScriptRunner {
    working_dir: Option<PathBuf>,
}

impl ScriptRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs scripts from `dir` instead of the current directory.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Runs `path` with `arguments` split by the argument parser.
    ///
    /// Arguments are handed to the process verbatim. A missing or empty
    /// argument string runs the script with no arguments.
    pub fn run(
        &self,
        path: impl AsRef<Path>,
        arguments: Option<&str>,
    ) -> Result<DisplaySettings, ScriptError> {
        let path = path.as_ref();
        info!("running script: '{}'", path.display());
        let args = arguments_from_setting(arguments);
        debug!("script arguments: {args:?}");

        let mut command = Command::new(path);
        command.args(&args);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        let output = command.output().map_err(|source| ScriptError::Spawn {
            path: path.to_path_buf(),
            source,
        })?;
        handle_output(path, output)
    }
}

fn handle_output(path: &Path, output: Output) -> Result<DisplaySettings, ScriptError> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        error!("ERROR running script {}: {stderr}", path.display());
        return Err(ScriptError::Failed {
            path: path.to_path_buf(),
            status: output.status.code(),
            stderr,
        });
    }

    let json = String::from_utf8_lossy(&output.stdout).trim().to_string();
    info!("script returned: '{json}'");
    DisplaySettings::from_json(&json).map_err(|source| ScriptError::InvalidOutput {
        path: path.to_path_buf(),
        output: json,
        source,
    })
}
