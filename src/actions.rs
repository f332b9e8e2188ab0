//! Key actions. Each handler mirrors one Stream Deck event and talks to the
//! key only through [`Button`].

use crate::button::{Button, ButtonError};
use crate::display::DisplaySettings;
use crate::interval::{IntervalRunner, Intervals, SingleFlight};
use crate::script::{ScriptError, ScriptRunner};
use crate::settings::{RunIntervalSettings, RunScriptSettings};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{error, info, warn};

pub const RUN_SCRIPT_UUID: &str = "io.raser.streamdeck.scriptrunner.runscript";
pub const RUN_INTERVAL_UUID: &str = "io.raser.streamdeck.scriptlink.runinterval";

/// Title shown when a key press fails.
pub const ERROR_TITLE: &str = "ERROR";

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Button(#[from] ButtonError),
}

/// Applies a key-press result, falling back to [`ERROR_TITLE`] on any failure.
fn show_result<B: Button + ?Sized>(
    path: &str,
    result: Result<DisplaySettings, ScriptError>,
    button: &mut B,
) -> Result<(), ButtonError> {
    let result = result
        .map_err(ActionError::from)
        .and_then(|display| display.apply(button).map_err(ActionError::from));
    if let Err(e) = result {
        error!("ERROR running script {path}: {e}");
        button.set_title(ERROR_TITLE)?;
    }
    Ok(())
}

/// Runs a script on key press and shows its output.
#[derive(Debug, Clone, Default)]
pub struct RunScript {
    runner: ScriptRunner,
}

impl RunScript {
    pub fn new(runner: ScriptRunner) -> Self {
        Self { runner }
    }

    pub fn on_did_receive_settings<B: Button + ?Sized>(
        &self,
        settings: &RunScriptSettings,
        button: &mut B,
    ) -> Result<(), ButtonError> {
        button.set_title(settings.default_title())
    }

    pub fn on_will_appear<B: Button + ?Sized>(
        &self,
        settings: &RunScriptSettings,
        button: &mut B,
    ) -> Result<(), ButtonError> {
        button.set_title(settings.default_title())
    }

    /// Runs the configured script and applies its output. Failures are logged
    /// and shown as [`ERROR_TITLE`].
    pub fn on_key_down<B: Button + ?Sized>(
        &self,
        settings: &RunScriptSettings,
        button: &mut B,
    ) -> Result<(), ButtonError> {
        let result = self
            .runner
            .run(&settings.script_path, settings.script_arguments.as_deref());
        show_result(&settings.script_path, result, button)
    }
}

/// Runs one script on key press and another on a timer while the key is visible.
///
/// Interval output goes to the button shared with [`RunInterval::new`].
pub struct RunInterval<B> {
    runner: ScriptRunner,
    button: Arc<Mutex<B>>,
    intervals: Intervals,
    flight: SingleFlight,
}

impl<B: Button + Send + 'static> RunInterval<B> {
    pub fn new(runner: ScriptRunner, button: Arc<Mutex<B>>) -> Self {
        Self {
            runner,
            button,
            intervals: Intervals::default(),
            flight: SingleFlight::new(),
        }
    }

    /// Number of running intervals. At most one.
    pub fn running_intervals(&self) -> usize {
        self.intervals.len()
    }

    pub fn clear_intervals(&mut self) {
        self.intervals.clear();
    }

    pub fn on_did_receive_settings(
        &mut self,
        settings: &RunIntervalSettings,
    ) -> Result<(), ButtonError> {
        info!("onDidReceiveSettings");
        self.start_interval(settings);
        self.with_button(|button| button.set_title(settings.script.default_title()))
    }

    pub fn on_will_appear(&mut self, settings: &RunIntervalSettings) {
        info!("onWillAppear");
        self.start_interval(settings);
    }

    pub fn on_will_disappear(&mut self) {
        self.clear_intervals();
    }

    /// Runs the key script without holding the button, then applies the result.
    pub fn on_key_down(&self, settings: &RunIntervalSettings) -> Result<(), ButtonError> {
        let script = &settings.script;
        let result = self
            .runner
            .run(&script.script_path, script.script_arguments.as_deref());
        self.with_button(|button| show_result(&script.script_path, result, button))
    }

    fn start_interval(&mut self, settings: &RunIntervalSettings) {
        self.clear_intervals();
        if !settings.is_interval_valid() {
            return;
        }

        let runner = self.runner.clone();
        let button = Arc::clone(&self.button);
        let path = settings.interval_script_path.clone();
        let arguments = settings.interval_script_arguments.clone();
        let Ok(delay) = Duration::try_from_secs_f64(settings.interval_delay) else {
            warn!("interval delay {} is out of range", settings.interval_delay);
            return;
        };

        info!("starting interval for '{path}' every {delay:?}");
        self.intervals.push(IntervalRunner::start(
            delay,
            self.flight.clone(),
            move || {
                info!("running interval");
                let started = Instant::now();
                let result = runner
                    .run(&path, arguments.as_deref())
                    .map_err(ActionError::from)
                    .and_then(|display| match button.lock() {
                        Ok(mut button) => display.apply(&mut *button).map_err(ActionError::from),
                        Err(_) => Err(ButtonError::Disconnected.into()),
                    });
                info!("interval script {path} ran in {}ms", started.elapsed().as_millis());
                if let Err(e) = result {
                    error!("ERROR running interval script {path}: {e}");
                }
            },
        ));
    }

    fn with_button<T>(
        &self,
        f: impl FnOnce(&mut B) -> Result<T, ButtonError>,
    ) -> Result<T, ButtonError> {
        let mut button = self.button.lock().map_err(|_| ButtonError::Disconnected)?;
        f(&mut *button)
    }
}
