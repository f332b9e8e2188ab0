pub mod actions;
pub mod button;
pub mod colors;
pub mod display;
pub mod interval;
pub mod parser;
pub mod script;
pub mod settings;

pub use actions::{RunInterval, RunScript};
pub use button::{Button, ButtonError, JsonLinesButton};
pub use display::DisplaySettings;
pub use parser::{ArgumentStringParser, arguments_from_setting, parse_arguments};
pub use script::{ScriptError, ScriptRunner};
pub use settings::{RunIntervalSettings, RunScriptSettings, SettingsError};
