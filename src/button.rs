use serde::Serialize;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ButtonError {
    #[error("failed to write button update: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode button update: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("button is no longer available")]
    Disconnected,
}

/// The visible surface of a single Stream Deck key.
pub trait Button {
    fn set_title(&mut self, title: &str) -> Result<(), ButtonError>;

    /// Sets the key's background. `image` is a plugin-relative path or a data URI.
    fn set_image(&mut self, image: &str) -> Result<(), ButtonError>;
}

/// One change pushed to a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ButtonUpdate {
    SetTitle { title: String },
    SetImage { image: String },
}

#[derive(Serialize)]
struct ActionEvent<'a> {
    action: &'a str,
    #[serde(flatten)]
    update: &'a ButtonUpdate,
}

/// Writes every update as one JSON object per line, tagged with the action UUID.
pub struct JsonLinesButton<W: Write> {
    action: String,
    writer: W,
}

impl<W: Write> JsonLinesButton<W> {
    pub fn new(action: impl Into<String>, writer: W) -> Self {
        Self {
            action: action.into(),
            writer,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, update: &ButtonUpdate) -> Result<(), ButtonError> {
        let event = ActionEvent {
            action: &self.action,
            update,
        };
        serde_json::to_writer(&mut self.writer, &event)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Button for JsonLinesButton<W> {
    fn set_title(&mut self, title: &str) -> Result<(), ButtonError> {
        self.emit(&ButtonUpdate::SetTitle {
            title: title.to_string(),
        })
    }

    fn set_image(&mut self, image: &str) -> Result<(), ButtonError> {
        self.emit(&ButtonUpdate::SetImage {
            image: image.to_string(),
        })
    }
}

/// Keeps updates in memory. Used by tests across the crate.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingButton {
    pub updates: Vec<ButtonUpdate>,
}

#[cfg(test)]
impl Button for RecordingButton {
    fn set_title(&mut self, title: &str) -> Result<(), ButtonError> {
        self.updates.push(ButtonUpdate::SetTitle {
            title: title.to_string(),
        });
        Ok(())
    }

    fn set_image(&mut self, image: &str) -> Result<(), ButtonError> {
        self.updates.push(ButtonUpdate::SetImage {
            image: image.to_string(),
        });
        Ok(())
    }
}
