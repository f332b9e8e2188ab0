use crate::button::{Button, ButtonError};
use crate::colors::{color_png_path, is_color_available};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::info;

/// What a script asks the button to show, parsed from its stdout.
///
/// ```json
/// { "title": "3 changes", "color": "orange" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DisplaySettings {
    #[serde(default, deserialize_with = "title_text")]
    pub title: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl DisplaySettings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Pushes these settings to `button`.
    ///
    /// An image takes precedence over a color. Colors without a matching
    /// background image are ignored.
    pub fn apply<B: Button + ?Sized>(&self, button: &mut B) -> Result<(), ButtonError> {
        if let Some(title) = &self.title {
            info!("setting title: '{title}'");
            button.set_title(title)?;
        }

        if let Some(image) = self.image.as_deref().filter(|image| !image.is_empty()) {
            info!("setting background image: '{image}'");
            button.set_image(image)?;
        } else if let Some(color) = self.color.as_deref().filter(|c| is_color_available(c))
            && let Some(path) = color_png_path(color)
        {
            info!("setting background color: '{color}' -> '{path}'");
            button.set_image(&path)?;
        }
        Ok(())
    }
}

// Scripts often print numbers as titles, e.g. {"title": 42}.
fn title_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        // `{}` on f64 drops a zero fraction: 1.0 -> "1", 2.5 -> "2.5".
        Value::Number(n) if n.is_f64() => n.as_f64().map(|f| f.to_string()),
        other => Some(other.to_string()),
    })
}
