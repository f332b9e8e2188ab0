/// Directory, relative to the plugin root, holding one PNG per supported color.
pub const COLORS_DIR: &str = "imgs/colors";

/// HTML color names with a pre-rendered background image.
const AVAILABLE_COLORS: &[&str] = &[
    // Basic colors
    "black",
    "white",
    "red",
    "green",
    "blue",
    "yellow",
    "cyan",
    "magenta",
    "silver",
    "gray",
    "maroon",
    "olive",
    "lime",
    "aqua",
    "teal",
    "navy",
    "fuchsia",
    "purple",
    // Extended colors
    "orange",
    "pink",
    "brown",
    "gold",
    "violet",
    "indigo",
    "turquoise",
    "coral",
    "salmon",
    "khaki",
    "tan",
    "crimson",
    "darkblue",
    "darkgreen",
    "darkorange",
    "darkred",
    "lightblue",
    "lightgreen",
    "lightgray",
    "rebeccapurple",
    "royalblue",
    "forestgreen",
    "steelblue",
    "tomato",
];

/// Returns the background image path for an HTML color name.
///
/// Matching is case-insensitive. Unknown names return `None`.
pub fn color_png_path(name: &str) -> Option<String> {
    let normalized = name.to_lowercase();
    if !AVAILABLE_COLORS.contains(&normalized.as_str()) {
        return None;
    }
    Some(format!("{COLORS_DIR}/{normalized}.png"))
}

pub fn available_colors() -> Vec<&'static str> {
    AVAILABLE_COLORS.to_vec()
}

pub fn is_color_available(name: &str) -> bool {
    !name.is_empty() && AVAILABLE_COLORS.contains(&name.to_lowercase().as_str())
}
