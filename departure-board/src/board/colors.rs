//! BART line colors.

/// Used when the feed gives neither a hex code nor a known color name.
pub const DEFAULT_COLOR: &str = "#0099CC";

/// Color name as sent in the feed's `color` field, and its display hex.
const LINE_COLORS: &[(&str, &str)] = &[
    ("RED", "#FF0000"),
    ("YELLOW", "#FFFF00"),
    ("BLUE", "#0099CC"),
    ("GREEN", "#00FF00"),
    ("ORANGE", "#FF9933"),
    ("WHITE", "#FFFFFF"),
    ("BLUE-ORANGE", "#0099CC"),
    ("YELLOW-RED", "#FF9933"),
];

/// Look up a line color by name, ignoring case.
pub fn color_for_name(name: &str) -> Option<&'static str> {
    let name = name.trim();
    LINE_COLORS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, hex)| *hex)
}

/// Pick the display color for an estimate.
///
/// An explicit hex code wins (with a `#` added if missing), then the name
/// table, then `DEFAULT_COLOR`.
pub fn resolve_color(hexcolor: Option<&str>, name: &str) -> String {
    match hexcolor.map(str::trim).filter(|h| !h.is_empty()) {
        Some(hex) if hex.starts_with('#') => hex.to_string(),
        Some(hex) => format!("#{hex}"),
        None => color_for_name(name).unwrap_or(DEFAULT_COLOR).to_string(),
    }
}
