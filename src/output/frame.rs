use colored::{Color, Colorize};

const DEFAULT_COLOR: Color = Color::Green;

const MODEL_COLORS: &[(&str, Color)] = &[
    ("sonar", Color::Green),
    ("sonar-pro", Color::Blue),
    ("sonar-reasoning-pro", Color::Magenta),
    ("sonar-deep-research", Color::Cyan),
];

pub fn model_color(model: &str) -> Color {
    MODEL_COLORS
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COLOR)
}

/// Draw `body` inside a left-rail frame:
///
/// ```text
/// ┌─ title
/// │
/// │ body line
/// │
/// └─
/// ```
pub fn render_frame(title: &str, body: &str, color: Color) -> String {
    let rail = "│".color(color);
    let mut out = format!("{} {}\n{}\n", "┌─".color(color), title.color(color).bold(), rail);

    for line in body.lines() {
        if line.is_empty() {
            out.push_str(&format!("{rail}\n"));
        } else {
            out.push_str(&format!("{rail} {line}\n"));
        }
    }

    out.push_str(&format!("{}\n{}\n", rail, "└─".color(color)));
    out
}
