use base64::{engine::general_purpose::STANDARD, Engine as _};

pub const DEFAULT_PLACEHOLDER_TEXT: &str = "Imagen no disponible";

/// Look of the fallback image shown when a carousel image fails to load
pub struct PlaceholderStyle {
    pub width: u32,
    pub height: u32,
    pub background: &'static str,
    pub foreground: &'static str,
    pub font_size: u32,
}

impl Default for PlaceholderStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: "#1a1a1a",
            foreground: "#666",
            font_size: 24,
        }
    }
}

/// Self-contained SVG data URI with `label` centered on a dark canvas.
/// An empty label falls back to [`DEFAULT_PLACEHOLDER_TEXT`].
pub fn placeholder_data_uri(label: &str) -> String {
    placeholder_data_uri_with(label, &PlaceholderStyle::default())
}

pub fn placeholder_data_uri_with(label: &str, style: &PlaceholderStyle) -> String {
    let label = if label.trim().is_empty() {
        DEFAULT_PLACEHOLDER_TEXT
    } else {
        label
    };

    let svg = format!(
        r##"<svg width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg"><rect width="100%" height="100%" fill="{bg}"/><text x="50%" y="50%" font-family="Arial, sans-serif" font-size="{fs}" fill="{fg}" text-anchor="middle" dominant-baseline="middle">{label}</text></svg>"##,
        w = style.width,
        h = style.height,
        bg = style.background,
        fg = style.foreground,
        fs = style.font_size,
        label = xml_escape(label),
    );

    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg.as_bytes()))
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
