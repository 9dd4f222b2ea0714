use crate::domain::error::{AppError, Result};
use scraper::{Html, Selector};
use std::path::Path;
use tracing::debug;

/// Header cells of the timetable; these never contribute colors.
pub const WEEKDAY_LABELS: [&str; 5] = ["MONDAY", "TUESDAY", "WEDNESDAY", "THURSDAY", "FRIDAY"];

/// Read an HTML file and return every color token found in its `td` cells.
pub fn extract_colors(path: &Path) -> Result<Vec<String>> {
    let html = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            AppError::NotFound(format!("Input file {} does not exist", path.display()))
        }
        _ => AppError::IoError(format!("Failed to read {}: {}", path.display(), e)),
    })?;

    let colors = extract_colors_from_html(&html)?;
    debug!(path = %path.display(), tokens = colors.len(), "Extracted color tokens");

    Ok(colors)
}

/// Tokenize every non-weekday `td` cell: split on commas, trim, lowercase.
///
/// Empty fragments (e.g. from `"red,,blue"`) are kept as empty tokens.
pub fn extract_colors_from_html(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let cell_selector = Selector::parse("td")
        .map_err(|e| AppError::ParseError(format!("Invalid cell selector: {}", e)))?;

    let mut colors = Vec::new();

    for cell in document.select(&cell_selector) {
        let text = cell.text().collect::<String>();
        if is_weekday_label(&text) {
            continue;
        }

        colors.extend(text.split(',').map(normalize_color));
    }

    Ok(colors)
}

fn is_weekday_label(cell_text: &str) -> bool {
    WEEKDAY_LABELS.contains(&cell_text.trim())
}

fn normalize_color(fragment: &str) -> String {
    fragment.trim().to_lowercase()
}
