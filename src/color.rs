use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use courtview::data::model::Source;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| hsl_to_color32(i as f32 / n as f32 * 360.0, 0.75, 0.55))
        .collect()
}

/// Fixed colour per competition, shared by every chart.
pub fn source_color(source: Source) -> Color32 {
    match source {
        Source::RegularSeason => hsl_to_color32(215.0, 0.70, 0.55),
        Source::Playoffs => hsl_to_color32(25.0, 0.85, 0.55),
    }
}

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
