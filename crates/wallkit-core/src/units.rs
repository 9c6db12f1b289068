//! Unit conversion utilities
//!
//! The plan is drawn in pixels. Physical sizes shown on labels and entered in
//! the editor are meters, converted through [`SCALE_M_PER_PX`].

use crate::constants::SCALE_M_PER_PX;

/// Convert plan pixels to meters.
pub fn px_to_m(px: f64) -> f64 {
    px * SCALE_M_PER_PX
}

/// Convert meters to plan pixels.
pub fn m_to_px(m: f64) -> f64 {
    m / SCALE_M_PER_PX
}

/// Format a pixel length as meters with two decimals, e.g. `"2.40m"`.
///
/// Returns an empty string for non-finite input.
pub fn format_meters(px: f64) -> String {
    let m = px_to_m(px);
    if !m.is_finite() {
        return String::new();
    }
    format!("{:.2}m", m)
}

/// Format a width × height pair as meters, e.g. `"6.67m × 3.33m"`.
///
/// Returns an empty string if either side is not finite.
pub fn format_size_label(w_px: f64, h_px: f64) -> String {
    if !w_px.is_finite() || !h_px.is_finite() {
        return String::new();
    }
    let w_m = px_to_m(w_px);
    let h_m = px_to_m(h_px);
    if !w_m.is_finite() || !h_m.is_finite() {
        return String::new();
    }
    format!("{:.2}m × {:.2}m", w_m, h_m)
}
