/// Format a variance value; tiny values switch to scientific notation
pub fn format_variance(value: f64) -> String {
    if value != 0.0 && value.abs() < 1e-4 {
        format!("{:.3e}", value)
    } else {
        format!("{:.6}", value)
    }
}

/// Format a ratio as a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Format a compact axis label
pub fn format_axis_value(value: f64) -> String {
    if value != 0.0 && value.abs() < 1e-3 {
        format!("{:.1e}", value)
    } else {
        format!("{:.4}", value)
    }
}
