// Output formatting: terminal display of reports and JSON envelopes.

pub mod envelope;
pub mod terminal;

/// Render a bar of `width` cells filled in proportion to `value / max`.
pub fn proportion_bar(value: u64, max: u64, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        ((value as f64 / max as f64) * width as f64).round() as usize
    };
    let filled = filled.min(width);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(width - filled))
}
