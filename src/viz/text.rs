//! Text measurement and truncation heuristics for cell labels and tooltips.

/// Heuristic: estimate pixel width of text (Plotters has no built-in text
/// measuring on every backend). 0.60em average advance works well for the
/// bundled sans-serif face.
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Whether `text` fits inside `max_px` at the given size.
pub fn fits_within(text: &str, font_px: u32, max_px: u32) -> bool {
    estimate_text_width_px(text, font_px) <= max_px
}

/// Truncate to fit `max_px`, appending a single ellipsis when anything was
/// cut. Returns an empty string when not even one character fits.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if fits_within(text, font_px, max_px) {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        let mut candidate = out.clone();
        candidate.push(ch);
        candidate.push('…');
        if !fits_within(&candidate, font_px, max_px) {
            break;
        }
        out.push(ch);
    }
    if out.is_empty() {
        return out;
    }
    out.push('…');
    out
}
