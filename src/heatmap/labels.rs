use compact_str::CompactString;

/// Average glyph advance width relative to font size for the UI font.
/// An estimate is enough: labels are culled, not clipped, so erring wide
/// only hides a borderline label.
const GLYPH_WIDTH_FACTOR: f32 = 0.58;

/// Horizontal slack around a label (px, both sides combined).
const LABEL_PAD_X: f32 = 6.0;

/// A line of text needs roughly this multiple of the font size in height.
const LINE_HEIGHT_FACTOR: f32 = 1.25;

/// Minimum characters (before the ellipsis) worth showing truncated.
const MIN_TRUNCATED_CHARS: usize = 3;

/// Estimated pixel width of `char_count` glyphs at `font_size`.
pub fn estimate_text_width(char_count: usize, font_size: f32) -> f32 {
    char_count as f32 * font_size * GLYPH_WIDTH_FACTOR + LABEL_PAD_X
}

/// Whether a label of `char_count` glyphs fits a `w`×`h` box.
pub fn fits(w: f32, h: f32, char_count: usize, font_size: f32) -> bool {
    h >= font_size * LINE_HEIGHT_FACTOR && w >= estimate_text_width(char_count, font_size)
}

/// Resolve the label to draw in a `w`×`h` box: the full string if it fits,
/// a truncated prefix with an ellipsis if at least a short prefix fits,
/// otherwise nothing.
pub fn fit_label(name: &str, w: f32, h: f32, font_size: f32) -> Option<CompactString> {
    let char_count = name.chars().count();
    if char_count == 0 {
        return None;
    }
    if fits(w, h, char_count, font_size) {
        return Some(CompactString::new(name));
    }
    if h < font_size * LINE_HEIGHT_FACTOR {
        return None;
    }

    // How many glyphs fit, reserving one slot for the ellipsis.
    let budget = ((w - LABEL_PAD_X) / (font_size * GLYPH_WIDTH_FACTOR)).floor();
    if budget < (MIN_TRUNCATED_CHARS + 1) as f32 {
        return None;
    }
    let keep = (budget as usize - 1).min(char_count.saturating_sub(1));
    if keep < MIN_TRUNCATED_CHARS {
        return None;
    }

    let mut truncated: CompactString = name.chars().take(keep).collect();
    truncated.push('…');
    Some(truncated)
}
