//! Text measurement and wrapping in physical units.
//!
//! There is no font access at layout time, so widths are estimated from the
//! character count. Good enough to keep card descriptions inside their cards.

/// Average glyph advance as a fraction of the font size.
const ADVANCE: f64 = 0.60;

/// Estimated width in inches of `text` at `size_pt`.
pub fn estimate_width_in(text: &str, size_pt: f64) -> f64 {
    text.chars().count() as f64 * size_pt * ADVANCE / 72.0
}

/// Truncate to fit `max_in` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, size_pt: f64, max_in: f64) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        let next = format!("{out}{ch}");
        if estimate_width_in(&next, size_pt) > max_in {
            if !out.is_empty() {
                if estimate_width_in(&format!("{out}…"), size_pt) > max_in {
                    out.pop();
                }
                out.push('…');
            }
            return out;
        }
        out = next;
    }
    out
}

/// Wrap on word boundaries to fit `max_in`; long words are split by character.
pub fn wrap_to_width(text: &str, size_pt: f64, max_in: f64) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        let candidate = if cur.is_empty() {
            word.to_string()
        } else {
            format!("{cur} {word}")
        };
        if estimate_width_in(&candidate, size_pt) <= max_in {
            cur = candidate;
            continue;
        }
        if !cur.is_empty() {
            lines.push(std::mem::take(&mut cur));
        }
        if estimate_width_in(word, size_pt) <= max_in {
            cur = word.to_string();
            continue;
        }
        // Single long word (or CJK run without spaces): hard-break.
        for ch in word.chars() {
            let cand = format!("{cur}{ch}");
            if estimate_width_in(&cand, size_pt) > max_in && !cur.is_empty() {
                lines.push(std::mem::replace(&mut cur, ch.to_string()));
            } else {
                cur = cand;
            }
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}

/// [`wrap_to_width`] joined with newlines, capped at `max_lines`.
pub fn wrap_block(text: &str, size_pt: f64, max_in: f64, max_lines: usize) -> String {
    let mut lines = wrap_to_width(text, size_pt, max_in);
    if lines.len() > max_lines && max_lines > 0 {
        let rest = lines.split_off(max_lines - 1).join(" ");
        lines.push(truncate_to_width(&rest, size_pt, max_in));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_scales_with_length_and_size() {
        let w = estimate_width_in("abcdef", 12.0);
        assert!((w - 6.0 * 12.0 * 0.6 / 72.0).abs() < 1e-12);
        assert!(estimate_width_in("abcdef", 24.0) > w);
    }

    #[test]
    fn wraps_on_words() {
        // 10 chars at 12pt = 1.0in
        let lines = wrap_to_width("aaaa bbbb cccc", 12.0, 1.0);
        assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn hard_breaks_long_runs() {
        let lines = wrap_to_width("abcdefghijklmnop", 12.0, 0.5);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "abcdefghijklmnop");
        for l in &lines {
            assert!(estimate_width_in(l, 12.0) <= 0.5 + 1e-9);
        }
    }

    #[test]
    fn block_is_capped() {
        let block = wrap_block("one two three four five six seven", 12.0, 0.5, 2);
        assert_eq!(block.lines().count(), 2);
        assert!(block.ends_with('…'));
    }
}
