//! Value-axis ticks and locale-aware tick labels.

use num_format::{Locale, ToFormattedString};

use super::types::Tick;

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'),
    }
}

/// Round a raw step up to 1, 2, 2.5 or 5 times a power of ten.
pub fn nice_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let norm = raw / magnitude;
    let nice = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 2.5 {
        2.5
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Ticks covering `min..=max` at a nice step, aiming for about `target` intervals.
pub fn value_ticks(min: f64, max: f64, target: usize, locale_tag: &str) -> Vec<Tick> {
    let span = max - min;
    if !(span.is_finite() && span > 0.0) {
        return Vec::new();
    }
    let step = nice_step(span / target.max(1) as f64);
    let (locale, dec_sep) = map_locale(locale_tag);
    let first = (min / step).ceil() as i64;
    let last = (max / step + 1e-9).floor() as i64;
    (first..=last)
        .map(|k| {
            let at = k as f64 * step;
            Tick {
                at,
                label: format_tick(at, step, locale, dec_sep),
            }
        })
        .collect()
}

/// Decimal places needed to show every multiple of `step` exactly (2.5 -> 1, 0.25 -> 2).
fn step_decimals(step: f64) -> usize {
    (0..=6)
        .find(|&d| {
            let scaled = step * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() < 1e-9 * scaled.abs().max(1.0)
        })
        .unwrap_or(6)
}

/// Grouped integer part, then as many decimals as the step needs.
fn format_tick(v: f64, step: f64, locale: &Locale, dec_sep: char) -> String {
    let decimals = step_decimals(step);
    if decimals == 0 {
        return (v.round() as i64).to_formatted_string(locale);
    }
    let digits = format!("{:.*}", decimals, v.abs());
    let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
    let whole = whole
        .parse::<u64>()
        .map(|n| n.to_formatted_string(locale))
        .unwrap_or_else(|_| whole.to_string());
    let negative = v < 0.0 && digits.bytes().any(|b| matches!(b, b'1'..=b'9'));
    let sign = if negative { "-" } else { "" };
    format!("{sign}{whole}{dec_sep}{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_nice() {
        assert_eq!(nice_step(0.9), 1.0);
        assert_eq!(nice_step(17.0), 20.0);
        assert_eq!(nice_step(22.0), 25.0);
        assert_eq!(nice_step(430.0), 500.0);
        assert_eq!(nice_step(0.0), 1.0);
    }

    #[test]
    fn ticks_cover_range() {
        let ticks = value_ticks(0.0, 109.25, 5, "en");
        let at: Vec<f64> = ticks.iter().map(|t| t.at).collect();
        assert_eq!(at, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(ticks[4].label, "100");
    }

    #[test]
    fn locale_grouping() {
        let ticks = value_ticks(0.0, 12_000.0, 4, "de");
        assert_eq!(ticks.last().unwrap().label, "10.000");
        let ticks = value_ticks(0.0, 12_000.0, 4, "en");
        assert_eq!(ticks.last().unwrap().label, "10,000");
    }

    #[test]
    fn fractional_steps_keep_their_decimals() {
        let labels = |min, max, tag| -> Vec<String> {
            value_ticks(min, max, 5, tag).into_iter().map(|t| t.label).collect()
        };
        assert_eq!(labels(0.0, 11.5, "en"), ["0.0", "2.5", "5.0", "7.5", "10.0"]);
        assert_eq!(labels(0.0, 1.15, "en"), ["0.00", "0.25", "0.50", "0.75", "1.00"]);
        assert_eq!(labels(0.0, 11.5, "de")[1], "2,5");
        assert_eq!(labels(1000.0, 1011.5, "en")[1], "1,002.5");
        assert_eq!(labels(-11.5, 0.0, "en")[0], "-10.0");
    }
}
