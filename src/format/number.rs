//! Numeric format specs
//!
//! The host stores a number field's display format as a short pattern:
//! `"0"`, `"0.00"`, `"1,000.00"`, `"#,##0"`, `"%"` or `"0.00%"`. Digit
//! placeholders after the decimal point set the fraction width, a comma in
//! the integer part turns on thousands grouping, and a trailing `%` scales by
//! 100. An empty spec renders the value as-is.

use crate::models::value::format_f64;

/// Parsed numeric display pattern
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberPattern {
    pub decimals: usize,
    pub grouping: bool,
    pub percent: bool,
}

impl NumberPattern {
    /// Parse a format spec. `None` means "general": no rounding or grouping.
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec.is_empty() || spec.eq_ignore_ascii_case("general") {
            return None;
        }

        let (body, percent) = match spec.strip_suffix('%') {
            Some(body) => (body, true),
            None => (spec, false),
        };

        let (int_pat, frac_pat) = match body.split_once('.') {
            Some((int_pat, frac_pat)) => (int_pat, frac_pat),
            None => (body, ""),
        };

        Some(Self {
            decimals: frac_pat.chars().filter(|c| is_placeholder(*c)).count(),
            grouping: int_pat.contains(','),
            percent,
        })
    }

    pub fn apply(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let scaled = if self.percent { value * 100.0 } else { value };
        let fixed = format!("{:.*}", self.decimals, scaled.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i.to_string(), Some(f.to_string())),
            None => (fixed.clone(), None),
        };

        let mut out = String::new();
        // "-0.00" is shown as "0.00"
        if scaled < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
            out.push('-');
        }
        if self.grouping {
            out.push_str(&group_thousands(&int_part, ','));
        } else {
            out.push_str(&int_part);
        }
        if let Some(frac) = frac_part {
            out.push('.');
            out.push_str(&frac);
        }
        if self.percent {
            out.push('%');
        }
        out
    }
}

/// Render `value` with the host format spec
pub fn format_number(spec: &str, value: f64) -> String {
    match NumberPattern::parse(spec) {
        Some(pattern) => pattern.apply(value),
        None => format_f64(value),
    }
}

fn is_placeholder(c: char) -> bool {
    c.is_ascii_digit() || c == '#' || c == '?'
}

fn group_thousands(int_part: &str, sep: char) -> String {
    let mut out = String::new();
    let len = int_part.chars().count();
    for (i, ch) in int_part.chars().enumerate() {
        let pos_from_end = len - i;
        out.push(ch);
        if pos_from_end > 1 && pos_from_end % 3 == 1 {
            out.push(sep);
        }
    }
    out
}
