pub mod table;
pub mod csv;
pub mod json;

/// Fixed-point formatting that matches C's `%.Nf`, including the lowercase
/// `nan` spelling.
pub(crate) fn fixed(v: f64, decimals: usize) -> String {
    if v.is_nan() {
        if v.is_sign_negative() { "-nan".into() } else { "nan".into() }
    } else {
        format!("{:.*}", decimals, v)
    }
}

/// Escape a string for use inside a JSON string literal.
pub(crate) fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Quote a CSV field when it holds a separator, quote or line break (RFC 4180).
pub(crate) fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{csv_field, escape_json, fixed};

    #[test]
    fn matches_printf() {
        assert_eq!(fixed(1.0, 6), "1.000000");
        assert_eq!(fixed(-0.0000004, 6), "-0.000000");
        assert_eq!(fixed(std::f64::consts::PI, 6), "3.141593");
        assert_eq!(fixed(f64::NAN, 6), "nan");
        assert_eq!(fixed(f64::INFINITY, 6), "inf");
        assert_eq!(fixed(f64::NEG_INFINITY, 6), "-inf");
    }

    #[test]
    fn json_strings_escaped() {
        assert_eq!(escape_json("plain"), "plain");
        assert_eq!(escape_json(r#"my "model""#), r#"my \"model\""#);
        assert_eq!(escape_json(r"a\b"), r"a\\b");
        assert_eq!(escape_json("x\ny\u{1}"), r"x\ny\u0001");
    }

    #[test]
    fn csv_fields_quoted_when_needed() {
        assert_eq!(csv_field("S"), "S");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field(r#"say "hi""#), r#""say ""hi""""#);
    }
}
