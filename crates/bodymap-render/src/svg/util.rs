// Shared SVG text helpers.

use std::fmt::Write as _;

pub(crate) fn escape_xml_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        let esc = match b {
            b'&' => Some("&amp;"),
            b'<' => Some("&lt;"),
            b'>' => Some("&gt;"),
            b'"' => Some("&quot;"),
            b'\'' => Some("&#39;"),
            _ => None,
        };
        let Some(esc) = esc else {
            continue;
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

pub(crate) fn fmt(v: f64) -> String {
    let mut out = String::new();
    fmt_into(&mut out, v);
    out
}

pub(crate) fn fmt_into(out: &mut String, v: f64) {
    // Round-trippable decimal form without `-0` or float noise (`0.6`, not `0.6000000000000001`).
    if !v.is_finite() {
        out.push('0');
        return;
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    if v == -0.0 {
        v = 0.0;
    }

    let _ = write!(out, "{v}");
}

/// `translate(x,y) scale(s)`.
pub(crate) fn placement_transform(placement: &bodymap_core::Placement) -> String {
    format!(
        "translate({},{}) scale({})",
        fmt(placement.translate_x),
        fmt(placement.translate_y),
        fmt(placement.scale)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_trims_noise_and_negative_zero() {
        assert_eq!(fmt(170.0), "170");
        assert_eq!(fmt(0.8), "0.8");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(f64::NAN), "0");
        assert_eq!(fmt(2.0000000001), "2");
    }

    #[test]
    fn escape_xml_covers_markup_characters() {
        assert_eq!(
            escape_xml(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn placement_transform_matches_table_literals() {
        let brain = bodymap_core::tables::placement(bodymap_core::BodyPart::Brain).unwrap();
        assert_eq!(placement_transform(&brain), "translate(170,60) scale(0.8)");
        let heart = bodymap_core::tables::placement(bodymap_core::BodyPart::Heart).unwrap();
        assert_eq!(placement_transform(&heart), "translate(200,220) scale(0.6)");
    }
}
