use fitsview_core::header::{Card, Header, HeaderValue};

fn sample_header() -> Header {
    let mut h = Header::new();
    h.set("SIMPLE", true);
    h.set("BITPIX", -32i64);
    h.set("NAXIS", 2i64);
    h.set("NAXIS1", 640usize);
    h.set("NAXIS2", 480usize);
    h.push(Card::new("OBJECT", "NGC 253").with_comment("target"));
    h.add_history("calibrated");
    h
}

#[test]
fn test_lookup_is_case_insensitive() {
    let h = sample_header();
    assert_eq!(h.get_i64("naxis1"), Some(640));
    assert_eq!(h.get_str("object"), Some("NGC 253"));
    assert!(h.contains("Bitpix"));
    assert!(!h.contains("RESTFRQ"));
}

#[test]
fn test_set_replaces_in_place() {
    let mut h = sample_header();
    let len = h.len();
    h.set("NAXIS1", 10usize);
    assert_eq!(h.len(), len);
    assert_eq!(h.cards()[3].keyword, "NAXIS1");
    assert_eq!(h.get_i64("NAXIS1"), Some(10));
}

#[test]
fn test_set_keeps_comment() {
    let mut h = sample_header();
    h.set("OBJECT", "NGC 55");
    let card = h.cards().iter().find(|c| c.keyword == "OBJECT").unwrap();
    assert_eq!(card.comment.as_deref(), Some("target"));
}

#[test]
fn test_remove() {
    let mut h = sample_header();
    assert_eq!(h.remove("OBJECT"), Some(HeaderValue::Text("NGC 253".into())));
    assert!(!h.contains("OBJECT"));
    assert_eq!(h.remove("OBJECT"), None);
}

#[test]
fn test_history_is_not_a_keyword_value() {
    let h = sample_header();
    assert!(h.get("HISTORY").is_none());
    assert_eq!(h.cards().last().unwrap().comment.as_deref(), Some("calibrated"));
}

#[test]
fn test_axes() {
    let h = sample_header();
    assert_eq!(h.axes(), Some(vec![640, 480]));

    let mut partial = h.clone();
    partial.remove("NAXIS2");
    assert_eq!(partial.axes(), None);
}

#[test]
fn test_integer_readable_as_float() {
    let h = sample_header();
    assert_eq!(h.get_f64("NAXIS2"), Some(480.0));
    assert_eq!(h.get_bool("SIMPLE"), Some(true));
    assert_eq!(h.get_bool("BITPIX"), None);
}

#[test]
fn test_card_text_lists_every_card_then_end() {
    let text = sample_header().to_card_text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "SIMPLE  = T");
    assert_eq!(lines[3], "NAXIS1  = 640");
    assert_eq!(lines[5], "OBJECT  = 'NGC 253' / target");
    assert_eq!(lines[6], "HISTORY calibrated");
    assert_eq!(lines[7], "END");
}

#[test]
fn test_text_value_display_escapes_quotes() {
    let mut h = Header::new();
    h.set("OBSERVER", "O'Neil");
    assert_eq!(h.cards()[0].display_line(), "OBSERVER= 'O''Neil'");
}

#[test]
fn test_value_field_types() {
    assert_eq!(HeaderValue::from_value_field("SIMPLE", "T"), Some(HeaderValue::Logical(true)));
    assert_eq!(HeaderValue::from_value_field("NAXIS", "  2"), Some(HeaderValue::Integer(2)));
    assert_eq!(
        HeaderValue::from_value_field("BZERO", "32768."),
        Some(HeaderValue::Real(32768.0))
    );
    assert_eq!(
        HeaderValue::from_value_field("CTYPE1", "'RA---SIN'"),
        Some(HeaderValue::Text("RA---SIN".into()))
    );
}
