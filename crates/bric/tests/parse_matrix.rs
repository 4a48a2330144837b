//! Option and error matrices for the pull parser.

use bric::{parse, parse_with, Bric, ParseErrorKind, ParseOptions};

fn kind(text: &str, options: ParseOptions) -> ParseErrorKind {
    parse_with(text, options).unwrap_err().kind
}

#[test]
fn comments_accepted_only_in_compat() {
    let text = "// leading\n{\"a\": /* inline */ 1}\n// trailing";
    let v = parse_with(text, ParseOptions::compat()).unwrap();
    assert_eq!(v.get("a"), Some(&Bric::Num(1.0)));
    assert_eq!(kind(text, ParseOptions::strict()), ParseErrorKind::UnexpectedChar);
}

#[test]
fn unterminated_block_comment_fails() {
    assert_eq!(
        kind("{} /* open", ParseOptions::compat()),
        ParseErrorKind::UnexpectedChar
    );
}

#[test]
fn trailing_commas_accepted_only_in_compat() {
    for text in ["[1, 2,]", "{\"a\": 1,}"] {
        assert!(parse_with(text, ParseOptions::compat()).is_ok());
        assert_eq!(kind(text, ParseOptions::strict()), ParseErrorKind::UnexpectedChar);
    }
    // only a single trailing comma
    assert!(parse_with("[1,,]", ParseOptions::compat()).is_err());
}

#[test]
fn unquoted_keys_accepted_only_in_compat() {
    let text = "{alpha_1: 1, $beta: 2}";
    let v = parse_with(text, ParseOptions::compat()).unwrap();
    assert_eq!(v.get("alpha_1"), Some(&Bric::Num(1.0)));
    assert_eq!(v.get("$beta"), Some(&Bric::Num(2.0)));
    assert_eq!(kind(text, ParseOptions::strict()), ParseErrorKind::UnexpectedChar);
}

#[test]
fn nan_infinity_accepted_only_in_compat() {
    let v = parse_with("[NaN, Infinity, -Infinity]", ParseOptions::compat()).unwrap();
    let items = v.as_arr().unwrap();
    assert!(items[0].as_num().unwrap().is_nan());
    assert_eq!(items[1].as_num(), Some(f64::INFINITY));
    assert_eq!(items[2].as_num(), Some(f64::NEG_INFINITY));
    assert_eq!(kind("NaN", ParseOptions::strict()), ParseErrorKind::UnexpectedChar);
}

#[test]
fn duplicate_keys_fail_in_strict_win_last_in_compat() {
    let text = r#"{"a": 1, "a": 2}"#;
    assert_eq!(kind(text, ParseOptions::strict()), ParseErrorKind::DuplicateKey);
    let v = parse_with(text, ParseOptions::compat()).unwrap();
    assert_eq!(v.get("a"), Some(&Bric::Num(2.0)));
    assert_eq!(v.as_obj().unwrap().len(), 1);
}

#[test]
fn strict_flag_masks_enabled_extensions() {
    let opts = ParseOptions {
        allow_comments: true,
        allow_trailing_commas: true,
        allow_unquoted_keys: true,
        allow_nan_infinity: true,
        strict: true,
        ..ParseOptions::strict()
    };
    assert_eq!(kind("[1,]", opts), ParseErrorKind::UnexpectedChar);
    assert_eq!(kind("// c\n1", opts), ParseErrorKind::UnexpectedChar);
}

#[test]
fn depth_limit_is_enforced() {
    let mut deep = String::new();
    for _ in 0..40 {
        deep.push('[');
    }
    deep.push('1');
    for _ in 0..40 {
        deep.push(']');
    }
    let opts = ParseOptions {
        max_depth: 39,
        ..ParseOptions::strict()
    };
    assert_eq!(kind(&deep, opts), ParseErrorKind::DepthExceeded);
    let opts = ParseOptions {
        max_depth: 40,
        ..ParseOptions::strict()
    };
    assert!(parse_with(&deep, opts).is_ok());
}

#[test]
fn error_kind_matrix() {
    assert_eq!(kind("tru", ParseOptions::strict()), ParseErrorKind::InvalidLiteral);
    assert_eq!(kind("nul", ParseOptions::strict()), ParseErrorKind::InvalidLiteral);
    assert_eq!(kind("falsy", ParseOptions::strict()), ParseErrorKind::InvalidLiteral);
    assert_eq!(kind("\"abc", ParseOptions::strict()), ParseErrorKind::UnterminatedString);
    assert_eq!(kind("\"a\\q\"", ParseOptions::strict()), ParseErrorKind::InvalidEscape);
    assert_eq!(kind("\"a\\u12g4\"", ParseOptions::strict()), ParseErrorKind::InvalidEscape);
    assert_eq!(kind("-", ParseOptions::strict()), ParseErrorKind::InvalidNumber);
    assert_eq!(kind("1.", ParseOptions::strict()), ParseErrorKind::InvalidNumber);
    assert_eq!(kind("1e+", ParseOptions::strict()), ParseErrorKind::InvalidNumber);
    assert_eq!(kind("01", ParseOptions::strict()), ParseErrorKind::InvalidNumber);
    assert_eq!(kind("1 2", ParseOptions::strict()), ParseErrorKind::TrailingGarbage);
    assert_eq!(kind("{} x", ParseOptions::strict()), ParseErrorKind::TrailingGarbage);
    assert_eq!(kind("@", ParseOptions::strict()), ParseErrorKind::UnexpectedChar);
}

#[test]
fn error_positions_are_byte_line_column() {
    // the offending `@` sits at byte 7, line 2, column 6
    let err = parse("{\n  \"a\"@: 1}").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedChar);
    assert_eq!(err.offset, 7);
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 6);
}

#[test]
fn duplicate_key_error_points_at_the_key() {
    let err = parse_with(r#"{"a": 1, "a": 2}"#, ParseOptions::strict()).unwrap_err();
    assert_eq!(err.offset, 9);
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 10);
}

#[test]
fn unterminated_string_points_at_the_quote() {
    let err = parse("[\"abc").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
    assert_eq!(err.offset, 1);
}

#[test]
fn control_char_in_string_is_rejected() {
    let err = parse("\"a\nb\"").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedChar);
    assert_eq!(err.offset, 2);
}
