/// Cross-checks the line scanner against the equivalent regular expression
use access_log_report::parser::parse_log_line;
use proptest::prelude::*;
use regex::Regex;

fn reference() -> Regex {
    Regex::new(r#"([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+).*?"(GET|POST) (.*?) HTTP.*? ([0-9]{3})"#)
        .unwrap()
}

const LINES: &[&str] = &[
    r#"10.0.0.1 - - "GET /login HTTP/1.1" 401 "Invalid credentials""#,
    r#"192.168.1.1 - - [03/Dec/2024:10:12:34 +0000] "POST /register HTTP/1.1" 200 512"#,
    r#"<134>Jan 15 host: 172.16.0.9 "GET /a HTTP/2" 304 tail"#,
    r#"10.1.1.1 via 203.0.113.7 "GET /x HTTP/1.0" 200"#,
    r#"build 2024.01 from 7.8.9.10 "GET /ok HTTP/1.1" 200"#,
    r#"1.2.3.4.5.6 "GET / HTTP/1.1" 200"#,
    r#"12a.1.2.3.4 "GET /q HTTP/1.1" 500"#,
    r#"1.1.1.1 "GET /search?q=a b HTTP/1.1" 200"#,
    r#"1.1.1.1 "GET  HTTP/1.1" 200"#,
    r#"1.1.1.1 "GET /a HTTP/1.1" 2001"#,
    r#"1.1.1.1 "GET /v 500 HTTP/1.1" 404 123"#,
    r#"1.1.1.1 "-" "POST /api HTTP/1.1" 201"#,
    r#"1.1.1.1 "GETX /a HTTP/1.1" 200 "GET /b HTTP/1.1" 301"#,
    r#"1.1.1.1 "GET /a HTTPS HTTP/1.1" 200"#,
    r#"1.1.1.1 "GET /a HTTP/1.1"200 x 999"#,
    r#"1.1.1.1 "GET /a HTTP/1.1" 20"#,
    r#"1.1.1.1 "PUT /a HTTP/1.1" 200"#,
    r#""GET /a HTTP/1.1" 200 1.2.3.4"#,
    r#"1.1.1 "GET /a HTTP/1.1" 200"#,
    r#"1.1.1.1 "GET /a" 200"#,
    "malformed garbage text",
    "",
    r#"→ 1.2.3.4 ü "GET /café HTTP/1.1" 200 ✓"#,
];

/// Fragments that exercise every boundary of the line shape
const PIECES: &[&str] = &[
    "1", "23", "456", ".", "1.2.3.4", " ", "\"", "\"GET ", "\"POST ", "GET", "POST", "/a",
    " HTTP", " HTTP/1.1\"", " 200", " 40", " 4012", "x", "\"PUT ", "→",
];

type Fields = (String, String, String, String);

fn expected_fields(re: &Regex, line: &str) -> Option<Fields> {
    re.captures(line).map(|c| {
        (
            c[1].to_string(),
            c[2].to_string(),
            c[3].to_string(),
            c[4].to_string(),
        )
    })
}

fn scanned_fields(line: &str) -> Option<Fields> {
    parse_log_line(line).map(|e| {
        (
            e.ip.to_string(),
            e.method.to_string(),
            e.endpoint.to_string(),
            e.status_code.to_string(),
        )
    })
}

#[test]
fn scanner_agrees_with_regex() {
    let re = reference();
    for line in LINES {
        assert_eq!(scanned_fields(line), expected_fields(&re, line), "line: {:?}", line);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(5000))]

    #[test]
    fn prop_scanner_agrees_with_regex_on_assembled_lines(
        pieces in prop::collection::vec(prop::sample::select(PIECES.to_vec()), 0..14),
    ) {
        let line = pieces.concat();
        let re = reference();
        prop_assert_eq!(scanned_fields(&line), expected_fields(&re, &line), "line: {:?}", line);
    }
}
