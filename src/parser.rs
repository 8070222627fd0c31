use std::fmt;

/// Raw-text marker that flags a failed login regardless of status code
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Status code that flags a failed login
pub const UNAUTHORIZED_STATUS: &str = "401";

const HTTP_MARKER: &[u8] = b" HTTP";

/// Fields extracted from one access log line.
///
/// Borrows from the line it was parsed from; entries are folded into the
/// tallies immediately and never outlive the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedEntry<'a> {
    pub ip: &'a str,
    pub method: HttpMethod,
    pub endpoint: &'a str,
    /// Always exactly three ASCII digits
    pub status_code: &'a str,
}

/// Request methods the matcher recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    const ALL: [HttpMethod; 2] = [HttpMethod::Get, HttpMethod::Post];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extract a `ParsedEntry` from a single log line.
///
/// Matching is a non-anchored search, performed in four steps that each take
/// the first candidate at or after the end of the previous step:
///
///   1. a dotted quad `digits.digits.digits.digits` (no range check),
///   2. a quoted request start, `"GET ` or `"POST `,
///   3. the endpoint, running up to the next ` HTTP`,
///   4. the status, a space followed by three digits.
///
/// Example:
///   10.0.0.1 - - [15/Jan/2024:10:30:00 +0000] "GET /login HTTP/1.1" 401 "Invalid credentials"
///
/// Returns `None` for lines that do not have this shape. Taking the first
/// candidate is enough at every step: a later candidate only leaves less of
/// the line for the steps after it.
pub fn parse_log_line(line: &str) -> Option<ParsedEntry<'_>> {
    let bytes = line.as_bytes();

    let (ip_start, ip_end) = find_dotted_quad(bytes)?;
    let (method, endpoint_start) = find_request(bytes, ip_end)?;
    let endpoint_end = find_subslice(bytes, endpoint_start, HTTP_MARKER)?;
    let status_start = find_status(bytes, endpoint_end + HTTP_MARKER.len())?;

    // Every boundary sits next to an ASCII byte, so slicing stays on char boundaries.
    Some(ParsedEntry {
        ip: &line[ip_start..ip_end],
        method,
        endpoint: &line[endpoint_start..endpoint_end],
        status_code: &line[status_start..status_start + 3],
    })
}

/// Whether a matched line counts as a failed login for its address.
pub fn is_failed_login(entry: &ParsedEntry<'_>, raw_line: &str) -> bool {
    entry.status_code == UNAUTHORIZED_STATUS || raw_line.contains(INVALID_CREDENTIALS)
}

// ─── Scanning helpers ────────────────────────────────────────────────────────

fn digit_run_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(bytes.len(), |offset| start + offset)
}

/// Start and end of the first dotted quad in `bytes`.
fn find_dotted_quad(bytes: &[u8]) -> Option<(usize, usize)> {
    let mut pos = 0;
    while pos < bytes.len() {
        if !bytes[pos].is_ascii_digit() {
            pos += 1;
            continue;
        }
        if let Some(end) = dotted_quad_at(bytes, pos) {
            return Some((pos, end));
        }
        // Starting later inside the same digit run reaches the same dead end.
        pos = digit_run_end(bytes, pos);
    }
    None
}

fn dotted_quad_at(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start;
    for group in 0..4 {
        if group > 0 {
            if bytes.get(pos) != Some(&b'.') {
                return None;
            }
            pos += 1;
        }
        if pos >= bytes.len() {
            return None;
        }
        let end = digit_run_end(bytes, pos);
        if end == pos {
            return None;
        }
        pos = end;
    }
    Some(pos)
}

/// Method and endpoint start of the first `"GET ` / `"POST ` at or after `from`.
fn find_request(bytes: &[u8], from: usize) -> Option<(HttpMethod, usize)> {
    let mut pos = from;
    while let Some(quote) = find_subslice(bytes, pos, b"\"") {
        let rest = &bytes[quote + 1..];
        for method in HttpMethod::ALL {
            let token = method.as_str().as_bytes();
            if rest.starts_with(token) && rest.get(token.len()) == Some(&b' ') {
                return Some((method, quote + 1 + token.len() + 1));
            }
        }
        pos = quote + 1;
    }
    None
}

/// Start of the three status digits following the first qualifying space.
fn find_status(bytes: &[u8], from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(4)
        .position(|w| w[0] == b' ' && w[1..].iter().all(u8::is_ascii_digit))
        .map(|offset| from + offset + 1)
}

fn find_subslice(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|offset| from + offset)
}

// ─── Unit Tests ──────────────────────────────────────────────────────────────
