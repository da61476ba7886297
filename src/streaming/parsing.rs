//! Allocation-light field parsing for tab-delimited coverage lines.
//!
//! Integers are parsed straight from bytes with overflow checks; tab
//! positions are located with memchr.

use memchr::memchr_iter;

/// Parse an unsigned decimal integer.
///
/// Returns None if the input is empty, contains non-digit characters,
/// or does not fit in a u64.
#[inline(always)]
pub fn parse_u64_fast(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() {
        return None;
    }
    let mut n: u64 = 0;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(d as u64)?;
    }
    Some(n)
}

/// Parse a signed decimal integer with an optional leading `+` or `-`.
#[inline(always)]
pub fn parse_i64_fast(bytes: &[u8]) -> Option<i64> {
    let (negative, digits) = match bytes.first()? {
        b'-' => (true, &bytes[1..]),
        b'+' => (false, &bytes[1..]),
        _ => (false, bytes),
    };
    let magnitude = parse_u64_fast(digits)?;
    if negative {
        // i64::MIN has no positive counterpart
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}

/// Split a line on tab characters.
///
/// Empty fields are preserved, so `"a\t\tb"` yields three fields.
#[inline]
pub fn tab_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::with_capacity(8);
    let mut field_start = 0;
    for tab in memchr_iter(b'\t', line.as_bytes()) {
        fields.push(&line[field_start..tab]);
        field_start = tab + 1;
    }
    fields.push(&line[field_start..]);
    fields
}
