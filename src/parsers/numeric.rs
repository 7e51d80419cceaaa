//! Numeric field parsers.
//!
//! Each parser reads the longest valid prefix of its input and returns the
//! value together with the unconsumed remainder. Callers decide whether a
//! non-empty remainder is acceptable.

/// Parse a signed 32-bit integer (`[+-]digits`).
///
/// Values outside the `i32` range fail.
pub fn parse_int(bytes: &[u8]) -> Option<(i32, &[u8])> {
    let (negative, mut i) = match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };

    let digits_start = i;
    let mut value: i64 = 0;
    while let Some(&b) = bytes.get(i) {
        if !b.is_ascii_digit() {
            break;
        }
        value = value * 10 + i64::from(b - b'0');
        if value > i64::from(i32::MAX) + 1 {
            return None;
        }
        i += 1;
    }

    if i == digits_start {
        return None;
    }

    let value = if negative { -value } else { value };
    i32::try_from(value).ok().map(|v| (v, &bytes[i..]))
}

/// Parse a floating point number using `decimal_mark` as the decimal separator.
///
/// Accepts an optional sign, digits with an optional fractional part, an
/// optional exponent, and the special values `inf`, `infinity` and `nan`
/// (case-insensitive).
pub fn parse_double(decimal_mark: u8, bytes: &[u8]) -> Option<(f64, &[u8])> {
    let (negative, mut i) = match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };

    if let Some((value, width)) = parse_special(&bytes[i..]) {
        let value = if negative { -value } else { value };
        return Some((value, &bytes[i + width..]));
    }

    let mut text = String::with_capacity(bytes.len() + 1);
    if negative {
        text.push('-');
    }

    let mut seen_digit = false;
    while let Some(&b) = bytes.get(i) {
        if !b.is_ascii_digit() {
            break;
        }
        text.push(char::from(b));
        seen_digit = true;
        i += 1;
    }

    if bytes.get(i) == Some(&decimal_mark) {
        i += 1;
        text.push('.');
        while let Some(&b) = bytes.get(i) {
            if !b.is_ascii_digit() {
                break;
            }
            text.push(char::from(b));
            seen_digit = true;
            i += 1;
        }
    }

    if !seen_digit {
        return None;
    }

    i += scan_exponent(&bytes[i..], &mut text);

    text.parse::<f64>().ok().map(|v| (v, &bytes[i..]))
}

/// Parse a number that may be surrounded by other text and may contain
/// grouping marks, e.g. `$1,234.50` or `45%`.
///
/// Leading bytes that cannot start a number are skipped. A grouping mark is
/// only accepted between two digits of the integer part; anything else ends
/// the number. Fails when no digit is found.
pub fn parse_number(decimal_mark: u8, grouping_mark: u8, bytes: &[u8]) -> Option<(f64, &[u8])> {
    let start = bytes
        .iter()
        .position(|&b| b == b'-' || b == decimal_mark || b.is_ascii_digit())?;

    let mut i = start;
    let mut text = String::with_capacity(bytes.len() - start + 1);
    let mut seen_digit = false;

    if bytes[i] == b'-' {
        text.push('-');
        i += 1;
    }

    while let Some(&b) = bytes.get(i) {
        if b.is_ascii_digit() {
            text.push(char::from(b));
            seen_digit = true;
            i += 1;
        } else if b == grouping_mark
            && seen_digit
            && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
        {
            i += 1;
        } else {
            break;
        }
    }

    if bytes.get(i) == Some(&decimal_mark) {
        let frac_start = i + 1;
        let frac_len = bytes[frac_start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if frac_len > 0 || seen_digit {
            text.push('.');
            text.extend(
                bytes[frac_start..frac_start + frac_len]
                    .iter()
                    .map(|&b| char::from(b)),
            );
            seen_digit |= frac_len > 0;
            i = frac_start + frac_len;
        }
    }

    if !seen_digit {
        return None;
    }

    i += scan_exponent(&bytes[i..], &mut text);

    text.parse::<f64>().ok().map(|v| (v, &bytes[i..]))
}

fn parse_special(bytes: &[u8]) -> Option<(f64, usize)> {
    const SPECIALS: [(&str, f64); 3] = [
        ("infinity", f64::INFINITY),
        ("inf", f64::INFINITY),
        ("nan", f64::NAN),
    ];

    SPECIALS.iter().find_map(|(word, value)| {
        let word = word.as_bytes();
        (bytes.len() >= word.len() && bytes[..word.len()].eq_ignore_ascii_case(word))
            .then_some((*value, word.len()))
    })
}

/// Append an exponent (`e[+-]digits`) to `text` if one is present and
/// complete; returns the number of bytes consumed.
fn scan_exponent(bytes: &[u8], text: &mut String) -> usize {
    if !matches!(bytes.first(), Some(b'e' | b'E')) {
        return 0;
    }

    let mut i = 1;
    let sign = match bytes.get(1) {
        Some(&(s @ (b'+' | b'-'))) => {
            i += 1;
            Some(s)
        }
        _ => None,
    };

    let digits = bytes[i..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return 0;
    }

    text.push('e');
    if let Some(s) = sign {
        text.push(char::from(s));
    }
    text.extend(bytes[i..i + digits].iter().map(|&b| char::from(b)));
    i + digits
}
