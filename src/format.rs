//! Display helpers working on digit strings of any radix up to 16.
//! Nothing here goes through the decimal engine, so values in binary, octal
//! or hexadecimal form are rounded digit by digit.

pub const DEFAULT_SEPARATOR: char = ',';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rounding {
    HalfUp,
    Up,
    Down,
}

fn split_sign(value: &str) -> (bool, &str) {
    match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    }
}

// "-0.00" is printed without the sign
fn apply_sign(negative: bool, body: String) -> String {
    if negative && body.chars().any(|c| c != '0' && c != '.') {
        format!("-{}", body)
    } else {
        body
    }
}

/// Adds one to a fixed-width digit string; the flag tells if the carry fell
/// out of the leftmost digit
fn increment(digits: &str, radix: u32) -> (String, bool) {
    let mut out: Vec<char> = digits.chars().collect();
    let mut carry = true;
    for c in out.iter_mut().rev() {
        if !carry {
            break;
        }
        let v = c.to_digit(radix).unwrap_or(0) + 1;
        carry = v >= radix;
        let v = if carry { 0 } else { v };
        *c = std::char::from_digit(v, radix).unwrap_or('0').to_ascii_uppercase();
    }
    (out.into_iter().collect(), carry)
}

fn increment_integer(digits: &str, radix: u32) -> String {
    let (mut s, carry) = increment(digits, radix);
    if carry {
        s.insert(0, '1');
    }
    s
}

fn round_away(dropped: &str, radix: u32, mode: Rounding) -> bool {
    match mode {
        Rounding::HalfUp => dropped
            .chars()
            .next()
            .and_then(|c| c.to_digit(radix))
            .map_or(false, |d| d >= radix / 2),
        Rounding::Up => dropped.chars().any(|c| c != '0'),
        Rounding::Down => false,
    }
}

fn round_digits(value: &str, places: i32, radix: u32, mode: Rounding) -> String {
    let (negative, body) = split_sign(value);
    let (integer, fraction) = body.split_once('.').unwrap_or((body, ""));
    let integer = if integer.is_empty() { "0" } else { integer };

    let rounded = if places >= 0 {
        let places = places as usize;
        let (kept, dropped) = if fraction.len() > places {
            fraction.split_at(places)
        } else {
            (fraction, "")
        };
        let mut kept = format!("{:0<width$}", kept, width = places);
        let mut integer = integer.to_string();
        if round_away(dropped, radix, mode) {
            let (inc, carry) = increment(&kept, radix);
            kept = inc;
            if carry {
                integer = increment_integer(&integer, radix);
            }
        }
        if places == 0 {
            integer
        } else {
            format!("{}.{}", integer, kept)
        }
    } else {
        // negative places round digits of the integer part: 1250 -> 1300
        let k = places.unsigned_abs() as usize;
        let padded = format!("{:0>width$}", integer, width = k + 1);
        let (prefix, cut) = padded.split_at(padded.len() - k);
        let dropped = format!("{}{}", cut, fraction);
        let prefix = if round_away(&dropped, radix, mode) {
            increment_integer(prefix, radix)
        } else {
            prefix.to_string()
        };
        let digits = format!("{}{}", prefix, "0".repeat(k));
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    };
    apply_sign(negative, rounded)
}

/// Removes zeros at the end of the fractional part and a dangling point
pub fn trim_trailing_zeros(value: &str) -> String {
    if !value.contains('.') {
        return value.to_string();
    }
    value.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Inserts a comma every `group_size` digits of the integer part.
/// See `number_grouping_with`
pub fn number_grouping(value: &str, group_size: usize) -> String {
    number_grouping_with(value, group_size, DEFAULT_SEPARATOR)
}

/// Inserts `separator` every `group_size` digits of the integer part counting
/// from the point. The fractional part and the sign are left as is.
/// Digits `A-F` are grouped the same way as decimal ones
pub fn number_grouping_with(value: &str, group_size: usize, separator: char) -> String {
    if group_size == 0 {
        return value.to_string();
    }
    let (negative, body) = split_sign(value);
    let (integer, fraction) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };

    let len = integer.chars().count();
    let mut out = String::with_capacity(value.len() + len / group_size);
    if negative {
        out.push('-');
    }
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % group_size == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    if let Some(f) = fraction {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// Cuts or pads the fractional part to exactly `places` digits of `radix`,
/// rounding half up: the first dropped digit rounds up when it is at least
/// `radix / 2`. The carry can travel through the whole fraction into the
/// integer part: `1.995` -> `2.00`.
///
/// * `places < 0` - the value is returned unchanged
/// * `places == 0` - rounds to an integer
pub fn format_decimal_places(value: &str, places: i32, radix: u32) -> String {
    if value.is_empty() || places < 0 {
        return value.to_string();
    }
    round_digits(value, places, radix, Rounding::HalfUp)
}

/// Rounds half up (away from zero) to `places` digits and drops trailing
/// zeros. Negative `places` round the integer part: `round("1250", -2, 10)` is `1300`
pub fn round(value: &str, places: i32, radix: u32) -> String {
    if value.is_empty() {
        return String::new();
    }
    trim_trailing_zeros(&round_digits(value, places, radix, Rounding::HalfUp))
}

/// Rounds away from zero if any dropped digit is non-zero
pub fn round_up(value: &str, places: i32, radix: u32) -> String {
    if value.is_empty() {
        return String::new();
    }
    trim_trailing_zeros(&round_digits(value, places, radix, Rounding::Up))
}

/// Drops digits after `places`
pub fn round_down(value: &str, places: i32, radix: u32) -> String {
    if value.is_empty() {
        return String::new();
    }
    trim_trailing_zeros(&round_digits(value, places, radix, Rounding::Down))
}
