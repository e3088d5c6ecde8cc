//! Fixed-decimal formatting for published campaign figures.
//!
//! Rust's `{:.N}` rounds exact decimal ties to even (`0.125` → `"0.12"`),
//! while the stored campaign figures were produced with ties rounded away
//! from zero (`"0.13"`). Everything that renders money or rates goes through
//! [`to_fixed`] so both agree digit for digit.

/// Extra decimals inspected when looking for an exact tie. A double that is
/// not itself a tie can never sit this close to one.
const TIE_SCAN_DIGITS: usize = 30;

/// Format `value` with exactly `digits` decimals, rounding to the nearest
/// decimal and resolving exact ties upward in magnitude.
///
/// Negative zero prints without a sign; non-finite values print as
/// `NaN` / `Infinity` / `-Infinity`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return format!("{:.*}", digits, 0.0_f64);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    let expanded = format!("{:.*}", digits + TIE_SCAN_DIGITS, magnitude);
    let Some(dot) = expanded.find('.') else {
        return format!("{sign}{:.*}", digits, magnitude);
    };
    let keep = dot + 1 + digits;
    let tail = &expanded[keep..];

    let body = if is_tie(tail) {
        let mut truncated = expanded[..keep].to_string();
        if digits == 0 {
            truncated.pop();
        }
        increment_last_digit(&truncated)
    } else {
        format!("{:.*}", digits, magnitude)
    };

    format!("{sign}{body}")
}

/// Round to the nearest integer; halves round toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

fn is_tie(tail: &str) -> bool {
    let mut chars = tail.chars();
    chars.next() == Some('5') && chars.all(|c| c == '0')
}

/// Add one unit in the last place of a plain decimal string.
fn increment_last_digit(number: &str) -> String {
    let mut bytes: Vec<u8> = number.bytes().collect();
    let mut carry = true;
    for b in bytes.iter_mut().rev() {
        if !carry {
            break;
        }
        match *b {
            b'.' => continue,
            b'9' => *b = b'0',
            _ => {
                *b += 1;
                carry = false;
            }
        }
    }
    let mut out = String::with_capacity(bytes.len() + 1);
    if carry {
        out.push('1');
    }
    out.push_str(&String::from_utf8_lossy(&bytes));
    out
}
