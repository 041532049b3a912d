use anyhow::{anyhow, ensure, Result};

const SCALE: u64 = 10_000;

/// Formats a fixed point value with 4 implied decimals, e.g. `-12345` -> `-1.2345`.
pub fn format_fixed_point(value: i64) -> String {
    let magnitude = value.unsigned_abs();
    format!(
        "{}{}.{:04}",
        sign_prefix(value),
        magnitude / SCALE,
        magnitude % SCALE
    )
}

fn sign_prefix(value: i64) -> &'static str {
    if value < 0 {
        "-"
    } else {
        ""
    }
}

/// Inverse of [`format_fixed_point`]. Extra fractional digits are truncated.
pub fn parse_fixed_point(value: &str) -> Result<i64> {
    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };

    let (integer, fractional) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    ensure!(
        !integer.is_empty() && integer.bytes().all(|b| b.is_ascii_digit()),
        anyhow!("Invalid integer part in amount: {value:?}")
    );
    ensure!(
        fractional.bytes().all(|b| b.is_ascii_digit()),
        anyhow!("Invalid fractional part in amount: {value:?}")
    );

    let magnitude = integer
        .parse::<i64>()?
        .checked_mul(SCALE as i64)
        .and_then(|i| i.checked_add(four_digits(fractional)))
        .ok_or(anyhow!("Amount out of range: {value:?}"))?;

    Ok(if negative { -magnitude } else { magnitude })
}

fn four_digits(fractional: &str) -> i64 {
    fractional
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(4)
        .fold(0, |acc, b| acc * 10 + i64::from(b - b'0'))
}
