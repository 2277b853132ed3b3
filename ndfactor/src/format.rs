/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Human-readable and round-trip formatting of numbers and text.

use half::bf16;
use half::f16;

/// Formats `value` like C's `%.{precision}g` (or `%G` when `upper`):
/// `precision` significant digits, fixed or scientific notation
/// depending on the exponent, trailing zeros removed.
pub(crate) fn format_g(value: f64, precision: usize, upper: bool) -> String {
    let text = if value.is_nan() {
        if value.is_sign_negative() {
            "-nan".to_string()
        } else {
            "nan".to_string()
        }
    } else if value.is_infinite() {
        if value < 0.0 {
            "-inf".to_string()
        } else {
            "inf".to_string()
        }
    } else if value == 0.0 {
        if value.is_sign_negative() {
            "-0".to_string()
        } else {
            "0".to_string()
        }
    } else {
        let precision = precision.max(1);
        // The exponent is taken after rounding to `precision` digits.
        let scientific = format!("{:.*e}", precision - 1, value);
        let (mantissa, exponent) = scientific
            .split_once('e')
            .unwrap_or((scientific.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        if exponent < -4 || exponent >= precision as i32 {
            let sign = if exponent < 0 { '-' } else { '+' };
            format!(
                "{}e{}{:02}",
                strip_trailing_zeros(mantissa),
                sign,
                exponent.unsigned_abs()
            )
        } else {
            let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
            strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
        }
    };
    if upper { text.to_uppercase() } else { text }
}

fn strip_trailing_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Formats an integer with a metric-like suffix: `1234` becomes
/// `"1.23k"`, `2_000_000_000` becomes `"2.00B"`. Values of 10^15 and
/// above are printed in scientific notation.
pub fn human_readable_num(value: i64) -> String {
    let mut text = String::new();
    if value < 0 {
        text.push('-');
    }
    let mut magnitude = value.unsigned_abs();
    if magnitude < 1000 {
        text.push_str(&magnitude.to_string());
    } else if magnitude >= 1_000_000_000_000_000 {
        text.push_str(&format_g(magnitude as f64, 3, true));
    } else {
        const UNITS: [char; 4] = ['k', 'M', 'B', 'T'];
        let mut unit = 0;
        while magnitude >= 1_000_000 {
            magnitude /= 1000;
            unit += 1;
        }
        text.push_str(&format!("{:.2}{}", magnitude as f64 / 1000.0, UNITS[unit]));
    }
    text
}

/// Formats a duration given in seconds using the largest unit that
/// keeps the value readable: `"12.3 us"`, `"1 ms"`, `"2.5 min"`,
/// `"3 days"`.
pub fn human_readable_elapsed_time(seconds: f64) -> String {
    let mut text = String::new();
    let mut seconds = seconds;
    if seconds < 0.0 {
        text.push('-');
        seconds = -seconds;
    }

    // Thresholds account for rounding to three digits, so that 999.7
    // microseconds prints as "1 ms" rather than "1e+03 us".
    let microseconds = seconds * 1.0e6;
    if microseconds < 999.5 {
        text.push_str(&format!("{} us", format_g(microseconds, 3, false)));
        return text;
    }
    let mut milliseconds = seconds * 1.0e3;
    if (0.995..1.0).contains(&milliseconds) {
        milliseconds = 1.0;
    }
    if milliseconds < 999.5 {
        text.push_str(&format!("{} ms", format_g(milliseconds, 3, false)));
        return text;
    }
    if seconds < 60.0 {
        text.push_str(&format!("{} s", format_g(seconds, 3, false)));
        return text;
    }
    let minutes = seconds / 60.0;
    if minutes < 60.0 {
        text.push_str(&format!("{} min", format_g(minutes, 3, false)));
        return text;
    }
    let hours = minutes / 60.0;
    if hours < 24.0 {
        text.push_str(&format!("{} h", format_g(hours, 3, false)));
        return text;
    }
    let days = hours / 24.0;
    if days < 30.0 {
        text.push_str(&format!("{} days", format_g(days, 3, false)));
        return text;
    }
    if days < 365.2425 {
        text.push_str(&format!("{} months", format_g(days / 30.436875, 3, false)));
        return text;
    }
    text.push_str(&format!("{} years", format_g(days / 365.2425, 3, false)));
    text
}

fn human_readable_num_ops(ops: f64, nanoseconds: f64, op_prefix: &str) -> String {
    if nanoseconds == 0.0 {
        return format!("NaN {}OP/s", op_prefix);
    }
    let mut throughput = human_readable_num((ops / nanoseconds * 1e9) as i64);
    // "G(FLOP/s)" reads better than "B(FLOP/s)".
    if throughput.ends_with(['B', 'b']) {
        throughput.pop();
        throughput.push('G');
    }
    throughput.push_str(op_prefix);
    throughput.push_str("OP/s");
    throughput
}

/// Formats a floating-point throughput, e.g. `"2.00GFLOP/s"`.
pub fn human_readable_num_flops(flops: f64, nanoseconds: f64) -> String {
    human_readable_num_ops(flops, nanoseconds, "FL")
}

/// Formats a transcendental-op throughput, e.g. `"1.50MTROP/s"`.
pub fn human_readable_num_transcendental_ops(trops: f64, nanoseconds: f64) -> String {
    human_readable_num_ops(trops, nanoseconds, "TR")
}

/// Floating-point types that can be printed so that parsing the
/// result gives back the same value.
pub trait RoundTripFp: Copy + PartialEq + std::str::FromStr {
    /// Significant decimal digits that always survive a round trip
    /// through text.
    const DIGITS10: usize;
    /// Significant decimal digits needed to distinguish any two
    /// values.
    const MAX_DIGITS10: usize;
    /// Whether to try [`DIGITS10`](Self::DIGITS10) digits before
    /// falling back to [`MAX_DIGITS10`](Self::MAX_DIGITS10).
    const SHORTEST_FIRST: bool = true;

    fn to_f64(self) -> f64;

    /// The NaN payload bits of `self`, if it is a NaN carrying a
    /// payload other than the default quiet NaN.
    fn nan_payload(self) -> Option<u64>;
}

impl RoundTripFp for f32 {
    const DIGITS10: usize = 6;
    const MAX_DIGITS10: usize = 9;

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn nan_payload(self) -> Option<u64> {
        const PAYLOAD_BITS: u32 = f32::MANTISSA_DIGITS - 1;
        const PAYLOAD_MASK: u32 = (1 << PAYLOAD_BITS) - 1;
        const QUIET_NAN: u32 = 1 << (PAYLOAD_BITS - 1);
        let payload = self.to_bits() & PAYLOAD_MASK;
        (self.is_nan() && payload != QUIET_NAN).then_some(payload as u64)
    }
}

impl RoundTripFp for f64 {
    const DIGITS10: usize = 15;
    const MAX_DIGITS10: usize = 17;

    fn to_f64(self) -> f64 {
        self
    }

    fn nan_payload(self) -> Option<u64> {
        const PAYLOAD_BITS: u32 = f64::MANTISSA_DIGITS - 1;
        const PAYLOAD_MASK: u64 = (1 << PAYLOAD_BITS) - 1;
        const QUIET_NAN: u64 = 1 << (PAYLOAD_BITS - 1);
        let payload = self.to_bits() & PAYLOAD_MASK;
        (self.is_nan() && payload != QUIET_NAN).then_some(payload)
    }
}

impl RoundTripFp for f16 {
    const DIGITS10: usize = 3;
    const MAX_DIGITS10: usize = 5;
    const SHORTEST_FIRST: bool = false;

    fn to_f64(self) -> f64 {
        f16::to_f64(self)
    }

    fn nan_payload(self) -> Option<u64> {
        const PAYLOAD_BITS: u32 = f16::MANTISSA_DIGITS - 1;
        const PAYLOAD_MASK: u16 = (1 << PAYLOAD_BITS) - 1;
        const QUIET_NAN: u16 = 1 << (PAYLOAD_BITS - 1);
        let payload = self.to_bits() & PAYLOAD_MASK;
        (self.is_nan() && payload != QUIET_NAN).then_some(payload as u64)
    }
}

impl RoundTripFp for bf16 {
    const DIGITS10: usize = 2;
    const MAX_DIGITS10: usize = 4;
    const SHORTEST_FIRST: bool = false;

    fn to_f64(self) -> f64 {
        bf16::to_f64(self)
    }

    fn nan_payload(self) -> Option<u64> {
        const PAYLOAD_BITS: u32 = bf16::MANTISSA_DIGITS - 1;
        const PAYLOAD_MASK: u16 = (1 << PAYLOAD_BITS) - 1;
        const QUIET_NAN: u16 = 1 << (PAYLOAD_BITS - 1);
        let payload = self.to_bits() & PAYLOAD_MASK;
        (self.is_nan() && payload != QUIET_NAN).then_some(payload as u64)
    }
}

/// Prints `value` with as few significant digits as possible while
/// still parsing back to `value`. NaNs with a non-default payload
/// are suffixed with the payload, e.g. `"nan(0x1)"`.
///
/// The 16-bit types always print
/// [`MAX_DIGITS10`](RoundTripFp::MAX_DIGITS10) digits.
///
/// ```
/// use ndfactor::format::round_trip_fp_to_string;
///
/// assert_eq!(round_trip_fp_to_string(0.1f32), "0.1");
/// assert_eq!(round_trip_fp_to_string(1.0f32 / 3.0), "0.333333343");
/// assert_eq!(round_trip_fp_to_string(1e100f64), "1e+100");
/// ```
pub fn round_trip_fp_to_string<T: RoundTripFp>(value: T) -> String {
    let shortest = T::SHORTEST_FIRST
        .then(|| format_g(value.to_f64(), T::DIGITS10, false))
        .filter(|text| text.parse::<T>().is_ok_and(|parsed| parsed == value));
    let mut text =
        shortest.unwrap_or_else(|| format_g(value.to_f64(), T::MAX_DIGITS10, false));
    if let Some(payload) = value.nan_payload() {
        text.push_str(&format!("(0x{:x})", payload));
    }
    text
}

/// Strips the whitespace around every line of `original` and
/// prefixes it with `indentation`.
pub fn reindent(original: &str, indentation: &str) -> String {
    original
        .split('\n')
        .map(|line| format!("{}{}", indentation, line.trim_ascii()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replaces characters that are awkward in file names (path
/// separators, brackets and spaces) with `_`.
pub fn sanitize_file_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '[' | ']' | ' ' => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_g() {
        assert_eq!(format_g(1234.5678, 6, false), "1234.57");
        assert_eq!(format_g(100.0, 3, false), "100");
        assert_eq!(format_g(0.0001, 6, false), "0.0001");
        assert_eq!(format_g(0.00001, 6, false), "1e-05");
        assert_eq!(format_g(123456789.0, 6, false), "1.23457e+08");
        assert_eq!(format_g(1e15, 3, true), "1E+15");
        assert_eq!(format_g(-2.5, 3, false), "-2.5");
        assert_eq!(format_g(0.0, 6, false), "0");
        assert_eq!(format_g(f64::INFINITY, 6, false), "inf");
        assert_eq!(format_g(f64::NAN, 6, false), "nan");
    }

    #[test]
    fn test_human_readable_num() {
        assert_eq!(human_readable_num(0), "0");
        assert_eq!(human_readable_num(999), "999");
        assert_eq!(human_readable_num(-999), "-999");
        assert_eq!(human_readable_num(1234), "1.23k");
        assert_eq!(human_readable_num(-1234), "-1.23k");
        assert_eq!(human_readable_num(1_500_000), "1.50M");
        assert_eq!(human_readable_num(2_000_000_000), "2.00B");
        assert_eq!(human_readable_num(7_250_000_000_000), "7.25T");
        assert_eq!(human_readable_num(1_000_000_000_000_000), "1E+15");
        assert_eq!(human_readable_num(i64::MIN), "-9.22E+18");
    }

    #[test]
    fn test_human_readable_elapsed_time() {
        assert_eq!(human_readable_elapsed_time(0.0), "0 us");
        assert_eq!(human_readable_elapsed_time(12.3e-6), "12.3 us");
        assert_eq!(human_readable_elapsed_time(999.7e-6), "1 ms");
        assert_eq!(human_readable_elapsed_time(0.25), "250 ms");
        assert_eq!(human_readable_elapsed_time(-1.5), "-1.5 s");
        assert_eq!(human_readable_elapsed_time(150.0), "2.5 min");
        assert_eq!(human_readable_elapsed_time(7200.0), "2 h");
        assert_eq!(human_readable_elapsed_time(3.0 * 86400.0), "3 days");
        assert_eq!(human_readable_elapsed_time(2.0 * 365.2425 * 86400.0), "2 years");
    }

    #[test]
    fn test_human_readable_throughput() {
        assert_eq!(human_readable_num_flops(2e9, 1e9), "2.00GFLOP/s");
        assert_eq!(human_readable_num_flops(5e5, 1e9), "500.00kFLOP/s");
        assert_eq!(human_readable_num_flops(1.0, 0.0), "NaN FLOP/s");
        assert_eq!(
            human_readable_num_transcendental_ops(1.5e6, 1e9),
            "1.50MTROP/s"
        );
        assert_eq!(human_readable_num_transcendental_ops(1.0, 0.0), "NaN TROP/s");
    }

    #[test]
    fn test_round_trip_half_to_string() {
        assert_eq!(round_trip_fp_to_string(f16::from_f32(0.1)), "0.099976");
        assert_eq!(round_trip_fp_to_string(f16::ONE), "1");
        assert_eq!(round_trip_fp_to_string(f16::MAX), "65504");
        assert_eq!(round_trip_fp_to_string(bf16::from_f32(0.1)), "0.1001");
        assert_eq!(round_trip_fp_to_string(bf16::ONE), "1");
        assert_eq!(round_trip_fp_to_string(f16::NEG_INFINITY), "-inf");

        for value in [1.0f32 / 3.0, 0.1, 6.1035156e-5, 5.9604645e-8, -1234.5] {
            let half = f16::from_f32(value);
            let text = round_trip_fp_to_string(half);
            assert_eq!(text.parse::<f16>().unwrap(), half, "{}", text);

            let brain = bf16::from_f32(value);
            let text = round_trip_fp_to_string(brain);
            assert_eq!(text.parse::<bf16>().unwrap(), brain, "{}", text);
        }
    }

    #[test]
    fn test_round_trip_half_nan_payload() {
        assert_eq!(round_trip_fp_to_string(f16::NAN), "nan");
        assert_eq!(round_trip_fp_to_string(f16::from_bits(0x7c01)), "nan(0x1)");
        assert_eq!(round_trip_fp_to_string(f16::from_bits(0x7e05)), "nan(0x205)");
        assert_eq!(round_trip_fp_to_string(bf16::NAN), "nan");
        assert_eq!(round_trip_fp_to_string(bf16::from_bits(0x7f81)), "nan(0x1)");
        assert_eq!(round_trip_fp_to_string(bf16::from_bits(0xff83)), "-nan(0x3)");
    }

    #[test]
    fn test_round_trip_fp_to_string() {
        assert_eq!(round_trip_fp_to_string(0.1f32), "0.1");
        assert_eq!(round_trip_fp_to_string(0.1f64), "0.1");
        assert_eq!(round_trip_fp_to_string(0.1f64 + 0.2), "0.30000000000000004");
        assert_eq!(round_trip_fp_to_string(16777217.0f64), "16777217");
        assert_eq!(round_trip_fp_to_string(-0.0f32), "-0");
        assert_eq!(round_trip_fp_to_string(f32::INFINITY), "inf");
        assert_eq!(round_trip_fp_to_string(f64::NEG_INFINITY), "-inf");

        for value in [1.0f32 / 3.0, 1e-20, 3.4028235e38, 1.17549435e-38] {
            let text = round_trip_fp_to_string(value);
            assert_eq!(text.parse::<f32>().unwrap(), value, "{}", text);
        }
        for value in [1.0f64 / 3.0, std::f64::consts::PI, 1e-300, f64::MAX] {
            let text = round_trip_fp_to_string(value);
            assert_eq!(text.parse::<f64>().unwrap(), value, "{}", text);
        }
    }

    #[test]
    fn test_round_trip_nan_payload() {
        assert_eq!(round_trip_fp_to_string(f32::NAN), "nan");
        assert_eq!(round_trip_fp_to_string(f32::from_bits(0x7f80_0001)), "nan(0x1)");
        assert_eq!(
            round_trip_fp_to_string(f32::from_bits(0x7fc0_0abc)),
            "nan(0x400abc)"
        );
        assert_eq!(round_trip_fp_to_string(f64::NAN), "nan");
        assert_eq!(
            round_trip_fp_to_string(f64::from_bits(0x7ff0_0000_0000_0002)),
            "nan(0x2)"
        );
    }

    #[test]
    fn test_reindent() {
        assert_eq!(reindent("  a\n\tb  \nc", "> "), "> a\n> b\n> c");
        assert_eq!(reindent("", "  "), "  ");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(
            sanitize_file_name("module/fusion [1]\\x.txt"),
            "module_fusion__1__x.txt"
        );
        assert_eq!(sanitize_file_name("plain.txt"), "plain.txt");
    }
}
