//! Common formatting utilities for the compspace crates
//!
//! These are left public for convenience, since consistent scientific
//! and percentage formatting is useful everywhere in the toolkit.

// Alias for the format! macro
pub use std::format as f;

/// Extends numeric primitives with more specific formatting options
pub trait ValueExt {
    /// Consistent scientific number formatting
    ///
    /// The default `LowerExp` output pads nothing, which makes columns
    /// of mixed-sign exponents ragged. This fixes the precision and
    /// zero-pads the exponent.
    ///
    /// ```rust
    /// # use compspace_utils::ValueExt;
    /// assert_eq!((-1.0).sci(5, 2), "-1.00000e+00".to_string());
    /// assert_eq!((1.0).sci(5, 2), "1.00000e+00".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: std::fmt::LowerExp> ValueExt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let mut num = f!("{:.precision$e}", &self, precision = precision);
        // Guaranteed to contain 'e' so the unwrap is fine
        let exp = num.split_off(num.find('e').unwrap());
        let (sign, exp) = match exp.strip_prefix("e-") {
            Some(exp) => ('-', exp),
            None => ('+', &exp[1..]),
        };
        num.push_str(&f!("e{}{:0>pad$}", sign, exp, pad = exp_pad));
        num
    }
}

/// Extends fractional values with percentage formatting
pub trait FractionExt {
    /// Format a `[0, 1]` fraction as a fixed-precision percentage
    ///
    /// ```rust
    /// # use compspace_utils::FractionExt;
    /// assert_eq!(0.5123_f64.pct(1), "51.2%".to_string());
    /// assert_eq!(0.0_f64.pct(0), "0%".to_string());
    /// ```
    fn pct(&self, precision: usize) -> String;
}

impl FractionExt for f64 {
    fn pct(&self, precision: usize) -> String {
        f!("{:.precision$}%", self * 100.0, precision = precision)
    }
}
