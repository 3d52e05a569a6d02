//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floating point:                                            │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    (330 * 0.05).toFixed(2) depends on how 16.5 happens to be stored    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Micro-Rupees                                     │
//! │    Rs 330.00  = 330_000_000 micros                                      │
//! │    Rs 499.995 = 499_995_000 micros  (still below the Rs 500 tier)       │
//! │    GST 5% = 330_000_000 * 500 / 10000 = 16_500_000 = Rs 16.50           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Precision Rules
//! - Prices, add-ons, line totals, subtotal and discounts keep full
//!   micro-rupee precision (6 decimal places)
//! - GST and the grand total are rounded to the paisa, half away from zero
//! - Input with more than 6 decimal places is rounded to the nearest micro
//!
//! Decimal rupee values only exist at the edges: parsing prices and add-on
//! strings, and the [`decimal`] serde adapter used by the JSON surface.
//!
//! ## Usage
//! ```rust
//! use orderbill_core::money::Money;
//!
//! let price = Money::from_cents(35000); // Rs 350.00
//! let line = price * 2;                 // Rs 700.00
//! let with_naan = line + Money::from_cents(4000);
//! assert_eq!(with_naan.to_string(), "Rs 740.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Micro-rupees in one rupee.
pub const MICROS_PER_RUPEE: i64 = 1_000_000;

/// Micro-rupees in one paisa.
pub const MICROS_PER_PAISA: i64 = 10_000;

/// Fraction digits kept by [`Money`].
const FRACTION_DIGITS: usize = 6;

/// A rupee amount stored as a whole number of micro-rupees (1/1,000,000
/// rupee, 1/10,000 paisa).
///
/// ## Design Decisions
/// - **i64 (signed)**: the running total may dip below zero before the
///   grand total is floored; the range still covers ±9.2 trillion rupees
/// - **Sub-paisa precision**: a price of Rs 499.995 must stay below the
///   Rs 500 delivery tier, so input is not rounded to paise
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde**: serializes as raw micros; use [`decimal`] for rupee numbers
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CartItem.price ──┬──► LineResult.base_price                            │
/// │  "Raita:30" ──────┴──► LineResult.addon_total ──► LineResult.item_total │
/// │                                                                         │
/// │  Bill.subtotal ──► delivery tier ──► GST ──► coupon ──► grand total    │
/// │     (exact)          (exact)      (paisa)   (exact)      (paisa)        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from micro-rupees.
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Money(micros)
    }

    /// Creates a Money value from paise (the smallest coin).
    ///
    /// The name follows the usual "cents" convention for the minor unit.
    ///
    /// ## Example
    /// ```rust
    /// use orderbill_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Rs 10.99
    /// assert_eq!(price.cents(), 1099);
    /// assert_eq!(price.micros(), 10_990_000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents.saturating_mul(MICROS_PER_PAISA))
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees.saturating_mul(MICROS_PER_RUPEE))
    }

    /// Converts a decimal rupee amount.
    ///
    /// The value is read through its shortest decimal form, so `499.995`
    /// becomes exactly 499_995_000 micros rather than whatever the nearest
    /// binary double times a million happens to be. Digits past the sixth
    /// decimal place round half away from zero.
    ///
    /// Returns `None` for NaN, infinities and values outside the i64 range.
    ///
    /// ## Example
    /// ```rust
    /// use orderbill_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(499.99), Some(Money::from_cents(49999)));
    /// assert_eq!(Money::from_major(499.995), Some(Money::from_micros(499_995_000)));
    /// assert_eq!(Money::from_major(f64::NAN), None);
    /// ```
    pub fn from_major(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        // f64's Display never uses exponent notation
        parse_plain(&value.to_string())
    }

    /// Parses a decimal rupee amount from text such as `"30"`, `" 12.5 "`,
    /// `"-10"` or `"1e3"`.
    ///
    /// Returns `None` when the trimmed text is not a finite number.
    ///
    /// ## Example
    /// ```rust
    /// use orderbill_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("30"), Some(Money::from_rupees(30)));
    /// assert_eq!(Money::parse_decimal("12.50"), Some(Money::from_cents(1250)));
    /// assert_eq!(Money::parse_decimal("0.004"), Some(Money::from_micros(4_000)));
    /// assert_eq!(Money::parse_decimal("free"), None);
    /// ```
    pub fn parse_decimal(text: &str) -> Option<Self> {
        let text = text.trim();
        parse_plain(text).or_else(|| text.parse::<f64>().ok().and_then(Self::from_major))
    }

    /// Parses the longest numeric prefix of `text`, ignoring leading
    /// whitespace and anything after the number.
    ///
    /// `"30abc"` reads as Rs 30 and `" 12.5 rupees"` as Rs 12.50. Text that
    /// does not start with a number (after an optional sign) yields `None`.
    ///
    /// ## Example
    /// ```rust
    /// use orderbill_core::money::Money;
    ///
    /// assert_eq!(Money::parse_leading("30abc"), Some(Money::from_rupees(30)));
    /// assert_eq!(Money::parse_leading("1.5e2x"), Some(Money::from_rupees(150)));
    /// assert_eq!(Money::parse_leading("abc30"), None);
    /// ```
    pub fn parse_leading(text: &str) -> Option<Self> {
        let text = text.trim_start();
        let bytes = text.as_bytes();

        let mut end = 0;
        if matches!(bytes.first(), Some(b'+' | b'-')) {
            end += 1;
        }

        let int_digits = count_digits(&bytes[end..]);
        end += int_digits;

        let mut frac_digits = 0;
        if bytes.get(end) == Some(&b'.') {
            frac_digits = count_digits(&bytes[end + 1..]);
            if int_digits > 0 || frac_digits > 0 {
                end += 1 + frac_digits;
            }
        }

        if int_digits == 0 && frac_digits == 0 {
            return None;
        }

        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp_end = end + 1;
            if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
                exp_end += 1;
            }
            let exp_digits = count_digits(&bytes[exp_end..]);
            if exp_digits > 0 {
                end = exp_end + exp_digits;
            }
        }

        Self::parse_decimal(&text[..end])
    }

    /// Returns the value in micro-rupees.
    #[inline]
    pub const fn micros(&self) -> i64 {
        self.0
    }

    /// Returns the value in whole paise, rounded half away from zero.
    #[inline]
    pub fn cents(&self) -> i64 {
        round_half_away(self.0 as i128, MICROS_PER_PAISA as i128) as i64
    }

    /// Returns the whole-rupee portion, truncated toward zero.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / MICROS_PER_RUPEE
    }

    /// True when the amount has no sub-paisa digits.
    #[inline]
    pub const fn is_whole_paise(&self) -> bool {
        self.0 % MICROS_PER_PAISA == 0
    }

    /// Returns the value as decimal rupees, for display and JSON only.
    #[inline]
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / MICROS_PER_RUPEE as f64
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Floors the value at zero.
    ///
    /// ## Example
    /// ```rust
    /// use orderbill_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-550).clamp_non_negative(), Money::zero());
    /// assert_eq!(Money::from_cents(550).clamp_non_negative().cents(), 550);
    /// ```
    #[inline]
    pub fn clamp_non_negative(self) -> Self {
        self.max(Money::zero())
    }

    /// Rounds to the nearest paisa, half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use orderbill_core::money::Money;
    ///
    /// assert_eq!(Money::from_micros(30_025_000).round_to_paisa(), Money::from_cents(3003));
    /// assert_eq!(Money::from_micros(30_024_999).round_to_paisa(), Money::from_cents(3002));
    /// ```
    #[inline]
    pub fn round_to_paisa(self) -> Self {
        Money::from_cents(self.cents())
    }

    /// Takes `bps` basis points of this amount (5000 = 50%), keeping full
    /// micro-rupee precision.
    ///
    /// ## Example
    /// ```rust
    /// use orderbill_core::money::Money;
    ///
    /// let subtotal = Money::from_rupees(1000);
    /// assert_eq!(subtotal.percentage(5000), Money::from_rupees(500));
    ///
    /// // Rs 0.05 at 50% = 2.5 paise, kept as is
    /// assert_eq!(Money::from_cents(5).percentage(5000).micros(), 25_000);
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        self.scaled_by_bps(bps, 1)
    }

    /// Calculates tax on this amount, rounded to the nearest paisa (half
    /// away from zero).
    ///
    /// The product is rounded once, straight to paise.
    ///
    /// ## Example
    /// ```rust
    /// use orderbill_core::money::Money;
    /// use orderbill_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_rupees(330);
    /// let gst = subtotal.calculate_tax(TaxRate::from_bps(500)); // 5%
    /// assert_eq!(gst.cents(), 1650); // Rs 16.50
    /// ```
    #[inline]
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.scaled_by_bps(rate.bps(), MICROS_PER_PAISA)
    }

    /// Multiplies money by a quantity, saturating instead of overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use orderbill_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(33000); // Biryani + Raita
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 66000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// `self × bps / 10000`, rounded to a multiple of `unit` micros.
    fn scaled_by_bps(&self, bps: u32, unit: i64) -> Money {
        // i128 so that large carts cannot overflow the intermediate product
        let product = self.0 as i128 * bps as i128;
        let units = round_half_away(product, 10_000 * unit as i128);
        let micros = units.saturating_mul(unit as i128);
        Money(micros.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }
}

/// Integer division rounding half away from zero.
fn round_half_away(numerator: i128, denominator: i128) -> i128 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parses `[+-]digits[.digits]` exactly into micros.
fn parse_plain(text: &str) -> Option<Money> {
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut rupees: i128 = 0;
    for digit in whole.bytes() {
        rupees = rupees * 10 + i128::from(digit - b'0');
        if rupees > i64::MAX as i128 {
            return None;
        }
    }

    let mut micros = rupees * MICROS_PER_RUPEE as i128;
    let mut digits = fraction.bytes().map(|b| i128::from(b - b'0'));
    let mut place = MICROS_PER_RUPEE as i128;
    for _ in 0..FRACTION_DIGITS {
        place /= 10;
        micros += digits.next().unwrap_or(0) * place;
    }
    if digits.next().is_some_and(|d| d >= 5) {
        micros += 1;
    }

    let signed = if negative { -micros } else { micros };
    i64::try_from(signed).ok().map(Money)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as "Rs 10.99" (or "-Rs 5.50"). Sub-paisa digits are shown
/// rather than hidden: "Rs 499.995".
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let per_rupee = MICROS_PER_RUPEE as u64;

        let fraction = format!("{:0width$}", magnitude % per_rupee, width = FRACTION_DIGITS);
        let trimmed = fraction.trim_end_matches('0');
        let shown = if trimmed.len() < 2 { &fraction[..2] } else { trimmed };

        write!(f, "{}Rs {}.{}", sign, magnitude / per_rupee, shown)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Decimal Serde Adapter
// =============================================================================

/// Serde adapter that writes Money as decimal rupees (`276.5`) and reads it
/// back from a JSON number or a numeric string.
///
/// ## Usage
/// ```rust
/// use orderbill_core::money::Money;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Line {
///     #[serde(with = "orderbill_core::money::decimal")]
///     price: Money,
/// }
///
/// let line: Line = serde_json::from_str(r#"{"price": 12.5}"#).unwrap();
/// assert_eq!(line.price.cents(), 1250);
/// assert_eq!(serde_json::to_string(&line).unwrap(), r#"{"price":12.5}"#);
/// ```
pub mod decimal {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Money;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DecimalRepr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.to_major())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match DecimalRepr::deserialize(deserializer)? {
            DecimalRepr::Number(value) => Money::from_major(value),
            DecimalRepr::Text(text) => Money::parse_decimal(&text),
        };

        parsed.ok_or_else(|| D::Error::custom("expected a finite rupee amount"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
