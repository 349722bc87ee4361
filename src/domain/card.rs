//! Card field validation and formatting.
//!
//! The checks here are illustrative (checksum and expiry shape), not a
//! substitute for PCI-compliant card handling.

use chrono::{Datelike, NaiveDate};
use std::ops::RangeInclusive;

/// Accepted lengths for a sanitized card number. Checked before the Luhn
/// checksum: an empty digit string sums to 0 and would trivially pass it.
pub const CARD_NUMBER_LENGTHS: RangeInclusive<usize> = 12..=19;

/// Card fields as entered by the user. Transient: consumed by validation
/// and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardDetails {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
    pub holder_name: String,
}

impl CardDetails {
    pub fn has_all_fields(&self) -> bool {
        !(self.number.trim().is_empty()
            || self.expiry.trim().is_empty()
            || self.cvv.trim().is_empty()
            || self.holder_name.trim().is_empty())
    }
}

/// Card brand detected from the leading digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Unknown,
}

impl CardBrand {
    pub fn detect(digits: &str) -> CardBrand {
        let prefix: String = digits.chars().take(2).collect();
        match prefix.as_str() {
            "34" | "37" => CardBrand::Amex,
            "51" | "52" | "53" | "54" | "55" => CardBrand::Mastercard,
            _ if prefix.starts_with('4') => CardBrand::Visa,
            _ => CardBrand::Unknown,
        }
    }
}

/// Strips everything except ASCII digits.
pub fn sanitize_card_number(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Luhn checksum over an already-sanitized digit string.
///
/// Doubles every second digit from the right, folding doubled values above
/// nine back into a single digit. Any non-digit character fails the check.
/// An empty string sums to 0 and passes; callers reject empty/short input
/// via [`CARD_NUMBER_LENGTHS`] first.
pub fn luhn_valid(digits: &str) -> bool {
    let mut sum = 0u32;
    let mut double = false;
    for c in digits.chars().rev() {
        let Some(mut n) = c.to_digit(10) else {
            return false;
        };
        if double {
            n *= 2;
            if n > 9 {
                n -= 9;
            }
        }
        sum += n;
        double = !double;
    }
    sum % 10 == 0
}

/// Validates an `MM/YY` expiry string against `today`.
///
/// Two-digit years are resolved with the POSIX `%y` pivot: 69-99 map to
/// 1969-1999 and 00-68 to 2000-2068, so `12/99` reads as December 1999
/// and is rejected as expired. A card expiring in the current month is
/// still valid.
pub fn is_valid_expiry(text: &str, today: NaiveDate) -> bool {
    let Some((month_text, year_text)) = text.split_once('/') else {
        return false;
    };
    if month_text.len() != 2 || year_text.len() != 2 {
        return false;
    }
    let (Ok(month), Ok(year)) = (month_text.parse::<u32>(), year_text.parse::<u32>()) else {
        return false;
    };
    if !(1..=12).contains(&month) {
        return false;
    }
    let full_year = if year >= 69 {
        1900 + year as i32
    } else {
        2000 + year as i32
    };
    (full_year, month) >= (today.year(), today.month())
}

/// Groups digits into blocks of four, the way card inputs render them.
pub fn format_card_number(input: &str) -> String {
    let digits = sanitize_card_number(input);
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 4);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            formatted.push(' ');
        }
        formatted.push(c);
    }
    formatted
}

/// Inserts the `/` separator after the month digits, truncating to `MM/YY`.
pub fn format_expiry(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 2 {
        return digits;
    }
    let (month, year) = digits.split_at(2);
    let year: String = year.chars().take(2).collect();
    format!("{month}/{year}")
}
