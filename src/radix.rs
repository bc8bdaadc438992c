use std::fmt;

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::*;
use crate::parse::parse_literal;
use crate::value::{format, from_bigint, parse, to_bigint};

/// Fractional digits produced when converting from decimal. The expansion is
/// truncated, not rounded, so `0.1` in binary is only an approximation
pub const MAX_FRACTION_DIGITS: usize = 32;

/// Input and display modes of the calculator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Radix {
    #[serde(rename = "bin")]
    Binary,
    #[serde(rename = "oct")]
    Octal,
    #[default]
    #[serde(rename = "dec")]
    Decimal,
    #[serde(rename = "hex")]
    Hexadecimal,
}

impl Radix {
    pub fn base(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }

    /// Checks if a character is a digit of this radix. Hexadecimal digits
    /// can be lowercase
    pub fn is_digit(self, c: char) -> bool {
        c.is_digit(self.base())
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Radix::Binary => "bin",
            Radix::Octal => "oct",
            Radix::Decimal => "dec",
            Radix::Hexadecimal => "hex",
        };
        write!(f, "{}", name)
    }
}

/// Integer in the given radix: digits `0-9A-F`, no prefix
pub(crate) fn integer_to_radix(i: &BigInt, radix: Radix) -> String {
    i.to_str_radix(radix.base()).to_uppercase()
}

pub(crate) fn integer_from_radix(digits: &str, radix: Radix) -> CalcResult<BigInt> {
    match BigInt::parse_bytes(digits.as_bytes(), radix.base()) {
        Some(i) => Ok(i),
        None => Err(CalcError::InvalidNumber(digits.to_owned())),
    }
}

/// Keeps only characters that make sense for the radix: its digits, a single
/// decimal point and a leading minus. Used for pasted text
pub fn filter_characters(text: &str, radix: Radix) -> String {
    let kept: String = text
        .chars()
        .filter(|c| radix.is_digit(*c) || *c == '.' || *c == '-')
        .collect();
    let negative = kept.starts_with('-');
    let digits = kept.replace('-', "");
    let digits = if radix == Radix::Hexadecimal {
        digits.to_uppercase()
    } else {
        digits
    };

    let mut parts = digits.splitn(2, '.');
    let integer = parts.next().unwrap_or("");
    let mut result = if integer.is_empty() {
        "0".to_string()
    } else {
        integer.to_string()
    };
    if let Some(fraction) = parts.next() {
        result.push('.');
        result.push_str(&fraction.replace('.', ""));
    }
    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Converts exact decimal strings to and from binary, octal and hexadecimal
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadixConverter {
    max_fraction_digits: usize,
}

impl Default for RadixConverter {
    fn default() -> RadixConverter {
        RadixConverter {
            max_fraction_digits: MAX_FRACTION_DIGITS,
        }
    }
}

impl RadixConverter {
    pub fn new() -> Self {
        Default::default()
    }

    /// Converter that stops fractional expansion after `digits` digits
    pub fn with_fraction_digits(digits: usize) -> Self {
        RadixConverter {
            max_fraction_digits: digits,
        }
    }

    pub fn is_valid(&self, value: &str, radix: Radix) -> bool {
        parse_literal(value, radix).is_ok()
    }

    pub fn to_binary(&self, decimal: &str) -> CalcResult {
        self.from_decimal(decimal, Radix::Binary)
    }

    pub fn to_octal(&self, decimal: &str) -> CalcResult {
        self.from_decimal(decimal, Radix::Octal)
    }

    pub fn to_hexadecimal(&self, decimal: &str) -> CalcResult {
        self.from_decimal(decimal, Radix::Hexadecimal)
    }

    pub fn from_binary(&self, value: &str) -> CalcResult {
        self.to_decimal(value, Radix::Binary)
    }

    pub fn from_octal(&self, value: &str) -> CalcResult {
        self.to_decimal(value, Radix::Octal)
    }

    pub fn from_hexadecimal(&self, value: &str) -> CalcResult {
        self.to_decimal(value, Radix::Hexadecimal)
    }

    /// Converts a value between any two radixes via its exact decimal form
    pub fn convert(&self, value: &str, from: Radix, to: Radix) -> CalcResult {
        if from == to {
            return Ok(value.to_owned());
        }
        let decimal = self.to_decimal(value, from)?;
        self.from_decimal(&decimal, to)
    }

    /// Renders a decimal string in the given radix. The integer part is
    /// exact; the fraction is expanded digit by digit (multiply by radix,
    /// take the integer digit, subtract it) until it becomes zero or the
    /// digit limit is reached
    pub fn from_decimal(&self, decimal: &str, radix: Radix) -> CalcResult {
        let d = parse(decimal)?;
        if radix == Radix::Decimal {
            return Ok(format(d));
        }

        let negative = d.is_sign_negative() && !d.is_zero();
        let abs = d.abs();
        let int_part = abs.trunc();
        let mut fraction = abs - int_part;

        let mut result = integer_to_radix(&to_bigint(&int_part)?, radix);
        if !fraction.is_zero() {
            let base = Decimal::from(radix.base());
            result.push('.');
            for _ in 0..self.max_fraction_digits {
                if fraction.is_zero() {
                    break;
                }
                fraction *= base;
                let digit = fraction.trunc();
                let c = digit
                    .to_u32()
                    .and_then(|v| std::char::from_digit(v, radix.base()))
                    .ok_or_else(|| CalcError::InvalidNumber(decimal.to_owned()))?;
                result.push(c.to_ascii_uppercase());
                fraction -= digit;
            }
        }

        if negative {
            Ok(format!("-{}", result))
        } else {
            Ok(result)
        }
    }

    /// Parses a number written in the given radix into an exact decimal
    /// string. A trailing point is accepted and ignored
    pub fn to_decimal(&self, value: &str, radix: Radix) -> CalcResult {
        let lit = parse_literal(value, radix)?;
        let mut result = from_bigint(&integer_from_radix(lit.integer, radix)?, value)?;

        if let Some(fraction) = lit.fraction {
            let base = Decimal::from(radix.base());
            let mut weight = Decimal::ONE;
            for c in fraction.chars() {
                weight = weight
                    .checked_div(base)
                    .ok_or_else(|| CalcError::InvalidNumber(value.to_owned()))?;
                let digit = c.to_digit(radix.base()).unwrap_or(0);
                result = result
                    .checked_add(weight * Decimal::from(digit))
                    .ok_or_else(|| CalcError::Overflow(value.to_owned()))?;
            }
        }

        if lit.negative {
            result = -result;
        }
        Ok(format(result))
    }
}
