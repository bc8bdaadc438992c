use std::str::FromStr;

use lazy_static::lazy_static;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::errors::*;

/// Textual zero, the initial value of every operand
pub(crate) const ZERO: &str = "0";

lazy_static! {
    /// High precision constants available via `set_constant`. Names are caseinsensitive
    pub(crate) static ref CONSTANTS: Vec<(&'static str, Decimal)> = vec![
        ("pi", Decimal::from_i128_with_scale(31_415_926_535_897_932_384_626_433_833, 28)),
        ("pi2", Decimal::from_i128_with_scale(15_707_963_267_948_966_192_313_216_916, 28)),
        ("e", Decimal::from_i128_with_scale(27_182_818_284_590_452_353_602_874_714, 28)),
        ("ln2", Decimal::from_i128_with_scale(6_931_471_805_599_453_094_172_321_215, 28)),
        ("ln10", Decimal::from_i128_with_scale(23_025_850_929_940_456_840_179_914_547, 28)),
        ("phi", Decimal::from_i128_with_scale(16_180_339_887_498_948_482_045_868_344, 28)),
    ];
    pub(crate) static ref PI: Decimal = CONSTANTS[0].1;
}

/// Converts an operand string to a decimal.
/// Accepts an optional sign and a trailing decimal point (`12.` is `12`);
/// underscores are not allowed, unlike the engine's own parser
pub(crate) fn parse(s: &str) -> CalcResult<Decimal> {
    let t = s.trim();
    if t.is_empty() || t.contains('_') {
        return Err(CalcError::InvalidNumber(s.to_owned()));
    }
    let t = t.strip_suffix('.').unwrap_or(t);
    Decimal::from_str(t).map_err(|_| CalcError::InvalidNumber(s.to_owned()))
}

/// Converts a decimal to the canonical operand string: no trailing zeros,
/// no exponent and never `-0`
pub(crate) fn format(d: Decimal) -> String {
    if d.is_zero() {
        return ZERO.to_owned();
    }
    d.normalize().to_string()
}

/// Normalizes an operand string, e.g. `1.500` -> `1.5`, `-0` -> `0`
pub fn normalize(s: &str) -> CalcResult {
    Ok(format(parse(s)?))
}

pub(crate) fn is_zero(s: &str) -> bool {
    parse(s).map(|d| d.is_zero()).unwrap_or(false)
}

/// Integer part (truncated towards zero) of a decimal as a big integer
pub(crate) fn to_bigint(d: &Decimal) -> CalcResult<BigInt> {
    match d.trunc().to_i128() {
        Some(i) => Ok(BigInt::from(i)),
        None => Err(CalcError::Overflow(d.to_string())),
    }
}

/// Converts a big integer back to a decimal; `what` names the operation for
/// the error message when the value does not fit
pub(crate) fn from_bigint(i: &BigInt, what: &str) -> CalcResult<Decimal> {
    Decimal::from_str(&i.to_string()).map_err(|_| CalcError::Overflow(what.to_owned()))
}

/// Returns a constant value by its name. Name is caseinsensitive
pub fn constant(name: &str) -> CalcResult {
    let low = name.to_lowercase();
    for (cname, value) in CONSTANTS.iter() {
        if *cname == low {
            return Ok(format(*value));
        }
    }
    Err(CalcError::UnknownConstant(name.to_owned()))
}

/// Names of all predefined constants
pub fn constant_names() -> Vec<&'static str> {
    CONSTANTS.iter().map(|(name, _)| *name).collect()
}
