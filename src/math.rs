//! Stateless operations over exact decimal strings.
//!
//! Every function parses its operands, computes with the decimal engine and
//! returns the canonical operand string (see `value::normalize`). Results that
//! do not fit the engine produce `CalcError::Overflow` instead of a rounded or
//! wrapped value.

use num_bigint::BigInt;
use num_traits::{FromPrimitive, One, ToPrimitive, Zero};
use rust_decimal::{Decimal, MathematicalOps};

use crate::errors::*;
use crate::radix::{integer_from_radix, integer_to_radix, Radix};
use crate::value::{format, from_bigint, parse, to_bigint, PI, ZERO};

/// Width in bits of the emulated register; 0 means unlimited
pub type WordSize = u32;
pub const WORD_SIZES: [WordSize; 6] = [0, 4, 8, 16, 32, 64];

// trig results are approximations, extra digits are noise
const TRIG_DECIMAL_PLACES: u32 = 20;
// 28! is already out of the engine range
const MAX_FACTORIAL: u64 = 100;
const MAX_UNBOUNDED_SHIFT: usize = 128;
const ROOT_ITERATIONS: usize = 200;

pub fn validate_word_size(word_size: WordSize) -> CalcResult<WordSize> {
    if WORD_SIZES.contains(&word_size) {
        Ok(word_size)
    } else {
        Err(CalcError::InvalidWordSize(word_size))
    }
}

macro_rules! checked_op {
    ($id:ident, $checked:ident, $sym:expr) => {
        pub fn $id(lhs: &str, rhs: &str) -> CalcResult {
            let a = parse(lhs)?;
            let b = parse(rhs)?;
            match a.$checked(b) {
                Some(r) => Ok(format(r)),
                None => Err(CalcError::Overflow(format!("{} {} {}", lhs, $sym, rhs))),
            }
        }
    };
}

checked_op!(add, checked_add, "+");
checked_op!(sub, checked_sub, "-");
checked_op!(mul, checked_mul, "×");

pub fn div(dividend: &str, divisor: &str) -> CalcResult {
    let a = parse(dividend)?;
    let b = parse(divisor)?;
    if b.is_zero() {
        return Err(CalcError::DivisionByZero(dividend.to_owned()));
    }
    match a.checked_div(b) {
        Some(r) => Ok(format(r)),
        None => Err(CalcError::Overflow(format!("{} ÷ {}", dividend, divisor))),
    }
}

/// Euclidean remainder, never negative: `7 mod -3` is `1`, `-7 mod 3` is `2`
pub fn modulo(dividend: &str, divisor: &str) -> CalcResult {
    let a = parse(dividend)?;
    let b = parse(divisor)?;
    if b.is_zero() {
        return Err(CalcError::DivisionByZero(dividend.to_owned()));
    }
    let r = match a.checked_rem(b) {
        Some(r) => r,
        None => return Err(CalcError::Overflow(format!("{} mod {}", dividend, divisor))),
    };
    if r.is_sign_negative() && !r.is_zero() {
        Ok(format(r + b.abs()))
    } else {
        Ok(format(r))
    }
}

// exact power by squaring, None on overflow
fn powi(base: Decimal, exp: u64) -> Option<Decimal> {
    let mut exp = exp;
    let mut result = Decimal::ONE;
    let mut square = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.checked_mul(square)?;
        }
        exp >>= 1;
        if exp > 0 {
            square = square.checked_mul(square)?;
        }
    }
    Some(result)
}

/// Integer exponents are computed exactly, fractional ones are approximated
/// by the engine and are defined only for non-negative bases
pub fn pow(base: &str, exponent: &str) -> CalcResult {
    let b = parse(base)?;
    let e = parse(exponent)?;
    let what = || format!("{} pow {}", base, exponent);

    if e.fract().is_zero() {
        let n = e.to_i64().ok_or_else(|| CalcError::Overflow(what()))?;
        if b.is_zero() && n < 0 {
            return Err(CalcError::DivisionByZero(base.to_owned()));
        }
        let r = powi(b, n.unsigned_abs()).ok_or_else(|| CalcError::Overflow(what()))?;
        if n >= 0 {
            return Ok(format(r));
        }
        return Decimal::ONE
            .checked_div(r)
            .map(format)
            .ok_or_else(|| CalcError::Overflow(what()));
    }

    if b.is_zero() {
        if e.is_sign_negative() {
            return Err(CalcError::DivisionByZero(base.to_owned()));
        }
        return Ok(ZERO.to_owned());
    }
    if b.is_sign_negative() {
        return Err(CalcError::UndefinedResult(what()));
    }
    b.checked_powd(e).map(format).ok_or_else(|| CalcError::Overflow(what()))
}

// Newton's estimate often stops one unit in the last place away from an
// exact root; prefer the short value if it is exact
fn tidy_root(x: Decimal, radicand: Decimal, n: u64) -> Decimal {
    let candidate = x.round_dp(TRIG_DECIMAL_PLACES).normalize();
    match powi(candidate, n) {
        Some(p) if p == radicand => candidate,
        _ => x,
    }
}

fn nth_root(a: Decimal, n: u64) -> Option<Decimal> {
    if a.is_zero() || n == 1 {
        return Some(a);
    }
    if n == 2 {
        return a.sqrt().map(|r| tidy_root(r, a, 2));
    }

    let nd = Decimal::from(n);
    let n1 = nd - Decimal::ONE;
    let guess = a.to_f64().map(|f| f.powf(1.0 / n as f64)).and_then(Decimal::from_f64);
    let mut x = match guess {
        Some(g) if !g.is_zero() => g,
        _ => Decimal::ONE,
    };
    for _ in 0..ROOT_ITERATIONS {
        let p = powi(x, n - 1)?;
        if p.is_zero() {
            break;
        }
        let next = n1.checked_mul(x)?.checked_add(a.checked_div(p)?)?.checked_div(nd)?;
        if next == x {
            break;
        }
        x = next;
    }
    Some(tidy_root(x, a, n))
}

/// `index`-th root of `radicand`. Odd integer roots of negative numbers keep
/// the sign, all other roots of negative numbers are rejected
pub fn root(radicand: &str, index: &str) -> CalcResult {
    let x = parse(radicand)?;
    let n = parse(index)?;
    let what = || format!("{} root {}", radicand, index);

    if n.is_zero() {
        return Err(CalcError::DivisionByZero(radicand.to_owned()));
    }
    if n.is_sign_negative() {
        return Err(CalcError::InvalidRoot(what()));
    }
    let is_integer = n.fract().is_zero();
    let odd = is_integer && n % Decimal::from(2) == Decimal::ONE;
    let negative = x.is_sign_negative() && !x.is_zero();
    if negative && !odd {
        return Err(CalcError::InvalidRoot(what()));
    }

    let magnitude = x.abs();
    let r = if is_integer {
        let k = n.to_u64().ok_or_else(|| CalcError::Overflow(what()))?;
        nth_root(magnitude, k).ok_or_else(|| CalcError::Overflow(what()))?
    } else if magnitude.is_zero() {
        Decimal::ZERO
    } else {
        let inv = Decimal::ONE.checked_div(n).ok_or_else(|| CalcError::Overflow(what()))?;
        magnitude.checked_powd(inv).ok_or_else(|| CalcError::Overflow(what()))?
    };
    Ok(format(if negative { -r } else { r }))
}

pub fn sqrt(value: &str) -> CalcResult {
    let x = parse(value)?;
    if x.is_sign_negative() && !x.is_zero() {
        return Err(CalcError::NegativeSqrt(value.to_owned()));
    }
    match nth_root(x, 2) {
        Some(r) => Ok(format(r)),
        None => Err(CalcError::Overflow(format!("sqrt {}", value))),
    }
}

pub fn square(value: &str) -> CalcResult {
    mul(value, value)
}

pub fn reciprocal(value: &str) -> CalcResult {
    div("1", value)
}

/// Ten raised to `exponent`
pub fn exp10(exponent: &str) -> CalcResult {
    pow("10", exponent)
}

/// Factorial of a non-negative integer
pub fn factorial(value: &str) -> CalcResult {
    let x = parse(value)?;
    if x.is_sign_negative() && !x.is_zero() {
        return Err(CalcError::NegativeFactorial(value.to_owned()));
    }
    if !x.fract().is_zero() {
        return Err(CalcError::NotInteger("factorial".to_owned()));
    }
    let what = format!("{}!", value);
    let n = match x.to_u64() {
        Some(n) if n <= MAX_FACTORIAL => n,
        _ => return Err(CalcError::Overflow(what)),
    };

    let mut res = BigInt::one();
    for i in 2..=n {
        res *= i;
    }
    Ok(format(from_bigint(&res, &what)?))
}

pub fn abs(value: &str) -> CalcResult {
    Ok(format(parse(value)?.abs()))
}

/// Largest integer not greater than the value: `-2.5` -> `-3`
pub fn integer_part(value: &str) -> CalcResult {
    Ok(format(parse(value)?.floor()))
}

/// `value - floor(value)`, always non-negative: `-2.25` -> `0.75`
pub fn fractional_part(value: &str) -> CalcResult {
    let x = parse(value)?;
    Ok(format(x - x.floor()))
}

pub fn constant(name: &str) -> CalcResult {
    crate::value::constant(name)
}

// ---------------------------------------------
// trigonometry: arguments are degrees

// (angle reduced into (-360, 360), angle in radians)
fn to_radians(degrees: &str) -> CalcResult<(Decimal, Decimal)> {
    let d = parse(degrees)?;
    let reduced = d % Decimal::from(360);
    let rad = reduced * *PI / Decimal::from(180);
    Ok((reduced, rad))
}

// sine and cosine at multiples of 90 degrees, computed exactly
fn quadrant_value(reduced: Decimal, cosine: bool) -> Option<Decimal> {
    let q = reduced / Decimal::from(90);
    if !q.fract().is_zero() {
        return None;
    }
    let q = (q.to_i64()? % 4 + 4) % 4;
    let q = if cosine { (q + 1) % 4 } else { q };
    Some(match q {
        0 | 2 => Decimal::ZERO,
        1 => Decimal::ONE,
        _ => Decimal::NEGATIVE_ONE,
    })
}

fn finish_trig(r: Option<Decimal>, name: &str, degrees: &str) -> CalcResult {
    match r {
        Some(v) => Ok(format(v.round_dp(TRIG_DECIMAL_PLACES))),
        None => Err(CalcError::Overflow(format!("{} {}", name, degrees))),
    }
}

pub fn sin(degrees: &str) -> CalcResult {
    let (reduced, rad) = to_radians(degrees)?;
    if let Some(v) = quadrant_value(reduced, false) {
        return Ok(format(v));
    }
    finish_trig(rad.checked_sin(), "sin", degrees)
}

pub fn cos(degrees: &str) -> CalcResult {
    let (reduced, rad) = to_radians(degrees)?;
    if let Some(v) = quadrant_value(reduced, true) {
        return Ok(format(v));
    }
    finish_trig(rad.checked_cos(), "cos", degrees)
}

/// Tangent is undefined where the cosine is zero: 90, 270, -90 degrees...
pub fn tan(degrees: &str) -> CalcResult {
    let (reduced, rad) = to_radians(degrees)?;
    if let (Some(s), Some(c)) = (quadrant_value(reduced, false), quadrant_value(reduced, true)) {
        if c.is_zero() {
            return Err(CalcError::UndefinedResult(format!("tan {}", degrees)));
        }
        return Ok(format(s / c));
    }
    finish_trig(rad.checked_tan(), "tan", degrees)
}

// ---------------------------------------------
// bitwise operations

fn bit_operand(value: &str) -> CalcResult<BigInt> {
    let d = parse(value)?;
    if d.is_sign_negative() && !d.is_zero() {
        return Err(CalcError::NegativeBitOperand(value.to_owned()));
    }
    to_bigint(&d.floor())
}

// wrap-around of a register: the value modulo 2^word_size
fn truncate(i: BigInt, word_size: WordSize) -> BigInt {
    if word_size == 0 {
        i
    } else {
        i % (BigInt::one() << word_size as usize)
    }
}

fn finish_bits(i: BigInt, what: &str) -> CalcResult {
    Ok(format(from_bigint(&i, what)?))
}

/// Drops the fractional part and wraps the value to `word_size` bits
pub fn truncate_to_bit_size(value: &str, word_size: WordSize) -> CalcResult {
    let i = bit_operand(value)?;
    finish_bits(truncate(i, word_size), value)
}

// Operands are written as binary strings, padded to the same length and
// combined digit by digit; the result is wrapped to the word size
fn combine_bits(lhs: &str, rhs: &str, word_size: WordSize, name: &str, f: fn(bool, bool) -> bool) -> CalcResult {
    let x = integer_to_radix(&bit_operand(lhs)?, Radix::Binary);
    let y = integer_to_radix(&bit_operand(rhs)?, Radix::Binary);
    let width = x.len().max(y.len());
    let x = format!("{:0>width$}", x, width = width);
    let y = format!("{:0>width$}", y, width = width);

    let bits: String = x
        .chars()
        .zip(y.chars())
        .map(|(p, q)| if f(p == '1', q == '1') { '1' } else { '0' })
        .collect();
    let r = integer_from_radix(&bits, Radix::Binary)?;
    finish_bits(truncate(r, word_size), &format!("{} {} {}", lhs, name, rhs))
}

pub fn bitwise_and(lhs: &str, rhs: &str, word_size: WordSize) -> CalcResult {
    combine_bits(lhs, rhs, word_size, "and", |p, q| p && q)
}

pub fn bitwise_or(lhs: &str, rhs: &str, word_size: WordSize) -> CalcResult {
    combine_bits(lhs, rhs, word_size, "or", |p, q| p || q)
}

pub fn bitwise_xor(lhs: &str, rhs: &str, word_size: WordSize) -> CalcResult {
    combine_bits(lhs, rhs, word_size, "xor", |p, q| p != q)
}

/// Complement of the binary form zero-padded to the word size, then wrapped:
/// `not 5` with 8 bits is `11111010` = `250`
pub fn bitwise_not(value: &str, word_size: WordSize) -> CalcResult {
    let x = integer_to_radix(&bit_operand(value)?, Radix::Binary);
    let width = x.len().max(word_size as usize);
    let inverted: String = format!("{:0>width$}", x, width = width)
        .chars()
        .map(|c| if c == '1' { '0' } else { '1' })
        .collect();
    let r = integer_from_radix(&inverted, Radix::Binary)?;
    finish_bits(truncate(r, word_size), &format!("not {}", value))
}

macro_rules! negated_bitwise_op {
    ($id:ident, $base:ident) => {
        pub fn $id(lhs: &str, rhs: &str, word_size: WordSize) -> CalcResult {
            bitwise_not(&$base(lhs, rhs, word_size)?, word_size)
        }
    };
}

negated_bitwise_op!(bitwise_nand, bitwise_and);
negated_bitwise_op!(bitwise_nor, bitwise_or);
negated_bitwise_op!(bitwise_xnor, bitwise_xor);

fn shift_amount(value: &str) -> CalcResult<usize> {
    bit_operand(value)?
        .to_usize()
        .ok_or_else(|| CalcError::Overflow(format!("shift by {}", value)))
}

pub fn bitwise_shift_left(value: &str, amount: &str, word_size: WordSize) -> CalcResult {
    let x = bit_operand(value)?;
    let s = shift_amount(amount)?;
    if x.is_zero() || (word_size > 0 && s >= word_size as usize) {
        return Ok(ZERO.to_owned());
    }
    let what = format!("{} << {}", value, amount);
    if s > MAX_UNBOUNDED_SHIFT {
        return Err(CalcError::Overflow(what));
    }
    finish_bits(truncate(x << s, word_size), &what)
}

pub fn bitwise_shift_right(value: &str, amount: &str, word_size: WordSize) -> CalcResult {
    let x = bit_operand(value)?;
    let s = shift_amount(amount)?;
    if s as u64 >= x.bits() {
        return Ok(ZERO.to_owned());
    }
    finish_bits(truncate(x >> s, word_size), &format!("{} >> {}", value, amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close_to(value: CalcResult, expected: &str, tolerance: &str) -> bool {
        let v = parse(&value.unwrap()).unwrap();
        let e = parse(expected).unwrap();
        (v - e).abs() <= parse(tolerance).unwrap()
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(add("0.1", "0.2"), Ok("0.3".to_string()));
        assert_eq!(sub("5", "7.5"), Ok("-2.5".to_string()));
        assert_eq!(mul("1.5", "4"), Ok("6".to_string()));
        assert_eq!(div("1", "4"), Ok("0.25".to_string()));
        assert_eq!(div("1", "0"), Err(CalcError::DivisionByZero("1".to_string())));
        assert_eq!(
            div("1", "3"),
            Ok("0.3333333333333333333333333333".to_string())
        );
        assert!(matches!(
            mul("79228162514264337593543950335", "2"),
            Err(CalcError::Overflow(..))
        ));
        assert_eq!(add("abc", "1"), Err(CalcError::InvalidNumber("abc".to_string())));
    }

    #[test]
    fn test_modulo() {
        assert_eq!(modulo("7", "3"), Ok("1".to_string()));
        assert_eq!(modulo("7", "-3"), Ok("1".to_string()));
        assert_eq!(modulo("-7", "3"), Ok("2".to_string()));
        assert_eq!(modulo("-7", "-3"), Ok("2".to_string()));
        assert_eq!(modulo("-5.5", "2"), Ok("0.5".to_string()));
        assert_eq!(modulo("5.5", "2"), Ok("1.5".to_string()));
        assert_eq!(modulo("6", "3"), Ok("0".to_string()));
        assert_eq!(modulo("1", "0"), Err(CalcError::DivisionByZero("1".to_string())));
    }

    #[test]
    fn test_power() {
        assert_eq!(pow("2", "10"), Ok("1024".to_string()));
        assert_eq!(pow("2", "-2"), Ok("0.25".to_string()));
        assert_eq!(pow("1.1", "2"), Ok("1.21".to_string()));
        assert_eq!(pow("-2", "3"), Ok("-8".to_string()));
        assert_eq!(pow("5", "0"), Ok("1".to_string()));
        assert_eq!(pow("0", "-1"), Err(CalcError::DivisionByZero("0".to_string())));
        assert!(matches!(pow("-8", "0.5"), Err(CalcError::UndefinedResult(..))));
        assert!(matches!(pow("10", "40"), Err(CalcError::Overflow(..))));
        assert!(close_to(pow("4", "0.5"), "2", "0.000001"));
        assert_eq!(exp10("3"), Ok("1000".to_string()));
        assert_eq!(exp10("-2"), Ok("0.01".to_string()));
    }

    #[test]
    fn test_roots() {
        assert_eq!(sqrt("9"), Ok("3".to_string()));
        assert_eq!(sqrt("0"), Ok("0".to_string()));
        assert_eq!(sqrt("2.25"), Ok("1.5".to_string()));
        assert!(close_to(sqrt("2"), "1.41421356237309504880168872", "0.0000000000000000000000001"));
        assert_eq!(sqrt("-4"), Err(CalcError::NegativeSqrt("-4".to_string())));
        assert_eq!(root("27", "3"), Ok("3".to_string()));
        assert_eq!(root("-27", "3"), Ok("-3".to_string()));
        assert_eq!(root("16", "4"), Ok("2".to_string()));
        assert_eq!(root("16", "2"), Ok("4".to_string()));
        assert!(matches!(root("-16", "2"), Err(CalcError::InvalidRoot(..))));
        assert!(matches!(root("16", "-2"), Err(CalcError::InvalidRoot(..))));
        assert_eq!(root("16", "0"), Err(CalcError::DivisionByZero("16".to_string())));
        assert!(close_to(root("10", "3"), "2.1544346900318837217592935665", "0.00000000000000000001"));
    }

    #[test]
    fn test_unary() {
        assert_eq!(factorial("0"), Ok("1".to_string()));
        assert_eq!(factorial("5"), Ok("120".to_string()));
        assert_eq!(factorial("20"), Ok("2432902008176640000".to_string()));
        assert_eq!(factorial("-1"), Err(CalcError::NegativeFactorial("-1".to_string())));
        assert!(matches!(factorial("2.5"), Err(CalcError::NotInteger(..))));
        assert!(matches!(factorial("30"), Err(CalcError::Overflow(..))));
        assert!(matches!(factorial("100000"), Err(CalcError::Overflow(..))));
        assert_eq!(reciprocal("8"), Ok("0.125".to_string()));
        assert_eq!(reciprocal("0"), Err(CalcError::DivisionByZero("1".to_string())));
        assert_eq!(square("-1.5"), Ok("2.25".to_string()));
        assert_eq!(integer_part("2.75"), Ok("2".to_string()));
        assert_eq!(integer_part("-2.5"), Ok("-3".to_string()));
        assert_eq!(fractional_part("2.75"), Ok("0.75".to_string()));
        assert_eq!(fractional_part("-2.25"), Ok("0.75".to_string()));
        assert_eq!(abs("-3.5"), Ok("3.5".to_string()));
    }

    #[test]
    fn test_trigonometry() {
        assert_eq!(sin("0"), Ok("0".to_string()));
        assert_eq!(sin("90"), Ok("1".to_string()));
        assert_eq!(sin("-90"), Ok("-1".to_string()));
        assert_eq!(sin("540"), Ok("0".to_string()));
        assert_eq!(cos("0"), Ok("1".to_string()));
        assert_eq!(cos("180"), Ok("-1".to_string()));
        assert_eq!(cos("90"), Ok("0".to_string()));
        assert_eq!(tan("180"), Ok("0".to_string()));
        assert!(matches!(tan("90"), Err(CalcError::UndefinedResult(..))));
        assert!(matches!(tan("-270"), Err(CalcError::UndefinedResult(..))));
        assert!(close_to(sin("30"), "0.5", "0.00000001"));
        assert!(close_to(cos("60"), "0.5", "0.00000001"));
        assert!(close_to(tan("45"), "1", "0.00000001"));
        assert!(close_to(sin("390"), "0.5", "0.00000001"));
    }

    #[test]
    fn test_bitwise() {
        assert_eq!(bitwise_and("12", "10", 8), Ok("8".to_string()));
        assert_eq!(bitwise_or("12", "10", 8), Ok("14".to_string()));
        assert_eq!(bitwise_xor("12", "10", 8), Ok("6".to_string()));
        assert_eq!(bitwise_not("5", 8), Ok("250".to_string()));
        assert_eq!(bitwise_not("5", 4), Ok("10".to_string()));
        assert_eq!(bitwise_not("5", 0), Ok("2".to_string()));
        assert_eq!(bitwise_not("0", 64), Ok("18446744073709551615".to_string()));
        assert_eq!(bitwise_nand("12", "10", 8), Ok("247".to_string()));
        assert_eq!(bitwise_nor("12", "10", 8), Ok("241".to_string()));
        assert_eq!(bitwise_xnor("12", "10", 8), Ok("249".to_string()));
        assert_eq!(bitwise_and("12.9", "10.2", 8), Ok("8".to_string()));
        assert_eq!(bitwise_or("256", "1", 8), Ok("1".to_string()));
        assert_eq!(bitwise_or("256", "1", 0), Ok("257".to_string()));
        assert_eq!(
            bitwise_and("-1", "3", 8),
            Err(CalcError::NegativeBitOperand("-1".to_string()))
        );
        assert_eq!(bitwise_not("-1", 8), Err(CalcError::NegativeBitOperand("-1".to_string())));
    }

    #[test]
    fn test_shifts() {
        assert_eq!(bitwise_shift_left("1", "3", 8), Ok("8".to_string()));
        assert_eq!(bitwise_shift_left("255", "1", 8), Ok("254".to_string()));
        assert_eq!(bitwise_shift_left("1", "8", 8), Ok("0".to_string()));
        assert_eq!(bitwise_shift_left("1", "70", 0), Ok("1180591620717411303424".to_string()));
        assert!(matches!(bitwise_shift_left("1", "200", 0), Err(CalcError::Overflow(..))));
        assert_eq!(bitwise_shift_right("16", "2", 8), Ok("4".to_string()));
        assert_eq!(bitwise_shift_right("15", "1", 8), Ok("7".to_string()));
        assert_eq!(bitwise_shift_right("15", "100", 8), Ok("0".to_string()));
        assert_eq!(
            bitwise_shift_right("16", "-1", 8),
            Err(CalcError::NegativeBitOperand("-1".to_string()))
        );
        assert_eq!(truncate_to_bit_size("300.5", 8), Ok("44".to_string()));
        assert_eq!(truncate_to_bit_size("300.5", 0), Ok("300".to_string()));
    }

    #[test]
    fn test_word_sizes() {
        for w in WORD_SIZES.iter() {
            assert_eq!(validate_word_size(*w), Ok(*w));
        }
        assert_eq!(validate_word_size(12), Err(CalcError::InvalidWordSize(12)));
    }

    proptest! {
        #[test]
        fn add_then_sub_round_trips(a in -1_000_000_000_000i64..1_000_000_000_000i64, a_scale in 0u32..10,
                                    b in -1_000_000_000_000i64..1_000_000_000_000i64, b_scale in 0u32..10) {
            let a = format(Decimal::new(a, a_scale));
            let b = format(Decimal::new(b, b_scale));
            let sum = add(&a, &b).unwrap();
            prop_assert_eq!(sub(&sum, &b).unwrap(), a);
        }
    }
}
