//! # Button-press calculator engine
//!
//! The library implements the logic behind a desk calculator: digits and
//! operators are "pressed" one by one, and the engine keeps track of the
//! operands, the pending operator and the history. All values are exact
//! decimal strings, so `0.1 + 0.2` is `0.3`.
//!
//! Chaining works like on a real calculator:
//! * `5 + 3 +` evaluates `5 + 3` before the second `+` is applied
//! * `5 + 3 = = =` gives `8`, `11` and `14`: a bare `=` repeats the last
//!   operation with the last second operand
//! * `200 ÷ 4 %` gives `5000` and `200 × 4 %` gives `8`
//! * `5 + 9 sqrt =` gives `8`: a function result is the second operand of a
//!   pending operator
//!
//! Example:
//! ```
//! use qcalc_lib::{Calculator, Operator};
//!
//! let mut calc = Calculator::new();
//! calc.add_digit('5');
//! calc.binary_operator(Operator::Add).unwrap();
//! calc.add_digit('3');
//! calc.equals().unwrap();
//! assert_eq!(calc.current_operand(), "8");
//! calc.equals().unwrap();
//! assert_eq!(calc.current_operand(), "11");
//! ```
//!
//! Binary operators: `+`, `-`, `×`, `÷`, `mod` (the remainder is never
//! negative), `pow`, `root`, and bitwise `and`, `or`, `xor`, `nand`,
//! `nor`, `xnor`, `<<`, `>>`.
//!
//! Functions of the current operand: reciprocal, square, square root, `sin`,
//! `cos`, `tan` (degrees), factorial, `10^x`, integer and fractional parts,
//! bitwise `not`.
//!
//! Bitwise operations work with non-negative integers of a fixed word size
//! (0, 4, 8, 16, 32 or 64 bits; 0 - unlimited). The calculator truncates
//! their operands to integers and drops the sign; the functions in `math`
//! reject negative operands instead.
//!
//! Numbers can be typed in binary, octal, decimal or hexadecimal (see
//! `Radix`). The value is always kept in decimal form, only the input buffer
//! uses the selected radix.
//!
//! Predefined constants:
//! * `PI` - 3.14159...
//! * `PI2` - PI / 2
//! * `E` - 2.71828...
//! * `LN2`, `LN10` - natural logarithms of 2 and 10
//! * `PHI` - golden section - 1.6180...
//!
//! Precision is the one of the decimal engine: 28 significant digits.
//! Results that do not fit are reported as errors, never wrapped.

#[macro_use]
extern crate pest_derive;

pub mod calculator;
pub mod config;
pub mod errors;
pub mod format;
pub mod math;
pub mod memory;
pub mod operator;
mod parse;
pub mod radix;
pub mod record;
pub mod units;
pub mod value;

pub use crate::calculator::Calculator;
pub use crate::config::CalcConfig;
pub use crate::errors::{CalcError, CalcResult};
pub use crate::memory::Memory;
pub use crate::operator::Operator;
pub use crate::radix::{Radix, RadixConverter};
pub use crate::record::{Record, RecordOperator, RecordStore};
pub use crate::units::UnitConverter;
