//! Button-press calculator.
//!
//! `Calculator` keeps the operands of a chain of operations the way a desk
//! calculator does: pressing a binary operator while another one is pending
//! evaluates the pending one first, pressing `=` again repeats the last
//! operation with the last second operand, and percent is applied to a
//! pending multiplication or division.
//!
//! Operands are exact decimal strings. The input buffer holds the value as it
//! is typed in the current radix.
//!
//! Any operation that fails leaves the calculator as it was before the call.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::CalcConfig;
use crate::errors::*;
use crate::math::{self, WordSize};
use crate::memory::Memory;
use crate::operator::Operator;
use crate::radix::{filter_characters, Radix, RadixConverter};
use crate::record::{Calculation, RecordOperator, RecordStore};
use crate::value::{self, ZERO};

pub const DEFAULT_WORD_SIZE: WordSize = 8;

fn rejected(e: CalcError) -> CalcError {
    debug!(error = %e, "operation rejected");
    e
}

// bitwise operators work with non-negative integers only
fn coerce_bit_operand(value: &str) -> CalcResult {
    let coerced = math::integer_part(&math::abs(value)?)?;
    if coerced != value {
        warn!(value, coerced = %coerced, "bitwise operand truncated to a non-negative integer");
    }
    Ok(coerced)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calculator {
    previous_operand: String,
    current_operand: String,
    /// second operand of the last binary operation, reused by a repeated `=`
    repeat_operand: String,
    input_buffer: String,
    pending_operator: Operator,
    repeat_operator: Operator,
    should_reset_on_next_digit: bool,
    radix: Radix,
    word_size: WordSize,
    memory: Memory,
    records: RecordStore,
    #[serde(skip)]
    converter: RadixConverter,
}

impl Default for Calculator {
    fn default() -> Calculator {
        Calculator {
            previous_operand: ZERO.to_owned(),
            current_operand: ZERO.to_owned(),
            repeat_operand: ZERO.to_owned(),
            input_buffer: ZERO.to_owned(),
            pending_operator: Operator::None,
            repeat_operator: Operator::None,
            should_reset_on_next_digit: false,
            radix: Radix::Decimal,
            word_size: DEFAULT_WORD_SIZE,
            memory: Memory::new(),
            records: RecordStore::new(),
            converter: RadixConverter::new(),
        }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Default::default()
    }

    /// Calculator with the radix and word size from the config
    pub fn with_config(config: &CalcConfig) -> CalcResult<Self> {
        config.validate()?;
        let mut calc = Calculator::new();
        calc.word_size = config.word_size;
        calc.radix = config.radix;
        Ok(calc)
    }

    // ---------------------------------------------
    // readers

    pub fn current_operand(&self) -> &str {
        &self.current_operand
    }
    pub fn previous_operand(&self) -> &str {
        &self.previous_operand
    }
    pub fn repeat_operand(&self) -> &str {
        &self.repeat_operand
    }
    /// Current operand as typed or displayed in the current radix
    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }
    pub fn pending_operator(&self) -> Operator {
        self.pending_operator
    }
    pub fn repeat_operator(&self) -> Operator {
        self.repeat_operator
    }
    pub fn should_reset_on_next_digit(&self) -> bool {
        self.should_reset_on_next_digit
    }
    pub fn radix(&self) -> Radix {
        self.radix
    }
    pub fn word_size(&self) -> WordSize {
        self.word_size
    }
    pub fn memory(&self) -> &Memory {
        &self.memory
    }
    pub fn records(&self) -> &RecordStore {
        &self.records
    }
    /// History access for memos and deletion
    pub fn records_mut(&mut self) -> &mut RecordStore {
        &mut self.records
    }

    // ---------------------------------------------
    // helpers

    fn render(&self, decimal: &str) -> String {
        match self.converter.from_decimal(decimal, self.radix) {
            Ok(s) => s,
            Err(..) => decimal.to_owned(),
        }
    }

    fn set_result(&mut self, value: String) {
        self.input_buffer = self.render(&value);
        self.current_operand = value;
    }

    // typed text becomes the current operand only if it is a valid number
    fn load_buffer(&mut self, buffer: String) -> CalcErrorResult {
        let decimal = self.converter.to_decimal(&buffer, self.radix)?;
        self.current_operand = decimal;
        self.input_buffer = buffer;
        Ok(())
    }

    fn binary(&self, op: Operator, lhs: &str, rhs: &str) -> CalcResult {
        let w = self.word_size;
        match op {
            Operator::Add => math::add(lhs, rhs),
            Operator::Sub => math::sub(lhs, rhs),
            Operator::Mul => math::mul(lhs, rhs),
            Operator::Div => math::div(lhs, rhs),
            Operator::Mod => math::modulo(lhs, rhs),
            Operator::Pow => math::pow(lhs, rhs),
            Operator::Root => math::root(lhs, rhs),
            Operator::BitAnd => math::bitwise_and(&coerce_bit_operand(lhs)?, &coerce_bit_operand(rhs)?, w),
            Operator::BitOr => math::bitwise_or(&coerce_bit_operand(lhs)?, &coerce_bit_operand(rhs)?, w),
            Operator::BitXor => math::bitwise_xor(&coerce_bit_operand(lhs)?, &coerce_bit_operand(rhs)?, w),
            Operator::BitNand => math::bitwise_nand(&coerce_bit_operand(lhs)?, &coerce_bit_operand(rhs)?, w),
            Operator::BitNor => math::bitwise_nor(&coerce_bit_operand(lhs)?, &coerce_bit_operand(rhs)?, w),
            Operator::BitXnor => math::bitwise_xnor(&coerce_bit_operand(lhs)?, &coerce_bit_operand(rhs)?, w),
            Operator::BitShiftLeft => {
                math::bitwise_shift_left(&coerce_bit_operand(lhs)?, &coerce_bit_operand(rhs)?, w)
            }
            Operator::BitShiftRight => {
                math::bitwise_shift_right(&coerce_bit_operand(lhs)?, &coerce_bit_operand(rhs)?, w)
            }
            Operator::None
            | Operator::Percent
            | Operator::BitNot
            | Operator::Reciprocal
            | Operator::SquareRoot
            | Operator::Square
            | Operator::Sin
            | Operator::Cos
            | Operator::Tan
            | Operator::Factorial
            | Operator::Exp10
            | Operator::IntegerPart
            | Operator::FractionalPart => Err(CalcError::InvalidOperator(op.to_string())),
        }
    }

    fn unary(&self, op: Operator, x: &str) -> CalcResult {
        match op {
            Operator::Reciprocal => math::reciprocal(x),
            Operator::SquareRoot => math::sqrt(x),
            Operator::Square => math::square(x),
            Operator::Sin => math::sin(x),
            Operator::Cos => math::cos(x),
            Operator::Tan => math::tan(x),
            Operator::Factorial => math::factorial(x),
            Operator::Exp10 => math::exp10(x),
            Operator::IntegerPart => math::integer_part(x),
            Operator::FractionalPart => math::fractional_part(x),
            Operator::BitNot => math::bitwise_not(&coerce_bit_operand(x)?, self.word_size),
            Operator::None
            | Operator::Add
            | Operator::Sub
            | Operator::Mul
            | Operator::Div
            | Operator::Mod
            | Operator::Pow
            | Operator::Root
            | Operator::Percent
            | Operator::BitAnd
            | Operator::BitOr
            | Operator::BitXor
            | Operator::BitNand
            | Operator::BitNor
            | Operator::BitXnor
            | Operator::BitShiftLeft
            | Operator::BitShiftRight => Err(CalcError::InvalidOperator(op.to_string())),
        }
    }

    /// Evaluates the pending operator without changing anything. Returns the
    /// second operand and the result, or `None` when there is nothing to use
    /// as the second operand yet (an operator pressed right after another one)
    fn pre_calculate(&self) -> CalcResult<Option<(String, String)>> {
        let operand = if self.should_reset_on_next_digit {
            if value::is_zero(&self.repeat_operand) {
                return Ok(None);
            }
            self.repeat_operand.clone()
        } else {
            self.current_operand.clone()
        };
        let result = self.binary(self.pending_operator, &self.previous_operand, &operand)?;
        Ok(Some((operand, result)))
    }

    // stores the record and makes the result both previous and current
    fn commit(&mut self, op: Operator, operand: String, result: String) {
        let id = self.records.add(Calculation {
            previous_operand: self.previous_operand.clone(),
            operator: op.into(),
            argument_operand: Some(operand.clone()),
            result_operand: result.clone(),
        });
        debug!(id, previous = %self.previous_operand, op = %op, operand = %operand, result = %result, "calculated");
        self.repeat_operand = operand;
        self.previous_operand = result.clone();
        self.set_result(result);
    }

    // ---------------------------------------------
    // operators

    /// Presses any operator button
    pub fn apply_operator(&mut self, op: Operator) -> CalcErrorResult {
        if op.is_binary() {
            self.binary_operator(op)
        } else if op.is_unary() {
            self.unary_operator(op)
        } else if op == Operator::Percent {
            self.percent()
        } else {
            Err(rejected(CalcError::InvalidOperator(op.to_string())))
        }
    }

    /// Presses a binary operator. A pending operator is evaluated first, so
    /// `5 + 3 +` leaves `8` as the previous operand
    pub fn binary_operator(&mut self, op: Operator) -> CalcErrorResult {
        if !op.is_binary() {
            return Err(rejected(CalcError::InvalidOperator(op.to_string())));
        }

        if self.pending_operator == Operator::None {
            self.previous_operand = self.current_operand.clone();
            self.repeat_operand = ZERO.to_owned();
        } else if let Some((operand, result)) = self.pre_calculate().map_err(rejected)? {
            self.commit(self.pending_operator, operand, result);
        }

        debug!(op = %op, previous = %self.previous_operand, "operator pending");
        self.pending_operator = op;
        self.repeat_operator = op;
        self.should_reset_on_next_digit = true;
        Ok(())
    }

    /// Presses `=`. Without a pending operator the last operation is repeated
    /// with the same second operand: `5 + 3 = = =` gives 8, 11 and 14
    pub fn equals(&mut self) -> CalcErrorResult {
        if self.pending_operator != Operator::None {
            let op = self.pending_operator;
            if let Some((operand, result)) = self.pre_calculate().map_err(rejected)? {
                self.commit(op, operand, result);
            }
            self.pending_operator = Operator::None;
            self.repeat_operator = op;
        } else if self.repeat_operator != Operator::None && !value::is_zero(&self.repeat_operand) {
            let op = self.repeat_operator;
            let operand = self.repeat_operand.clone();
            let result = self
                .binary(op, &self.current_operand, &operand)
                .map_err(rejected)?;
            self.previous_operand = self.current_operand.clone();
            self.commit(op, operand, result);
        } else {
            self.previous_operand = self.current_operand.clone();
        }
        self.should_reset_on_next_digit = true;
        Ok(())
    }

    /// Percent of a pending division or multiplication:
    /// `200 ÷ 4 %` is `5000`, `200 × 4 %` is `8`. With any other pending
    /// operator it does nothing
    pub fn percent(&mut self) -> CalcErrorResult {
        let op = self.pending_operator;
        if op != Operator::Div && op != Operator::Mul {
            debug!(op = %op, "percent ignored");
            return Ok(());
        }
        let (operand, result) = match self.pre_calculate().map_err(rejected)? {
            Some(v) => v,
            None => return Ok(()),
        };
        let result = if op == Operator::Div {
            math::mul(&result, "100")
        } else {
            math::div(&result, "100")
        }
        .map_err(rejected)?;

        self.records.add(Calculation {
            previous_operand: self.previous_operand.clone(),
            operator: RecordOperator::Compound(Operator::Percent, op),
            argument_operand: Some(operand),
            result_operand: result.clone(),
        });
        self.previous_operand = result.clone();
        self.set_result(result);
        self.pending_operator = Operator::None;
        self.repeat_operand = ZERO.to_owned();
        self.repeat_operator = Operator::None;
        self.should_reset_on_next_digit = true;
        Ok(())
    }

    /// Applies a function to the current operand. With an operator pending
    /// the result is also its second operand: `5 + 9 sqrt =` gives 8
    pub fn unary_operator(&mut self, op: Operator) -> CalcErrorResult {
        if !op.is_unary() {
            return Err(rejected(CalcError::InvalidOperator(op.to_string())));
        }
        let result = self.unary(op, &self.current_operand).map_err(rejected)?;

        let id = self.records.add(Calculation {
            previous_operand: self.current_operand.clone(),
            operator: op.into(),
            argument_operand: None,
            result_operand: result.clone(),
        });
        debug!(id, op = %op, operand = %self.current_operand, result = %result, "function applied");
        if self.pending_operator != Operator::None {
            self.repeat_operand = result.clone();
        }
        self.set_result(result);
        self.should_reset_on_next_digit = true;
        Ok(())
    }

    fn run_with_number(&mut self, op: Operator, number: String) -> CalcErrorResult {
        if op.is_binary() {
            self.binary_operator(op)?;
            self.set_result(number.clone());
            self.repeat_operand = number;
            self.should_reset_on_next_digit = false;
            self.equals()
        } else if op.is_unary() {
            self.set_result(number);
            self.unary_operator(op)
        } else {
            Err(rejected(CalcError::InvalidOperator(op.to_string())))
        }
    }

    /// Shortcut for pressing `op`, entering `number` and pressing `=`.
    /// For a function it is entering `number` and applying the function
    pub fn apply_with_number(&mut self, op: Operator, number: &str) -> CalcErrorResult {
        let number = value::normalize(number).map_err(rejected)?;
        let saved = self.clone();
        let res = self.run_with_number(op, number);
        if res.is_err() {
            *self = saved;
        }
        res
    }

    // ---------------------------------------------
    // input

    /// Types a digit of the current radix. Other characters and digits that
    /// would make the number too big are ignored
    pub fn add_digit(&mut self, c: char) {
        if !self.radix.is_digit(c) {
            debug!(digit = %c, radix = %self.radix, "not a digit");
            return;
        }
        let c = c.to_ascii_uppercase();
        let buffer = if self.should_reset_on_next_digit || self.input_buffer == ZERO {
            c.to_string()
        } else if self.input_buffer == "-0" {
            format!("-{}", c)
        } else {
            format!("{}{}", self.input_buffer, c)
        };
        match self.load_buffer(buffer) {
            Ok(()) => {
                self.should_reset_on_next_digit = false;
                trace!(buffer = %self.input_buffer, current = %self.current_operand, "digit added");
            }
            Err(e) => debug!(digit = %c, error = %e, "digit ignored"),
        }
    }

    pub fn add_dot(&mut self) {
        if self.should_reset_on_next_digit {
            self.input_buffer = "0.".to_owned();
            self.current_operand = ZERO.to_owned();
            self.should_reset_on_next_digit = false;
        } else if !self.input_buffer.contains('.') {
            self.input_buffer.push('.');
        }
    }

    /// Backspace. Removing the only digit leaves `0`, and so does removing
    /// the digit of `-5`
    pub fn delete_last_character(&mut self) {
        let mut buffer = self.input_buffer.clone();
        buffer.pop();
        if buffer.is_empty() || buffer == "-" || buffer == "-0" {
            buffer = ZERO.to_owned();
        }
        match self.load_buffer(buffer) {
            Ok(()) => self.should_reset_on_next_digit = false,
            Err(e) => debug!(error = %e, "backspace ignored"),
        }
    }

    /// Negates the current operand. A bare `0` keeps no sign, while a zero
    /// being typed (`0.`) gets one for the digits that follow
    pub fn change_sign(&mut self) {
        if self.input_buffer == ZERO {
            return;
        }
        let negated = if value::is_zero(&self.current_operand) {
            ZERO.to_owned()
        } else {
            match math::mul(&self.current_operand, "-1") {
                Ok(v) => v,
                Err(e) => {
                    debug!(error = %e, "sign change ignored");
                    return;
                }
            }
        };
        self.input_buffer = match self.input_buffer.strip_prefix('-') {
            Some(rest) => rest.to_owned(),
            None => format!("-{}", self.input_buffer),
        };
        self.current_operand = negated;
    }

    /// Loads text from the clipboard keeping only characters valid in the
    /// current radix
    pub fn paste(&mut self, text: &str) -> CalcErrorResult {
        let filtered = filter_characters(text, self.radix);
        self.load_buffer(filtered).map_err(rejected)?;
        self.should_reset_on_next_digit = false;
        Ok(())
    }

    /// Loads an exact decimal value as the current operand
    pub fn set_current_operand(&mut self, decimal: &str) -> CalcErrorResult {
        let v = value::normalize(decimal).map_err(rejected)?;
        self.set_result(v);
        self.should_reset_on_next_digit = false;
        Ok(())
    }

    /// Loads a predefined constant: pi, pi2, e, ln2, ln10 or phi
    pub fn set_constant(&mut self, name: &str) -> CalcErrorResult {
        let v = value::constant(name).map_err(rejected)?;
        self.set_result(v);
        self.should_reset_on_next_digit = false;
        Ok(())
    }

    /// Switches the input radix. The value stays the same, only the buffer
    /// is rendered again
    pub fn set_radix(&mut self, radix: Radix) {
        self.radix = radix;
        self.input_buffer = self.render(&self.current_operand);
        debug!(radix = %radix, buffer = %self.input_buffer, "radix changed");
    }

    pub fn set_word_size(&mut self, word_size: WordSize) -> CalcErrorResult {
        self.word_size = math::validate_word_size(word_size).map_err(rejected)?;
        Ok(())
    }

    /// Resets operands and operators. Memory and history are kept
    pub fn clear(&mut self) {
        self.previous_operand = ZERO.to_owned();
        self.current_operand = ZERO.to_owned();
        self.repeat_operand = ZERO.to_owned();
        self.input_buffer = ZERO.to_owned();
        self.pending_operator = Operator::None;
        self.repeat_operator = Operator::None;
        self.should_reset_on_next_digit = false;
    }

    // ---------------------------------------------
    // memory

    pub fn memory_save(&mut self) {
        self.memory.save(&self.current_operand);
    }

    pub fn memory_recall(&mut self) -> CalcErrorResult {
        let v = self.memory.recall().map_err(rejected)?;
        if self.pending_operator != Operator::None {
            self.repeat_operand = v.clone();
        }
        self.set_result(v);
        self.should_reset_on_next_digit = true;
        Ok(())
    }

    pub fn memory_clear(&mut self) -> CalcErrorResult {
        self.memory.clear().map_err(rejected)
    }

    fn memory_operation(&mut self, op: Operator) -> CalcErrorResult {
        let old = self.memory.recall().map_err(rejected)?;
        let new = self
            .memory
            .combine(op, &self.current_operand)
            .map_err(rejected)?;
        self.records.add(Calculation {
            previous_operand: old,
            operator: op.into(),
            argument_operand: Some(self.current_operand.clone()),
            result_operand: new.clone(),
        });
        self.memory.save(&new);
        self.should_reset_on_next_digit = true;
        Ok(())
    }

    pub fn memory_add(&mut self) -> CalcErrorResult {
        self.memory_operation(Operator::Add)
    }

    pub fn memory_sub(&mut self) -> CalcErrorResult {
        self.memory_operation(Operator::Sub)
    }

    pub fn memory_mul(&mut self) -> CalcErrorResult {
        self.memory_operation(Operator::Mul)
    }

    pub fn memory_div(&mut self) -> CalcErrorResult {
        self.memory_operation(Operator::Div)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enter(calc: &mut Calculator, digits: &str) {
        for c in digits.chars() {
            if c == '.' {
                calc.add_dot();
            } else {
                calc.add_digit(c);
            }
        }
    }

    #[test]
    fn test_initial_state() {
        let calc = Calculator::new();
        assert_eq!(calc.current_operand(), "0");
        assert_eq!(calc.previous_operand(), "0");
        assert_eq!(calc.input_buffer(), "0");
        assert_eq!(calc.pending_operator(), Operator::None);
        assert!(!calc.should_reset_on_next_digit());
        assert!(calc.memory().is_empty());
        assert!(calc.records().is_empty());
        assert_eq!(calc.word_size(), 8);
    }

    #[test]
    fn test_with_config() {
        let conf = CalcConfig {
            word_size: 16,
            radix: Radix::Hexadecimal,
            ..Default::default()
        };
        let mut calc = Calculator::with_config(&conf).unwrap();
        assert_eq!(calc.word_size(), 16);
        calc.add_digit('a');
        assert_eq!(calc.current_operand(), "10");

        let bad = CalcConfig {
            word_size: 7,
            ..Default::default()
        };
        assert_eq!(Calculator::with_config(&bad), Err(CalcError::InvalidWordSize(7)));
    }

    #[test]
    fn test_digit_entry() {
        let mut calc = Calculator::new();
        enter(&mut calc, "0012.50");
        assert_eq!(calc.input_buffer(), "12.50");
        assert_eq!(calc.current_operand(), "12.5");
        calc.add_dot();
        assert_eq!(calc.input_buffer(), "12.50");
        calc.add_digit('x');
        assert_eq!(calc.input_buffer(), "12.50");

        let mut calc = Calculator::new();
        enter(&mut calc, "9999999999999999999999999999");
        // one more digit does not fit the engine
        calc.add_digit('9');
        assert_eq!(calc.current_operand(), "9999999999999999999999999999");
    }

    #[test]
    fn test_delete_last_character() {
        let mut calc = Calculator::new();
        calc.add_digit('5');
        calc.delete_last_character();
        assert_eq!(calc.input_buffer(), "0");

        calc.add_digit('5');
        calc.change_sign();
        assert_eq!(calc.input_buffer(), "-5");
        calc.delete_last_character();
        assert_eq!(calc.input_buffer(), "0");
        assert_eq!(calc.current_operand(), "0");

        enter(&mut calc, "12.3");
        calc.delete_last_character();
        assert_eq!(calc.input_buffer(), "12.");
        assert_eq!(calc.current_operand(), "12");
    }

    #[test]
    fn test_change_sign() {
        let mut calc = Calculator::new();
        calc.change_sign();
        assert_eq!(calc.input_buffer(), "0");
        enter(&mut calc, "3.");
        calc.change_sign();
        assert_eq!(calc.input_buffer(), "-3.");
        assert_eq!(calc.current_operand(), "-3");
        calc.change_sign();
        assert_eq!(calc.current_operand(), "3");

        let mut calc = Calculator::new();
        calc.add_dot();
        calc.change_sign();
        assert_eq!(calc.input_buffer(), "-0.");
        assert_eq!(calc.current_operand(), "0");
        calc.add_digit('5');
        assert_eq!(calc.input_buffer(), "-0.5");
        assert_eq!(calc.current_operand(), "-0.5");
    }

    #[test]
    fn test_chained_operator() {
        let mut calc = Calculator::new();
        calc.add_digit('5');
        calc.binary_operator(Operator::Add).unwrap();
        calc.add_digit('3');
        calc.binary_operator(Operator::Add).unwrap();
        assert_eq!(calc.previous_operand(), "8");
        assert_eq!(calc.pending_operator(), Operator::Add);
        assert_eq!(calc.records().len(), 1);
        assert_eq!(calc.records().get_by_index(0).unwrap().to_string(), "5 + 3 = 8");
    }

    #[test]
    fn test_operator_swap() {
        let mut calc = Calculator::new();
        calc.add_digit('6');
        calc.binary_operator(Operator::Add).unwrap();
        calc.binary_operator(Operator::Mul).unwrap();
        assert_eq!(calc.pending_operator(), Operator::Mul);
        assert!(calc.records().is_empty());
        calc.add_digit('7');
        calc.equals().unwrap();
        assert_eq!(calc.current_operand(), "42");
    }

    #[test]
    fn test_repeat_equals() {
        let mut calc = Calculator::new();
        calc.add_digit('5');
        calc.binary_operator(Operator::Add).unwrap();
        calc.add_digit('3');
        let mut results = vec![];
        for _ in 0..3 {
            calc.equals().unwrap();
            results.push(calc.current_operand().to_string());
        }
        assert_eq!(results, vec!["8", "11", "14"]);
        assert_eq!(calc.records().len(), 3);

        calc.add_digit('7');
        calc.equals().unwrap();
        assert_eq!(calc.current_operand(), "10");
    }

    #[test]
    fn test_percent() {
        let mut calc = Calculator::new();
        enter(&mut calc, "200");
        calc.binary_operator(Operator::Div).unwrap();
        calc.add_digit('4');
        calc.percent().unwrap();
        assert_eq!(calc.current_operand(), "5000");
        assert_eq!(calc.records().len(), 1);
        assert_eq!(
            calc.records().get_by_index(0).unwrap().operator(),
            RecordOperator::Compound(Operator::Percent, Operator::Div)
        );
        assert_eq!(calc.pending_operator(), Operator::None);

        let mut calc = Calculator::new();
        enter(&mut calc, "200");
        calc.binary_operator(Operator::Mul).unwrap();
        calc.add_digit('4');
        calc.percent().unwrap();
        assert_eq!(calc.current_operand(), "8");
        assert_eq!(calc.records().len(), 1);

        // no effect with addition pending
        let mut calc = Calculator::new();
        enter(&mut calc, "200");
        calc.binary_operator(Operator::Add).unwrap();
        calc.add_digit('4');
        calc.percent().unwrap();
        assert_eq!(calc.current_operand(), "4");
        assert!(calc.records().is_empty());
    }

    #[test]
    fn test_unary_feeds_pending_operator() {
        let mut calc = Calculator::new();
        calc.add_digit('5');
        calc.binary_operator(Operator::Add).unwrap();
        calc.add_digit('9');
        calc.unary_operator(Operator::SquareRoot).unwrap();
        assert_eq!(calc.current_operand(), "3");
        calc.equals().unwrap();
        assert_eq!(calc.current_operand(), "8");
        assert_eq!(calc.records().len(), 2);
    }

    #[test]
    fn test_unary_keeps_repeat_operand() {
        let mut calc = Calculator::new();
        calc.add_digit('2');
        calc.binary_operator(Operator::Add).unwrap();
        calc.add_digit('3');
        calc.equals().unwrap();
        assert_eq!(calc.current_operand(), "5");
        enter(&mut calc, "16");
        calc.unary_operator(Operator::SquareRoot).unwrap();
        assert_eq!(calc.repeat_operand(), "3");
        calc.equals().unwrap();
        assert_eq!(calc.current_operand(), "7");
        assert_eq!(calc.records().get_by_index(0).unwrap().to_string(), "4 + 3 = 7");
    }

    #[test]
    fn test_memory_recall_keeps_repeat_operand() {
        let mut calc = Calculator::new();
        calc.add_digit('9');
        calc.memory_save();
        calc.apply_with_number(Operator::Add, "3").unwrap();
        calc.set_current_operand("5").unwrap();
        calc.binary_operator(Operator::Add).unwrap();
        calc.add_digit('3');
        calc.equals().unwrap();
        assert_eq!(calc.current_operand(), "8");
        calc.memory_recall().unwrap();
        calc.equals().unwrap();
        assert_eq!(calc.current_operand(), "12");

        // with an operator pending the recalled value is its operand
        calc.binary_operator(Operator::Mul).unwrap();
        calc.memory_recall().unwrap();
        calc.equals().unwrap();
        assert_eq!(calc.current_operand(), "108");
        calc.equals().unwrap();
        assert_eq!(calc.current_operand(), "972");
    }

    #[test]
    fn test_unary_functions() {
        let mut calc = Calculator::new();
        calc.add_digit('5');
        calc.unary_operator(Operator::Factorial).unwrap();
        assert_eq!(calc.current_operand(), "120");
        assert!(calc.should_reset_on_next_digit());
        calc.set_current_operand("90").unwrap();
        calc.unary_operator(Operator::Sin).unwrap();
        assert_eq!(calc.current_operand(), "1");
        assert_eq!(
            calc.unary_operator(Operator::Add),
            Err(CalcError::InvalidOperator("+".to_string()))
        );
    }

    #[test]
    fn test_errors_keep_state() {
        let mut calc = Calculator::new();
        calc.add_digit('5');
        calc.binary_operator(Operator::Div).unwrap();
        calc.add_digit('0');
        let before = calc.clone();
        assert_eq!(calc.equals(), Err(CalcError::DivisionByZero("5".to_string())));
        assert_eq!(calc, before);

        calc.clear();
        calc.set_current_operand("-4").unwrap();
        let before = calc.clone();
        assert_eq!(
            calc.unary_operator(Operator::SquareRoot),
            Err(CalcError::NegativeSqrt("-4".to_string()))
        );
        assert_eq!(calc, before);

        let before = calc.clone();
        assert_eq!(calc.memory_recall(), Err(CalcError::MemoryEmpty));
        assert_eq!(calc.set_word_size(12), Err(CalcError::InvalidWordSize(12)));
        assert_eq!(
            calc.set_constant("tau"),
            Err(CalcError::UnknownConstant("tau".to_string()))
        );
        assert_eq!(calc, before);
    }

    #[test]
    fn test_apply_with_number() {
        let mut calc = Calculator::new();
        calc.set_current_operand("10").unwrap();
        calc.apply_with_number(Operator::Mul, "4").unwrap();
        assert_eq!(calc.current_operand(), "40");
        calc.apply_with_number(Operator::SquareRoot, "16").unwrap();
        assert_eq!(calc.current_operand(), "4");

        let before = calc.clone();
        assert_eq!(
            calc.apply_with_number(Operator::Div, "0"),
            Err(CalcError::DivisionByZero("4".to_string()))
        );
        assert_eq!(calc, before);
        assert!(calc.apply_with_number(Operator::Add, "x").is_err());
    }

    #[test]
    fn test_bitwise_in_calculator() {
        let mut calc = Calculator::new();
        enter(&mut calc, "12");
        calc.binary_operator(Operator::BitAnd).unwrap();
        enter(&mut calc, "10");
        calc.equals().unwrap();
        assert_eq!(calc.current_operand(), "8");

        calc.set_current_operand("5").unwrap();
        calc.unary_operator(Operator::BitNot).unwrap();
        assert_eq!(calc.current_operand(), "250");
        calc.set_word_size(4).unwrap();
        calc.set_current_operand("5").unwrap();
        calc.unary_operator(Operator::BitNot).unwrap();
        assert_eq!(calc.current_operand(), "10");
    }

    #[test]
    fn test_bitwise_operand_warning() {
        use std::sync::{Arc, Mutex};
        use tracing_subscriber::layer::SubscriberExt;

        #[derive(Clone, Default)]
        struct WarningCapture {
            count: Arc<Mutex<usize>>,
        }

        impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for WarningCapture {
            fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
                if *event.metadata().level() == tracing::Level::WARN {
                    *self.count.lock().unwrap() += 1;
                }
            }
        }

        let capture = WarningCapture::default();
        let count = capture.count.clone();
        let subscriber = tracing_subscriber::registry().with(capture);

        tracing::subscriber::with_default(subscriber, || {
            let mut calc = Calculator::new();
            calc.set_current_operand("-12.7").unwrap();
            calc.binary_operator(Operator::BitOr).unwrap();
            calc.set_current_operand("3").unwrap();
            calc.equals().unwrap();
            assert_eq!(calc.current_operand(), "15");
        });

        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_memory() {
        let mut calc = Calculator::new();
        assert_eq!(calc.memory_clear(), Err(CalcError::MemoryEmpty));
        assert_eq!(calc.memory_recall(), Err(CalcError::MemoryEmpty));
        assert_eq!(calc.memory_add(), Err(CalcError::MemoryEmpty));

        enter(&mut calc, "12.25");
        calc.memory_save();
        calc.clear();
        calc.memory_recall().unwrap();
        assert_eq!(calc.current_operand(), "12.25");
        assert!(calc.should_reset_on_next_digit());

        calc.set_current_operand("2").unwrap();
        calc.memory_mul().unwrap();
        assert_eq!(calc.memory().value(), Some("24.5"));
        assert_eq!(calc.records().get_by_index(0).unwrap().to_string(), "12.25 × 2 = 24.5");

        calc.set_current_operand("0").unwrap();
        assert_eq!(calc.memory_div(), Err(CalcError::DivisionByZero("24.5".to_string())));
        assert_eq!(calc.memory().value(), Some("24.5"));

        calc.memory_clear().unwrap();
        assert_eq!(calc.memory_recall(), Err(CalcError::MemoryEmpty));
    }

    #[test]
    fn test_clear_keeps_memory_and_history() {
        let mut calc = Calculator::new();
        calc.add_digit('2');
        calc.memory_save();
        calc.apply_with_number(Operator::Add, "2").unwrap();
        calc.binary_operator(Operator::Mul).unwrap();
        calc.clear();
        assert_eq!(calc.current_operand(), "0");
        assert_eq!(calc.previous_operand(), "0");
        assert_eq!(calc.pending_operator(), Operator::None);
        assert_eq!(calc.repeat_operator(), Operator::None);
        assert_eq!(calc.memory().value(), Some("2"));
        assert_eq!(calc.records().len(), 1);
    }

    #[test]
    fn test_radix_input() {
        let mut calc = Calculator::new();
        calc.set_radix(Radix::Hexadecimal);
        calc.add_digit('f');
        calc.add_digit('F');
        calc.add_digit('g');
        assert_eq!(calc.input_buffer(), "FF");
        assert_eq!(calc.current_operand(), "255");

        calc.set_radix(Radix::Binary);
        assert_eq!(calc.input_buffer(), "11111111");
        calc.add_digit('2');
        assert_eq!(calc.current_operand(), "255");

        calc.set_radix(Radix::Decimal);
        calc.set_current_operand("10.75").unwrap();
        calc.set_radix(Radix::Binary);
        assert_eq!(calc.input_buffer(), "1010.11");
        assert_eq!(calc.current_operand(), "10.75");
    }

    #[test]
    fn test_paste_and_constants() {
        let mut calc = Calculator::new();
        calc.paste("1,234.5 USD").unwrap();
        assert_eq!(calc.current_operand(), "1234.5");
        calc.set_radix(Radix::Octal);
        calc.paste("-17").unwrap();
        assert_eq!(calc.current_operand(), "-15");

        calc.set_radix(Radix::Decimal);
        calc.set_constant("PI").unwrap();
        assert_eq!(calc.current_operand(), "3.1415926535897932384626433833");
        assert!(!calc.should_reset_on_next_digit());
    }

    #[test]
    fn test_serde_state() {
        let mut calc = Calculator::new();
        calc.add_digit('7');
        calc.memory_save();
        calc.binary_operator(Operator::Sub).unwrap();
        calc.add_digit('2');
        calc.equals().unwrap();

        let json = serde_json::to_string(&calc).unwrap();
        let mut back: Calculator = serde_json::from_str(&json).unwrap();
        assert_eq!(back, calc);
        back.equals().unwrap();
        assert_eq!(back.current_operand(), "3");

        let partial: Calculator = serde_json::from_str(r#"{"current_operand": "42", "radix": "hex"}"#).unwrap();
        assert_eq!(partial.current_operand(), "42");
        assert_eq!(partial.radix(), Radix::Hexadecimal);
        assert_eq!(partial.word_size(), DEFAULT_WORD_SIZE);
    }
}
