use std::fmt;

use serde::{Deserialize, Serialize};

/// Every button of the calculator that does arithmetic
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    #[default]
    None,

    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Root,
    Percent,

    BitAnd,
    BitOr,
    BitXor,
    BitNot,
    BitNand,
    BitNor,
    BitXnor,
    BitShiftLeft,
    BitShiftRight,

    Reciprocal,
    SquareRoot,
    Square,
    Sin,
    Cos,
    Tan,
    Factorial,
    Exp10,
    IntegerPart,
    FractionalPart,
}

impl Operator {
    /// Symbol or short name shown in the history
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::None => "",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "×",
            Operator::Div => "÷",
            Operator::Mod => "mod",
            Operator::Pow => "pow",
            Operator::Root => "root",
            Operator::Percent => "%",
            Operator::BitAnd => "and",
            Operator::BitOr => "or",
            Operator::BitXor => "xor",
            Operator::BitNot => "not",
            Operator::BitNand => "nand",
            Operator::BitNor => "nor",
            Operator::BitXnor => "xnor",
            Operator::BitShiftLeft => "<<",
            Operator::BitShiftRight => ">>",
            Operator::Reciprocal => "rec",
            Operator::SquareRoot => "sqrt",
            Operator::Square => "pow2",
            Operator::Sin => "sin",
            Operator::Cos => "cos",
            Operator::Tan => "tan",
            Operator::Factorial => "fct",
            Operator::Exp10 => "exp10",
            Operator::IntegerPart => "int",
            Operator::FractionalPart => "frac",
        }
    }

    /// Operators that wait for a second operand
    pub fn is_binary(self) -> bool {
        matches!(
            self,
            Operator::Add
                | Operator::Sub
                | Operator::Mul
                | Operator::Div
                | Operator::Mod
                | Operator::Pow
                | Operator::Root
                | Operator::BitAnd
                | Operator::BitOr
                | Operator::BitXor
                | Operator::BitNand
                | Operator::BitNor
                | Operator::BitXnor
                | Operator::BitShiftLeft
                | Operator::BitShiftRight
        )
    }

    /// Functions applied immediately to the current operand
    pub fn is_unary(self) -> bool {
        matches!(
            self,
            Operator::BitNot
                | Operator::Reciprocal
                | Operator::SquareRoot
                | Operator::Square
                | Operator::Sin
                | Operator::Cos
                | Operator::Tan
                | Operator::Factorial
                | Operator::Exp10
                | Operator::IntegerPart
                | Operator::FractionalPart
        )
    }

    /// Operators whose operands are treated as unsigned integers
    pub fn is_bitwise(self) -> bool {
        matches!(
            self,
            Operator::BitAnd
                | Operator::BitOr
                | Operator::BitXor
                | Operator::BitNot
                | Operator::BitNand
                | Operator::BitNor
                | Operator::BitXnor
                | Operator::BitShiftLeft
                | Operator::BitShiftRight
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert!(Operator::Add.is_binary());
        assert!(!Operator::Add.is_unary());
        assert!(Operator::BitNot.is_unary());
        assert!(Operator::BitNot.is_bitwise());
        assert!(Operator::BitShiftRight.is_binary());
        assert!(!Operator::Percent.is_binary());
        assert!(!Operator::Percent.is_unary());
        assert!(!Operator::None.is_binary());
    }

    #[test]
    fn test_display() {
        assert_eq!(Operator::Mul.to_string(), "×");
        assert_eq!(Operator::Div.to_string(), "÷");
        assert_eq!(serde_json::to_string(&Operator::BitShiftLeft).unwrap(), "\"bitShiftLeft\"");
    }
}
