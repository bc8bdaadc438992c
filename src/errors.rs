use thiserror::Error;

/// Result of any fallible calculator operation
pub type CalcResult<T = String> = Result<T, CalcError>;
pub type CalcErrorResult = Result<(), CalcError>;

/// Value failures: invalid input or a mathematically undefined result.
/// None of them leaves a `Calculator` in a half-updated state.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum CalcError {
    #[error("'{0}' divided by zero")]
    DivisionByZero(String),
    #[error("Invalid root: {0}")]
    InvalidRoot(String),
    #[error("Square root of negative number '{0}'")]
    NegativeSqrt(String),
    #[error("Factorial of negative number '{0}'")]
    NegativeFactorial(String),
    #[error("Bitwise operation does not accept negative number '{0}'")]
    NegativeBitOperand(String),
    #[error("Memory is empty")]
    MemoryEmpty,

    #[error("Constant '{0}' not found")]
    UnknownConstant(String),
    #[error("Unit category '{0}' not found")]
    UnknownCategory(String),
    #[error("Unit '{0}' not found")]
    UnknownUnit(String),

    #[error("Record with id {0} not found")]
    RecordNotFound(u64),
    #[error("Record index {0} out of range")]
    InvalidRecordIndex(usize),

    #[error("Failed to convert '{0}' to number")]
    InvalidNumber(String),
    #[error("Operator '{0}' cannot be used here")]
    InvalidOperator(String),
    #[error("Word size {0} is not supported (0, 4, 8, 16, 32, 64)")]
    InvalidWordSize(u32),
    #[error("{0} supports only integers")]
    NotInteger(String),
    #[error("Result of '{0}' is too large")]
    Overflow(String),
    #[error("Result of '{0}' is undefined")]
    UndefinedResult(String),
}
