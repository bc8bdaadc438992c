use pest::Parser;

use crate::errors::*;
use crate::radix::Radix;

#[derive(Parser)]
#[grammar = "radix.pest"]
pub(crate) struct RadixParser;

/// Number literal split into its parts. Digits are borrowed from the input
#[derive(Debug, PartialEq)]
pub(crate) struct Literal<'a> {
    pub negative: bool,
    pub integer: &'a str,
    /// `None` - no point at all, `Some("")` - trailing point (`12.`)
    pub fraction: Option<&'a str>,
}

/// parses a number written in the given radix or returns an error
pub(crate) fn parse_literal(value: &str, radix: Radix) -> CalcResult<Literal<'_>> {
    let rule = match radix {
        Radix::Binary => Rule::binary,
        Radix::Octal => Rule::octal,
        Radix::Decimal => Rule::decimal,
        Radix::Hexadecimal => Rule::hexadecimal,
    };
    let pairs = match RadixParser::parse(rule, value) {
        Ok(p) => p,
        Err(..) => return Err(CalcError::InvalidNumber(value.to_owned())),
    };

    let mut lit = Literal {
        negative: false,
        integer: "0",
        fraction: None,
    };
    for pair in pairs.flatten() {
        match pair.as_rule() {
            Rule::sign => lit.negative = true,
            Rule::bin_int | Rule::oct_int | Rule::dec_int | Rule::hex_int => lit.integer = pair.as_str(),
            Rule::bin_frac | Rule::oct_frac | Rule::dec_frac | Rule::hex_frac => lit.fraction = Some(pair.as_str()),
            _ => {}
        }
    }
    Ok(lit)
}
