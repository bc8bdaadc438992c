use serde::{Deserialize, Serialize};

use crate::errors::*;
use crate::format::{format_decimal_places, number_grouping};
use crate::math::{validate_word_size, WordSize};
use crate::radix::{Radix, RadixConverter};

/// Calculator settings. Every missing field takes its default value, so an
/// empty document is a valid config
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// bits of a bitwise register: 0, 4, 8, 16, 32 or 64 (0 - unlimited)
    pub word_size: WordSize,
    /// fixed number of fractional digits on display, negative - as is
    pub decimal_places: i32,
    /// digits between separators on display, 0 - no grouping
    pub grouping_size: usize,
    pub radix: Radix,
}

impl Default for CalcConfig {
    fn default() -> CalcConfig {
        CalcConfig {
            word_size: 8,
            decimal_places: -1,
            grouping_size: 3,
            radix: Radix::Decimal,
        }
    }
}

impl CalcConfig {
    pub fn validate(&self) -> CalcErrorResult {
        validate_word_size(self.word_size)?;
        Ok(())
    }

    /// Renders an exact decimal value for display: converted to the radix,
    /// rounded to the decimal places, then grouped
    pub fn format_display(&self, decimal: &str) -> CalcResult {
        let s = RadixConverter::new().from_decimal(decimal, self.radix)?;
        let s = format_decimal_places(&s, self.decimal_places, self.radix.base());
        Ok(number_grouping(&s, self.grouping_size))
    }
}
