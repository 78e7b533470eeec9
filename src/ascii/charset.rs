//! The fixed symbol ramp used for brightness mapping.

/// Symbol ramp, ordered from the densest glyph (darkest cells) to a blank
/// space (lightest cells).
#[rustfmt::skip]
pub const SYMBOL_RAMP: &[char] = &[
    '@', 'N', '%', 'Q', 'g', 'm', '$', 'B', 'D', 'R', '#', '8', 'd',
    'O', 'b', 'U', 'A', 'q', 'h', 'G', 'p', 'X', 'k', 'u', 'n', 'x',
    'c', '/', '*', '+', ';', '^', '=', '´', ':', '_', '.', '`', ' ',
];

/// Number of symbols in [`SYMBOL_RAMP`].
pub const RAMP_LEN: u32 = SYMBOL_RAMP.len() as u32;

/// Get the ramp symbol at `index`, clamped to the last symbol.
#[inline]
pub fn symbol(index: usize) -> char {
    SYMBOL_RAMP[index.min(SYMBOL_RAMP.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ramp_length() {
        assert_eq!(SYMBOL_RAMP.len(), 39);
        assert_eq!(RAMP_LEN, 39);
    }

    #[test]
    fn test_ramp_symbols_are_distinct() {
        let unique: HashSet<char> = SYMBOL_RAMP.iter().copied().collect();
        assert_eq!(unique.len(), SYMBOL_RAMP.len());
    }

    #[test]
    fn test_ramp_ends() {
        assert_eq!(symbol(0), '@');
        assert_eq!(symbol(38), ' ');
    }

    #[test]
    fn test_symbol_clamps() {
        assert_eq!(symbol(1000), ' ');
    }
}
