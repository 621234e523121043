//! Unicode character classes shared by the scanner and the signature
//! parser. `char::is_alphabetic` and `char::is_numeric` are broader than
//! the letter and digit classes the chart language accepts, so membership
//! is decided on the general category.

use unicode_general_category::{get_general_category, GeneralCategory};

/// General category `L` (Lu, Ll, Lt, Lm, Lo).
pub(crate) fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// General category `Nd`.
pub(crate) fn is_decimal_digit(c: char) -> bool {
    get_general_category(c) == GeneralCategory::DecimalNumber
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters() {
        for c in ['a', 'Z', '\u{e9}', '\u{3b1}', '\u{5d0}', '\u{2b0}', '\u{1c5}'] {
            assert!(is_letter(c), "{:?}", c);
        }
        // Nl, Mn and digits are not letters
        for c in ['\u{216b}', '\u{345}', '1', '_', '\u{b2}'] {
            assert!(!is_letter(c), "{:?}", c);
        }
    }

    #[test]
    fn decimal_digits() {
        for c in ['0', '9', '\u{661}', '\u{ff13}'] {
            assert!(is_decimal_digit(c), "{:?}", c);
        }
        // No and Nl are numbers but not decimal digits
        for c in ['\u{b2}', '\u{bd}', '\u{216b}', 'a'] {
            assert!(!is_decimal_digit(c), "{:?}", c);
        }
    }
}
