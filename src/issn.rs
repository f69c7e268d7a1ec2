//! ISSN helper utilities.
//!
//! Normalization and validation of the identifiers read from the input list.
//! Validation is advisory only: the portal is queried for every line, and a
//! failed check just produces a log warning.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ISSN_SHAPE: Regex = Regex::new(r"^\d{4}-\d{3}[\dX]$").unwrap();
}

/// ISSN (International Standard Serial Number) validator and normalizer
#[derive(Debug)]
pub struct IssnValidator;

impl IssnValidator {
    /// Normalize an ISSN for lookup.
    ///
    /// Trailing whitespace is removed and an ISSN ending in a lowercase `x`
    /// check character is uppercased, so `2434-561x` and `2434-561X` resolve
    /// to the same portal record.
    ///
    /// # Examples
    ///
    /// ```
    /// use keepers_query::IssnValidator;
    ///
    /// assert_eq!(IssnValidator::normalize("2434-561x\n"), "2434-561X");
    /// assert_eq!(IssnValidator::normalize("0378-5955"), "0378-5955");
    /// ```
    #[must_use]
    pub fn normalize(issn: &str) -> String {
        let trimmed = issn.trim_end();
        if trimmed.ends_with('x') {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }

    /// Check the `NNNN-NNNC` shape of an ISSN.
    #[must_use]
    pub fn has_valid_shape(issn: &str) -> bool {
        ISSN_SHAPE.is_match(issn)
    }

    /// Validate an ISSN including its check character.
    ///
    /// The first seven digits are weighted 8 down to 2 and summed; the check
    /// character makes the total divisible by 11, with `X` standing for 10.
    ///
    /// # Examples
    ///
    /// ```
    /// use keepers_query::IssnValidator;
    ///
    /// assert!(IssnValidator::validate("0378-5955"));
    /// assert!(IssnValidator::validate("2434-561X"));
    /// assert!(!IssnValidator::validate("0378-5956"));
    /// ```
    #[must_use]
    pub fn validate(issn: &str) -> bool {
        if !Self::has_valid_shape(issn) {
            return false;
        }

        let clean: Vec<char> = issn.chars().filter(|c| *c != '-').collect();
        let mut sum = 0;
        for (i, ch) in clean.iter().take(7).enumerate() {
            let Some(digit) = ch.to_digit(10) else {
                return false;
            };
            sum += digit * (8 - u32::try_from(i).unwrap_or(0));
        }

        let expected = match (11 - sum % 11) % 11 {
            10 => 'X',
            n => char::from_digit(n, 10).unwrap_or('?'),
        };
        clean[7] == expected
    }
}
