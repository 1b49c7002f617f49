//! Postal code types.

use std::fmt;

/// Error returned when parsing an invalid postal code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid postal code: {reason}")]
pub struct InvalidPostalCode {
    reason: &'static str,
}

/// A valid 4-digit postal code.
///
/// Postal codes are always exactly four ASCII decimal digits. This type
/// guarantees that any `PostalCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use polling_server::domain::PostalCode;
///
/// let code = PostalCode::parse("1052").unwrap();
/// assert_eq!(code.as_str(), "1052");
///
/// // Wrong length is rejected
/// assert!(PostalCode::parse("105").is_err());
/// assert!(PostalCode::parse("10520").is_err());
///
/// // Tokens are found in free text
/// let found = PostalCode::find_in("1052 Budapest, Petőfi utca 10.");
/// assert_eq!(found, Some(code));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostalCode([u8; 4]);

impl PostalCode {
    /// Parse a postal code from a string.
    ///
    /// The input must be exactly 4 ASCII digits (0-9).
    pub fn parse(s: &str) -> Result<Self, InvalidPostalCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 4 {
            return Err(InvalidPostalCode {
                reason: "must be exactly 4 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(InvalidPostalCode {
                reason: "must be ASCII digits 0-9",
            });
        }

        Ok(PostalCode([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Find the first postal-code token in free-form text.
    ///
    /// A token is a run of exactly four ASCII digits bounded by non-digit
    /// characters or the ends of the string. Digits that are part of a
    /// longer run (e.g. a 5-digit house number) never form a token.
    pub fn find_in(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        let mut i = 0;

        while i < bytes.len() {
            if !bytes[i].is_ascii_digit() {
                i += 1;
                continue;
            }

            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }

            if i - start == 4 {
                return Some(PostalCode([
                    bytes[start],
                    bytes[start + 1],
                    bytes[start + 2],
                    bytes[start + 3],
                ]));
            }
        }

        None
    }

    /// Returns the postal code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PostalCode({})", self.as_str())
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
