use crate::error::{Error, Result};

/// Result count used when a caller does not ask for one.
pub const DEFAULT_TOP_K: usize = 5;

/// Characters of context kept on each side of a keyword match.
pub const DEFAULT_WINDOW: usize = 10;

/// Validates a count that reached us as a signed integer.
pub fn non_negative(field: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::Configuration { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_and_positive() {
        assert_eq!(non_negative("k", 0).unwrap(), 0);
        assert_eq!(non_negative("k", 12).unwrap(), 12);
    }

    #[test]
    fn rejects_negative() {
        let err = non_negative("window", -1).unwrap_err();
        assert!(matches!(err, Error::Configuration { field: "window", value: -1 }));
    }
}
