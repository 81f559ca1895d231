use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // Everything that is not a basic or accented Latin lowercase letter, or whitespace.
    static ref NON_LETTER: Regex =
        Regex::new(r"[^a-z\u{00DF}-\u{00F6}\u{00F8}-\u{00FF}\u{0100}-\u{017F}\s]").expect("valid regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
}

/// Clean text the way every index stage sees it: NFC-composed, lowercased,
/// newlines folded, digits and non-letters dropped, whitespace collapsed.
///
/// Dropped characters are removed rather than replaced, so `"e-mail"` becomes
/// `"email"`.
pub fn normalize(text: &str) -> String {
    let lowered = text.nfc().collect::<String>().to_lowercase().replace('\n', " ");
    let letters = NON_LETTER.replace_all(&lowered, "");
    WHITESPACE.replace_all(letters.trim(), " ").into_owned()
}

/// Split text into normalized terms. Term equality for the whole index is
/// defined by this function.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text).split_whitespace().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("The Cat,\nsat 42 times!");
        assert_eq!(t, vec!["the", "cat", "sat", "times"]);
    }

    #[test]
    fn keeps_accented_latin() {
        assert_eq!(tokenize("Élève à l'école"), vec!["élève", "à", "lécole"]);
    }

    #[test]
    fn composes_decomposed_accents() {
        assert_eq!(tokenize("cafe\u{0301}"), vec!["café"]);
    }

    #[test]
    fn blank_input_has_no_terms() {
        assert!(tokenize("  \n 123 ... ").is_empty());
        assert_eq!(normalize(""), "");
    }
}
