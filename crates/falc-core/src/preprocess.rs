use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default preprocessor: NFC, one space per whitespace run, trimmed
    fn process(&self, text: &str) -> String {
        let text: String = text.nfc().collect();
        collapse_whitespace(&text).trim().to_string()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

/// Replace every run of whitespace (newlines included) with a single space
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a  b\n\nc\t d"), "a b c d");
        assert_eq!(collapse_whitespace("  a "), " a ");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_default_preprocessor_composes() {
        // "e" + combining acute accent
        let decomposed = "caf\u{0065}\u{0301}  noir";
        assert_eq!(DefaultPreprocessor.process(decomposed), "café noir");
    }

    #[test]
    fn test_default_preprocessor_trims() {
        assert_eq!(DefaultPreprocessor.process("  Le  chat\n\ndort. "), "Le chat dort.");
        assert_eq!(DefaultPreprocessor.process(" \t\n"), "");
    }
}
