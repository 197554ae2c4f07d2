//! Rule based word splitter for languages written in the Latin alphabet.

use falc_types::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Word,
    Number,
    /// Dotted capitals such as "U.S.A."
    Acronym,
    Punct,
}

/// Byte range of one token in the split text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
}

impl Span {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

const FRENCH_ELISIONS: [&str; 15] = [
    "l", "d", "j", "m", "n", "s", "t", "c", "ç", "qu", "jusqu", "lorsqu", "puisqu", "quoiqu",
    "quelqu",
];

const ITALIAN_ELISIONS: [&str; 17] = [
    "l", "un", "dell", "dall", "nell", "sull", "all", "coll", "quell", "quest", "bell", "sant",
    "c", "d", "m", "t", "s",
];

fn elisions(language: Language) -> &'static [&'static str] {
    match language {
        Language::Fr => &FRENCH_ELISIONS,
        Language::It => &ITALIAN_ELISIONS,
        _ => &[],
    }
}

pub fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '’' | 'ʼ')
}

fn at(chars: &[(usize, char)], i: usize) -> Option<char> {
    chars.get(i).map(|&(_, c)| c)
}

/// Split `text` into words, numbers, acronyms and punctuation. Whitespace is dropped.
pub fn split(text: &str, language: Language) -> Vec<Span> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |i: usize| chars.get(i).map_or(text.len(), |&(b, _)| b);

    let mut spans = Vec::new();
    let mut i = 0;

    while let Some(c) = at(&chars, i) {
        let start = i;

        let kind = if c.is_whitespace() {
            i += 1;
            continue;
        } else if starts_number(&chars, i) {
            i = scan_number(&chars, i);
            // "3e", "12h"
            if at(&chars, i).is_some_and(char::is_alphabetic) {
                i = scan_word(&chars, i, language);
                SpanKind::Word
            } else {
                SpanKind::Number
            }
        } else if c.is_alphanumeric() {
            match scan_acronym(&chars, i) {
                Some(end) => {
                    i = end;
                    SpanKind::Acronym
                }
                None => {
                    i = scan_word(&chars, i, language);
                    SpanKind::Word
                }
            }
        } else if c == '.' {
            // Ellipsis stays one token
            while at(&chars, i) == Some('.') {
                i += 1;
            }
            SpanKind::Punct
        } else {
            i += 1;
            SpanKind::Punct
        };

        spans.push(Span {
            start: byte_at(start),
            end: byte_at(i),
            kind,
        });
    }

    spans
}

fn starts_number(chars: &[(usize, char)], i: usize) -> bool {
    match at(chars, i) {
        Some(c) if c.is_ascii_digit() => true,
        Some('+' | '-') => {
            let signed = at(chars, i + 1).is_some_and(|c| c.is_ascii_digit());
            let detached =
                i == 0 || at(chars, i - 1).is_some_and(|c| c.is_whitespace() || c == '(');
            signed && detached
        }
        _ => false,
    }
}

/// Optional sign, digits, then groups of digits joined by '.' or ','
fn scan_number(chars: &[(usize, char)], mut i: usize) -> usize {
    if matches!(at(chars, i), Some('+' | '-')) {
        i += 1;
    }
    loop {
        while at(chars, i).is_some_and(|c| c.is_ascii_digit()) {
            i += 1;
        }
        let joined = matches!(at(chars, i), Some('.' | ','))
            && at(chars, i + 1).is_some_and(|c| c.is_ascii_digit());
        if !joined {
            return i;
        }
        i += 1;
    }
}

/// At least two capitals each followed by a period, or one dotted capital and a bare one
fn scan_acronym(chars: &[(usize, char)], mut i: usize) -> Option<usize> {
    let mut dotted = 0;
    while at(chars, i).is_some_and(char::is_uppercase) && at(chars, i + 1) == Some('.') {
        i += 2;
        dotted += 1;
    }

    let trailing = at(chars, i).is_some_and(char::is_uppercase)
        && !at(chars, i + 1).is_some_and(char::is_alphanumeric);
    if trailing {
        i += 1;
    }

    (dotted >= 2 || (dotted == 1 && trailing)).then_some(i)
}

/// Letters and digits joined by inner hyphens and apostrophes. An elided article
/// ("l'", "qu'") ends the word right after its apostrophe.
fn scan_word(chars: &[(usize, char)], mut i: usize, language: Language) -> usize {
    let start = i;
    loop {
        while at(chars, i).is_some_and(char::is_alphanumeric) {
            i += 1;
        }
        match (at(chars, i), at(chars, i + 1)) {
            (Some('-'), Some(next)) if next.is_alphanumeric() => i += 1,
            (Some(c), Some(next)) if is_apostrophe(c) && next.is_alphabetic() => {
                if is_elided(&chars[start..i], language) {
                    return i + 1;
                }
                i += 1;
            }
            _ => return i,
        }
    }
}

fn is_elided(word: &[(usize, char)], language: Language) -> bool {
    let word: String = word.iter().flat_map(|&(_, c)| c.to_lowercase()).collect();
    elisions(language).contains(&word.as_str())
}
