use falc_core::lexicon::is_abbreviation;
use falc_types::Language;

use crate::processor::is_title_case;
use crate::stop_words::is_stop_word;

const TERMINATORS: [char; 4] = ['.', '!', '?', '…'];
const CLOSERS: [char; 7] = ['"', '\'', '»', '”', '’', ')', ']'];
const OPENERS: [char; 6] = ['"', '«', '“', '(', '[', '-'];

/// Capitalized words that usually start a sentence rather than follow an initial
const OPENING_WORDS: [&str; 24] = [
    "ensuite", "puis", "alors", "enfin", "après", "avant", "cependant", "pourtant", "ainsi",
    "aujourd'hui", "demain", "hier", "maintenant", "voici", "voilà", "oui", "non", "merci",
    "bonjour", "next", "finally", "however", "luego", "dann",
];

/// Split at terminal punctuation followed by whitespace and a capital, a digit
/// or an opening quote. A period after an abbreviation or an initial does not end
/// a sentence. Every sentence is a trimmed substring of `text`.
pub fn split(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !TERMINATORS.contains(&c) {
            continue;
        }

        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if !TERMINATORS.contains(&next) && !CLOSERS.contains(&next) {
                break;
            }
            end = j + next.len_utf8();
            chars.next();
        }

        // French closing guillemets come after a space: « Pourquoi ? »
        let rest = &text[end..];
        let spaced = rest.trim_start();
        match spaced.chars().next() {
            Some(closer @ ('»' | '”')) if spaced.len() < rest.len() => {
                end += rest.len() - spaced.len() + closer.len_utf8();
                while chars.peek().is_some_and(|&(j, _)| j < end) {
                    chars.next();
                }
            }
            _ => {}
        }

        if c == '.' && end == i + 1 && protects_period(&text[start..i], &text[end..]) {
            continue;
        }
        if boundary_follows(&text[end..]) {
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn boundary_follows(rest: &str) -> bool {
    let trimmed = rest.trim_start();
    if trimmed.is_empty() {
        return true;
    }
    if trimmed.len() == rest.len() {
        return false;
    }
    trimmed
        .chars()
        .next()
        .is_some_and(|c| c.is_uppercase() || c.is_numeric() || OPENERS.contains(&c))
}

/// "M.", "etc." and "J. K. Rowling" keep their period, "le plan A. Ensuite" does not
fn protects_period(before: &str, after: &str) -> bool {
    let word = before.rsplit(char::is_whitespace).next().unwrap_or_default();
    let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());
    if word.is_empty() {
        return false;
    }

    is_abbreviation(word) || (is_initial(word) && name_follows(after))
}

fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next().is_some_and(char::is_uppercase) && chars.next().is_none()
}

/// Another initial or a capitalized word that does not open a sentence
fn name_follows(after: &str) -> bool {
    let next = after.split_whitespace().next().unwrap_or_default();
    let next = next.trim_end_matches(|c: char| !c.is_alphanumeric());
    if is_initial(next) {
        return true;
    }

    let lower = next.to_lowercase();
    is_title_case(next)
        && !OPENING_WORDS.contains(&lower.as_str())
        && !Language::ALL.iter().any(|&language| is_stop_word(language, next))
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split() {
        assert_eq!(
            split("Le chat dort. Il rêve! Vraiment ? Oui."),
            vec!["Le chat dort.", "Il rêve!", "Vraiment ?", "Oui."]
        );
    }

    #[test]
    fn test_lowercase_continuation() {
        assert_eq!(split("Il a vu 3.5 km. puis rien"), vec!["Il a vu 3.5 km. puis rien"]);
    }

    #[test]
    fn test_abbreviations_and_initials() {
        assert_eq!(
            split("M. Dupont est là. J. K. Rowling aussi, etc. Fin."),
            vec!["M. Dupont est là.", "J. K. Rowling aussi, etc. Fin."]
        );
    }

    #[test]
    fn test_single_capital_before_a_new_sentence() {
        assert_eq!(
            split("Il a choisi le plan A. Ensuite il part."),
            vec!["Il a choisi le plan A.", "Ensuite il part."]
        );
        assert_eq!(
            split("Prenez la sortie B. Elle est à droite."),
            vec!["Prenez la sortie B.", "Elle est à droite."]
        );
        assert_eq!(split("Lisez J. Verne demain."), vec!["Lisez J. Verne demain."]);
    }

    #[test]
    fn test_quotes_and_ellipsis() {
        assert_eq!(
            split("Il dit « non ». « Pourquoi ? » Bon... 3 jours."),
            vec!["Il dit « non ».", "« Pourquoi ? »", "Bon...", "3 jours."]
        );
    }

    #[test]
    fn test_sentences_are_substrings() {
        let text = "  Un.  Deux !  Trois";
        for sentence in split(text) {
            assert!(text.contains(&sentence));
        }
        assert_eq!(split(text), vec!["Un.", "Deux !", "Trois"]);
    }

    #[test]
    fn test_empty() {
        assert!(split("").is_empty());
        assert!(split("   ").is_empty());
    }
}
