use std::collections::HashSet;

use falc_types::Language;
use lazy_static::lazy_static;

fn set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

lazy_static! {
    static ref FRENCH: HashSet<&'static str> = set(&[
        "l'", "d'", "j'", "m'", "n'", "s'", "t'", "c'", "ç'", "qu'", "jusqu'", "lorsqu'",
        "puisqu'", "quoiqu'", "quelqu'",
        "le", "la", "les", "un", "une", "des", "du", "de", "au", "aux", "ce", "cet", "cette",
        "ces", "mon", "ma", "mes", "ton", "ta", "tes", "son", "sa", "ses", "notre", "nos",
        "votre", "vos", "leur", "leurs", "je", "tu", "il", "elle", "on", "nous", "vous", "ils",
        "elles", "me", "te", "se", "lui", "y", "en", "moi", "toi", "soi", "eux", "qui", "que",
        "quoi", "dont", "où", "et", "ou", "mais", "donc", "or", "ni", "car", "si", "ne", "pas",
        "plus", "à", "dans", "par", "pour", "sur", "sous", "avec", "sans", "chez", "entre",
        "vers", "est", "sont", "être", "été", "était", "a", "ai", "as", "ont", "avoir", "avait",
        "fait", "très", "aussi", "comme", "tout", "tous", "toute", "toutes", "même", "bien",
        "ça", "cela", "ceci",
    ]);

    static ref ENGLISH: HashSet<&'static str> = set(&[
        "a", "an", "and", "are", "as", "at", "be", "been", "but", "by", "can", "did", "do",
        "does", "for", "from", "had", "has", "have", "he", "her", "his", "how", "i", "if", "in",
        "into", "is", "it", "its", "me", "my", "no", "not", "of", "on", "or", "our", "she",
        "so", "such", "than", "that", "the", "their", "them", "then", "there", "these", "they",
        "this", "to", "up", "us", "was", "we", "were", "what", "when", "which", "who", "will",
        "with", "would", "you", "your",
    ]);

    static ref SPANISH: HashSet<&'static str> = set(&[
        "el", "la", "los", "las", "un", "una", "unos", "unas", "de", "del", "al", "a", "en",
        "y", "e", "o", "u", "que", "se", "no", "por", "para", "con", "sin", "su", "sus", "lo",
        "le", "les", "me", "te", "nos", "mi", "mis", "tu", "tus", "yo", "él", "ella", "es",
        "son", "está", "ser", "fue", "ha", "han", "como", "más", "pero", "muy", "ya", "este",
        "esta", "ese", "esa", "sobre", "entre", "cuando", "también", "hay",
    ]);

    static ref ITALIAN: HashSet<&'static str> = set(&[
        "l'", "un'", "dell'", "dall'", "nell'", "sull'", "all'", "coll'", "quell'", "quest'",
        "c'", "d'", "m'", "t'", "s'",
        "il", "lo", "la", "i", "gli", "le", "un", "uno", "una", "di", "del", "della", "dei",
        "delle", "a", "al", "alla", "da", "dal", "in", "nel", "nella", "con", "su", "sul",
        "per", "tra", "fra", "e", "ed", "o", "ma", "che", "chi", "non", "si", "ci", "mi", "ti",
        "vi", "io", "tu", "lui", "lei", "noi", "voi", "loro", "è", "sono", "essere", "ha",
        "hanno", "come", "più", "anche", "molto", "questo", "questa", "quello",
    ]);

    static ref GERMAN: HashSet<&'static str> = set(&[
        "der", "die", "das", "den", "dem", "des", "ein", "eine", "einen", "einem", "einer",
        "eines", "und", "oder", "aber", "nicht", "kein", "keine", "ich", "du", "er", "sie",
        "es", "wir", "ihr", "mich", "mir", "dich", "dir", "sich", "uns", "euch", "ist", "sind",
        "war", "sein", "hat", "haben", "wird", "werden", "in", "im", "an", "am", "auf", "aus",
        "bei", "mit", "nach", "von", "vom", "zu", "zum", "zur", "für", "über", "unter", "als",
        "wie", "auch", "so", "dass", "wenn", "noch", "nur", "sehr",
    ]);
}

fn words(language: Language) -> &'static HashSet<&'static str> {
    match language {
        Language::Fr => &FRENCH,
        Language::En => &ENGLISH,
        Language::Es => &SPANISH,
        Language::It => &ITALIAN,
        Language::De => &GERMAN,
    }
}

/// Case insensitive; typographic apostrophes count as plain ones
pub fn is_stop_word(language: Language, word: &str) -> bool {
    let word = word.to_lowercase().replace(['’', 'ʼ'], "'");
    words(language).contains(word.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_words() {
        assert!(is_stop_word(Language::Fr, "Le"));
        assert!(is_stop_word(Language::Fr, "qu’"));
        assert!(is_stop_word(Language::En, "THE"));
        assert!(is_stop_word(Language::De, "über"));
        assert!(!is_stop_word(Language::Fr, "chat"));
        assert!(!is_stop_word(Language::En, "le"));
    }
}
