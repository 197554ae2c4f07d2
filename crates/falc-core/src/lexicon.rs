//! Closed word lists: written abbreviations and internet slang.

use std::collections::HashSet;

use lazy_static::lazy_static;

lazy_static! {
    /// Matched case sensitively, without their trailing period. Forms that are
    /// also ordinary words ("sept", "ex") are left out.
    static ref ABBREVIATIONS: HashSet<&'static str> = [
        // Titles
        "M", "MM", "Mme", "Mmes", "Mlle", "Mlles", "Dr", "Drs", "Pr", "Me", "Mgr", "St", "Ste",
        "Mr", "Mrs", "Ms", "Prof", "Sr", "Jr",
        // Latin and editorial
        "etc", "cf", "cad", "c-à-d", "i.e", "e.g", "ibid", "op", "vs", "env", "NB",
        "N.B", "PS", "P.S", "resp", "approx", "apr", "av", "J.-C",
        // References
        "p", "pp", "n°", "vol", "chap", "fig", "éd", "coll", "réf", "tél", "Tél", "cit",
        // Addresses
        "bd", "pl", "rte", "imp", "fg", "BP", "CEDEX", "Cedex",
        // Units and quantities
        "km", "cm", "mm", "kg", "mg", "ml", "cl", "dl", "min", "h", "hab", "qté",
        // Calendar
        "janv", "févr", "avr", "juil", "oct", "nov", "déc", "lun", "ven", "sam",
        // Misc
        "adj", "adv", "suiv", "sq", "sqq", "dép", "gvt", "gouv", "sté",
    ]
    .into_iter()
    .collect();

    /// Stored lowercase, matched case insensitively
    static ref SLANG: HashSet<&'static str> = [
        // French
        "mdr", "ptdr", "lol", "stp", "svp", "bcp", "jsp", "jpp", "tkt", "slt", "cc", "bjr",
        "bsr", "pk", "pq", "pcq", "dsl", "osef", "mdrr", "bg", "jtm", "tlm", "qqn", "qqch",
        "qqc", "pr", "ds", "dc", "auj", "ajd", "tjr", "tjrs", "mtn", "ct", "jms", "nn", "oqp",
        "rdv", "biz", "wesh", "frr", "askip", "chépa", "chais", "jvais", "keskia", "koi",
        "kwa", "ki", "tt", "tte", "vrmt", "grv", "cv",
        // English
        "omg", "btw", "idk", "imo", "imho", "irl", "tbh", "asap", "fyi", "brb", "afk", "smh",
        "lmao", "rofl", "wtf", "np", "thx", "pls", "plz", "u", "ur", "gg", "dm",
    ]
    .into_iter()
    .collect();
}

/// Written abbreviation such as "Mme" or "etc.", case sensitive
pub fn is_abbreviation(word: &str) -> bool {
    let word = word.strip_suffix('.').unwrap_or(word);
    ABBREVIATIONS.contains(word)
}

/// Chat or SMS shorthand such as "mdr" or "tkt", case insensitive
pub fn is_slang(word: &str) -> bool {
    SLANG.contains(word.to_lowercase().as_str())
}
