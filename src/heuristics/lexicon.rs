//! Word lists for tokens the NLP model tags wrongly more often than not.
//!
//! All entries are lowercase. The lists are specific to the German dubbed
//! audio description of the stimulus.

/// Forced to PROPN / NE
pub const PROPER_NOUNS: &[&str] = &[
    "flame",
    "amber",
    "astor",
    "bayou",
    "bobbie",
    "bubba",
    "bubbas",
    "dan",
    "dans",
    "elvis",
    "enquirer",
    "flex-o-light-pingpong-schläger",
    "forrest",
    "forrests",
    "groom",
    "jenny",
    "jennys",
    "johnson",
    "la", // bayou la batre
    "lincoln",
    "louise",
    "nixon",
    "pinoccio",
    "robert-zemeckis-film",
    "sesamstraße",
    "tex",
];

/// Forced to NOUN / NN
pub const NOUNS: &[&str] = &[
    "abendessen",
    "ärmel",
    "barbecue",
    "barbecues",
    "bergsee",
    "bh",
    "bluse",
    "cappy",
    "cocktail",
    "cocktails",
    "colas",
    "ferien",
    "football",
    "g.i.s",
    "grill",
    "gumbo",
    "hornbrille",
    "idiot",
    "kapitän",
    "kokain",
    "kokainlinien",
    "kokosnussshrimps",
    "konfetti",
    "limonenshrimps",
    "lügner",
    "mg",
    "nachthemd",
    "napalm",
    "opas",
    "pingpong",
    "platoon",
    "rollo",
    "schwachkopf",
    "seemannskrankenhaus",
    "shit",
    "shrimpbootcaptain",
    "shrimpkutterkapitän",
    "shrimps",
    "shrimpscreol",
    "shrimpssandwich",
    "shrimpssuppe",
    "smiley",
    "stecker",
    "tischtennisschläger",
    "trottel",
    "veteran",
    "wartebank",
    "wichser",
    "zauberbeine",
    "zeitlupe",
];

/// Forced to NUM / CARD
pub const NUMBERS: &[&str] = &[
    "einhundertsiebzig",
    "fünfundzwanzigtausend",
    "hundertsechzig",
    "neunzehnhunderteinundachtzig",
    "vierundzwanzigtausendfünfhundertzweiundsechzig",
];

/// Appeal interjections; removed before annotation and tagged X / XY
pub const OTHER: &[&str] = &["ey", "hallo", "hey", "okay", "na", "wow"];

/// Symptom interjections; removed before annotation and tagged NONSPEECH
pub const NONSPEECH: &[&str] = &[
    "aah", "ach", "äch", "ache", "ah", "äh", "aha", "ähm", "al", "ärch", "aua", "aueh", "auh",
    "börp", "d", "each", "ech", "eh", "ergh", "ha", "hä", "hach", "häch", "he", "hech", "hi",
    "hihi", "hm", "ho", "hua", "huach", "huch", "i", "ie", "lu", "mh", "mhm", "o", "och", "oh",
    "öh", "öhm", "ouh", "ouha", "pf", "pfuh", "psst", "schniff", "tchich", "tzm", "u", "uch",
    "uhm", "uaech", "w", "wah", "wäh", "whoo", "whou",
];

/// Trailing punctuation the transcribers attach to words
pub const PUNCTUATION_SUFFIXES: &[char] = &['.', ',', '!'];
