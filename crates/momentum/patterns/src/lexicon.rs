//! Maintained dictionaries used by the extractor.

/// Known Québécois (joual) dialect and slang markers, matched as substrings of
/// the case-folded corpus.
pub const KNOWN_MARKERS: &[&str] = &[
    "toé",
    "moé",
    "icitte",
    "asteure",
    "chu",
    "j'vas",
    "faque",
    "pis",
    "tabarnac",
    "tabarnak",
    "câlisse",
    "crisse",
    "ostie",
    "maudit",
    "ciboire",
    "y fait frette",
    "c'est malade",
    "c'est fou",
    "fait que",
    "genre",
    "tsé",
    "ben",
    "pantoute",
    "char",
    "dépanneur",
    "tuque",
    "pogner",
    "gosser",
    "niaiseux",
    "quétaine",
    "piasse",
    "cenne",
    "les boys",
    "la gang",
];

/// Region identifiers that count as a major-city concentration.
pub const MAJOR_CITIES: &[&str] = &["montreal", "montréal", "quebec", "québec"];

pub fn is_known_marker(term: &str) -> bool {
    KNOWN_MARKERS.contains(&term)
}

/// Case-insensitive major-city check.
pub fn is_major_city(region: &str) -> bool {
    let folded = region.trim().to_lowercase();
    MAJOR_CITIES.contains(&folded.as_str())
}
