//! Known city names offered as input suggestions

/// Brazilian state capitals first, then major world cities
pub const KNOWN_CITIES: &[&str] = &[
    "São Paulo",
    "Rio de Janeiro",
    "Belo Horizonte",
    "Curitiba",
    "Porto Alegre",
    "Brasília",
    "Salvador",
    "Fortaleza",
    "Recife",
    "Manaus",
    "Nova York",
    "Londres",
    "Paris",
    "Tóquio",
    "Pequim",
    "Berlim",
    "Roma",
    "Madri",
];

/// Known cities starting with `prefix`, ignoring case, in list order.
/// A blank prefix matches everything.
#[must_use]
pub fn suggest(prefix: &str) -> Vec<&'static str> {
    let prefix = prefix.trim().to_lowercase();
    KNOWN_CITIES
        .iter()
        .copied()
        .filter(|city| city.to_lowercase().starts_with(&prefix))
        .collect()
}
