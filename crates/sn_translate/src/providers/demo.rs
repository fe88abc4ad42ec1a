//! Last link of the chain: canned translations of the demo articles.

pub const DEMO_MARKER: &str = "[DEMO PREVOD]";

const DEMO_TRANSLATIONS: &[(&str, &str)] = &[
    ("Local Football Team Wins Championship", "Lokalni fudbalski tim osvaja prvenstvo"),
    ("Basketball Season Kicks Off", "Košarkaška sezona počinje"),
    ("Tennis Tournament Results", "Rezultati teniskog turnira"),
    (
        "The hometown heroes defeated their rivals 3-1 in an exciting match.",
        "Domaći heroji su porazili svoje rivale 3-1 u uzbudljivoj utakmici.",
    ),
    (
        "The new basketball season starts with high expectations.",
        "Nova košarkaška sezona počinje sa velikim očekivanjima.",
    ),
    (
        "Latest results from the international tennis tournament.",
        "Najnoviji rezultati sa međunarodnog teniskog turnira.",
    ),
    (
        "In a thrilling championship match, the local football team secured victory...",
        "U uzbudljivoj finalenoj utakmici, lokalni fudbalski tim je obezbedio pobedu...",
    ),
    (
        "Teams are preparing for what promises to be an exciting basketball season...",
        "Timovi se pripremaju za ono što obećava da bude uzbudljiva košarkaška sezona...",
    ),
    (
        "The tennis tournament concluded with surprising upsets and great matches...",
        "Teniski turnir je završen sa iznenađujućim preokretima i odličnim mečevima...",
    ),
];

/// Exact-match lookup; anything unknown comes back tagged with the demo marker.
pub fn demo_translation(text: &str) -> String {
    DEMO_TRANSLATIONS
        .iter()
        .find(|(original, _)| *original == text)
        .map(|(_, translated)| translated.to_string())
        .unwrap_or_else(|| format!("{} {}", DEMO_MARKER, text))
}
