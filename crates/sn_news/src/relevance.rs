//! Keyword heuristic deciding whether an article counts as sports content.

use sn_core::RawArticle;

pub const SPORTS_CATEGORY: &str = "sports";

pub const SPORTS_KEYWORDS: &[&str] = &[
    "sports", "football", "basketball", "soccer", "tennis", "baseball",
    "hockey", "golf", "olympics", "fifa", "nfl", "nba", "mlb", "nhl",
    "championship", "tournament", "league", "match", "game", "player",
    "team", "coach", "stadium", "score", "goal", "touchdown", "victory",
];

/// Search expression sent to the all-news endpoint.
pub const SPORTS_SEARCH: &str = "sports OR football OR basketball OR soccer OR tennis OR baseball OR hockey";

/// An article is sports-related when the provider tagged it so, or when its
/// title, description or snippet mentions one of the keywords.
pub fn is_sports_related(article: &RawArticle) -> bool {
    if article.categories.iter().any(|c| c == SPORTS_CATEGORY) {
        return true;
    }

    let text = [&article.title, &article.description, &article.snippet]
        .into_iter()
        .flatten()
        .map(|s| s.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    SPORTS_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

pub fn retain_sports(articles: Vec<RawArticle>) -> Vec<RawArticle> {
    articles.into_iter().filter(is_sports_related).collect()
}
