use derive_more::{Display, From, FromStr};
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, Display, From, FromStr, Serialize, Deserialize,
)]
pub struct AnimeId(u32);

/// Values as they appear on the page, trimmed.  `None` means the field was not found.
#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct AnimeMetadata {
    pub anime_id: Option<AnimeId>,
    #[serde(rename = "num_episodes")]
    pub episodes: Option<String>,
    pub studios: Option<String>,
    pub rating: Option<String>,
    pub score: Option<String>,
    pub rank: Option<String>,
    pub popularity_rank: Option<String>,
}

impl AnimeMetadata {
    pub const CSV_HEADER: [&'static str; 7] = [
        "anime_id",
        "num_episodes",
        "studios",
        "rating",
        "score",
        "rank",
        "popularity_rank",
    ];
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Review {
    pub overall: u32,
    pub review: String,
}

impl Review {
    pub const CSV_HEADER: [&'static str; 2] = ["overall", "review"];
}

/// Metadata together with the reviews on the first review page.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AnimeListing {
    pub metadata: AnimeMetadata,
    pub reviews: Vec<Review>,
}

#[cfg(test)]
mod tests {
    use super::AnimeId;

    #[test]
    fn parse_and_display_anime_id() {
        let id: AnimeId = "32995".parse().unwrap();
        assert_eq!(id, AnimeId::from(32995));
        assert_eq!(id.to_string(), "32995");
        assert!("abc".parse::<AnimeId>().is_err());
        assert!("-1".parse::<AnimeId>().is_err());
    }
}
