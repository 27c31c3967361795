use std::{fmt::Debug, path::PathBuf};

use anime_scraping_utils::fs_util::read_toml;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

pub const DEFAULT_BASE_URL: &str = "https://myanimelist.net";
/// The site resolves review pages by id alone, so any slug works.
pub const DEFAULT_REVIEW_SLUG: &str = "_";

#[derive(Clone, Debug, TypedBuilder, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    #[builder(default = DEFAULT_BASE_URL.to_owned(), setter(into))]
    pub base_url: String,
    #[builder(default = DEFAULT_REVIEW_SLUG.to_owned(), setter(into))]
    pub review_slug: String,
    #[builder(default, setter(strip_option, into))]
    pub user_agent: Option<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ScraperConfig {
    pub fn load<P: Into<PathBuf> + Debug>(path: P) -> anyhow::Result<Self> {
        read_toml(path)
    }
}
