use std::path::{Path, PathBuf};

use anime_scraping_utils::fs_util::write_csv;
use anyhow::Context;
use getset::{CopyGetters, Getters};
use indexmap::IndexMap;
use log::info;

use crate::{
    api::AnimeClient,
    schema::{AnimeId, AnimeListing, AnimeMetadata, Review},
};

/// Where listings come from.  Implemented by the HTTP client.
#[allow(async_fn_in_trait)]
pub trait ListingSource {
    async fn fetch_listing(&self, anime_id: AnimeId) -> anyhow::Result<AnimeListing>;
}

impl ListingSource for AnimeClient {
    async fn fetch_listing(&self, anime_id: AnimeId) -> anyhow::Result<AnimeListing> {
        self.get_paged_reviews_by_id(anime_id).await
    }
}

pub struct BatchOutput<'p> {
    pub metadata_path: &'p Path,
    pub review_dir: &'p Path,
}

#[derive(Debug, Getters, CopyGetters)]
pub struct BatchSummary {
    #[getset(get_copy = "pub")]
    metadata_rows: usize,
    #[getset(get = "pub")]
    review_files: Vec<PathBuf>,
}

/// Fetches every id in order and writes the csv files.
///
/// Each non-empty id list gets its own source from `make_source`.  Ids are not
/// deduplicated: a repeated id adds another metadata row and rewrites its
/// review file.  The first failure aborts the whole batch.
pub async fn run_batch<S, F>(
    id_lists: &[Vec<AnimeId>],
    mut make_source: F,
    output: BatchOutput<'_>,
) -> anyhow::Result<BatchSummary>
where
    S: ListingSource,
    F: FnMut() -> anyhow::Result<S>,
{
    let mut metadata: Vec<AnimeMetadata> = vec![];
    let mut reviews: IndexMap<AnimeId, Vec<Review>> = IndexMap::new();
    for ids in id_lists.iter().filter(|ids| !ids.is_empty()) {
        let source = make_source()?;
        for &anime_id in ids {
            info!("Fetching anime {anime_id}");
            let listing = source
                .fetch_listing(anime_id)
                .await
                .with_context(|| format!("While fetching anime {anime_id}"))?;
            metadata.push(listing.metadata);
            reviews.insert(anime_id, listing.reviews);
        }
    }

    write_csv(output.metadata_path, &AnimeMetadata::CSV_HEADER, &metadata)?;
    info!(
        "Wrote {} rows to {:?}",
        metadata.len(),
        output.metadata_path
    );

    fs_err::create_dir_all(output.review_dir)?;
    let mut review_files = vec![];
    for (anime_id, reviews) in &reviews {
        let path = output.review_dir.join(format!("{anime_id}.csv"));
        write_csv(&path, &Review::CSV_HEADER, reviews)?;
        review_files.push(path);
    }
    info!(
        "Wrote {} review files to {:?}",
        review_files.len(),
        output.review_dir
    );

    Ok(BatchSummary {
        metadata_rows: metadata.len(),
        review_files,
    })
}

/// One id per line.  Blank lines are skipped.
pub fn parse_anime_ids(text: &str) -> anyhow::Result<Vec<AnimeId>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(i, line)| {
            line.parse()
                .with_context(|| format!("Invalid anime id on line {}: {line:?}", i + 1))
        })
        .collect()
}

pub fn read_anime_ids(path: &Path) -> anyhow::Result<Vec<AnimeId>> {
    parse_anime_ids(&fs_err::read_to_string(path)?)
        .with_context(|| format!("While reading anime ids from {path:?}"))
}
