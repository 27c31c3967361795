use anyhow::Context;
use itertools::Itertools;
use scraper::Html;

use crate::{
    parser::{review::scrape_review_main_bar, sidebar::scrape_sidebar},
    schema::AnimeListing,
    tree::DocNode,
};

pub fn parse_review_html(html: &Html) -> anyhow::Result<AnimeListing> {
    parse_review_page(html.tree.root())
}

/// Splits `#content table tr` into its sidebar cell and its review cell.
pub fn parse_review_page<'a, N: DocNode<'a>>(root: N) -> anyhow::Result<AnimeListing> {
    let content_div = root
        .find_descendant(|n| n.is_named("div") && n.element_id() == Some("content"))
        .context("Content div was not found")?;
    let row = content_div
        .find_descendant(|n| n.is_named("table"))
        .context("Table was not found in the content div")?
        .find_descendant(|n| n.is_named("tr"))
        .context("Row was not found in the content table")?;
    let (sidebar, main_bar) = row
        .children()
        .filter(|n| n.is_named("td"))
        .next_tuple()
        .context("Content row has fewer than two cells")?;

    Ok(AnimeListing {
        metadata: scrape_sidebar(sidebar)?,
        reviews: scrape_review_main_bar(main_bar)?,
    })
}
