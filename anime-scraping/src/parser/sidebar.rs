use anyhow::Context;
use log::debug;

use crate::{
    parser::field::{find_sidebar_info_by_label, find_sidebar_statistics_by_label, LocateError},
    schema::AnimeMetadata,
    tree::DocNode,
};

pub fn scrape_sidebar<'a, N: DocNode<'a>>(sidebar: N) -> anyhow::Result<AnimeMetadata> {
    let sidebar = sidebar
        .find_descendant(|n| n.is_named("div"))
        .context("Sidebar div was not found")?;

    let info = |label: &str| field_or_absent(find_sidebar_info_by_label(label, sidebar).map(Some));
    let statistics = |label: &str| field_or_absent(find_sidebar_statistics_by_label(label, sidebar));

    Ok(AnimeMetadata {
        anime_id: None,
        episodes: info("Episodes:"),
        studios: info("Studios:"),
        rating: info("Rating:"),
        score: statistics("Score:"),
        rank: statistics("Ranked:"),
        popularity_rank: info("Popularity:"),
    })
}

fn field_or_absent(result: Result<Option<String>, LocateError>) -> Option<String> {
    result.unwrap_or_else(|e| {
        debug!("{e}");
        None
    })
}

#[cfg(test)]
mod tests {
    use super::scrape_sidebar;
    use crate::{schema::AnimeMetadata, tree::SyntheticNode};

    fn row(label: &str, value: SyntheticNode) -> SyntheticNode {
        SyntheticNode::element(
            "div",
            vec![
                SyntheticNode::element("span", vec![SyntheticNode::text(label)])
                    .with_attr("class", "dark_text"),
                SyntheticNode::text("\n"),
                value,
            ],
        )
    }

    fn sidebar(rows: Vec<SyntheticNode>) -> SyntheticNode {
        SyntheticNode::element("td", vec![SyntheticNode::element("div", rows)])
    }

    fn text_span(text: &str) -> SyntheticNode {
        SyntheticNode::element("span", vec![SyntheticNode::text(text)])
    }

    fn all_rows() -> Vec<SyntheticNode> {
        vec![
            row("Episodes:", SyntheticNode::text("12")),
            row("Studios:", SyntheticNode::element("a", vec![SyntheticNode::text("X Studio")])),
            row("Rating:", SyntheticNode::text("PG-13")),
            row("Score:", text_span("8.5")),
            row("Ranked:", text_span("150")),
            row("Popularity:", SyntheticNode::text("40")),
        ]
    }

    #[test]
    fn all_fields_present() {
        let td = sidebar(all_rows());
        assert_eq!(
            scrape_sidebar(&td).unwrap(),
            AnimeMetadata {
                anime_id: None,
                episodes: Some("12".to_owned()),
                studios: Some("X Studio".to_owned()),
                rating: Some("PG-13".to_owned()),
                score: Some("8.5".to_owned()),
                rank: Some("150".to_owned()),
                popularity_rank: Some("40".to_owned()),
            }
        );
    }

    #[test]
    fn missing_field_is_absent() {
        let mut rows = all_rows();
        rows.remove(2);
        let metadata = scrape_sidebar(&sidebar(rows)).unwrap();
        assert_eq!(metadata.rating, None);
        assert_eq!(metadata.episodes.as_deref(), Some("12"));
        assert_eq!(metadata.studios.as_deref(), Some("X Studio"));
        assert_eq!(metadata.score.as_deref(), Some("8.5"));
        assert_eq!(metadata.rank.as_deref(), Some("150"));
        assert_eq!(metadata.popularity_rank.as_deref(), Some("40"));
    }

    #[test]
    fn sidebar_without_div() {
        let td = SyntheticNode::element("td", vec![SyntheticNode::text("nothing")]);
        assert!(scrape_sidebar(&td).is_err());
    }
}
