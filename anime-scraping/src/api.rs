use anyhow::{bail, Context};
use getset::Getters;
use log::debug;
use scraper::Html;
use url::Url;

use crate::{
    config::ScraperConfig,
    parser::page::parse_review_html,
    schema::{AnimeId, AnimeListing},
};

/// One HTTP session against the site.  Reuse it for a run of ids.
#[derive(Getters)]
pub struct AnimeClient {
    client: reqwest::Client,
    base_url: Url,
    #[getset(get = "pub")]
    config: ScraperConfig,
}

impl AnimeClient {
    pub fn new(config: ScraperConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid base url: {:?}", config.base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("Base url cannot have a path: {base_url}");
        }
        let mut builder = reqwest::Client::builder();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
            config,
        })
    }

    pub fn details_url(&self, anime_id: AnimeId) -> Url {
        self.url_with_segments(&["anime", &anime_id.to_string()])
    }

    pub fn reviews_url(&self, anime_id: AnimeId) -> Url {
        self.url_with_segments(&[
            "anime",
            &anime_id.to_string(),
            &self.config.review_slug,
            "reviews",
        ])
    }

    fn url_with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Raw HTML of the details page.
    pub async fn get_page_by_id(&self, anime_id: AnimeId) -> anyhow::Result<String> {
        self.get_text(self.details_url(anime_id)).await
    }

    /// Metadata and reviews from the first review page, tagged with `anime_id`.
    pub async fn get_paged_reviews_by_id(&self, anime_id: AnimeId) -> anyhow::Result<AnimeListing> {
        let text = self.get_text(self.reviews_url(anime_id)).await?;
        let mut listing = parse_review_html(&Html::parse_document(&text))
            .with_context(|| format!("While parsing the review page of anime {anime_id}"))?;
        listing.metadata.anime_id = Some(anime_id);
        Ok(listing)
    }

    async fn get_text(&self, url: Url) -> anyhow::Result<String> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("While requesting {url}"))?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    use super::AnimeClient;
    use crate::{config::ScraperConfig, schema::AnimeId};

    const REVIEW_PAGE: &str = r#"<html><body><div id="content"><table><tr>
        <td><div><span>Episodes:</span> 12</div></td>
        <td></td>
    </tr></table></div></body></html>"#;

    /// Answers a single request with `status` and `body`.
    /// The handle yields the request line.
    async fn serve_once(status: &'static str, body: &'static str) -> (AnimeClient, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ScraperConfig::builder()
            .base_url(format!("http://{}", listener.local_addr().unwrap()))
            .build();
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = vec![];
            let mut buf = [0; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
            let request = String::from_utf8_lossy(&request);
            request.lines().next().unwrap_or_default().to_owned()
        });
        (AnimeClient::new(config).unwrap(), server)
    }

    #[tokio::test]
    async fn reviews_are_tagged_with_id() {
        let (client, server) = serve_once("200 OK", REVIEW_PAGE).await;
        let listing = client
            .get_paged_reviews_by_id(AnimeId::from(42))
            .await
            .unwrap();
        assert_eq!(server.await.unwrap(), "GET /anime/42/_/reviews HTTP/1.1");
        assert_eq!(listing.metadata.anime_id, Some(AnimeId::from(42)));
        assert_eq!(listing.metadata.episodes.as_deref(), Some("12"));
        assert!(listing.reviews.is_empty());
    }

    #[tokio::test]
    async fn error_status_fails() {
        let (client, server) = serve_once("404 Not Found", "missing").await;
        let result = client.get_paged_reviews_by_id(AnimeId::from(42)).await;
        assert!(result.is_err());
        assert_eq!(server.await.unwrap(), "GET /anime/42/_/reviews HTTP/1.1");
    }

    #[tokio::test]
    async fn details_page_text() {
        let (client, server) = serve_once("200 OK", "<html>details</html>").await;
        let text = client.get_page_by_id(AnimeId::from(7)).await.unwrap();
        assert_eq!(text, "<html>details</html>");
        assert_eq!(server.await.unwrap(), "GET /anime/7 HTTP/1.1");
    }

    #[test]
    fn urls_from_default_config() {
        let client = AnimeClient::new(ScraperConfig::default()).unwrap();
        let id = AnimeId::from(32995);
        assert_eq!(
            client.details_url(id).as_str(),
            "https://myanimelist.net/anime/32995"
        );
        assert_eq!(
            client.reviews_url(id).as_str(),
            "https://myanimelist.net/anime/32995/_/reviews"
        );
    }

    #[test]
    fn urls_keep_base_path() {
        let config = ScraperConfig::builder()
            .base_url("http://localhost:8080/mirror/")
            .review_slug("Yuri_on_Ice")
            .build();
        let client = AnimeClient::new(config).unwrap();
        assert_eq!(
            client.reviews_url(AnimeId::from(5)).as_str(),
            "http://localhost:8080/mirror/anime/5/Yuri_on_Ice/reviews"
        );
        assert_eq!(client.config().review_slug, "Yuri_on_Ice");
    }

    #[test]
    fn invalid_base_url() {
        let config = ScraperConfig::builder().base_url("not a url").build();
        assert!(AnimeClient::new(config).is_err());
        let config = ScraperConfig::builder().base_url("mailto:someone@example.com").build();
        assert!(AnimeClient::new(config).is_err());
    }
}
