//! Job posting retrieval and HTML → readable text reduction.

use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::{Client, Url};
use scraper::{ElementRef, Html, Selector};
use tracing::info;

use crate::sources::extract::SourceError;

pub const MAX_PARAGRAPHS: usize = 80;

static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").expect("valid selector"));
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("valid selector"));
static META_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="description"]"#).expect("valid selector"));
static OG_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:description"]"#).expect("valid selector"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("valid selector"));

#[derive(Clone)]
pub struct JobPostingFetcher {
    client: Client,
}

impl JobPostingFetcher {
    pub fn new(timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("letterdrop/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `url` and reduces the page to title, description and paragraphs.
    pub async fn fetch(&self, url: &str) -> Result<String, SourceError> {
        let url = parse_url(url)?;
        let html = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let text = reduce_html(&html);
        info!(%url, html_bytes = html.len(), chars = text.len(), "job posting fetched");
        Ok(text)
    }
}

fn parse_url(raw: &str) -> Result<Url, SourceError> {
    let url = Url::parse(raw.trim()).map_err(|e| SourceError::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SourceError::InvalidUrl(format!(
            "unsupported scheme '{other}'"
        ))),
    }
}

fn element_text(el: ElementRef) -> String {
    el.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn meta_content(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|c| !c.is_empty())
        .map(str::to_string)
}

/// Heading (first `h1`, else `<title>`), then description (meta, else
/// `og:description`), then up to `MAX_PARAGRAPHS` non-empty paragraphs,
/// joined by blank lines.
pub fn reduce_html(html: &str) -> String {
    let doc = Html::parse_document(html);
    let mut parts = Vec::new();

    let heading = doc
        .select(&H1)
        .chain(doc.select(&TITLE))
        .map(element_text)
        .find(|t| !t.is_empty());
    parts.extend(heading);

    let description =
        meta_content(&doc, &META_DESCRIPTION).or_else(|| meta_content(&doc, &OG_DESCRIPTION));
    parts.extend(description);

    parts.extend(
        doc.select(&PARAGRAPH)
            .map(element_text)
            .filter(|t| !t.is_empty())
            .take(MAX_PARAGRAPHS),
    );

    parts.join("\n\n")
}
