//! Community website scraper.
//!
//! Fetches the public homepage once and extracts the community name,
//! description and contact email. Any failure yields the built-in
//! [`CommunityInfo::default`].

use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{error, info};

use crate::error::AppError;
use crate::models::CommunityInfo;

pub const USER_AGENT: &str = "GarjeMarathiAI/1.0";
pub const DEFAULT_SITE_URL: &str = "https://www.garjemarathi.com";
pub const DEFAULT_SCRAPE_TIMEOUT: Duration = Duration::from_secs(10);

/// Characters of body text kept when no meta description exists.
const BODY_DESCRIPTION_CHARS: usize = 200;

// NOTE: expect() is acceptable here: the selectors are constants.
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("Invalid selector: title"));
static META_DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[name="description"]"#).expect("Invalid selector: meta description")
});
static MAIN_CONTENT: LazyLock<[Selector; 3]> = LazyLock::new(|| {
    [
        Selector::parse("main").expect("Invalid selector: main"),
        Selector::parse("div.content").expect("Invalid selector: div.content"),
        Selector::parse("body").expect("Invalid selector: body"),
    ]
});
static MAILTO: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"a[href^="mailto:"]"#).expect("Invalid selector: mailto link")
});
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("Invalid regex: email")
});

/// One-shot scraper for the community homepage.
pub struct WebsiteScraper {
    client: Client,
    base_url: String,
}

impl WebsiteScraper {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Scrapes the homepage, falling back to the default community info on
    /// any network or HTTP failure.
    pub async fn scrape(&self) -> CommunityInfo {
        match self.try_scrape().await {
            Ok(info) => {
                info!("Scraped community info for {}", info.name);
                info
            }
            Err(e) => {
                error!("Failed to scrape homepage: {}", e);
                CommunityInfo::default()
            }
        }
    }

    pub async fn try_scrape(&self) -> Result<CommunityInfo, AppError> {
        let res = self.client.get(&self.base_url).send().await?;
        let res = res.error_for_status()?;
        let body = res.text().await?;
        Ok(parse_homepage(&body))
    }
}

/// Extracts community info from homepage HTML.
pub fn parse_homepage(html: &str) -> CommunityInfo {
    let document = Html::parse_document(html);
    let defaults = CommunityInfo::default();

    let name = document
        .select(&TITLE)
        .next()
        .map(|title| title.text().collect::<String>())
        .and_then(|title| title.split('|').next().map(|s| s.trim().to_string()))
        .filter(|name| !name.is_empty())
        .unwrap_or(defaults.name);

    let description = extract_description(&document).unwrap_or(defaults.description);

    CommunityInfo {
        name,
        description,
        mission: None,
        contact_email: extract_email(&document),
    }
}

fn extract_description(document: &Html) -> Option<String> {
    let meta = document
        .select(&META_DESCRIPTION)
        .find_map(|m| m.value().attr("content"))
        .map(str::trim)
        .filter(|content| !content.is_empty());
    if let Some(content) = meta {
        return Some(content.to_string());
    }

    let container = MAIN_CONTENT
        .iter()
        .find_map(|selector| document.select(selector).next())?;

    let text = container
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let preview: String = text.chars().take(BODY_DESCRIPTION_CHARS).collect();
    (!preview.is_empty()).then_some(preview)
}

fn extract_email(document: &Html) -> Option<String> {
    if let Some(href) = document
        .select(&MAILTO)
        .find_map(|a| a.value().attr("href"))
    {
        return Some(href.replace("mailto:", ""));
    }

    let text: String = document.root_element().text().collect();
    EMAIL.find(&text).map(|m| m.as_str().to_string())
}
