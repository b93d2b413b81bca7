use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use reqwest::Client;
use std::time::Duration;

use super::TitleFetcher;
use crate::config::FetchConfig;
use crate::utils::normalize_url;
use crate::Result;

/// Platform suffix YouTube appends to every page title
const PLATFORM_SUFFIX: &str = " - YouTube";

static TITLE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());
static HTML_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap());

/// Title lookup by scraping the page's `<title>` tag
pub struct HtmlTitleFetcher {
    client: Client,
}

impl HtmlTitleFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        Self::new(
            Duration::from_secs(config.title_timeout_secs),
            &config.user_agent,
        )
    }

    async fn download_page(&self, url: &str) -> Result<String> {
        let url = normalize_url(url)?;
        tracing::debug!("Fetching page title from: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("Failed to fetch page: HTTP {}", response.status());
        }

        Ok(response.text().await?)
    }
}

/// Pull the video title out of a watch page
pub fn extract_title(html: &str) -> Option<String> {
    let raw = TITLE_TAG.captures(html)?.get(1)?.as_str();
    let title = decode_entities(raw).replace(PLATFORM_SUFFIX, "");
    let title = title.trim();

    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Decode the character references that show up in page titles
fn decode_entities(text: &str) -> String {
    HTML_ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                }
            };

            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[async_trait]
impl TitleFetcher for HtmlTitleFetcher {
    async fn fetch_title(&self, url: &str) -> Option<String> {
        match self.download_page(url).await {
            Ok(html) => {
                let title = extract_title(&html);
                if title.is_none() {
                    tracing::debug!("No <title> tag found for {}", url);
                }
                title
            }
            Err(e) => {
                tracing::debug!("Title fetch failed for {}: {:#}", url, e);
                None
            }
        }
    }
}
