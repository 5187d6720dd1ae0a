//! Destination context used to ground the itinerary prompt.
//!
//! A handful of notable attractions is pulled from the public Wikipedia
//! search API. Context is best effort: callers treat any error as "no
//! context" and carry on.

use crate::config::ContextConfig;
use crate::services::providers::ProviderError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use service_core::observability::TracedClientExt;
use std::time::Duration;

const USER_AGENT: &str = concat!(
    "planner-service/",
    env!("CARGO_PKG_VERSION"),
    " (itinerary context lookup)"
);

/// A point of interest at the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attraction {
    pub name: String,
    pub description: String,
}

#[async_trait]
pub trait AttractionSource: Send + Sync {
    async fn attractions(&self, destination: &str) -> Result<Vec<Attraction>, ProviderError>;
}

/// Source used when context lookup is turned off.
pub struct NoContext;

#[async_trait]
impl AttractionSource for NoContext {
    async fn attractions(&self, _destination: &str) -> Result<Vec<Attraction>, ProviderError> {
        Ok(Vec::new())
    }
}

/// Wikipedia full-text search for "<destination> notable attractions".
pub struct WikipediaAttractions {
    config: ContextConfig,
    client: Client,
}

impl WikipediaAttractions {
    pub fn new(config: ContextConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl AttractionSource for WikipediaAttractions {
    async fn attractions(&self, destination: &str) -> Result<Vec<Attraction>, ProviderError> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Ok(Vec::new());
        }

        let search = format!("{} notable attractions OR landmarks", destination);
        let limit = self.config.result_limit.to_string();
        let params = [
            ("action", "query"),
            ("list", "search"),
            ("srsearch", search.as_str()),
            ("format", "json"),
            ("srlimit", limit.as_str()),
        ];

        let response = self
            .client
            .traced_get(&self.config.api_url)
            .header("User-Agent", USER_AGENT)
            .query(&params)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::ApiError(format!(
                "Wikipedia search returned {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        Ok(body
            .query
            .map(|q| q.search)
            .unwrap_or_default()
            .into_iter()
            .filter(|hit| !hit.title.trim().is_empty())
            .map(|hit| Attraction {
                name: hit.title,
                description: strip_markup(&hit.snippet),
            })
            .collect())
    }
}

/// Drop HTML tags (search snippets wrap matches in `<span class="searchmatch">`)
/// and decode character references.
///
/// Numeric references (`&#8211;`, `&#x2013;`) and the XML named entities plus
/// `&nbsp;` are decoded in one pass, so `&amp;lt;` becomes `&lt;` and not `<`.
/// Anything else is left as written.
pub fn strip_markup(snippet: &str) -> String {
    let mut text = String::with_capacity(snippet.len());
    let mut in_tag = false;
    for c in snippet.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    decode_entities(&text).trim().to_string()
}

fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        // Entity names are short; a distant ';' belongs to ordinary text.
        let decoded = rest
            .char_indices()
            .take(12)
            .find(|&(_, c)| c == ';')
            .and_then(|(end, _)| entity(&rest[1..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}
