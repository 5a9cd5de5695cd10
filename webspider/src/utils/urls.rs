use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::form_urlencoded;

use super::UrlError;

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// A URL that passed validation, with its domain and capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedUrl {
    pub url: String,
    pub domain: String,
    pub valid: bool,
    pub captured_at: DateTime<Utc>,
}

/// Loose scheme check: the string only has to start with `http://` or
/// `https://`. A bare `https://` with no host still counts as valid.
pub fn is_valid_url(url: &str) -> bool {
    !url.is_empty() && (url.starts_with(HTTP_PREFIX) || url.starts_with(HTTPS_PREFIX))
}

/// Returns everything between the scheme and the first `/`, port included.
pub fn extract_domain(url: &str) -> Result<String, UrlError> {
    if !is_valid_url(url) {
        return Err(UrlError::InvalidUrl(url.to_string()));
    }

    let rest = url
        .strip_prefix(HTTP_PREFIX)
        .or_else(|| url.strip_prefix(HTTPS_PREFIX))
        .unwrap_or(url);

    let domain = match rest.find('/') {
        Some(slash) => &rest[..slash],
        None => rest,
    };

    Ok(domain.to_string())
}

pub fn process_url(url: &str) -> Result<ProcessedUrl, UrlError> {
    if !is_valid_url(url) {
        return Err(UrlError::InvalidUrl(url.to_string()));
    }

    let domain = extract_domain(url)?;

    Ok(ProcessedUrl {
        url: url.to_string(),
        domain,
        valid: true,
        captured_at: Utc::now(),
    })
}

/// Processes every URL in order, or none of them.
///
/// The first invalid entry aborts the batch and no partial results are
/// returned.
pub fn batch_process_urls<S>(urls: &[S]) -> Result<Vec<ProcessedUrl>, UrlError>
where
    S: AsRef<str>,
{
    if urls.is_empty() {
        return Err(UrlError::EmptyBatch);
    }

    urls.iter()
        .enumerate()
        .map(|(index, url)| {
            let url = url.as_ref();
            process_url(url).map_err(|source| UrlError::Batch {
                index,
                url: url.to_string(),
                source: Box::new(source),
            })
        })
        .collect()
}

/// Splits a query string (with or without the leading `?`) into a map.
/// A repeated key keeps its last value.
pub fn query_to_map(query: &str) -> BTreeMap<String, String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

pub fn map_to_query(params: &BTreeMap<String, String>) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}
