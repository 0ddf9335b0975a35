//! Result card render model

use serde::Serialize;
use url::Url;
use utoipa::ToSchema;

use crate::domain::SearchHit;

/// Icon shown when a result URL has no usable origin
pub const FALLBACK_FAVICON: &str = "/favicon.svg";

/// Number of breadcrumb parts shown under the site name
const BREADCRUMB_PARTS: usize = 2;

/// Карточка результата поиска
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultCard {
    pub title: String,
    pub url: String,
    /// Имя сайта (домен второго уровня)
    pub site_name: String,
    /// Хост и первые сегменты пути
    pub breadcrumb: Vec<String>,
    pub favicon_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<SearchHit> for ResultCard {
    fn from(hit: SearchHit) -> Self {
        let parsed = Url::parse(&hit.url).ok();

        let (site_name, breadcrumb, favicon_url) = match &parsed {
            Some(url) => (site_name(url), breadcrumb(url), favicon_url(url)),
            None => (hit.url.clone(), vec![hit.url.clone()], FALLBACK_FAVICON.to_string()),
        };

        Self {
            title: hit.doc_title,
            url: hit.url,
            site_name,
            breadcrumb,
            favicon_url,
            description: hit.description,
        }
    }
}

fn site_name(url: &Url) -> String {
    let Some(host) = url.host_str() else {
        return url.to_string();
    };
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() >= 2 {
        labels[labels.len() - 2].to_string()
    } else {
        host.to_string()
    }
}

fn breadcrumb(url: &Url) -> Vec<String> {
    let host = url.host_str().unwrap_or_default().to_string();
    let path = url
        .path_segments()
        .into_iter()
        .flatten()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string);
    let query = url
        .query()
        .into_iter()
        .flat_map(|q| q.split('&'))
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.replacen('=', ": ", 1));

    std::iter::once(host)
        .chain(path)
        .chain(query)
        .take(BREADCRUMB_PARTS)
        .collect()
}

fn favicon_url(url: &Url) -> String {
    let origin = url.origin();
    if origin.is_tuple() {
        format!("{}/favicon.ico", origin.ascii_serialization())
    } else {
        FALLBACK_FAVICON.to_string()
    }
}
