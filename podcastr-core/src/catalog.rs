//! Episode catalog loading.
//!
//! Reads the JSON document served by the podcast backend
//! (`{ "episodes": [...] }`) from a local file and maps each entry to an
//! [`Episode`]. Catalog order is kept as playback order.

use crate::episode::Episode;
use crate::error::{PodcastrError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use url::Url;

const LOG_TARGET: &str = "podcastr::catalog";

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    episodes: Vec<CatalogEntry>,
}

// `published_at`, `description` and `file.type` are not used by the player
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: String,
    title: String,
    members: String,
    thumbnail: String,
    file: CatalogFile,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    url: String,
    duration: u64,
}

impl CatalogEntry {
    fn into_episode(self) -> Result<Episode> {
        check_url("thumbnail", &self.thumbnail)?;
        check_url("file.url", &self.file.url)?;

        Ok(Episode::new(
            self.title,
            self.members,
            self.thumbnail,
            self.file.duration,
            self.file.url,
        )
        .with_id(self.id))
    }
}

fn check_url(field: &str, value: &str) -> Result<()> {
    Url::parse(value).map(|_| ()).map_err(|_| PodcastrError::InvalidUrl {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Parse a catalog document
///
/// # Errors
///
/// Returns [`PodcastrError::CatalogParseError`] for malformed JSON and
/// [`PodcastrError::InvalidUrl`] when an entry's artwork or media URL is not
/// an absolute URL.
pub fn parse_catalog(content: &str) -> Result<Vec<Episode>> {
    let document: CatalogDocument = serde_json::from_str(content)?;
    let episodes = document
        .episodes
        .into_iter()
        .map(CatalogEntry::into_episode)
        .collect::<Result<Vec<_>>>()?;

    debug!(target: LOG_TARGET, "Parsed {} catalog episode(s)", episodes.len());
    Ok(episodes)
}

/// Read and parse the catalog file at `path`
///
/// # Errors
///
/// Returns an IO error if the file cannot be read, otherwise the errors of
/// [`parse_catalog`].
pub fn load_catalog(path: &Path) -> Result<Vec<Episode>> {
    let content = fs::read_to_string(path)?;
    let episodes = parse_catalog(&content)?;
    info!(
        target: LOG_TARGET,
        "Loaded {} episode(s) from {}",
        episodes.len(),
        path.display()
    );
    Ok(episodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER_JSON: &str = r#"{
      "episodes": [
        {
          "id": "a-importancia-da-contribuicao-em-open-source",
          "title": "Faladev #30 | A importância da contribuição em Open Source",
          "members": "Diego Fernandes, João Pedro, Diego Haz e Bruno Lemos",
          "published_at": "2021-01-22 19:28:00",
          "thumbnail": "https://example.com/opensource.jpg",
          "description": "<p>Neste episódio...</p>",
          "file": {
            "url": "https://example.com/opensource.m4a",
            "type": "audio/x-m4a",
            "duration": 3981
          }
        },
        {
          "id": "uma-conversa-sobre-programacao-funcional",
          "title": "Uma conversa sobre programação funcional",
          "members": "Diego Fernandes e Rodrigo Gonçalves",
          "thumbnail": "https://example.com/funcional.jpg",
          "file": {
            "url": "https://example.com/funcional.m4a",
            "duration": 2157
          }
        }
      ]
    }"#;

    #[test]
    fn test_parse_catalog_maps_entries_in_order() {
        let episodes = parse_catalog(SERVER_JSON).unwrap();

        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].id, "a-importancia-da-contribuicao-em-open-source");
        assert_eq!(episodes[0].duration, 3981);
        assert_eq!(episodes[0].duration_as_string, "66:21");
        assert_eq!(episodes[0].url, "https://example.com/opensource.m4a");
        assert_eq!(episodes[1].members, "Diego Fernandes e Rodrigo Gonçalves");
        assert!(episodes.iter().all(|e| e.validate().is_ok()));
    }

    #[test]
    fn test_parse_catalog_rejects_relative_media_url() {
        let json = r#"{ "episodes": [ {
            "id": "x", "title": "x", "members": "x",
            "thumbnail": "https://example.com/x.jpg",
            "file": { "url": "x.m4a", "duration": 1 }
        } ] }"#;

        match parse_catalog(json) {
            Err(PodcastrError::InvalidUrl { field, value }) => {
                assert_eq!(field, "file.url");
                assert_eq!(value, "x.m4a");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_parse_catalog_malformed_json() {
        assert!(matches!(
            parse_catalog("{ \"episodes\": ["),
            Err(PodcastrError::CatalogParseError(_))
        ));
    }

    #[test]
    fn test_parse_catalog_empty() {
        assert!(parse_catalog(r#"{ "episodes": [] }"#).unwrap().is_empty());
    }
}
