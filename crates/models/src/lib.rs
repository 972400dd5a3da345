use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod release_date;
pub mod verses;

pub use release_date::{format_date, parse_date, DateParseError, DATE_FORMAT};
pub use verses::split_verses;

pub const DEFAULT_LIMIT: i64 = 10;

/// A catalog entry. `(group, song)` is the natural key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Song {
    #[serde(default)]
    #[sqlx(rename = "group_name")]
    pub group: String,
    #[serde(default)]
    #[sqlx(rename = "song_name")]
    pub song: String,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub detail: SongDetail,
}

impl Song {
    pub fn new(group: impl Into<String>, song: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            song: song.into(),
            detail: SongDetail::default(),
        }
    }

    /// Both halves of the key must be present before the song can be
    /// added, updated or deleted.
    pub fn has_key(&self) -> bool {
        !self.group.is_empty() && !self.song.is_empty()
    }
}

/// Attributes supplied by the metadata service, and the mutable part of a song.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SongDetail {
    #[serde(
        rename = "releaseDate",
        default,
        with = "release_date"
    )]
    pub release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[sqlx(rename = "lyrics")]
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub link: String,
}

impl SongDetail {
    /// Overlays `fetched` on `self`, keeping fields `fetched` leaves empty.
    pub fn merge(&mut self, fetched: SongDetail) {
        if fetched.release_date.is_some() {
            self.release_date = fetched.release_date;
        }
        if !fetched.text.is_empty() {
            self.text = fetched.text;
        }
        if !fetched.link.is_empty() {
            self.link = fetched.link;
        }
    }
}

/// Listing predicates. Every `Some` field narrows the result; all are ANDed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub group: Option<String>,
    pub song: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
    pub release_from: Option<NaiveDate>,
    pub release_to: Option<NaiveDate>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            group: None,
            song: None,
            text: None,
            link: None,
            release_from: None,
            release_to: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseResponse {
    pub song: String,
    pub group: String,
    pub verse: String,
    pub verse_num: usize,
    pub total_verses: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_decodes_with_missing_fields() {
        let song: Song = serde_json::from_str(r#"{"group":"Muse"}"#).unwrap();
        assert_eq!(song.group, "Muse");
        assert_eq!(song.song, "");
        assert_eq!(song.detail, SongDetail::default());
        assert!(!song.has_key());
    }

    #[test]
    fn song_decodes_flattened_detail() {
        let song: Song = serde_json::from_str(
            r#"{"group":"Muse","song":"Starlight","releaseDate":"03-09-2006","text":"Far away","link":"https://example.com"}"#,
        )
        .unwrap();
        assert!(song.has_key());
        assert_eq!(
            song.detail.release_date,
            NaiveDate::from_ymd_opt(2006, 9, 3)
        );
        assert_eq!(song.detail.text, "Far away");
        assert_eq!(song.detail.link, "https://example.com");
    }

    #[test]
    fn song_encodes_without_empty_text_and_link() {
        let song = Song::new("Muse", "Uprising");
        let value = serde_json::to_value(&song).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"group": "Muse", "song": "Uprising", "releaseDate": null})
        );
    }

    #[test]
    fn merge_keeps_fields_the_fetch_leaves_empty() {
        let mut detail = SongDetail {
            release_date: NaiveDate::from_ymd_opt(2009, 9, 7),
            text: "They will not force us".to_string(),
            link: "https://old".to_string(),
        };
        detail.merge(SongDetail {
            release_date: None,
            text: String::new(),
            link: "https://new".to_string(),
        });
        assert_eq!(detail.release_date, NaiveDate::from_ymd_opt(2009, 9, 7));
        assert_eq!(detail.text, "They will not force us");
        assert_eq!(detail.link, "https://new");
    }

    #[test]
    fn filter_defaults_to_first_page_of_ten() {
        let filter = Filter::default();
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.offset, 0);
        assert!(filter.group.is_none());
    }
}
