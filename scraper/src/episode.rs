use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One entry of the archive listing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Episode {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::date::rfc3339"
    )]
    pub date: Option<NaiveDate>,
    #[serde(rename = "pageURL")]
    pub page_url: String,
    #[serde(
        rename = "audioURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

/// Artwork shown next to an episode in the listing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Image {
    pub source: String,
    pub width: u32,
    pub height: u32,
}
