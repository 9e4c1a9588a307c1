//! Movie record enrichment.
//!
//! Appends a poster URL and, for the full variant, three streaming-site
//! deep links to a movie record. Nothing is validated: a record without
//! `poster_path` or `id` still gets the fields, built from the text the
//! missing value renders to.

use serde_json::Value;

use crate::tmdb::MovieRecord;

/// Default image CDN base for poster URLs.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Field holding the poster URL.
pub const PROFILE_PICTURE_URL: &str = "profile_picture_url";

/// Streaming link fields and their URL templates (`{id}` is substituted).
pub const STREAMING_SITES: [(&str, &str); 3] = [
    ("streaming_site_1", "https://vidsrc.xyz/embed/movie/{id}"),
    ("streaming_site_2", "https://www.2embed.stream/embed/movie/{id}"),
    (
        "streaming_site_3",
        "https://multiembed.mov/directstream.php?video_id={id}&tmdb=1",
    ),
];

/// Which derived fields to add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enrichment {
    /// `profile_picture_url` only.
    PosterOnly,
    /// `profile_picture_url` plus `streaming_site_1..3`.
    Full,
}

/// Adds derived URL fields to movie records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enricher {
    image_base_url: String,
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL)
    }
}

impl Enricher {
    /// Creates an enricher using the given image CDN base.
    #[must_use]
    pub fn new(image_base_url: impl Into<String>) -> Self {
        Self {
            image_base_url: image_base_url.into(),
        }
    }

    /// Image CDN base this enricher prepends to poster paths.
    #[must_use]
    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    /// Enriches one list item. Items that are not JSON objects are
    /// returned unchanged.
    #[must_use]
    pub fn enrich(&self, movie: Value, enrichment: Enrichment) -> Value {
        match movie {
            Value::Object(record) => Value::Object(self.enrich_record(record, enrichment)),
            other => other,
        }
    }

    /// Enriches a movie record, overwriting same-named upstream fields.
    #[must_use]
    pub fn enrich_record(&self, mut record: MovieRecord, enrichment: Enrichment) -> MovieRecord {
        let poster_url = format!(
            "{}{}",
            self.image_base_url,
            field_text(&record, "poster_path")
        );
        record.insert(String::from(PROFILE_PICTURE_URL), Value::String(poster_url));

        if enrichment == Enrichment::Full {
            let id = field_text(&record, "id");
            for (field, url) in streaming_links(&id) {
                record.insert(String::from(field), Value::String(url));
            }
        }

        record
    }
}

/// Builds the three streaming deep links for a movie id.
#[must_use]
pub fn streaming_links(id: &str) -> [(&'static str, String); 3] {
    STREAMING_SITES.map(|(field, template)| (field, template.replace("{id}", id)))
}

/// Renders a field the way it reads when spliced into a URL: strings as
/// their text, `null` as `null`, an absent field as `undefined`, anything
/// else as its JSON text.
fn field_text(record: &MovieRecord, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => String::from("undefined"),
    }
}
