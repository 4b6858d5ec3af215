//! Banner domain model.
//!
//! A banner is a content payload addressed by a `(feature, tag)` pair. One banner
//! belongs to exactly one feature and may claim several tags under it; every
//! claimed pair is unique across the store.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The `(feature, tag)` pair a banner is looked up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BannerKey {
    pub feature_id: i64,
    pub tag_id: i64,
}

impl BannerKey {
    pub const fn new(feature_id: i64, tag_id: i64) -> Self {
        Self { feature_id, tag_id }
    }
}

impl fmt::Display for BannerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "feature {}, tag {}", self.feature_id, self.tag_id)
    }
}

/// A stored banner with its full tag set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    /// Store-assigned identifier, immutable once assigned
    pub id: i64,
    pub feature_id: i64,
    /// Sorted, duplicate-free
    pub tag_ids: Vec<i64>,
    /// Opaque serialized document; never interpreted here
    pub content: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Banner {
    /// Every pair this banner currently claims.
    pub fn keys(&self) -> impl Iterator<Item = BannerKey> + '_ {
        self.tag_ids
            .iter()
            .map(move |&tag_id| BannerKey::new(self.feature_id, tag_id))
    }
}

/// Input for creating a banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBanner {
    pub feature_id: i64,
    pub tag_ids: Vec<i64>,
    pub content: String,
    pub is_active: bool,
}

impl NewBanner {
    pub fn new(feature_id: i64, tag_ids: impl IntoIterator<Item = i64>, content: impl Into<String>) -> Self {
        Self {
            feature_id,
            tag_ids: normalize_tags(tag_ids),
            content: content.into(),
            is_active: true,
        }
    }

    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// Sparse update for an existing banner.
///
/// `None` leaves a field untouched. For `tag_ids`, `Some(vec![])` is an explicit
/// request to drop every association and is distinct from `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerPatch {
    pub feature_id: Option<i64>,
    pub tag_ids: Option<Vec<i64>>,
    pub content: Option<String>,
    pub is_active: Option<bool>,
}

impl BannerPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn feature_id(mut self, feature_id: i64) -> Self {
        self.feature_id = Some(feature_id);
        self
    }

    pub fn tag_ids(mut self, tag_ids: impl IntoIterator<Item = i64>) -> Self {
        self.tag_ids = Some(normalize_tags(tag_ids));
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub const fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub const fn is_empty(&self) -> bool {
        self.feature_id.is_none()
            && self.tag_ids.is_none()
            && self.content.is_none()
            && self.is_active.is_none()
    }

    /// Deduplicate and sort the tag set, if one is present.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.tag_ids = self.tag_ids.map(normalize_tags);
        self
    }
}

/// Filter and pagination for banner listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerFilter {
    pub feature_id: Option<i64>,
    pub tag_id: Option<i64>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl BannerFilter {
    pub const fn feature(mut self, feature_id: i64) -> Self {
        self.feature_id = Some(feature_id);
        self
    }

    pub const fn tag(mut self, tag_id: i64) -> Self {
        self.tag_id = Some(tag_id);
        self
    }

    pub const fn page(mut self, limit: Option<u32>, offset: Option<u32>) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }
}

pub fn normalize_tags(tag_ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    tag_ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}
