//! Cache key composition.

use crate::domain::models::BannerKey;

/// `"{feature_id}-{tag_id}"`.
///
/// Injective over `i64` pairs: the feature part never contains a `-` past its
/// optional leading sign, so the first separator after position 0 splits the key
/// unambiguously even when the tag is negative.
pub fn cache_key(key: BannerKey) -> String {
    format!("{}-{}", key.feature_id, key.tag_id)
}
