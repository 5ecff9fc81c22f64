//! Tag set reconciliation.

use std::collections::BTreeMap;

use crate::models::Tag;

/// Tag key → value. Ordered so anything built from it is deterministic.
pub type TagMap = BTreeMap<String, String>;

/// Keys with this prefix are reserved by AWS and never reported back in a
/// model.
pub const SYSTEM_TAG_PREFIX: &str = "aws:";

pub fn is_system_tag(key: &str) -> bool {
    key.starts_with(SYSTEM_TAG_PREFIX)
}

pub fn from_tags(tags: &[Tag]) -> TagMap {
    tags.iter()
        .map(|t| (t.key.clone(), t.value.clone()))
        .collect()
}

/// Model form, sorted by key.
pub fn to_tags(map: &TagMap) -> Vec<Tag> {
    map.iter().map(|(k, v)| Tag::new(k, v)).collect()
}

/// Union of several tag sets; later layers win on key collisions.
pub fn merge<'a>(layers: impl IntoIterator<Item = &'a TagMap>) -> TagMap {
    let mut merged = TagMap::new();
    for layer in layers {
        merged.extend(layer.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged
}

/// Entries of `desired` that are new or carry a different value.
pub fn tags_to_add(previous: &TagMap, desired: &TagMap) -> TagMap {
    desired
        .iter()
        .filter(|(k, v)| previous.get(*k) != Some(*v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Keys of `previous` that `desired` no longer has.
pub fn tags_to_remove(previous: &TagMap, desired: &TagMap) -> Vec<String> {
    previous
        .keys()
        .filter(|k| !desired.contains_key(*k))
        .cloned()
        .collect()
}

/// The calls needed to move a resource from one tag set to another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagChanges {
    pub add: TagMap,
    pub remove: Vec<String>,
}

impl TagChanges {
    pub fn between(previous: &TagMap, desired: &TagMap) -> Self {
        if previous == desired {
            return Self::default();
        }
        Self {
            add: tags_to_add(previous, desired),
            remove: tags_to_remove(previous, desired),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}
