use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::error::EngineError;

pub type RecordId = u32;

/// Raw entry from the storage-listing collaborator. The engine assigns ids
/// and derives group keys; `media_ref` is passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentListing {
    pub label: String,
    pub media_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: RecordId,
    pub label: String,
    pub group_key: String,
    pub media_ref: String,
}

/// Leading token of the label, split on `_` or `-`. Records sharing a key
/// are treated as thematically similar by the replacement selector.
pub fn derive_group_key(label: &str) -> String {
    label
        .split(['_', '-'])
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Immutable-once-loaded content sequence. Ids are 1-based in listing order
/// and stable; the shuffle happens exactly once at load time and the order
/// is fixed thereafter.
#[derive(Debug, Default)]
pub struct ContentPool {
    records: Vec<ContentRecord>,
    loaded: bool,
}

impl ContentPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(
        &mut self,
        listings: Vec<ContentListing>,
        rng: &mut StdRng,
    ) -> Result<usize, EngineError> {
        if self.loaded {
            return Err(EngineError::AlreadyLoaded);
        }

        let mut records: Vec<ContentRecord> = listings
            .into_iter()
            .enumerate()
            .map(|(index, listing)| {
                let group_key = derive_group_key(&listing.label);
                ContentRecord {
                    id: index as RecordId + 1,
                    group_key,
                    label: listing.label,
                    media_ref: listing.media_ref,
                }
            })
            .collect();

        records.shuffle(rng);

        self.records = records;
        self.loaded = true;
        Ok(self.records.len())
    }

    pub fn all(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn listings(labels: &[&str]) -> Vec<ContentListing> {
        labels
            .iter()
            .map(|label| ContentListing {
                label: label.to_string(),
                media_ref: format!("https://cdn.test/{label}"),
            })
            .collect()
    }

    #[test]
    fn group_key_takes_leading_token() {
        assert_eq!(derive_group_key("3_sunset.jpg"), "3");
        assert_eq!(derive_group_key("news-cycle-01.png"), "news");
        assert_eq!(derive_group_key("plain.jpg"), "plain.jpg");
        assert_eq!(derive_group_key(""), "");
    }

    #[test]
    fn ids_are_assigned_in_listing_order_before_shuffle() {
        let mut pool = ContentPool::new();
        let mut rng = StdRng::seed_from_u64(7);
        pool.load(listings(&["a_1", "b_2", "c_3"]), &mut rng).unwrap();

        let mut by_id: Vec<_> = pool.all().to_vec();
        by_id.sort_by_key(|r| r.id);
        assert_eq!(by_id[0].label, "a_1");
        assert_eq!(by_id[1].label, "b_2");
        assert_eq!(by_id[2].label, "c_3");
        assert_eq!(by_id[0].id, 1);
    }

    #[test]
    fn shuffle_is_deterministic_for_a_seed_and_happens_once() {
        let labels = &["a_1", "b_2", "c_3", "d_4", "e_5", "f_6"];

        let mut pool_a = ContentPool::new();
        let mut rng_a = StdRng::seed_from_u64(42);
        pool_a.load(listings(labels), &mut rng_a).unwrap();

        let mut pool_b = ContentPool::new();
        let mut rng_b = StdRng::seed_from_u64(42);
        pool_b.load(listings(labels), &mut rng_b).unwrap();

        assert_eq!(pool_a.all(), pool_b.all());

        // Repeated queries see the same order.
        let first: Vec<RecordId> = pool_a.all().iter().map(|r| r.id).collect();
        let second: Vec<RecordId> = pool_a.all().iter().map(|r| r.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn second_load_is_rejected() {
        let mut pool = ContentPool::new();
        let mut rng = StdRng::seed_from_u64(1);
        pool.load(listings(&["a_1"]), &mut rng).unwrap();

        let err = pool.load(listings(&["b_2"]), &mut rng).unwrap_err();
        assert_eq!(err, EngineError::AlreadyLoaded);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn empty_listing_is_a_valid_pool() {
        let mut pool = ContentPool::new();
        let mut rng = StdRng::seed_from_u64(1);
        pool.load(Vec::new(), &mut rng).unwrap();
        assert!(pool.is_loaded());
        assert!(pool.is_empty());
    }
}
