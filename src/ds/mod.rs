pub mod frequency_buckets;
pub mod recency_list;
pub mod slot_arena;

pub use frequency_buckets::FrequencyBuckets;
pub use recency_list::RecencyList;
pub use slot_arena::{SlotArena, SlotId};
