pub mod counts;
pub mod expand;

pub use counts::ResolutionCounts;
pub use expand::expand_item_ids;
