pub mod merge;
pub mod tagset;

pub use merge::merge_tags;
pub use tagset::TagSet;
