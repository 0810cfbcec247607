//! Board analysis: component categories and pin-level connectivity.

pub mod classifier;
pub mod connectivity;

pub use classifier::{
    classify, classify_refs, classify_set, Category, CategoryBucket, ComponentStats, PREFIX_RULES,
};
pub use connectivity::{
    compare, compare_with_mode, Comparison, DiffMode, DiffRow, MatchClass, PinEntry, PinIndex,
    PinKey, NOT_AVAILABLE,
};
