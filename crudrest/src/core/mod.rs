// Resource shape and the partial-update merge engine

pub mod fields;
pub mod merge;
pub mod traits;

pub use fields::{FieldAccessor, FieldTable};
pub use merge::{MergeOutcome, PatchMerger, UnknownFieldError};
pub use traits::Resource;
