#![forbid(unsafe_code)]

pub mod bundled;
pub mod json;
pub mod records;
pub mod repository;

pub use bundled::BundledCurriculum;
pub use json::JsonFileCurriculum;
pub use repository::{CurriculumSource, InMemoryCurriculum, StorageError};
