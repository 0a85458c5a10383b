//! Label normalization: Chinese genre/region labels to canonical English
//! tokens, and the per-token explosion of records used by every aggregate.

pub mod explode;
pub mod labels;

pub use explode::{expand, ExplodedRow};
pub use labels::{canonical_tokens, split, translate, CategoryMapping, GENRE_MAP, REGION_MAP};
