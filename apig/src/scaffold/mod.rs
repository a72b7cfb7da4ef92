//! Code generation: naming, contexts, skeleton and generators

pub mod context;
pub mod generator;
pub mod helpers;
pub mod skeleton;

pub use generator::{GeneratedFile, ScaffoldGenerator};
pub use helpers::TemplateHelpers;
pub use skeleton::{SkeletonEntry, SkeletonSource, MANIFEST};
