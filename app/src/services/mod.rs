pub mod cover;

pub use cover::{CoverService, CoverSources, CoverTargets};
