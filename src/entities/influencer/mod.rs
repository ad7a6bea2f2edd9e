//! Influencer entity

pub mod filter;
pub mod model;

pub use filter::InfluencerFilter;
pub use model::{INFLUENCER_SCHEMA, Influencer, InfluencerCount, InfluencerDraft, InfluencerPatch};
