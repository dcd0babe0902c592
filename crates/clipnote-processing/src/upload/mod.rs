//! Upload gate: classify → name → write.

pub mod gate;
pub mod types;

pub use gate::UploadGate;
pub use types::{ChannelLimits, MultipartField};
