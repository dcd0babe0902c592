//! Clipnote Processing Library
//!
//! Media intake: content classification, storage key generation and the
//! upload gate that sequences them with the storage writer.

pub mod naming;
pub mod upload;
pub mod validator;

pub use naming::{extension_of, Clock, NameGenerator, SuffixSource, SystemClock, ThreadRngSuffix};
pub use upload::{ChannelLimits, MultipartField, UploadGate};
pub use validator::{classify, ValidationError};
