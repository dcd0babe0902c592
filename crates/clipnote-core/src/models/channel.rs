use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::constants::{IMAGES_DIR, VIDEOS_DIR};

/// Upload policy selected by the route that received the request.
///
/// A channel fixes the accepted MIME major type, the destination
/// subdirectory and (through configuration) the byte ceiling for one
/// upload attempt. It is never derived from the declared content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Image,
    Video,
}

impl Channel {
    /// MIME major type accepted on this channel.
    pub fn major_type(&self) -> &'static str {
        match self {
            Channel::Image => "image",
            Channel::Video => "video",
        }
    }

    /// Subdirectory of the upload root for this channel.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Channel::Image => IMAGES_DIR,
            Channel::Video => VIDEOS_DIR,
        }
    }

    /// Human-readable rejection for a content type that does not belong here.
    pub fn rejection_message(&self) -> &'static str {
        match self {
            Channel::Image => "only images are allowed.",
            Channel::Video => "only videos are allowed.",
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.major_type())
    }
}
