pub mod channel;
pub mod upload;
pub mod video;

pub use channel::Channel;
pub use upload::UploadResult;
pub use video::VideoRecord;
