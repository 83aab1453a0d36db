mod media_client;

pub use media_client::{MediaClient, MediaClientOptions};
pub(crate) use media_client::ClientInner;
