use crate::types::{ClassifyPayload, DownstreamReply};
use anyhow::Result;
use async_trait::async_trait;

/// Forwards a batch to a classification service and hands back whatever it replied.
///
/// A non-2xx reply is still `Ok`; `Err` means no reply was obtained at all.
#[async_trait]
pub trait Classifier {
    async fn classify(&self, payload: ClassifyPayload) -> Result<DownstreamReply>;
}
