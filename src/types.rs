use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct TweetRequest {
    pub tweets: Vec<String>,
}

/// Body sent to the classification service. Only the tweets are forwarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyPayload {
    pub tweets: Vec<String>,
}

impl From<TweetRequest> for ClassifyPayload {
    fn from(request: TweetRequest) -> Self {
        Self {
            tweets: request.tweets,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DownstreamReply {
    pub status: StatusCode,
    pub body: String,
}
