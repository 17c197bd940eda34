use async_trait::async_trait;
use reqwest::{Client, header::USER_AGENT};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::constants::BROWSER_USER_AGENT;

/// Anything that can resolve a video page URL into its metadata
#[async_trait]
pub trait VideoInfoSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<VideoInfo, VideoInfoError>;
}

#[derive(Debug, Error)]
pub enum VideoInfoError {
    #[error("error fetching video info: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("error decoding video info: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Remote(String),

    #[error("API response carried no video data")]
    MissingData,
}

/// Client for the tikwm video-info API
#[derive(Clone)]
pub struct TikwmClient {
    base_url: String,
    http: Client,
}

impl TikwmClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            base_url: base_url.to_string(),
            http: Client::builder().timeout(timeout).build()?,
        })
    }

    /// GET request for `url`; the value is form-encoded and appended to any
    /// query the base URL already carries
    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .get(&self.base_url)
            .query(&[("url", url)])
            .header(USER_AGENT, BROWSER_USER_AGENT)
    }
}

#[async_trait]
impl VideoInfoSource for TikwmClient {
    async fn fetch(&self, url: &str) -> Result<VideoInfo, VideoInfoError> {
        let resp = self.request(url).send().await?;

        let body = resp.bytes().await?;
        let envelope: ApiResponse = serde_json::from_slice(&body)?;
        envelope.into_video()
    }
}

/// Envelope every tikwm response is wrapped in; `code` is 0 on success.
/// `data` stays untyped until `code` is checked, failures often carry `{}` or `[]`.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    code: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    msg: String,
    #[serde(default)]
    data: Option<Value>,
}

impl ApiResponse {
    fn into_video(self) -> Result<VideoInfo, VideoInfoError> {
        if self.code != 0 {
            return Err(VideoInfoError::Remote(self.msg));
        }
        let data = self.data.ok_or(VideoInfoError::MissingData)?;
        Ok(serde_json::from_value(data)?)
    }
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ai_dynamic_cover: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin_cover: String,
    /// Length in seconds
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub play: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wmplay: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wm_size: i64,
    #[serde(default)]
    pub music_info: Option<MusicInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub play_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub digg_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub share_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub download_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub collect_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub create_time: i64,
    pub author: Author,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub unique_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nickname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avatar: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MusicInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub play: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover: String,
}
