//! Public response shapes and the mapping from the upstream video record

use serde::Serialize;

use crate::constants::{MEDIA_BASE_URL, MEDIA_EXTENSION};
use crate::services::tikwm::VideoInfo;

/// Envelope returned by `GET /get`
#[derive(Debug, Serialize)]
pub struct VideoDataResponse {
    pub code: u16,
    pub msg: String,
    pub data: VideoData,
}

#[derive(Debug, Serialize)]
pub struct VideoData {
    pub region: String,
    pub url: String,
    pub cover: String,
    pub title: String,
    pub duration: String,
    pub user: VideoUser,
}

#[derive(Debug, Serialize)]
pub struct VideoUser {
    pub username: String,
    pub nickname: String,
    #[serde(rename = "userID")]
    pub user_id: String,
}

/// Playable HD media URL for a video id
pub fn media_url(video_id: &str) -> String {
    format!("{}{}{}", MEDIA_BASE_URL, video_id, MEDIA_EXTENSION)
}

impl From<VideoInfo> for VideoData {
    fn from(v: VideoInfo) -> Self {
        Self {
            url: media_url(&v.id),
            duration: format!("{}s", v.duration),
            region: v.region,
            cover: v.cover,
            title: v.title,
            user: VideoUser {
                username: v.author.unique_id,
                nickname: v.author.nickname,
                user_id: v.author.id,
            },
        }
    }
}

impl From<VideoInfo> for VideoDataResponse {
    fn from(v: VideoInfo) -> Self {
        Self {
            code: 200,
            msg: "success".to_string(),
            data: VideoData::from(v),
        }
    }
}
