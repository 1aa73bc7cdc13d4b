use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::upload;
use crate::queries::uploads::UserWithUploads;

/// Response DTO for a single upload.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    #[schema(example = "upl_01HZX3")]
    pub id: String,
    /// Owning user ID.
    #[schema(example = "usr_8f2k")]
    pub user_id: Option<String>,
    /// Object key in the upload provider's bucket.
    #[schema(example = "a1b2c3-banner.png")]
    pub key: String,
    /// Media kind.
    #[serde(rename = "type")]
    #[schema(example = "image")]
    pub media_type: String,
    #[schema(example = "https://cdn.example.com/a1b2c3-banner.png")]
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user and all of their uploads.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserWithUploadsResponse {
    #[schema(example = "usr_8f2k")]
    pub id: String,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    pub email_verified: bool,
    /// Avatar URL.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Empty when the user has uploaded nothing.
    pub uploads: Vec<UploadResponse>,
}

/// Response DTO for the admin summary page.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AdminSummaryResponse {
    /// Users ordered by creation time, newest first.
    pub users: Vec<UserWithUploadsResponse>,
    /// Number of users in `users`.
    #[schema(example = 2)]
    pub total: u64,
}

impl From<upload::Model> for UploadResponse {
    fn from(model: upload::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            key: model.key,
            media_type: model.media_type,
            url: model.url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<UserWithUploads> for UserWithUploadsResponse {
    fn from(entry: UserWithUploads) -> Self {
        let user = entry.user;
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            email_verified: user.email_verified,
            image: user.image,
            created_at: user.created_at,
            updated_at: user.updated_at,
            uploads: entry.uploads.into_iter().map(UploadResponse::from).collect(),
        }
    }
}

impl From<Vec<UserWithUploads>> for AdminSummaryResponse {
    fn from(entries: Vec<UserWithUploads>) -> Self {
        let users: Vec<UserWithUploadsResponse> =
            entries.into_iter().map(UserWithUploadsResponse::from).collect();
        Self {
            total: users.len() as u64,
            users,
        }
    }
}
