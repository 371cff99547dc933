use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SendMessageDto {
    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    pub content: Option<String>,

    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,

    #[validate(url(message = "Invalid audio URL"))]
    pub audio_url: Option<String>,
}

impl SendMessageDto {
    /// A message needs at least one of text, image or audio.
    pub fn is_empty(&self) -> bool {
        self.content.as_deref().map_or(true, |c| c.trim().is_empty())
            && self.image_url.is_none()
            && self.audio_url.is_none()
    }
}
