use serde::{Deserialize, Serialize};

use crate::consts::MAX_PROFILE_PHOTO_URL_LEN;
use crate::error::{AuthentixError, Result};
use crate::io::encode::EncodedImage;
use crate::photo::listing::ListingPhotos;

/// Profile update body. Absent fields are left unchanged by the API.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Plain URL or inline JPEG data URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_visible: Option<bool>,
}

impl UpdateProfileRequest {
    pub fn with_photo(photo: &EncodedImage) -> Result<Self> {
        let mut request = Self::default();
        request.set_photo(photo)?;
        Ok(request)
    }

    pub fn set_photo(&mut self, photo: &EncodedImage) -> Result<()> {
        let uri = photo.to_data_uri();
        if uri.len() > MAX_PROFILE_PHOTO_URL_LEN {
            return Err(AuthentixError::PayloadTooLarge {
                field: "profilePhotoUrl",
                limit: MAX_PROFILE_PHOTO_URL_LEN,
            });
        }
        self.profile_photo_url = Some(uri);
        Ok(())
    }
}

/// Image list of a listing create/update body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingImagesUpdate {
    pub images: Vec<String>,
}

impl From<&ListingPhotos> for ListingImagesUpdate {
    fn from(photos: &ListingPhotos) -> Self {
        Self {
            images: photos.data_uris(),
        }
    }
}
