use authentix_core::consts::MAX_PROFILE_PHOTO_URL_LEN;
use authentix_core::error::AuthentixError;
use authentix_core::io::encode::EncodedImage;
use authentix_core::payload::UpdateProfileRequest;

fn tiny_jpeg() -> EncodedImage {
    EncodedImage {
        bytes: vec![0xFF, 0xD8, 0xFF, 0xD9],
        width: 1,
        height: 1,
    }
}

#[test]
fn test_profile_body_embeds_data_uri_inline() {
    let mut body = UpdateProfileRequest::with_photo(&tiny_jpeg()).unwrap();
    body.contact_visible = Some(true);

    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "profilePhotoUrl": "data:image/jpeg;base64,/9j/2Q==",
            "contactVisible": true,
        })
    );
}

#[test]
fn test_absent_fields_are_omitted() {
    let json = serde_json::to_string(&UpdateProfileRequest::default()).unwrap();
    assert_eq!(json, "{}");
}

#[test]
fn test_oversized_photo_rejected() {
    let huge = EncodedImage {
        bytes: vec![0u8; MAX_PROFILE_PHOTO_URL_LEN],
        width: 4000,
        height: 4000,
    };
    assert!(matches!(
        UpdateProfileRequest::with_photo(&huge),
        Err(AuthentixError::PayloadTooLarge { field: "profilePhotoUrl", .. })
    ));
}
