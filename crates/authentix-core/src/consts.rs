/// Longest edge, in pixels, of an encoded listing photo.
pub const LISTING_IMAGE_MAX_SIZE: u32 = 800;

/// Longest edge used by the bounded profile-photo downscale.
pub const PROFILE_IMAGE_MAX_SIZE: u32 = 300;

/// Maximum number of photos attached to one listing.
pub const MAX_LISTING_IMAGES: usize = 10;

/// JPEG quality (0-100) for every encoded upload. Matches a 0.85 canvas factor.
pub const JPEG_QUALITY: u8 = 85;

/// Side of the square crop preview, in display pixels.
pub const PREVIEW_SIDE: u32 = 280;

/// Side of the square profile photo written by the crop step.
pub const PROFILE_OUTPUT_SIDE: u32 = 300;

/// Largest raster surface side accepted before rendering is refused.
pub const MAX_SURFACE_SIDE: u32 = 16_384;

/// Upper bound on `profilePhotoUrl` accepted by the profile endpoint.
pub const MAX_PROFILE_PHOTO_URL_LEN: usize = 2_000_000;

/// Longest postal code accepted for a discovery location.
pub const MAX_ZIP_CODE_LEN: usize = 20;

/// MIME type of every encoded upload.
pub const OUTPUT_MIME: &str = "image/jpeg";

/// Store key holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Store key holding the guest discovery postal code.
pub const GUEST_ZIP_KEY: &str = "guest_zip";

/// Store key holding the guest discovery country code.
pub const GUEST_COUNTRY_KEY: &str = "guest_country";
