// Product image URL derivation
//
// Thumbnails are served by the image resize service, which takes the
// static PNG location as an encoded `u` parameter. The parameter is
// encoded the way browsers encode a URI component: space is `%20` and
// `-_.!~*'()` stay literal.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::models::Device;

const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const IMAGE_SERVICE_URL: &str = "https://images.svc.ui.com/";
const STATIC_IMAGE_URL: &str = "https://static.ui.com/fingerprint/ui/images";

/// Default thumbnail edge length in pixels (table row icon size).
pub const DEFAULT_IMAGE_SIZE: u32 = 20;
/// JPEG quality requested from the resize service.
pub const IMAGE_QUALITY: u8 = 85;

/// Build the resize-service URL for a device image.
pub fn image_url(device_id: &str, image_hash: &str, size: u32) -> String {
    let source = format!("{STATIC_IMAGE_URL}/{device_id}/default/{image_hash}.png");
    let encoded = utf8_percent_encode(&source, URI_COMPONENT);
    format!("{IMAGE_SERVICE_URL}?u={encoded}&w={size}&q={IMAGE_QUALITY}")
}

impl Device {
    /// Thumbnail URL at the given size, or `None` when the device has no image.
    pub fn image_url(&self, size: u32) -> Option<String> {
        self.image_hash().map(|hash| image_url(&self.id, hash, size))
    }
}
