//! Image format detection and verification
//!
//! Built on the `image` crate. [`guess`] only looks at the leading bytes;
//! [`verify`] decodes the whole buffer, so a valid signature followed by junk
//! is rejected.

use image::{ImageFormat, ImageResult};

/// Guess the image format from the leading bytes
pub fn guess(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes).ok()
}

/// Decode `bytes` fully and return the detected format
///
/// Fails if the format is unrecognised or the image data is corrupt.
pub fn verify(bytes: &[u8]) -> ImageResult<ImageFormat> {
    let format = image::guess_format(bytes)?;
    image::load_from_memory_with_format(bytes, format)?;
    Ok(format)
}

/// Conventional file extension for `format`, without the dot
pub fn extension(format: ImageFormat) -> &'static str {
    format.extensions_str().first().copied().unwrap_or("bin")
}

/// Short upper-case label such as `PNG` or `JPG`
pub fn label(format: ImageFormat) -> String {
    extension(format).to_uppercase()
}

/// Encode a small solid-colour image, for tests that need real image files
#[cfg(test)]
pub(crate) fn sample_image(format: ImageFormat) -> Vec<u8> {
    use std::io::Cursor;

    let img = image::RgbImage::from_pixel(8, 8, image::Rgb([200, 40, 90]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).unwrap();
    out.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_real_images() {
        for format in [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Bmp] {
            let bytes = sample_image(format);
            assert_eq!(verify(&bytes).unwrap(), format);
            assert_eq!(guess(&bytes), Some(format));
        }
    }

    #[test]
    fn test_verify_rejects_text_with_bmp_prefix() {
        let text = b"BMW service appointment on Tuesday";
        assert!(verify(text).is_err());
    }

    #[test]
    fn test_verify_rejects_signature_without_body() {
        let bytes = b"\x89PNG\r\n\x1a\ngarbage, no IHDR, no IDAT";
        assert_eq!(guess(bytes), Some(ImageFormat::Png));
        assert!(verify(bytes).is_err());
    }

    #[test]
    fn test_verify_rejects_truncated_image() {
        let bytes = sample_image(ImageFormat::Png);
        assert!(verify(&bytes[..bytes.len() / 2]).is_err());
    }

    #[test]
    fn test_rejects_non_images() {
        assert_eq!(guess(b""), None);
        assert_eq!(guess(b"hello world"), None);
        assert!(verify(b"%PDF-1.7").is_err());
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension(ImageFormat::Jpeg), "jpg");
        assert_eq!(extension(ImageFormat::Png), "png");
        assert_eq!(label(ImageFormat::Png), "PNG");
    }
}
