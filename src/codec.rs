//! Image decode and PNG encode around the `image` crate.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to decode image: {source}")]
    Decode {
        #[source]
        source: image::ImageError,
    },
    #[error("decoded image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("failed to encode png: {source}")]
    Encode {
        #[source]
        source: image::ImageError,
    },
}

pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, CodecError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|source| CodecError::Decode { source })?;
    let image = decoded.to_rgba8();
    if image.width() == 0 || image.height() == 0 {
        return Err(CodecError::EmptyImage {
            width: image.width(),
            height: image.height(),
        });
    }
    Ok(image)
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, CodecError> {
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(|source| CodecError::Encode { source })?;
    Ok(bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn png_bytes_decode_back_to_same_pixels() {
        let mut image = RgbaImage::from_pixel(3, 2, Rgba([255, 0, 0, 255]));
        image.put_pixel(2, 1, Rgba([0, 0, 255, 128]));

        let bytes = encode_png(&image).expect("encode should succeed");
        assert!(bytes.starts_with(b"\x89PNG"));
        let decoded = decode_image(&bytes).expect("decode should succeed");
        assert_eq!(decoded, image);
    }

    #[test]
    fn malformed_bytes_fail_to_decode() {
        let err = decode_image(b"definitely not an image").expect_err("decode should fail");
        assert!(matches!(err, CodecError::Decode { .. }));
    }
}
