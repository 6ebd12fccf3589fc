//! 图库图片资产：下载后必须能解码为图片才会落盘

use image::{DynamicImage, ImageFormat};
use std::sync::Arc;
use url::Url;

use super::strategy::{direct_request, AssetStrategy};
use crate::application::error::ContentCacheError;
use crate::application::ports::FetchRequest;
use crate::domain::{image_key, AssetKind, CacheKey};

/// 解码后的图片
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// 由文件头识别的编码格式
    pub format: Option<ImageFormat>,
    pub image: Arc<DynamicImage>,
}

impl DecodedImage {
    pub fn decode(data: &[u8]) -> Result<Self, ContentCacheError> {
        let format = image::guess_format(data).ok();
        let image = image::load_from_memory(data)
            .map_err(|e| ContentCacheError::InvalidImageData(e.to_string()))?;

        Ok(Self {
            width: image.width(),
            height: image.height(),
            format,
            image: Arc::new(image),
        })
    }

    /// 像素缓冲区大小
    pub fn pixel_bytes(&self) -> usize {
        self.image.as_bytes().len()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format
            .map(|f| f.to_mime_type())
            .unwrap_or("application/octet-stream")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StockImageAsset;

impl AssetStrategy for StockImageAsset {
    type Lookup = Url;
    type Asset = DecodedImage;

    fn kind(&self) -> AssetKind {
        AssetKind::Image
    }

    fn derive_key(&self, lookup: &Url) -> Result<CacheKey, ContentCacheError> {
        Ok(image_key(lookup))
    }

    fn remote_request(&self, lookup: &Url) -> Result<FetchRequest, ContentCacheError> {
        direct_request(lookup, self.kind())
    }

    fn decode(&self, data: &[u8]) -> Result<DecodedImage, ContentCacheError> {
        DecodedImage::decode(data)
    }

    fn cost(&self, asset: &DecodedImage) -> usize {
        asset.pixel_bytes()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    /// 生成 w x h 的 PNG 字节
    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 30, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let decoded = StockImageAsset.decode(&png_bytes(3, 2)).unwrap();
        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.format, Some(ImageFormat::Png));
        assert_eq!(decoded.mime_type(), "image/png");
        assert_eq!(StockImageAsset.cost(&decoded), 3 * 2 * 4);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = StockImageAsset.decode(b"<html>nope</html>").unwrap_err();
        assert!(matches!(err, ContentCacheError::InvalidImageData(_)));
    }

    #[test]
    fn test_request_uses_image_accept() {
        let url = Url::parse("https://images.example.com/p/cat.jpg").unwrap();
        let request = StockImageAsset.remote_request(&url).unwrap();
        assert_eq!(request.accept, "image/*");
        assert_eq!(request.url, url);
    }
}
