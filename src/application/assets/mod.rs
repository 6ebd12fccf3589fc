//! Asset Strategies - 三种资产类型的 key 派生 / 远程请求 / 解码策略

mod image;
mod preview;
mod speech;
mod strategy;

pub use self::image::{DecodedImage, StockImageAsset};
pub use preview::PreviewAudioAsset;
pub use speech::{SpeechAudioAsset, TtsEndpoint};
pub use strategy::AssetStrategy;

#[cfg(test)]
pub(crate) use self::image::tests::png_bytes;
