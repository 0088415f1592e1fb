//! 画像解析バックエンド
//!
//! 「画像とプロンプトを渡してテキストを受け取る」だけの外部能力。
//! 1回の `submit` がそのモデルに対する1セッションになる。

mod gemini;

pub use gemini::GeminiBackend;

use crate::error::Result;
use crate::scanner::ImagePayload;
use async_trait::async_trait;

#[async_trait]
pub trait VisionBackend: Send + Sync {
    /// 指定モデルに画像とプロンプトを送り、応答テキストを返す
    async fn submit(&self, model: &str, prompt: &str, image: &ImagePayload) -> Result<String>;
}
