//! テスト用のスクリプト化バックエンド

#![allow(dead_code)]

use async_trait::async_trait;
use counter_ai_rust::backend::VisionBackend;
use counter_ai_rust::error::{CounterAiError, Result};
use counter_ai_rust::scanner::ImagePayload;
use std::collections::HashMap;
use std::sync::Mutex;

/// (画像ラベル, モデル) ごとに応答を決めておくバックエンド
#[derive(Default)]
pub struct ScriptedBackend {
    replies: HashMap<(String, String), std::result::Result<String, String>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, image: &str, model: &str, text: &str) -> Self {
        self.replies
            .insert((image.to_string(), model.to_string()), Ok(text.to_string()));
        self
    }

    pub fn fail(mut self, image: &str, model: &str, reason: &str) -> Self {
        self.replies
            .insert((image.to_string(), model.to_string()), Err(reason.to_string()));
        self
    }

    /// 呼び出し履歴 (画像ラベル, モデル)
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionBackend for ScriptedBackend {
    async fn submit(&self, model: &str, _prompt: &str, image: &ImagePayload) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((image.label.clone(), model.to_string()));

        match self.replies.get(&(image.label.clone(), model.to_string())) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(reason)) => Err(CounterAiError::ApiCall(reason.clone())),
            None => Err(CounterAiError::ApiCall("503 Service Unavailable".into())),
        }
    }
}

pub fn image(label: &str) -> ImagePayload {
    ImagePayload {
        label: label.to_string(),
        mime_type: "image/jpeg".to_string(),
        bytes: vec![0xff, 0xd8, 0xff, 0xd9],
    }
}

pub fn candidates(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
