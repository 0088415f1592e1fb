//! バックエンドのフォールバック呼び出し
//!
//! 候補モデルを先頭から順に1回ずつ試し、最初に成功した応答を返す。
//! 同一モデルでの再試行は行わない。

use crate::backend::VisionBackend;
use crate::scanner::ImagePayload;
use std::fmt;
use thiserror::Error;

/// 1画像分の解析依頼
#[derive(Debug, Clone, Copy)]
pub struct ExtractionRequest<'a> {
    pub image: &'a ImagePayload,
    pub prompt: &'a str,
    pub backend_candidates: &'a [String],
}

/// 解析応答
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResponse {
    pub raw_text: String,
    pub served_by: String,
}

/// 1候補の失敗
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendFailure {
    pub backend: String,
    pub reason: String,
}

impl fmt::Display for BackendFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.backend, self.reason)
    }
}

/// 全候補が失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("全バックエンドが失敗 ({})", summarize(.attempts))]
pub struct BackendsExhausted {
    pub attempts: Vec<BackendFailure>,
}

impl BackendsExhausted {
    pub fn attempted_backends(&self) -> Vec<&str> {
        self.attempts.iter().map(|a| a.backend.as_str()).collect()
    }
}

fn summarize(attempts: &[BackendFailure]) -> String {
    if attempts.is_empty() {
        return "候補なし".to_string();
    }
    attempts
        .iter()
        .map(|a| a.backend.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 候補を順に試し、最初の成功を返す
pub async fn invoke_with_fallback<B>(
    backend: &B,
    request: ExtractionRequest<'_>,
) -> Result<ExtractionResponse, BackendsExhausted>
where
    B: VisionBackend + ?Sized,
{
    let mut attempts = Vec::new();

    for candidate in request.backend_candidates {
        match backend.submit(candidate, request.prompt, request.image).await {
            Ok(raw_text) => {
                tracing::debug!(image = %request.image.label, backend = %candidate, "応答を取得");
                return Ok(ExtractionResponse {
                    raw_text,
                    served_by: candidate.clone(),
                });
            }
            Err(e) => {
                tracing::warn!(image = %request.image.label, backend = %candidate, error = %e, "バックエンド失敗、次の候補へ");
                attempts.push(BackendFailure {
                    backend: candidate.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    Err(BackendsExhausted { attempts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_display_lists_backends() {
        let err = BackendsExhausted {
            attempts: vec![
                BackendFailure {
                    backend: "a".into(),
                    reason: "timeout".into(),
                },
                BackendFailure {
                    backend: "b".into(),
                    reason: "HTTP 429".into(),
                },
            ],
        };
        assert_eq!(err.to_string(), "全バックエンドが失敗 (a, b)");
        assert_eq!(err.attempted_backends(), vec!["a", "b"]);
        assert_eq!(err.attempts[1].to_string(), "b: HTTP 429");
    }

    #[test]
    fn test_exhausted_without_candidates() {
        let err = BackendsExhausted { attempts: vec![] };
        assert_eq!(err.to_string(), "全バックエンドが失敗 (候補なし)");
    }
}
