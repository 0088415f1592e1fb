//! 一括解析
//!
//! 画像を入力順に1枚ずつ処理する:
//! フォールバック呼び出し → レコード抽出 → 正規化・判定 → 結果に追加。
//! 1枚の失敗は通知として報告し、バッチ全体は止めない。

use crate::backend::VisionBackend;
use crate::invoker::{invoke_with_fallback, ExtractionRequest};
use crate::scanner::ImagePayload;
use counter_ai_common::{parse_field_sets, FieldAliases, MachineRecord};
use serde::Serialize;
use std::time::Duration;

/// 並べ替え前の結果
pub type ResultSet = Vec<MachineRecord>;

/// 通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeKind {
    Success,
    /// 応答は得られたが表データに変換できなかった
    ConversionError,
    /// 全バックエンドが失敗
    BackendFailure,
}

/// 画像ごとの通知
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchNotice {
    pub image_index: usize,
    pub image_label: String,
    pub kind: NoticeKind,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    Notice(BatchNotice),
    Progress { completed: usize, total: usize },
}

impl BatchEvent {
    /// 進捗率 (0.0-1.0)
    pub fn fraction(&self) -> Option<f64> {
        match self {
            BatchEvent::Progress { completed, total } if *total > 0 => {
                Some(*completed as f64 / *total as f64)
            }
            _ => None,
        }
    }
}

/// 1バッチの実行設定
#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub prompt: String,
    pub backend_candidates: Vec<String>,
    /// 選択中の機種のREGボーダー
    pub threshold: u32,
    pub aliases: FieldAliases,
    /// 画像ごとの待機時間
    pub pacing: Duration,
}

/// 画像群を順に解析して結果を集める
///
/// 全画像が失敗した場合は空の結果を返す（エラーではない）。
pub async fn run_batch<B, F>(
    backend: &B,
    images: &[ImagePayload],
    settings: &BatchSettings,
    mut on_event: F,
) -> ResultSet
where
    B: VisionBackend + ?Sized,
    F: FnMut(BatchEvent),
{
    let total = images.len();
    let mut results = ResultSet::new();

    for (index, image) in images.iter().enumerate() {
        let request = ExtractionRequest {
            image,
            prompt: &settings.prompt,
            backend_candidates: &settings.backend_candidates,
        };

        let notice = match invoke_with_fallback(backend, request).await {
            Err(exhausted) => BatchNotice {
                image_index: index,
                image_label: image.label.clone(),
                kind: NoticeKind::BackendFailure,
                detail: format!("解析失敗(混雑中): {}", exhausted),
            },
            Ok(response) => match parse_field_sets(&response.raw_text, &settings.aliases) {
                Err(e) => {
                    tracing::debug!(image = %image.label, error = %e, "変換失敗");
                    BatchNotice {
                        image_index: index,
                        image_label: image.label.clone(),
                        kind: NoticeKind::ConversionError,
                        detail: format!("データ変換エラー: {}", e),
                    }
                }
                Ok(field_sets) => {
                    let count = field_sets.len();
                    results.extend(field_sets.iter().map(|raw| {
                        MachineRecord::assemble(raw, settings.threshold, Some(response.served_by.as_str()))
                    }));
                    BatchNotice {
                        image_index: index,
                        image_label: image.label.clone(),
                        kind: NoticeKind::Success,
                        detail: format!("{}台 ({})", count, response.served_by),
                    }
                }
            },
        };

        on_event(BatchEvent::Notice(notice));
        on_event(BatchEvent::Progress {
            completed: index + 1,
            total,
        });

        if !settings.pacing.is_zero() {
            tokio::time::sleep(settings.pacing).await;
        }
    }

    results
}
