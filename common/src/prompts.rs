//! プロンプト生成モジュール
//!
//! データカウンター（データ一覧表示）写真の読み取り指示。

/// 読み取り指示の書き方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptStyle {
    /// 全行読み取り・Markdown装飾不要を明示する版
    #[default]
    Full,
    /// 短い版
    Compact,
}

/// データ一覧画像の読み取りプロンプトを生成
pub fn build_extraction_prompt(style: PromptStyle) -> String {
    match style {
        PromptStyle::Full => r#"このスロットのデータ表の画像から、全ての行の数値を読み取ってください。
以下のJSON形式のリストのみを出力してください。Markdown装飾不要。
[{"台番号": "文字列", "累計": 整数, "BB": 整数, "RB": 整数}, ...]
※読み取れない項目は -1"#
            .to_string(),
        PromptStyle::Compact => r#"スロットデータ表の画像から数値を読み取ってください。
JSONリストのみ出力: [{"台番号": "文字列", "累計": 整数, "BB": 整数, "RB": 整数}, ...]
※読めない場合は-1"#
            .to_string(),
    }
}
