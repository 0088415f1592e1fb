//! AIレスポンスパーサー
//!
//! レスポンス本文からJSONリストを抜き出し、1行ごとの
//! [`RawFieldSet`] に変換する。

use crate::alias::FieldAliases;
use crate::error::{Error, Result};
use crate::types::RawFieldSet;
use regex::Regex;
use serde_json::Value;

lazy_static::lazy_static! {
    static ref CODE_FENCE_RE: Regex = Regex::new(r"```json|```").unwrap();
    // 最初の '[' から最後の ']' まで（改行をまたぐ）
    static ref LIST_RE: Regex = Regex::new(r"(?s)\[.*\]").unwrap();
}

/// コードフェンス記号を除去
pub fn strip_code_fences(response: &str) -> String {
    CODE_FENCE_RE.replace_all(response, "").trim().to_string()
}

/// レスポンスからJSONリスト部分を抽出
///
/// # Examples
/// ```
/// use counter_ai_common::extract_list;
///
/// let list = extract_list("結果: [{\"RB\": 3}] 以上").unwrap();
/// assert_eq!(list, "[{\"RB\": 3}]");
/// ```
pub fn extract_list(response: &str) -> Result<String> {
    let cleaned = strip_code_fences(response);
    LIST_RE
        .find(&cleaned)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::Parse("JSONリストが見つかりません".into()))
}

/// レスポンスを行ごとのフィールドにパース
///
/// オブジェクト以外の要素は読み飛ばす。1行も得られなければエラー。
///
/// # Arguments
/// * `response` - AIレスポンス本文
/// * `aliases` - フィールド名エイリアス表
pub fn parse_field_sets(response: &str, aliases: &FieldAliases) -> Result<Vec<RawFieldSet>> {
    let list = extract_list(response)?;
    let value: Value = serde_json::from_str(&list)
        .map_err(|e| Error::Parse(format!("JSONパースエラー: {}", e)))?;

    let items = match value {
        Value::Array(items) => items,
        _ => return Err(Error::Parse("JSONがリストではありません".into())),
    };

    let field_sets: Vec<RawFieldSet> = items
        .iter()
        .filter_map(Value::as_object)
        .map(|object| RawFieldSet::from_object(object, aliases))
        .collect();

    if field_sets.is_empty() {
        return Err(Error::Parse("データ行がありません".into()));
    }

    Ok(field_sets)
}

/// [`parse_field_sets`] の失敗を空リストとして返す版
pub fn extract_field_sets(response: &str, aliases: &FieldAliases) -> Vec<RawFieldSet> {
    parse_field_sets(response, aliases).unwrap_or_default()
}
