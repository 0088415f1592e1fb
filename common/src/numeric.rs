//! 数値正規化モジュール
//!
//! AIが返すフィールド値（文字列・数値混在）を整数に変換する。
//! 読み取れない値はすべて [`UNREADABLE`] (-1) になる。

use serde_json::Value;

/// 読み取り不能を表すセンチネル値
pub const UNREADABLE: i64 = -1;

/// JSON値を件数として正規化
///
/// - 文字列: [`normalize_token`] の規則で変換
/// - 数値: 文字列表現に対して同じ規則を適用（`12.0` は小数点を含むため -1）
/// - null / bool / 配列 / オブジェクト: -1
pub fn normalize(value: &Value) -> i64 {
    match value {
        Value::String(s) => normalize_token(s),
        Value::Number(n) => normalize_token(&n.to_string()),
        _ => UNREADABLE,
    }
}

/// 文字列トークンを件数として正規化
///
/// マイナス記号を取り除いた残りが数字（全角数字を含む）と桁区切りの
/// カンマだけで構成されている場合に限り、数字部分を整数として返す。
/// それ以外、および i64 に収まらない値は -1。
///
/// マイナス記号は先頭の1文字だけでなく、位置を問わずすべて判定前に
/// 除去される。`"-5"` は `5`、`"1-2"` は `12` になる。
///
/// # Examples
/// ```
/// use counter_ai_common::normalize_token;
///
/// assert_eq!(normalize_token("1,234"), 1234);
/// assert_eq!(normalize_token("07"), 7);
/// assert_eq!(normalize_token("1-2"), 12);
/// assert_eq!(normalize_token("N/A"), -1);
/// ```
pub fn normalize_token(token: &str) -> i64 {
    let body: Vec<char> = token.chars().filter(|&c| c != '-').collect();

    let well_formed = body.iter().any(|&c| to_ascii_digit(c).is_some())
        && body.iter().all(|&c| c == ',' || to_ascii_digit(c).is_some());
    if !well_formed {
        return UNREADABLE;
    }

    let digits: String = body.into_iter().filter_map(to_ascii_digit).collect();
    digits.parse::<i64>().unwrap_or(UNREADABLE)
}

/// ASCII数字・全角数字をASCII数字に変換
fn to_ascii_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_token_plain() {
        assert_eq!(normalize_token("0"), 0);
        assert_eq!(normalize_token("07"), 7);
        assert_eq!(normalize_token("8123"), 8123);
    }

    #[test]
    fn test_normalize_token_thousands_separator() {
        assert_eq!(normalize_token("1,234"), 1234);
        assert_eq!(normalize_token("12,345,678"), 12345678);
    }

    #[test]
    fn test_normalize_token_unreadable() {
        assert_eq!(normalize_token(""), -1);
        assert_eq!(normalize_token("N/A"), -1);
        assert_eq!(normalize_token("abc"), -1);
        assert_eq!(normalize_token("12回"), -1);
        assert_eq!(normalize_token(" 12 "), -1);
        assert_eq!(normalize_token("12.5"), -1);
        assert_eq!(normalize_token(","), -1);
        assert_eq!(normalize_token("-"), -1);
    }

    #[test]
    fn test_normalize_token_minus_is_dropped() {
        // マイナス記号は除去され、絶対値として読まれる
        assert_eq!(normalize_token("-5"), 5);
        assert_eq!(normalize_token("-1"), 1);
        assert_eq!(normalize_token("1-2"), 12);
    }

    #[test]
    fn test_normalize_token_fullwidth_digits() {
        assert_eq!(normalize_token("１２３"), 123);
    }

    #[test]
    fn test_normalize_token_overflow() {
        assert_eq!(normalize_token("99999999999999999999999"), -1);
    }

    #[test]
    fn test_normalize_json_values() {
        assert_eq!(normalize(&json!(250)), 250);
        assert_eq!(normalize(&json!("3,001")), 3001);
        assert_eq!(normalize(&json!(-1)), 1);
        assert_eq!(normalize(&json!(12.0)), -1);
        assert_eq!(normalize(&json!(null)), -1);
        assert_eq!(normalize(&json!(true)), -1);
        assert_eq!(normalize(&json!([1, 2])), -1);
        assert_eq!(normalize(&json!({"v": 1})), -1);
    }

    #[test]
    fn test_normalize_never_below_sentinel() {
        let samples = ["", "x", "-", "--9", "９,９９９", "0x10", "١٢", "1e3"];
        for s in samples {
            let v = normalize_token(s);
            assert!(v >= -1, "{} -> {}", s, v);
        }
    }
}
