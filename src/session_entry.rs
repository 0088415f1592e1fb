//! 実戦記録の対話入力
//!
//! コマンドラインで指定されなかった項目だけを対話的に尋ねる。

use crate::error::{CounterAiError, Result};
use crate::ledger::{new_session_record, today};
use counter_ai_common::{ProfileTable, SessionRecord, SettingGuess};
use dialoguer::{Input, Select};

/// 機種一覧に載っていない機種
pub const OTHER_MODEL: &str = "その他";

/// コマンドラインで指定済みの項目
#[derive(Debug, Clone, Default)]
pub struct RecordArgs {
    pub date: Option<String>,
    pub hall: Option<String>,
    pub machine_no: Option<String>,
    pub model: Option<String>,
    pub setting: Option<String>,
    pub invest: Option<u32>,
    pub payout: Option<u32>,
    pub memo: Option<String>,
}

impl RecordArgs {
    /// 対話なしで記録を組み立てられるか
    pub fn is_complete(&self) -> bool {
        self.hall.is_some()
            && self.machine_no.is_some()
            && self.model.is_some()
            && self.invest.is_some()
            && self.payout.is_some()
    }
}

/// 機種の選択肢（機種表 + その他）
pub fn model_choices(profiles: &ProfileTable) -> Vec<String> {
    profiles
        .names()
        .into_iter()
        .map(str::to_string)
        .chain(std::iter::once(OTHER_MODEL.to_string()))
        .collect()
}

fn prompt_error(e: dialoguer::Error) -> CounterAiError {
    CounterAiError::Prompt(e.to_string())
}

fn ask_text(prompt: &str, default: Option<String>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(default) = default {
        input = input.default(default);
    }
    input.interact_text().map_err(prompt_error)
}

fn ask_count(prompt: &str) -> Result<u32> {
    Input::<u32>::new()
        .with_prompt(prompt)
        .default(0)
        .interact_text()
        .map_err(prompt_error)
}

fn ask_choice(prompt: &str, items: &[String]) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(prompt_error)
}

/// 不足項目を対話入力で補って記録を作る
pub fn complete_record(args: RecordArgs, profiles: &ProfileTable) -> Result<SessionRecord> {
    // 必須項目が揃っていれば任意項目は尋ねない
    let complete = args.is_complete();

    let date = match args.date {
        Some(d) => d,
        None if complete => today(),
        None => ask_text("日付 (YYYY-MM-DD)", Some(today()))?,
    };
    let hall = match args.hall {
        Some(h) => h,
        None => ask_text("ホール名 (例：〇〇店)", None)?,
    };
    let machine_no = match args.machine_no {
        Some(n) => n,
        None => ask_text("台番号 (例：123番台)", None)?,
    };
    let machine_model = match args.model {
        Some(m) => m,
        None => {
            let choices = model_choices(profiles);
            let index = ask_choice("機種", &choices)?;
            choices[index].clone()
        }
    };
    let setting_guess = match args.setting {
        Some(s) => s.parse::<SettingGuess>()?,
        None if complete => SettingGuess::Unknown,
        None => {
            let labels: Vec<String> = SettingGuess::ALL.iter().map(|g| g.label().to_string()).collect();
            SettingGuess::ALL[ask_choice("設定推測", &labels)?]
        }
    };
    let invest = match args.invest {
        Some(v) => v,
        None => ask_count("投資 (枚)")?,
    };
    let payout = match args.payout {
        Some(v) => v,
        None => ask_count("回収 (枚)")?,
    };
    let memo = match args.memo {
        Some(m) => m,
        None if complete => String::new(),
        None => ask_text("メモ (特定日の傾向など)", None)?,
    };

    new_session_record(
        &date,
        &hall,
        &machine_no,
        &machine_model,
        setting_guess,
        invest,
        payout,
        &memo,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_choices_end_with_other() {
        let choices = model_choices(&ProfileTable::builtin());
        assert_eq!(choices.len(), 6);
        assert_eq!(choices[0], "アイムジャグラーEX(6号機)");
        assert_eq!(choices.last().unwrap(), OTHER_MODEL);
    }

    #[test]
    fn test_complete_record_without_prompts() {
        let args = RecordArgs {
            date: Some("2026-10-18".into()),
            hall: Some("駅前店".into()),
            machine_no: Some("123".into()),
            model: Some("マイジャグラーV".into()),
            setting: Some("high".into()),
            invest: Some(1000),
            payout: Some(450),
            memo: None,
        };
        assert!(args.is_complete());

        let record = complete_record(args, &ProfileTable::builtin()).unwrap();
        assert_eq!(record.setting_guess, SettingGuess::High);
        assert_eq!(record.profit(), -550);
        assert_eq!(record.memo, "");
    }

    #[test]
    fn test_complete_record_fills_optional_fields() {
        let args = RecordArgs {
            hall: Some("駅前店".into()),
            machine_no: Some("0456".into()),
            model: Some(OTHER_MODEL.into()),
            invest: Some(250),
            payout: Some(800),
            ..Default::default()
        };

        let record = complete_record(args, &ProfileTable::builtin()).unwrap();
        assert_eq!(record.date, today());
        assert_eq!(record.machine_no, "0456");
        assert_eq!(record.setting_guess, SettingGuess::Unknown);
        assert_eq!(record.memo, "");
        assert_eq!(record.profit(), 550);
    }

    #[test]
    fn test_complete_record_rejects_bad_setting() {
        let args = RecordArgs {
            date: Some("2026-10-18".into()),
            hall: Some("駅前店".into()),
            machine_no: Some("123".into()),
            model: Some("マイジャグラーV".into()),
            setting: Some("???".into()),
            invest: Some(0),
            payout: Some(0),
            memo: None,
        };
        assert!(matches!(
            complete_record(args, &ProfileTable::builtin()),
            Err(CounterAiError::Common(_))
        ));
    }
}
