use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "counter-ai")]
#[command(about = "データカウンター写真AI解析・実戦収支記録ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// データ一覧の写真を解析して判定結果を表示
    Analyze {
        /// 画像ファイルまたはフォルダ（複数可）
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 機種名（省略時は設定の既定機種、なければ先頭の機種）
        #[arg(short, long)]
        model: Option<String>,

        /// 結果JSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 結果Excelの出力先
        #[arg(long)]
        excel: Option<PathBuf>,

        /// 使用するバックエンド（指定順に試す。省略時は設定値）
        #[arg(short, long = "backend")]
        backends: Vec<String>,

        /// 画像ごとの待機時間（ミリ秒）
        #[arg(long)]
        pacing_ms: Option<u64>,

        /// 短いプロンプトを使う
        #[arg(long)]
        compact_prompt: bool,

        /// チャンス行を強調しない
        #[arg(long)]
        no_chance_highlight: bool,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// 機種とボーダーの一覧
    Models,

    /// 実戦結果を記録（未指定の項目は対話入力）
    Record {
        /// 日付 (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// ホール名
        #[arg(long)]
        hall: Option<String>,

        /// 台番号
        #[arg(long)]
        machine_no: Option<String>,

        /// 機種名
        #[arg(short, long)]
        model: Option<String>,

        /// 設定推測 (不明/low/middle/high/six)
        #[arg(long)]
        setting: Option<String>,

        /// 投資（枚）
        #[arg(long)]
        invest: Option<u32>,

        /// 回収（枚）
        #[arg(long)]
        payout: Option<u32>,

        /// メモ
        #[arg(long)]
        memo: Option<String>,

        /// 記録ファイル（省略時は設定値）
        #[arg(long)]
        ledger: Option<PathBuf>,
    },

    /// 過去の実戦記録と通算成績を表示
    History {
        /// 記録ファイル（省略時は設定値）
        #[arg(long)]
        ledger: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
