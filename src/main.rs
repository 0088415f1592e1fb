use anyhow::Context;
use clap::Parser;
use counter_ai_common::{
    build_extraction_prompt, present, PresentOptions, PromptStyle, SessionSummary,
};
use counter_ai_rust::{backend, batch, cli, config, error, export, ledger, logging, scanner, session_entry};
use batch::{BatchEvent, BatchSettings, NoticeKind};
use cli::{Cli, Commands};
use config::Config;
use error::CounterAiError;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().context("設定ファイルの読み込みに失敗")?;
    logging::init(cli.verbose, &config.log_filter);

    match cli.command {
        Commands::Analyze {
            paths,
            model,
            output,
            excel,
            backends,
            pacing_ms,
            compact_prompt,
            no_chance_highlight,
            recursive,
        } => {
            println!("🎰 counter-ai - データ一覧解析\n");

            // 1. 機種とボーダー
            let profiles = config.profile_table()?;
            let profile = match model.or_else(|| config.default_machine_model.clone()) {
                Some(name) => profiles
                    .get(&name)
                    .ok_or(CounterAiError::UnknownMachineModel(name))?,
                None => profiles
                    .first()
                    .ok_or_else(|| CounterAiError::Config("機種表が空です".into()))?,
            };
            println!("設定: {}  高設定目安: REG 1/{}以下\n", profile.name, profile.rb_threshold);

            // 2. 画像スキャン
            println!("[1/3] 写真を読み込み中...");
            let images = scanner::scan_paths(&paths, recursive)?;
            if images.is_empty() {
                let joined = paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(CounterAiError::NoImagesFound(joined).into());
            }
            let mut payloads = Vec::with_capacity(images.len());
            for info in &images {
                match scanner::load_payload(info, config.max_image_size) {
                    Ok(payload) => payloads.push(payload),
                    Err(e) => println!("⚠️ {}: {}", info.file_name, e),
                }
            }
            println!("✔ {}枚の写真を検出\n", payloads.len());

            // 3. AI解析
            let api_key = config.get_api_key()?;
            let gemini = backend::GeminiBackend::new(api_key, Duration::from_secs(config.timeout_seconds))?;
            let style = if compact_prompt { PromptStyle::Compact } else { PromptStyle::Full };
            let settings = BatchSettings {
                prompt: build_extraction_prompt(style),
                backend_candidates: if backends.is_empty() { config.backends.clone() } else { backends },
                threshold: profile.rb_threshold,
                aliases: config.field_aliases(),
                pacing: Duration::from_millis(pacing_ms.unwrap_or(config.pacing_ms)),
            };

            println!("[2/3] AI解析中... (候補: {})", settings.backend_candidates.join(" → "));
            let progress = ProgressBar::new(payloads.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );

            let records = batch::run_batch(&gemini, &payloads, &settings, |event| match event {
                BatchEvent::Notice(notice) => {
                    let icon = match notice.kind {
                        NoticeKind::Success => "✔",
                        NoticeKind::ConversionError => "⚠️",
                        NoticeKind::BackendFailure => "❌",
                    };
                    progress.println(format!("{} {}: {}", icon, notice.image_label, notice.detail));
                }
                BatchEvent::Progress { completed, .. } => progress.set_position(completed as u64),
            })
            .await;
            progress.finish_and_clear();

            // 4. 表示
            println!("[3/3] 結果を整形中...\n");
            let options = PresentOptions {
                highlight_chance: !no_chance_highlight,
            };
            let presented = present(records, options);
            println!("{}", export::render_table(&presented));

            if presented.is_empty() {
                return Ok(());
            }

            if let Some(output) = output {
                export::write_json(&presented, &output)?;
                println!("\n✔ 結果を保存: {}", output.display());
            }
            if let Some(excel) = excel {
                export::excel::generate_excel(&presented, &excel)?;
                println!("✔ Excel出力: {}", excel.display());
            }

            println!("\n✅ 解析完了");
        }

        Commands::Models => {
            let profiles = config.profile_table()?;
            println!("機種一覧 (REGボーダー):");
            for profile in profiles.iter() {
                println!("  {}  1/{}", profile.name, profile.rb_threshold);
            }
        }

        Commands::Record {
            date,
            hall,
            machine_no,
            model,
            setting,
            invest,
            payout,
            memo,
            ledger: ledger_path,
        } => {
            println!("📝 counter-ai - 実戦データの記録\n");

            let profiles = config.profile_table()?;
            let args = session_entry::RecordArgs {
                date,
                hall,
                machine_no,
                model,
                setting,
                invest,
                payout,
                memo,
            };
            let record = session_entry::complete_record(args, &profiles)?;

            let path = match ledger_path {
                Some(path) => path,
                None => config.ledger_path()?,
            };
            ledger::SessionLedger::new(&path).append(&record)?;
            println!("✔ 保存しました！ 差枚: {:+}枚 ({})", record.profit(), path.display());
        }

        Commands::History { ledger: ledger_path } => {
            println!("📊 counter-ai - 過去のデータ\n");

            let path = match ledger_path {
                Some(path) => path,
                None => config.ledger_path()?,
            };
            let records = ledger::SessionLedger::new(&path).read_all()?;

            match SessionSummary::from_records(&records) {
                None => println!("まだデータがありません。`counter-ai record` で記録してください。"),
                Some(summary) => {
                    println!("通算収支: {:+} 枚", summary.total_profit);
                    println!("勝率:     {:.1} %", summary.win_rate);
                    println!("記録数:   {} 件\n", summary.count);

                    println!("{}", ledger::HEADER.join(" | "));
                    for r in &records {
                        println!(
                            "{} | {} | {} | {} | {} | {} | {} | {:+} | {} | {}",
                            r.date,
                            r.hall,
                            r.machine_no,
                            r.machine_model,
                            r.setting_guess,
                            r.invest,
                            r.payout,
                            r.profit(),
                            r.memo,
                            r.recorded_at
                        );
                    }
                }
            }
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  バックエンド: {}", config.backends.join(" → "));
                println!("  待機時間: {}ms", config.pacing_ms);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  最大画像サイズ: {}px", config.max_image_size);
                println!(
                    "  既定機種: {}",
                    config.default_machine_model.as_deref().unwrap_or("(先頭の機種)")
                );
                println!("  記録ファイル: {}", config.ledger_path()?.display());
                println!(
                    "  APIキー: {}",
                    if config.get_api_key().is_ok() { "設定済み" } else { "未設定" }
                );
            }
        }
    }

    Ok(())
}
