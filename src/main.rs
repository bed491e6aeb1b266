use clap::Parser;
use indicatif::ProgressBar;
use paycheck::{assign, cli, client, config, error, export, prompt, scanner, settle};
use cli::{Cli, Commands};
use client::BackendClient;
use config::Config;
use error::{PayCheckError, Result};
use paycheck_common::{CheckSession, Roster, SettleType};
use scanner::ReceiptImage;
use std::time::Duration;

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn upload(client: &BackendClient, images: &[ReceiptImage]) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("영수증 {}장 업로드 중...", images.len()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = client.upload_images(images).await;
    spinner.finish_and_clear();
    result
}

/// 参加者を1人ずつ登録。失敗はログのみ
async fn join_all(client: &BackendClient, roster: &Roster) -> usize {
    let mut joined = 0;
    for name in roster.names() {
        match client.join(name).await {
            Ok(()) => joined += 1,
            Err(e) => log::error!("참여자 등록 실패 ({}): {}", name, e),
        }
    }
    joined
}

async fn run_settlement(
    client: &BackendClient,
    method: SettleType,
    assign_specs: &[String],
    interactive: bool,
) -> Result<CheckSession> {
    let specs = assign_specs
        .iter()
        .map(|s| assign::parse_assign(s))
        .collect::<Result<Vec<_>>>()?;

    let (mut session, mut pending) = settle::load_session(client, method).await?;

    if session.roster().is_empty() {
        return Err(PayCheckError::MissingParticipants);
    }

    match method {
        SettleType::Item => {
            let assigned = if interactive {
                prompt::prompt_assignments(&mut session)?
            } else {
                settle::apply_assignments(&mut session, &specs)?
            };
            if assigned.is_some() {
                pending = assigned;
            }
        }
        SettleType::Even => {
            for option in settle::ignored_item_options(method, !specs.is_empty(), interactive) {
                log::warn!("1/N 정산에서는 {} 이 무시됩니다", option);
            }
        }
    }

    if let Some(pending) = pending {
        settle::send(client, &mut session, pending).await;
    }

    Ok(session)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut config = Config::load()?;
    if let Some(url) = cli.base_url.clone() {
        config.base_url = url;
    }
    let client = BackendClient::new(&config)?;

    match cli.command {
        Commands::Reset => {
            client.clear_all_data().await?;
            println!("✔ 데이터를 초기화했습니다");
        }

        Commands::Upload { paths } => {
            let images = scanner::collect_images(&paths)?;
            if images.is_empty() {
                return Err(PayCheckError::NoImagesFound(
                    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "),
                ));
            }
            upload(&client, &images).await?;
            println!("✔ 영수증 {}장을 업로드했습니다", images.len());
        }

        Commands::Join { names } => {
            let roster: Roster = names.iter().collect();
            let joined = join_all(&client, &roster).await;
            println!("✔ 참여자 {}/{}명 등록", joined, roster.len());
        }

        Commands::Members => {
            let members = client.members().await?;
            if members.is_empty() {
                println!("등록된 참여자가 없습니다");
            }
            for name in members {
                println!("- {}", name);
            }
        }

        Commands::Analyze { json } => {
            let items = client.analyze().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                for group in paycheck_common::group_by_receipt(&items) {
                    println!("[영수증 {}] {}", group.receipt, group.store_name());
                    for (index, item) in group.items.iter().enumerate() {
                        println!(
                            "  {:<4} {:<20} x{:<3} {:>10}원",
                            index, item.item_name, item.quantity, item.total_amount
                        );
                    }
                    println!("  총액 {}원\n", group.total());
                }
            }
        }

        Commands::Settle { method, assign, interactive } => {
            let session = run_settlement(&client, method, &assign, interactive).await?;
            settle::print_summary(&session);
        }

        Commands::Run { folder, participant, method, output } => {
            println!("🧾 paycheck - 일괄 정산\n");

            println!("[1/4] 초기화 중...");
            if let Err(e) = client.clear_all_data().await {
                log::warn!("초기화 실패: {}", e);
            }

            println!("[2/4] 영수증 업로드 중...");
            let images = scanner::scan_folder(&folder)?;
            if images.is_empty() {
                return Err(PayCheckError::NoImagesFound(folder.display().to_string()));
            }
            upload(&client, &images).await?;
            println!("✔ {}장 업로드\n", images.len());

            println!("[3/4] 참여자 등록 중...");
            let roster: Roster = if participant.is_empty() {
                prompt::prompt_participants()?
            } else {
                participant.iter().collect()
            };
            if roster.is_empty() {
                return Err(PayCheckError::MissingParticipants);
            }
            let joined = join_all(&client, &roster).await;
            println!("✔ {}명 등록\n", joined);

            println!("[4/4] 정산 중...");
            let session = run_settlement(&client, method, &[], method == SettleType::Item).await?;
            println!();
            settle::print_summary(&session);

            if let Some(output) = output {
                let path = export::output_path_for(&output, "정산결과");
                export::excel::generate_excel(&session, &path)?;
                println!("\n✔ Excel 출력: {}", path.display());
            }

            println!("\n✅ 완료");
        }

        Commands::Export { output, method, assign } => {
            let session = run_settlement(&client, method, &assign, false).await?;
            let path = export::output_path_for(&output, "정산결과");
            export::excel::generate_excel(&session, &path)?;
            println!("✔ Excel 출력: {}", path.display());
        }

        Commands::Config { set_base_url, show } => {
            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                println!("✔ 백엔드 URL을 저장했습니다");
            }

            if show {
                println!("설정:");
                println!("  백엔드 URL: {}", config.base_url);
                println!("  타임아웃: {}초", config.timeout_seconds);
            }
        }
    }

    Ok(())
}
