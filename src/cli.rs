use clap::{Parser, Subcommand};
use paycheck_common::SettleType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "paycheck")]
#[command(about = "PayCheck 영수증 정산 클라이언트", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 상세 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 백엔드 URL (설정 파일・환경 변수보다 우선)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 서버의 영수증・참여자 데이터를 모두 초기화
    Reset,

    /// 영수증 이미지를 업로드
    Upload {
        /// 이미지 파일 또는 폴더
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// 참여자를 등록
    Join {
        /// 참여자 이름
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// 등록된 참여자 목록
    Members,

    /// 분석된 영수증 항목을 표시
    Analyze {
        /// JSON으로 출력
        #[arg(long)]
        json: bool,
    },

    /// 정산 계산
    Settle {
        /// 정산 방식 (even/item)
        #[arg(short, long, default_value = "even")]
        method: SettleType,

        /// 항목별 참여자 지정 `RECEIPT:INDEX=NAME,NAME` (여러 번 지정 가능)
        #[arg(short, long)]
        assign: Vec<String>,

        /// 항목별 참여자를 대화식으로 입력 (item 방식 전용)
        #[arg(short, long)]
        interactive: bool,
    },

    /// 초기화부터 정산까지 일괄 실행
    Run {
        /// 영수증 이미지 폴더
        #[arg(required = true)]
        folder: PathBuf,

        /// 참여자 (생략하면 대화식 입력)
        #[arg(short, long)]
        participant: Vec<String>,

        /// 정산 방식 (even/item)
        #[arg(short, long, default_value = "even")]
        method: SettleType,

        /// 결과를 Excel로도 출력
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 정산 결과를 Excel로 내보내기
    Export {
        /// 출력 파일/디렉터리
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// 정산 방식 (even/item)
        #[arg(short, long, default_value = "even")]
        method: SettleType,

        /// 항목별 참여자 지정 `RECEIPT:INDEX=NAME,NAME`
        #[arg(short, long)]
        assign: Vec<String>,
    },

    /// 설정 표시/변경
    Config {
        /// 백엔드 URL 저장
        #[arg(long)]
        set_base_url: Option<String>,

        /// 설정 표시
        #[arg(long)]
        show: bool,
    },
}
