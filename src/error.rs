use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayCheckError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("참여자가 없습니다. `paycheck join NAME` 으로 등록하거나 `-p NAME` 을 지정하세요")]
    MissingParticipants,

    #[error("폴더를 찾을 수 없습니다: {0}")]
    FolderNotFound(String),

    #[error("파일을 찾을 수 없습니다: {0}")]
    FileNotFound(String),

    #[error("영수증 이미지가 없습니다: {0}")]
    NoImagesFound(String),

    #[error("HTTP 오류: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API 오류 ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("잘못된 항목 지정: {0}")]
    InvalidAssignment(String),

    #[error("JSON 파싱 오류: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("입력 오류: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] paycheck_common::Error),
}

pub type Result<T> = std::result::Result<T, PayCheckError>;
