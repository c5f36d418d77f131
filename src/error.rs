use thiserror::Error;

/// 汇总计算的错误类型
///
/// 任何一次后端查询失败都会中止整个汇总，不返回部分结果。
/// 孤立的供应商引用不属于错误，在解析阶段被静默丢弃。
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("unknown invoice status: {0}")]
    InvalidStatus(String),

    #[error("csv export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
