use thiserror::Error;

/// 本地参数错误
pub const COS_PARAMS_ERROR: i64 = -1;
/// 本地网络错误，包括连接失败、接收超时、响应无法解析
pub const COS_NETWORK_ERROR: i64 = -2;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    IoError(#[from] std::io::Error),
    #[error("{0}")]
    HttpError(#[from] hyper::Error),
    #[error("{0}")]
    RequestError(#[from] hyper::http::Error),
    #[error("SecretId或SecretKey为空")]
    MissingCredential,
    #[error("路径不合法：{0}")]
    InvalidPath(String),
    #[error("file {0} not exists or params error")]
    FileNotFound(String),
    #[error("recv timeout")]
    Timeout,
    #[error("response {0} is not json")]
    InvalidResponse(String),
    #[error("COS返回了错误，错误码：{code}，错误内容：{message}")]
    Cos { code: i64, message: String },
}

impl Error {
    /// 错误对应的结果码
    ///
    /// - 本地参数、配置或文件读取错误返回 -1
    /// - 网络错误返回 -2
    /// - COS返回的错误保持原始错误码
    pub fn code(&self) -> i64 {
        match self {
            Error::IoError(_)
            | Error::MissingCredential
            | Error::InvalidPath(_)
            | Error::FileNotFound(_)
            | Error::RequestError(_) => COS_PARAMS_ERROR,
            Error::HttpError(_) | Error::Timeout | Error::InvalidResponse(_) => COS_NETWORK_ERROR,
            Error::Cos { code, .. } => *code,
        }
    }
}
