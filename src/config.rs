//! 访问COS所需的应用信息与请求参数

use crate::Error;
use std::{borrow::Cow, collections::HashMap, env, fmt, time::Duration};

/// 默认的COS v1文件接口地址
pub const DEFAULT_ENDPOINT: &str = "http://web.file.myqcloud.com/files/v1/";
/// 默认的接收超时时间
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// 多次有效签名的默认有效时长，单位秒
pub const DEFAULT_SIGN_EXPIRED: u64 = 60;

pub const TENCENTCLOUD_APPID: &str = "TENCENTCLOUD_APPID";
pub const TENCENTCLOUD_SECRET_ID: &str = "TENCENTCLOUD_SECRET_ID";
pub const TENCENTCLOUD_SECRET_KEY: &str = "TENCENTCLOUD_SECRET_KEY";
pub const TENCENTCLOUD_COS_ENDPOINT: &str = "TENCENTCLOUD_COS_ENDPOINT";
pub const TENCENTCLOUD_COS_TIMEOUT: &str = "TENCENTCLOUD_COS_TIMEOUT";

/// COS配置
///
/// 所有请求都从此配置派生，不存在进程级的全局配置
///
/// ```
/// use qcloud_cos_rs::CosConfig;
/// use std::time::Duration;
///
/// let config = CosConfig::new("1250000000", "Your SecretId", "Your SecretKey")
///     .set_timeout(Duration::from_secs(10));
/// ```
#[derive(Clone)]
pub struct CosConfig {
    pub(crate) app_id: Cow<'static, str>,
    pub(crate) secret_id: Cow<'static, str>,
    pub(crate) secret_key: Cow<'static, str>,
    pub(crate) endpoint: Cow<'static, str>,
    pub(crate) timeout: Duration,
    pub(crate) sign_expired: u64,
    pub(crate) user_agent: Cow<'static, str>,
}

impl fmt::Debug for CosConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosConfig")
            .field("app_id", &self.app_id)
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"******")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("sign_expired", &self.sign_expired)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl CosConfig {
    /// 初始化配置
    ///
    /// - app_id ：腾讯云项目的AppId
    /// - secret_id ：腾讯云SecretId
    /// - secret_key ：腾讯云SecretKey
    pub fn new(app_id: impl ToString, secret_id: impl ToString, secret_key: impl ToString) -> Self {
        CosConfig {
            app_id: app_id.to_string().into(),
            secret_id: secret_id.to_string().into(),
            secret_key: secret_key.to_string().into(),
            endpoint: DEFAULT_ENDPOINT.into(),
            timeout: DEFAULT_TIMEOUT,
            sign_expired: DEFAULT_SIGN_EXPIRED,
            user_agent: default_user_agent().into(),
        }
    }
    /// 从环境变量中读取配置
    ///
    /// 必须存在 `TENCENTCLOUD_APPID`、`TENCENTCLOUD_SECRET_ID`、`TENCENTCLOUD_SECRET_KEY`，
    /// 可选 `TENCENTCLOUD_COS_ENDPOINT` 以及以秒为单位的 `TENCENTCLOUD_COS_TIMEOUT`
    pub fn from_env() -> Result<Self, Error> {
        Self::from_vars(env::vars().collect())
    }

    pub(crate) fn from_vars(envs: HashMap<String, String>) -> Result<Self, Error> {
        let required = |key: &str| {
            envs.get(key)
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or(Error::MissingCredential)
        };
        let mut config = CosConfig::new(
            required(TENCENTCLOUD_APPID)?,
            required(TENCENTCLOUD_SECRET_ID)?,
            required(TENCENTCLOUD_SECRET_KEY)?,
        );
        if let Some(endpoint) = envs.get(TENCENTCLOUD_COS_ENDPOINT) {
            config = config.set_endpoint(endpoint);
        }
        if let Some(timeout) = envs
            .get(TENCENTCLOUD_COS_TIMEOUT)
            .and_then(|v| v.parse::<u64>().ok())
        {
            config = config.set_timeout(Duration::from_secs(timeout));
        }
        Ok(config)
    }
    /// 设置接口地址，地址末尾会自动补齐 `/`
    pub fn set_endpoint(mut self, endpoint: impl ToString) -> Self {
        let mut endpoint = endpoint.to_string();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        self.endpoint = endpoint.into();
        self
    }
    /// 设置接收超时时间
    ///
    /// 超时按连续无数据收发的时长计算，发送请求体或接收响应期间每有数据流动就重新计时，超时后请求将被中止并返回 -2
    pub fn set_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
    /// 设置多次有效签名的有效时长，单位秒
    pub fn set_sign_expired(mut self, seconds: u64) -> Self {
        self.sign_expired = seconds;
        self
    }
    /// 设置User-Agent
    pub fn set_user_agent(mut self, user_agent: impl ToString) -> Self {
        self.user_agent = user_agent.to_string().into();
        self
    }
    pub fn app_id(&self) -> &str {
        &self.app_id
    }
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn default_user_agent() -> String {
    format!(
        "qcloud-cos-rs/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        env::consts::OS,
        env::consts::ARCH
    )
}
