//! 公共数据定义
//!
//!
use crate::{
    error::{COS_NETWORK_ERROR, COS_PARAMS_ERROR},
    Error,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use ring::digest;
use serde::{de::DeserializeOwned, Deserializer};
use serde_derive::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, path::Path};
use tokio::{fs::File, io::AsyncReadExt};

// -------------------------- 公共方法 --------------------------
//编码路径，与encodeURIComponent保持一致，但保留 /
const URL_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'/');
pub(crate) fn url_encode(input: &str) -> String {
    utf8_percent_encode(input, URL_ENCODE).to_string()
}

//编码查询参数值，不保留 /
const QUERY_ENCODE: &AsciiSet = &URL_ENCODE.add(b'/');
pub(crate) fn query_encode(input: &str) -> String {
    utf8_percent_encode(input, QUERY_ENCODE).to_string()
}

/// 去除首尾的 `/`
pub fn strip_slashes(input: &str) -> &str {
    input.trim().trim_matches('/')
}

/// 规范化Bucket名称
pub fn normalize_bucket(bucket: &str) -> Result<String, Error> {
    let bucket = strip_slashes(bucket);
    if bucket.is_empty() || bucket.contains('/') {
        return Err(Error::InvalidPath(bucket.to_owned()));
    }
    Ok(bucket.to_owned())
}

/// 流式读取整个文件，计算SHA-1，返回十六进制字符串
pub(crate) async fn sha1_file(path: impl AsRef<Path>) -> Result<String, Error> {
    let mut file = File::open(path).await?;
    let mut context = digest::Context::new(&digest::SHA1_FOR_LEGACY_USE_ONLY);
    let mut buf = vec![0u8; 131072];
    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        context.update(&buf[..n]);
    }
    Ok(hex::encode(context.finish()))
}

// -------------------------- 资源路径 --------------------------

/// 规范化后的资源路径
///
/// 内部保存的是已经过url编码的路径：
/// - 文件：不以 `/` 开头或结尾，不能为空
/// - 目录：以 `/` 结尾，Bucket根目录为空字符串
/// - 前缀：目录路径与前缀拼接，不以 `/` 结尾
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CosPath {
    File(String),
    Folder(String),
    Prefix(String),
}

impl CosPath {
    /// 规范化文件路径
    pub fn file(path: &str) -> Result<Self, Error> {
        let path = strip_slashes(path);
        if path.is_empty() {
            return Err(Error::InvalidPath(path.to_owned()));
        }
        Ok(CosPath::File(url_encode(path)))
    }
    /// 规范化目录路径，忘记 `/` 结尾时自动补齐
    pub fn folder(path: &str) -> Self {
        let path = strip_slashes(path);
        if path.is_empty() {
            CosPath::Folder(String::new())
        } else {
            CosPath::Folder(url_encode(&format!("{}/", path)))
        }
    }
    /// 在目录中按前缀搜索的路径
    pub fn prefix(folder: &str, prefix: &str) -> Self {
        let folder = url_encode(strip_slashes(folder));
        let prefix = url_encode(prefix.trim_start_matches('/'));
        if folder.is_empty() {
            CosPath::Prefix(prefix)
        } else {
            CosPath::Prefix(format!("{}/{}", folder, prefix))
        }
    }
    /// 编码后的路径
    pub fn as_str(&self) -> &str {
        match self {
            CosPath::File(path) | CosPath::Folder(path) | CosPath::Prefix(path) => path,
        }
    }
    /// 是否为Bucket根目录
    pub fn is_root(&self) -> bool {
        matches!(self, CosPath::Folder(path) if path.is_empty())
    }
}

impl fmt::Display for CosPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// -------------------------- 公共数据 --------------------------

/// 所有操作的统一返回结果
///
/// - code 为 0 代表成功
/// - code 为 -1 代表本地参数错误，-2 代表本地网络错误
/// - 其他值为COS返回的错误码
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosResult {
    /// HTTP状态码，本地错误时为 0
    pub http_code: u16,
    pub code: i64,
    pub message: String,
    pub data: Value,
}

impl CosResult {
    pub(crate) fn new(http_code: u16, code: i64, message: impl ToString, data: Value) -> Self {
        CosResult {
            http_code,
            code,
            message: message.to_string(),
            data,
        }
    }
    /// 本地参数错误
    pub(crate) fn params_error(message: impl ToString) -> Self {
        Self::new(0, COS_PARAMS_ERROR, message, Value::Object(Map::new()))
    }
    /// 本地网络错误
    pub(crate) fn network_error(http_code: u16, message: impl ToString) -> Self {
        Self::new(http_code, COS_NETWORK_ERROR, message, Value::Object(Map::new()))
    }
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
    /// data中是否包含指定字段
    pub fn has_data(&self, key: &str) -> bool {
        self.data.get(key).is_some()
    }
    /// 读取data中的字符串字段
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
    /// 读取data中的整数字段，兼容以字符串表示的数字
    pub fn data_u64(&self, key: &str) -> Option<u64> {
        self.data.get(key).and_then(value_as_u64)
    }
    /// 将data解析为指定的结构，比如 [`StatInfo`] 或 [`ListInfo`]
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_value(self.data.clone())
            .map_err(|_| Error::InvalidResponse(self.data.to_string()))
    }
    /// 将非 0 的结果码转换为错误，便于使用 `?`
    pub fn into_result(self) -> Result<Value, Error> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(Error::Cos {
                code: self.code,
                message: self.message,
            })
        }
    }
}

impl From<Error> for CosResult {
    fn from(err: Error) -> Self {
        CosResult::new(0, err.code(), err.to_string(), Value::Object(Map::new()))
    }
}

fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_u64))
}

/// 文件或目录的属性
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatInfo {
    /// 名称，仅列表结果中存在
    #[serde(default)]
    pub name: Option<String>,
    /// 业务端维护的属性
    #[serde(default)]
    pub biz_attr: Option<String>,
    /// 已上传的大小
    #[serde(default, deserialize_with = "lenient_u64")]
    pub filesize: Option<u64>,
    /// 文件完整大小
    #[serde(default, deserialize_with = "lenient_u64")]
    pub filelen: Option<u64>,
    /// 文件的SHA-1
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub ctime: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub mtime: Option<u64>,
    /// 下载地址
    #[serde(default)]
    pub access_url: Option<String>,
}

impl StatInfo {
    /// 目录没有文件大小信息
    pub fn is_folder(&self) -> bool {
        self.filelen.is_none() && self.sha.is_none()
    }
}

/// 目录列表
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListInfo {
    /// 翻页使用的透传字段
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub dircount: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub filecount: Option<u64>,
    #[serde(default)]
    pub infos: Vec<StatInfo>,
}

/// 列表内容
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListPattern {
    /// 同时列出目录和文件
    #[default]
    Both,
    /// 只列出目录
    DirOnly,
    /// 只列出文件
    FileOnly,
}
impl fmt::Display for ListPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListPattern::Both => f.write_str("eListBoth"),
            ListPattern::DirOnly => f.write_str("eListDirOnly"),
            ListPattern::FileOnly => f.write_str("eListFileOnly"),
        }
    }
}

/// 列表顺序
///
/// 翻页时，正序下 Asc 代表下一页、Desc 代表上一页；反序时相反
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListOrder {
    #[default]
    Asc,
    Desc,
}
impl fmt::Display for ListOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListOrder::Asc => f.write_str("0"),
            ListOrder::Desc => f.write_str("1"),
        }
    }
}
