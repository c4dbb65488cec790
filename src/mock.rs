//! 测试使用的模拟服务端

use crate::{transport::HttpClient, Error};
use async_trait::async_trait;
use bytes::Bytes;
use hyper::{body::to_bytes, header, HeaderMap, Method, Request, Response, Body};
use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

/// 收到的请求
#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Recorded {
    /// 解析表单字段，值为UTF-8文本
    pub fn form(&self) -> HashMap<String, String> {
        let content_type = self
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        parse_form(content_type, &self.body)
            .into_iter()
            .map(|(k, v)| (k, String::from_utf8_lossy(&v).into_owned()))
            .collect()
    }
    /// 表单中的文件内容
    pub fn file_content(&self) -> Bytes {
        let content_type = self
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        parse_form(content_type, &self.body)
            .remove("filecontent")
            .unwrap_or_default()
    }
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("body must be json")
    }
}

/// 按顺序返回预设响应的模拟客户端
#[derive(Default)]
pub(crate) struct MockClient {
    replies: Mutex<VecDeque<Result<(u16, String), ()>>>,
    requests: Mutex<Vec<Recorded>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }
    /// 追加一个JSON响应
    pub fn reply(&self, http_code: u16, body: impl ToString) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok((http_code, body.to_string())));
        self
    }
    /// 追加一个连接失败
    pub fn fail(&self) -> &Self {
        self.replies.lock().unwrap().push_back(Err(()));
        self
    }
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn request(&self, req: Request<Body>) -> Result<Response<Body>, Error> {
        let (parts, body) = req.into_parts();
        let body = to_bytes(body).await?;
        self.requests.lock().unwrap().push(Recorded {
            method: parts.method,
            uri: parts.uri.to_string(),
            headers: parts.headers,
            body,
        });
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Ok((http_code, body))) => Ok(Response::builder()
                .status(http_code)
                .body(Body::from(body))?),
            Some(Err(())) => Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            ))),
            None => Err(Error::InvalidResponse("no scripted reply".into())),
        }
    }
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

/// 解析 multipart/form-data 请求体
pub(crate) fn parse_form(content_type: &str, body: &[u8]) -> HashMap<String, Bytes> {
    let boundary = content_type
        .split("boundary=")
        .nth(1)
        .expect("content type must carry boundary");
    let delimiter = format!("--{}", boundary);
    let delimiter = delimiter.as_bytes();
    let mut fields = HashMap::new();
    let mut pos = find(body, delimiter, 0).expect("body must start with boundary");
    loop {
        let start = pos + delimiter.len();
        if body[start..].starts_with(b"--") {
            break;
        }
        let next = find(body, delimiter, start).expect("part must be closed");
        let part = &body[start + 2..next - 2];
        let split = find(part, b"\r\n\r\n", 0).expect("part must carry headers");
        let headers = String::from_utf8_lossy(&part[..split]);
        let name = headers
            .split("name=\"")
            .nth(1)
            .and_then(|v| v.split('"').next())
            .expect("part must carry name")
            .to_owned();
        fields.insert(name, Bytes::copy_from_slice(&part[split + 4..]));
        pos = next;
    }
    fields
}
