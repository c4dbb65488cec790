//! HTTP传输层
//!
//! 负责发送单个HTTP请求、限制接收超时，并将COS返回的JSON信封解析为 [`CosResult`]

use crate::{common::CosResult, Error};
use async_trait::async_trait;
use bytes::BytesMut;
use futures_util::StreamExt;
use hyper::{body::HttpBody, client::HttpConnector, Body, Client, Request, Response};
use hyper_tls::HttpsConnector;
use log::{debug, warn};
use serde_derive::Deserialize;
use serde_json::{Map, Value};
use std::{
    fmt,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::time::Instant;

/// 发送HTTP请求的抽象
///
/// 默认使用基于hyper的 [`HyperClient`]，也可以自行实现，比如接入代理或在测试中模拟服务端
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn request(&self, req: Request<Body>) -> Result<Response<Body>, Error>;
}

/// 基于hyper的默认HTTP客户端，同时支持http和https
#[derive(Clone)]
pub struct HyperClient {
    client: Client<HttpsConnector<HttpConnector>, Body>,
}

impl HyperClient {
    pub fn new() -> Self {
        HyperClient {
            client: Client::builder().build::<_, Body>(HttpsConnector::new()),
        }
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for HyperClient {
    async fn request(&self, req: Request<Body>) -> Result<Response<Body>, Error> {
        Ok(self.client.request(req).await?)
    }
}

// COS返回的消息信封
#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

// 最近一次收发数据的时间
#[derive(Clone)]
struct Activity(Arc<Mutex<Instant>>);

impl Activity {
    fn new() -> Self {
        Activity(Arc::new(Mutex::new(Instant::now())))
    }
    fn touch(&self) {
        if let Ok(mut last) = self.0.lock() {
            *last = Instant::now();
        }
    }
    fn last(&self) -> Instant {
        self.0.lock().map(|last| *last).unwrap_or_else(|_| Instant::now())
    }
}

/// 带接收超时的传输层
///
/// 超时为连续无数据收发的最长时间：请求体每发出一块、响应体每收到一块都会重新计时，
/// 因此慢速网络下的大文件上传只要持续有数据流动就不会超时
#[derive(Clone)]
pub struct Transport {
    client: Arc<dyn HttpClient>,
    timeout: Duration,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Transport {
    pub fn new(client: Arc<dyn HttpClient>, timeout: Duration) -> Self {
        Transport { client, timeout }
    }
    pub(crate) fn set_client(&mut self, client: Arc<dyn HttpClient>) {
        self.client = client;
    }
    /// 发送请求并解析返回结果
    ///
    /// 所有失败都以结果码的形式返回：超时、连接失败、无法解析的响应均为 -2
    pub async fn send(&self, req: Request<Body>) -> CosResult {
        let uri = req.uri().to_string();
        let client = self.client.clone();
        let activity = Activity::new();
        //请求体每被读取一块就重新计时
        let (parts, body) = req.into_parts();
        let body = if body.is_end_stream() {
            body
        } else {
            let sending = activity.clone();
            Body::wrap_stream(body.inspect(move |_| sending.touch()))
        };
        let req = Request::from_parts(parts, body);
        let receiving = activity.clone();
        let exchange = async move {
            let response = client.request(req).await?;
            receiving.touch();
            let status_code = response.status();
            let mut body = response.into_body();
            let mut response_bytes = BytesMut::new();
            while let Some(chunk) = body.data().await {
                response_bytes.extend_from_slice(&chunk?);
                receiving.touch();
            }
            Ok::<_, Error>((status_code, response_bytes.freeze()))
        };
        let mut exchange = Box::pin(exchange);
        let outcome = loop {
            let deadline = activity.last() + self.timeout;
            match tokio::time::timeout_at(deadline, &mut exchange).await {
                Ok(outcome) => break Some(outcome),
                //期间有数据流动则顺延
                Err(_) if activity.last() + self.timeout > Instant::now() => continue,
                //超时后丢弃请求，不再等待
                Err(_) => break None,
            }
        };
        match outcome {
            None => {
                warn!("request {} recv timeout after {:?} idle", uri, self.timeout);
                Error::Timeout.into()
            }
            Some(Err(err)) => {
                warn!("request {} failed: {}", uri, err);
                CosResult::network_error(0, err)
            }
            Some(Ok((status_code, response_bytes))) => {
                debug!("request {} responded with {}", uri, status_code);
                decode_envelope(status_code.as_u16(), &response_bytes)
            }
        }
    }
}

/// 解析COS返回的JSON信封
///
/// 只有 code 为 0 且存在 data 字段时，data 才会被原样返回，否则为空对象
pub(crate) fn decode_envelope(http_code: u16, body: &[u8]) -> CosResult {
    match serde_json::from_slice::<Envelope>(body) {
        Ok(envelope) => {
            let data = match envelope.data {
                Some(data) if envelope.code == 0 => data,
                _ => Value::Object(Map::new()),
            };
            CosResult::new(
                http_code,
                envelope.code,
                envelope.message.unwrap_or_default(),
                data,
            )
        }
        Err(_) => CosResult::network_error(
            http_code,
            Error::InvalidResponse(String::from_utf8_lossy(body).into_owned()),
        ),
    }
}
