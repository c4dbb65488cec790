use crate::{
    common::{normalize_bucket, query_encode, CosPath, CosResult},
    config::CosConfig,
    multipart::Multipart,
    sign::Signer,
    transport::{HttpClient, HyperClient, Transport},
    Error,
};
use hyper::{header, Body, Method, Request};
use log::debug;
use serde_json::Value;
use std::{borrow::Cow, collections::HashMap, sync::Arc};

//Cos基础结构
#[derive(Debug, Clone)]
pub(crate) struct Cos {
    pub config: Arc<CosConfig>,
    pub signer: Signer,
    pub transport: Transport,
    pub bucket: Option<Cow<'static, str>>,
    pub path: Option<CosPath>,
    // 不合法的Bucket或路径，发送前报错
    pub invalid: Option<String>,
}
impl Cos {
    pub fn new(config: CosConfig) -> Self {
        let signer = Signer::new(&config);
        let transport = Transport::new(Arc::new(HyperClient::new()), config.timeout);
        Cos {
            config: Arc::new(config),
            signer,
            transport,
            bucket: None,
            path: None,
            invalid: None,
        }
    }
    pub fn set_bucket(&mut self, bucket: &str) {
        match normalize_bucket(bucket) {
            Ok(bucket) => self.bucket = Some(bucket.into()),
            Err(_) => self.invalid = Some(bucket.to_owned()),
        }
    }
    pub fn set_file(&mut self, path: &str) {
        match CosPath::file(path) {
            Ok(path) => self.path = Some(path),
            Err(_) => self.invalid = Some(path.to_owned()),
        }
    }
    pub fn set_folder(&mut self, path: &str) {
        self.path = Some(CosPath::folder(path));
    }
    pub fn set_prefix(&mut self, folder: &str, prefix: &str) {
        self.path = Some(CosPath::prefix(folder, prefix));
    }
    /// 检查Bucket与路径是否合法
    pub fn check(&self) -> Result<(), Error> {
        if let Some(invalid) = &self.invalid {
            return Err(Error::InvalidPath(invalid.clone()));
        }
        if self.bucket.is_none() || self.path.is_none() {
            return Err(Error::InvalidPath(self.url()));
        }
        Ok(())
    }
    pub fn set_http_client(&mut self, client: Arc<dyn HttpClient>) {
        self.transport.set_client(client);
    }
    pub fn bucket(&self) -> &str {
        self.bucket.as_deref().unwrap_or_default()
    }
    pub fn path(&self) -> &str {
        self.path.as_ref().map(|v| v.as_str()).unwrap_or_default()
    }
    /// 资源地址 `{endpoint}{AppId}/{Bucket}/{Path}`
    pub fn url(&self) -> String {
        format!(
            "{}{}/{}/{}",
            self.config.endpoint,
            self.config.app_id,
            self.bucket(),
            self.path()
        )
    }
    /// 单次有效签名绑定的资源 `/{AppId}/{Bucket}/{Path}`
    pub fn fileid(&self) -> String {
        format!("/{}/{}/{}", self.config.app_id, self.bucket(), self.path())
    }
}

// 签名方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sign {
    // 多次有效签名
    More,
    // 绑定资源的单次有效签名
    Once,
}

#[derive(Debug)]
pub(crate) struct CosRequest {
    pub cos: Cos,
    pub method: Method,
    pub sign: Sign,
    pub headers: HashMap<String, String>,
    pub querys: Vec<(String, String)>,
    pub body: Body,
}
impl CosRequest {
    pub fn new(cos: Cos, method: Method, sign: Sign) -> Self {
        CosRequest {
            cos,
            method,
            sign,
            headers: HashMap::with_capacity(6),
            querys: Vec::with_capacity(6),
            body: Body::empty(),
        }
    }
    pub fn insert_header(&mut self, key: impl ToString, value: impl ToString) {
        self.headers.insert(key.to_string(), value.to_string());
    }
    pub fn insert_query(&mut self, key: impl ToString, value: impl ToString) {
        self.querys.push((key.to_string(), value.to_string()));
    }
    pub fn set_body(&mut self, body: Body) {
        self.body = body;
    }
    /// 设置JSON请求体
    pub fn set_json(&mut self, value: &Value) {
        let content = value.to_string();
        self.insert_header(header::CONTENT_TYPE, "application/json");
        self.insert_header(header::CONTENT_LENGTH, content.len());
        self.set_body(Body::from(content));
    }
    /// 设置表单请求体
    pub async fn set_form(&mut self, form: Multipart) -> Result<(), Error> {
        let (content_type, content_length, body) = form.into_body().await?;
        self.insert_header(header::CONTENT_TYPE, content_type);
        self.insert_header(header::CONTENT_LENGTH, content_length);
        self.set_body(body);
        Ok(())
    }
    pub fn uri(&self) -> String {
        let query = self
            .querys
            .iter()
            .map(|(key, value)| format!("{}={}", key, query_encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        if query.is_empty() {
            self.cos.url()
        } else {
            format!("{}?{}", self.cos.url(), query)
        }
    }
    fn authorization(&self) -> Result<String, Error> {
        match self.sign {
            Sign::More => self
                .cos
                .signer
                .sign_more(self.cos.bucket(), self.cos.config.sign_expired),
            Sign::Once => self
                .cos
                .signer
                .sign_once(self.cos.bucket(), &self.cos.fileid()),
        }
    }
    fn build(self) -> Result<(Transport, Request<Body>), Error> {
        self.cos.check()?;
        //完成签名
        let authorization = self.authorization()?;
        let uri = self.uri();
        debug!("{} {}", self.method, uri);
        //构建http请求
        let mut req = Request::builder()
            .method(&self.method)
            .uri(&uri)
            .header(header::AUTHORIZATION, authorization)
            .header(header::USER_AGENT, self.cos.config.user_agent.as_ref());
        for (key, value) in self.headers.iter() {
            req = req.header(key, value);
        }
        let request = req.body(self.body)?;
        Ok((self.cos.transport, request))
    }
    /// 签名并发送请求
    pub async fn send_to_cos(self) -> CosResult {
        match self.build() {
            Ok((transport, request)) => transport.send(request).await,
            Err(err) => err.into(),
        }
    }
}
