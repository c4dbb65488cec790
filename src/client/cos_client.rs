use crate::{config::CosConfig, request::Cos, transport::HttpClient, CosBucket};
use std::sync::Arc;

/// COS容器入口，通过 CosClient - CosBucket - CosObject/CosFolder 三层结构调用API
#[derive(Debug, Clone)]
pub struct CosClient {
    pub(crate) cos: Cos,
}

impl CosClient {
    /// 初始化一个CosClient容器，以便后续使用
    ///
    /// ```ignore
    /// let config = CosConfig::new("Your AppId", "Your SecretId", "Your SecretKey");
    /// let client = CosClient::new(config);
    /// ```
    pub fn new(config: CosConfig) -> Self {
        CosClient {
            cos: Cos::new(config),
        }
    }
    /// 替换发送请求的HTTP客户端
    pub fn set_http_client(mut self, client: impl HttpClient + 'static) -> Self {
        self.cos.set_http_client(Arc::new(client));
        self
    }
    /// 当前使用的配置
    pub fn config(&self) -> &CosConfig {
        &self.cos.config
    }
    /// 初始化CosBucket
    pub fn bucket(&self, bucket: &str) -> CosBucket {
        CosBucket::new(self.cos.clone(), bucket)
    }
}
