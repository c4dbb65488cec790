//! 包括AppId、密钥和接入地址信息的基础服务

pub use self::cos_client::CosClient;

mod cos_client;
