//!
//! 腾讯云对象存储（Cloud Object Storage，简称COS）v1 文件接口的非官方SDK。
//!
//! 设计遵循极简、实用原则，通过 CosClient - CosBucket - CosObject/CosFolder 三层结构，实现了文件上传、分片上传、
//! 目录创建与列表、查询与更新属性、移动和删除等API。
//!
//! 所有操作都返回统一的 [`CosResult`]：code 为 0 代表成功，-1 代表本地参数错误，-2 代表本地网络错误，其他值为COS返回的错误码。
//!
//! ##### 初始化
//! ```ignore
//! let config = CosConfig::new("Your AppId", "Your SecretId", "Your SecretKey")
//!     .set_timeout(std::time::Duration::from_secs(60));
//! let client = CosClient::new(config);
//! ```
//!
//! 也可以从环境变量 `TENCENTCLOUD_APPID`、`TENCENTCLOUD_SECRET_ID`、`TENCENTCLOUD_SECRET_KEY` 中读取配置
//! ```ignore
//! let client = CosClient::new(CosConfig::from_env()?);
//! ```
//!
//! ##### 上传文件
//! ```ignore
//! let object = client.bucket("newbucket").object("/photos/rust.png");
//! let result = object.upload().set_biz_attr("logo").send_file("Your File Path").await;
//! ```
//!
//! ##### 分片上传，支持续传
//! ```ignore
//! let result = object
//!     .upload_slice()
//!     .set_session("Last Session")
//!     .set_callback(Box::new(|uploaded: u64, total: u64| println!("{}/{}", uploaded, total)))
//!     .send_file("Your File Path")
//!     .await;
//! ```
//!
//! ##### 查询目录中文件列表
//! ```ignore
//! let result = client.bucket("newbucket").folder("photos").list().set_num(100).send().await;
//! let list = result.data_as::<ListInfo>()?;
//! ```

#[doc(inline)]
pub use crate::bucket::{CosBucket, CosFolder};
#[doc(inline)]
pub use crate::client::CosClient;
#[doc(inline)]
pub use crate::common::{CosResult, ListInfo, ListOrder, ListPattern, StatInfo};
#[doc(inline)]
pub use crate::config::CosConfig;
#[doc(inline)]
pub use crate::error::{Error, COS_NETWORK_ERROR, COS_PARAMS_ERROR};
#[doc(inline)]
pub use crate::object::CosObject;

pub mod bucket;
pub mod client;
pub mod common;
mod config;
mod error;
#[cfg(test)]
mod mock;
mod multipart;
pub mod object;
mod request;
pub mod sign;
pub mod slice;
pub mod transport;
