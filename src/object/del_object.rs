use crate::{
    common::CosResult,
    request::{Cos, CosRequest, Sign},
};
use hyper::Method;
use serde_json::json;

/// 删除文件或目录
///
/// 目录必须为空才能删除，存储空间的根目录不能删除
pub struct DelObject {
    cos: Cos,
}
impl DelObject {
    pub(crate) fn new(cos: Cos) -> Self {
        DelObject { cos }
    }
    /// 发送请求
    pub async fn send(self) -> CosResult {
        if self.cos.path.as_ref().map(|v| v.is_root()).unwrap_or(false) {
            return CosResult::params_error("can not delete bucket root folder");
        }
        let mut req = CosRequest::new(self.cos, Method::POST, Sign::Once);
        req.set_json(&json!({"op": "delete"}));
        req.send_to_cos().await
    }
}
