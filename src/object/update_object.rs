use crate::{
    common::CosResult,
    request::{Cos, CosRequest, Sign},
};
use hyper::Method;
use serde_json::json;

/// 更新文件或目录的属性
///
/// 使用绑定资源的单次有效签名
pub struct UpdateObject {
    cos: Cos,
    biz_attr: String,
}
impl UpdateObject {
    pub(crate) fn new(cos: Cos) -> Self {
        UpdateObject {
            cos,
            biz_attr: String::new(),
        }
    }
    /// 设置新的文件属性
    pub fn set_biz_attr(mut self, biz_attr: impl ToString) -> Self {
        self.biz_attr = biz_attr.to_string();
        self
    }
    /// 发送请求
    pub async fn send(self) -> CosResult {
        let mut req = CosRequest::new(self.cos, Method::POST, Sign::Once);
        req.set_json(&json!({
            "op": "update",
            "biz_attr": self.biz_attr,
        }));
        req.send_to_cos().await
    }
}
