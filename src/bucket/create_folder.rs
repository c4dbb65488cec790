use crate::{
    common::CosResult,
    request::{Cos, CosRequest, Sign},
};
use hyper::Method;
use serde_json::json;

/// 创建目录
///
/// 目录已存在时返回COS的错误码
pub struct CreateFolder {
    cos: Cos,
    biz_attr: String,
}
impl CreateFolder {
    pub(super) fn new(cos: Cos) -> Self {
        CreateFolder {
            cos,
            biz_attr: String::new(),
        }
    }
    /// 设置目录属性，由业务端维护
    pub fn set_biz_attr(mut self, biz_attr: impl ToString) -> Self {
        self.biz_attr = biz_attr.to_string();
        self
    }
    /// 发送请求
    pub async fn send(self) -> CosResult {
        let mut req = CosRequest::new(self.cos, Method::POST, Sign::More);
        req.set_json(&json!({
            "op": "create",
            "biz_attr": self.biz_attr,
        }));
        req.send_to_cos().await
    }
}
