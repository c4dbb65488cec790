use crate::{
    common::CosResult,
    request::{Cos, CosRequest, Sign},
};
use hyper::Method;

/// 查询文件或目录的属性
///
/// 可以通过 [`CosResult::data_as`] 将返回数据解析为 [`StatInfo`](crate::common::StatInfo)
pub struct StatObject {
    req: CosRequest,
}
impl StatObject {
    pub(crate) fn new(cos: Cos) -> Self {
        let mut req = CosRequest::new(cos, Method::GET, Sign::More);
        req.insert_query("op", "stat");
        StatObject { req }
    }
    /// 发送请求
    pub async fn send(self) -> CosResult {
        self.req.send_to_cos().await
    }
}
