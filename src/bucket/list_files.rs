use crate::{
    common::{CosResult, ListOrder, ListPattern},
    request::{Cos, CosRequest, Sign},
};
use hyper::Method;

/// 列出目录中的文件和子目录，或按前缀搜索
///
/// 默认每页 20 条，同时列出文件和目录，正序排列
///
/// 返回数据中的 context 用于翻页，has_more 代表是否还有更多内容，
/// 可以通过 [`CosResult::data_as`] 解析为 [`ListInfo`](crate::common::ListInfo)
///
/// ```ignore
/// let result = client
///     .bucket("newbucket")
///     .folder("photos")
///     .list()
///     .set_num(100)
///     .set_pattern(ListPattern::FileOnly)
///     .send()
///     .await;
/// ```
pub struct ListFiles {
    cos: Cos,
    num: u32,
    pattern: ListPattern,
    order: ListOrder,
    context: String,
}
impl ListFiles {
    pub(crate) fn new(cos: Cos) -> Self {
        ListFiles {
            cos,
            num: 20,
            pattern: ListPattern::default(),
            order: ListOrder::default(),
            context: String::new(),
        }
    }
    /// 每页返回的数量
    pub fn set_num(mut self, num: u32) -> Self {
        self.num = num;
        self
    }
    /// 列出文件、目录或全部
    pub fn set_pattern(mut self, pattern: ListPattern) -> Self {
        self.pattern = pattern;
        self
    }
    /// 排列顺序
    pub fn set_order(mut self, order: ListOrder) -> Self {
        self.order = order;
        self
    }
    /// 翻页透传字段，使用上一次返回的 context
    pub fn set_context(mut self, context: impl ToString) -> Self {
        self.context = context.to_string();
        self
    }
    /// 发送请求
    pub async fn send(self) -> CosResult {
        let mut req = CosRequest::new(self.cos, Method::GET, Sign::More);
        req.insert_query("op", "list");
        req.insert_query("num", self.num);
        req.insert_query("pattern", self.pattern);
        req.insert_query("order", self.order);
        req.insert_query("context", self.context);
        req.send_to_cos().await
    }
}
