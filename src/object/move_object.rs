use crate::{
    common::{strip_slashes, CosResult},
    request::{Cos, CosRequest, Sign},
};
use hyper::Method;
use serde_json::json;

/// 移动或重命名文件
///
/// 目标路径为存储空间内的完整路径，默认不覆盖已存在的同名文件
///
/// ```ignore
/// let result = object.move_to("/backup/rust.png").set_overwrite(true).send().await;
/// ```
pub struct MoveObject {
    cos: Cos,
    dest: String,
    overwrite: bool,
}
impl MoveObject {
    pub(crate) fn new(cos: Cos, dest: impl ToString) -> Self {
        MoveObject {
            cos,
            dest: dest.to_string(),
            overwrite: false,
        }
    }
    /// 目标文件已存在时是否覆盖
    pub fn set_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
    /// 发送请求
    pub async fn send(self) -> CosResult {
        let dest = strip_slashes(&self.dest);
        if dest.is_empty() {
            return CosResult::params_error(format!("invalid dest path {}", self.dest));
        }
        let mut req = CosRequest::new(self.cos, Method::POST, Sign::Once);
        req.set_json(&json!({
            "op": "move",
            "dest_fileid": format!("/{}", dest),
            "to_over_write": self.overwrite as u8,
        }));
        req.send_to_cos().await
    }
}
