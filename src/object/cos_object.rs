use super::{DelObject, MoveObject, StatObject, UpdateObject, UploadObject, UploadSlice};
use crate::request::Cos;

/// COS文件，实现了上传、查询属性、更新属性、移动和删除等API
#[derive(Debug, Clone)]
pub struct CosObject {
    pub(crate) cos: Cos,
}

impl CosObject {
    pub(crate) fn new(mut cos: Cos, path: &str) -> Self {
        cos.set_file(path);
        CosObject { cos }
    }
    /// 文件在存储空间中的路径，已编码
    pub fn path(&self) -> &str {
        self.cos.path()
    }
    /// 上传文件，根据文件大小自动选择简单上传或分片上传
    pub fn upload(&self) -> UploadObject {
        UploadObject::new(self.cos.clone())
    }
    /// 分片上传文件
    pub fn upload_slice(&self) -> UploadSlice {
        UploadSlice::new(self.cos.clone())
    }
    /// 查询文件属性
    pub fn stat(&self) -> StatObject {
        StatObject::new(self.cos.clone())
    }
    /// 更新文件属性
    pub fn update(&self) -> UpdateObject {
        UpdateObject::new(self.cos.clone())
    }
    /// 移动文件，dest 为存储空间内的目标路径
    pub fn move_to(&self, dest: impl ToString) -> MoveObject {
        MoveObject::new(self.cos.clone(), dest)
    }
    /// 删除文件
    pub fn delete(&self) -> DelObject {
        DelObject::new(self.cos.clone())
    }
}
