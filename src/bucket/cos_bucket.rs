use super::CosFolder;
use crate::{request::Cos, CosObject};

/// COS存储空间，可以从中获取文件和目录
#[derive(Debug, Clone)]
pub struct CosBucket {
    pub(crate) cos: Cos,
}

impl CosBucket {
    pub(crate) fn new(mut cos: Cos, bucket: &str) -> Self {
        cos.set_bucket(bucket);
        CosBucket { cos }
    }
    /// 存储空间名称，去除了首尾的 `/`
    pub fn name(&self) -> &str {
        self.cos.bucket()
    }
    /// 初始化CosObject
    pub fn object(&self, path: &str) -> CosObject {
        CosObject::new(self.cos.clone(), path)
    }
    /// 初始化CosFolder
    pub fn folder(&self, path: &str) -> CosFolder {
        CosFolder::new(self.cos.clone(), path)
    }
    /// 存储空间的根目录
    pub fn root(&self) -> CosFolder {
        CosFolder::new(self.cos.clone(), "/")
    }
}
