use super::{CreateFolder, ListFiles};
use crate::{
    object::{DelObject, StatObject, UpdateObject},
    request::Cos,
};

/// COS目录，实现了创建、列表、前缀搜索、查询属性、更新属性和删除等API
#[derive(Debug, Clone)]
pub struct CosFolder {
    pub(crate) cos: Cos,
    folder: String,
}

impl CosFolder {
    pub(crate) fn new(mut cos: Cos, path: &str) -> Self {
        cos.set_folder(path);
        CosFolder {
            cos,
            folder: path.to_owned(),
        }
    }
    /// 目录在存储空间中的路径，已编码，以 `/` 结尾，根目录为空
    pub fn path(&self) -> &str {
        self.cos.path()
    }
    /// 创建目录
    pub fn create(&self) -> CreateFolder {
        CreateFolder::new(self.cos.clone())
    }
    /// 列出目录中的文件和子目录
    pub fn list(&self) -> ListFiles {
        ListFiles::new(self.cos.clone())
    }
    /// 在目录中搜索以 prefix 开头的文件和子目录
    pub fn prefix_search(&self, prefix: &str) -> ListFiles {
        let mut cos = self.cos.clone();
        cos.set_prefix(&self.folder, prefix);
        ListFiles::new(cos)
    }
    /// 查询目录属性
    pub fn stat(&self) -> StatObject {
        StatObject::new(self.cos.clone())
    }
    /// 更新目录属性
    pub fn update(&self) -> UpdateObject {
        UpdateObject::new(self.cos.clone())
    }
    /// 删除目录，目录必须为空
    pub fn delete(&self) -> DelObject {
        DelObject::new(self.cos.clone())
    }
}
