//! 文件是 COS 存储数据的基本单元，由存储空间内唯一的路径来标识。

pub use self::cos_object::CosObject;
pub use self::del_object::DelObject;
pub use self::move_object::MoveObject;
pub use self::stat_object::StatObject;
pub use self::update_object::UpdateObject;
pub use self::upload_object::UploadObject;
pub use self::upload_slice::UploadSlice;

mod cos_object;
mod del_object;
mod move_object;
mod stat_object;
mod update_object;
mod upload_object;
mod upload_slice;

use crate::Error;
use std::path::Path;

// 读取本地文件大小，文件不存在或不是普通文件时返回参数错误
pub(crate) async fn local_file_size(file: &Path) -> Result<u64, Error> {
    match tokio::fs::metadata(file).await {
        Ok(metadata) if metadata.is_file() => Ok(metadata.len()),
        _ => Err(Error::FileNotFound(file.display().to_string())),
    }
}
