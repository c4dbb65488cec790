//! 存储空间是用于存储文件的容器，所有的文件和目录都必须隶属于某个存储空间。

pub use self::cos_bucket::CosBucket;
pub use self::cos_folder::CosFolder;
pub use self::create_folder::CreateFolder;
pub use self::list_files::ListFiles;

mod cos_bucket;
mod cos_folder;
mod create_folder;
mod list_files;
