use super::{upload_slice::ProgressCallback, UploadSlice};
use crate::{
    common::{sha1_file, CosResult},
    error::Error,
    multipart::Multipart,
    request::{Cos, CosRequest, Sign},
    slice::use_slice_upload,
};
use hyper::Method;
use log::debug;
use std::path::Path;

/// 上传文件
///
/// 文件小于 20MB 时使用简单上传，一次请求发送整个文件；否则使用分片上传
///
/// 上传前会先检查本地文件是否存在，不存在时直接返回 -1，不会发送任何请求
///
/// ```ignore
/// let result = client
///     .bucket("newbucket")
///     .object("/photos/2016/rust.png")
///     .upload()
///     .set_biz_attr("logo")
///     .send_file("Your File Path")
///     .await;
/// if result.is_success() {
///     println!("{:?}", result.data_str("access_url"));
/// }
/// ```
pub struct UploadObject {
    cos: Cos,
    biz_attr: Option<String>,
    slice_size: Option<u64>,
    session: Option<String>,
    insert_only: Option<bool>,
    callback: Option<ProgressCallback>,
}

impl UploadObject {
    pub(super) fn new(cos: Cos) -> Self {
        UploadObject {
            cos,
            biz_attr: None,
            slice_size: None,
            session: None,
            insert_only: None,
            callback: None,
        }
    }
    /// 设置文件属性，由业务端维护
    pub fn set_biz_attr(mut self, biz_attr: impl ToString) -> Self {
        self.biz_attr = Some(biz_attr.to_string());
        self
    }
    /// 设置是否禁止覆盖同名文件
    pub fn set_insert_only(mut self, insert_only: bool) -> Self {
        self.insert_only = Some(insert_only);
        self
    }
    /// 分片上传时期望的分片大小
    pub fn set_slice_size(mut self, slice_size: u64) -> Self {
        self.slice_size = Some(slice_size);
        self
    }
    /// 分片上传时续传的session
    pub fn set_session(mut self, session: impl ToString) -> Self {
        self.session = Some(session.to_string());
        self
    }
    /// 设置上传进度的回调方法
    ///
    /// 简单上传只在成功后调用一次，分片上传在每个分片确认后调用
    pub fn set_callback(mut self, callback: Box<dyn Fn(u64, u64) + Send + Sync + 'static>) -> Self {
        self.callback = Some(callback);
        self
    }
    /// 将磁盘中的文件上传到COS
    pub async fn send_file(self, file: impl AsRef<Path>) -> CosResult {
        match self.upload(file.as_ref()).await {
            Ok(result) => result,
            Err(err) => err.into(),
        }
    }

    async fn upload(self, file: &Path) -> Result<CosResult, Error> {
        self.cos.check()?;
        let file_size = super::local_file_size(file).await?;
        //大文件交给分片上传
        if use_slice_upload(file_size) {
            debug!("upload {} with {} bytes by slices", self.cos.url(), file_size);
            let result = UploadSlice::new(self.cos)
                .set_options(
                    self.biz_attr,
                    self.slice_size,
                    self.session,
                    self.insert_only,
                    self.callback,
                )
                .send_file(file)
                .await;
            return Ok(result);
        }
        let sha = sha1_file(file).await?;
        let mut form = Multipart::new().field("op", "upload").field("sha", sha);
        if let Some(biz_attr) = &self.biz_attr {
            form = form.field("biz_attr", biz_attr);
        }
        if let Some(insert_only) = self.insert_only {
            form = form.field("insertOnly", insert_only as u8);
        }
        let form = form.file("filecontent", file, 0, file_size);
        let mut req = CosRequest::new(self.cos, Method::POST, Sign::More);
        req.set_form(form).await?;
        let result = req.send_to_cos().await;
        if result.is_success() {
            if let Some(callback) = &self.callback {
                callback(file_size, file_size);
            }
        }
        Ok(result)
    }
}
