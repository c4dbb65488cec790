use crate::{
    common::{sha1_file, CosResult},
    error::Error,
    multipart::Multipart,
    request::{Cos, CosRequest, Sign},
    slice::{choose_slice_size, SliceRequest, UploadSession, UploadState},
};
use hyper::Method;
use log::{debug, warn};
use std::path::Path;

pub(crate) type ProgressCallback = Box<dyn Fn(u64, u64) + Send + Sync + 'static>;

/// 分片上传文件
///
/// 先计算整个文件的SHA-1并发送prepare请求协商会话，随后按偏移量顺序逐个发送分片。
///
/// - prepare返回了url，代表秒传命中，不会再发送任何分片
/// - 单个分片失败后原样重试，累计失败 3 次后返回最后一次的错误
/// - 最后一个分片成功后返回该分片的结果
///
/// ```ignore
/// let result = object
///     .upload_slice()
///     .set_slice_size(2 * 1024 * 1024)
///     .send_file("Your File Path")
///     .await;
/// ```
pub struct UploadSlice {
    cos: Cos,
    biz_attr: Option<String>,
    slice_size: Option<u64>,
    session: Option<String>,
    insert_only: Option<bool>,
    callback: Option<ProgressCallback>,
}

impl UploadSlice {
    pub(crate) fn new(cos: Cos) -> Self {
        UploadSlice {
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
    /// 设置期望的分片大小，实际大小为 512KB、1MB、2MB、3MB 中不小于期望值的最小档位，最大 3MB
    pub fn set_slice_size(mut self, slice_size: u64) -> Self {
        self.slice_size = Some(slice_size);
        self
    }
    /// 指定续传的session
    pub fn set_session(mut self, session: impl ToString) -> Self {
        self.session = Some(session.to_string());
        self
    }
    /// 设置是否禁止覆盖同名文件
    pub fn set_insert_only(mut self, insert_only: bool) -> Self {
        self.insert_only = Some(insert_only);
        self
    }
    /// 设置上传进度的回调方法，每个分片确认后调用一次
    /// ```
    /// let callback = Box::new(|uploaded_size: u64, total_size: u64| {
    ///     let percentage = if total_size == 0 {
    ///         100.0
    ///     } else {
    ///         (uploaded_size as f64) / (total_size as f64) * 100.00
    ///     };
    ///     println!("{:.2}%", percentage);
    /// });
    /// ```
    pub fn set_callback(mut self, callback: Box<dyn Fn(u64, u64) + Send + Sync + 'static>) -> Self {
        self.callback = Some(callback);
        self
    }
    pub(crate) fn set_options(
        mut self,
        biz_attr: Option<String>,
        slice_size: Option<u64>,
        session: Option<String>,
        insert_only: Option<bool>,
        callback: Option<ProgressCallback>,
    ) -> Self {
        self.biz_attr = biz_attr;
        self.slice_size = slice_size;
        self.session = session;
        self.insert_only = insert_only;
        self.callback = callback;
        self
    }
    /// 将磁盘中的文件分片上传到COS
    ///
    /// 返回值为终态结果，只会返回一次
    pub async fn send_file(self, file: impl AsRef<Path>) -> CosResult {
        match self.upload(file.as_ref()).await {
            Ok(result) => result,
            Err(err) => err.into(),
        }
    }

    async fn upload(self, file: &Path) -> Result<CosResult, Error> {
        self.cos.check()?;
        //读取文件大小
        let file_size = super::local_file_size(file).await?;
        //计算整个文件的SHA-1
        let sha = sha1_file(file).await?;
        let mut session = UploadSession::new(
            file_size,
            choose_slice_size(self.slice_size),
            self.session.clone(),
        );
        //协商会话
        let prepared = self.prepare(&sha, &session).await?;
        match session.on_prepare(&prepared) {
            UploadState::Transferring => {}
            //协商成功但既没有session也没有url，无法继续上传
            UploadState::Failed if prepared.is_success() => {
                warn!("upload {} prepare returned no session", self.cos.url());
                return Ok(CosResult::network_error(
                    prepared.http_code,
                    Error::InvalidResponse(prepared.data.to_string()),
                ));
            }
            state => {
                debug!("upload {} finished at prepare: {:?}", self.cos.url(), state);
                return Ok(prepared);
            }
        }
        debug!(
            "upload {} session {:?} offset {} slice_size {}",
            self.cos.url(),
            session.session(),
            session.offset(),
            session.slice_size()
        );
        //按顺序发送分片
        let mut last = prepared;
        while let Some(slice) = session.next_slice() {
            let result = self.upload_data(file, &session, slice).await;
            match session.on_slice(&result) {
                UploadState::Failed => {
                    warn!(
                        "upload {} failed at offset {} after {} attempts, session {:?}",
                        self.cos.url(),
                        slice.offset,
                        slice.attempt + 1,
                        session.session()
                    );
                    return Ok(result);
                }
                _ if !result.is_success() => {
                    warn!(
                        "slice at offset {} failed: {} {}, retrying",
                        slice.offset, result.code, result.message
                    );
                }
                state => {
                    if let Some(callback) = &self.callback {
                        //返回url时偏移量不再前进，直接视为全部上传
                        let uploaded = match state {
                            UploadState::Complete => file_size,
                            _ => session.offset(),
                        };
                        callback(uploaded, file_size);
                    }
                }
            }
            if session.state() == UploadState::Complete {
                return Ok(result);
            }
            last = result;
        }
        Ok(last)
    }

    async fn prepare(&self, sha: &str, session: &UploadSession) -> Result<CosResult, Error> {
        let mut form = Multipart::new()
            .field("op", "upload_slice")
            .field("sha", sha)
            .field("filesize", session.file_size());
        if let Some(biz_attr) = &self.biz_attr {
            form = form.field("biz_attr", biz_attr);
        }
        if let Some(slice_size) = self.slice_size {
            form = form.field("slice_size", choose_slice_size(Some(slice_size)));
        }
        if let Some(session) = session.session() {
            form = form.field("session", session);
        }
        if let Some(insert_only) = self.insert_only {
            form = form.field("insertOnly", insert_only as u8);
        }
        let mut req = CosRequest::new(self.cos.clone(), Method::POST, Sign::More);
        req.set_form(form).await?;
        Ok(req.send_to_cos().await)
    }

    async fn upload_data(&self, file: &Path, session: &UploadSession, slice: SliceRequest) -> CosResult {
        let mut form = Multipart::new()
            .field("op", "upload_slice")
            .field("session", session.session().unwrap_or_default())
            .field("offset", slice.offset);
        if let Some(insert_only) = self.insert_only {
            form = form.field("insertOnly", insert_only as u8);
        }
        let form = form.file("filecontent", file, slice.offset, slice.length);
        let mut req = CosRequest::new(self.cos.clone(), Method::POST, Sign::More);
        //分片读取失败同样计入重试
        if let Err(err) = req.set_form(form).await {
            return err.into();
        }
        req.send_to_cos().await
    }
}
