//! 分片上传的分片大小策略与会话状态
//!
//! 会话状态只保存在内存中，服务端才是上传进度的权威来源。
//! 状态流转为 `Preparing -> Transferring -> Complete | Failed`，
//! 分片严格按偏移量递增的顺序依次发送，不并发。

use crate::common::CosResult;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;

/// 文件大小达到此值时必须使用分片上传
pub const SLICE_UPLOAD_THRESHOLD: u64 = 20 * MIB;
/// 可选的分片大小
pub const SLICE_SIZE_TIERS: [u64; 4] = [512 * KIB, MIB, 2 * MIB, 3 * MIB];
/// 未指定时的分片大小
pub const DEFAULT_SLICE_SIZE: u64 = MIB;
/// 分片大小上限
pub const MAX_SLICE_SIZE: u64 = 3 * MIB;
/// 单个分片最多尝试的次数
pub const MAX_SLICE_ATTEMPTS: u32 = 3;

/// 根据期望值选择分片大小
///
/// 未指定或为 0 时使用 1MB，否则取不小于期望值的最小档位，超过 3MB 时取 3MB
pub fn choose_slice_size(hint: Option<u64>) -> u64 {
    match hint {
        None | Some(0) => DEFAULT_SLICE_SIZE,
        Some(hint) => SLICE_SIZE_TIERS
            .iter()
            .copied()
            .find(|tier| hint <= *tier)
            .unwrap_or(MAX_SLICE_SIZE),
    }
}

/// 是否需要使用分片上传
pub fn use_slice_upload(file_size: u64) -> bool {
    file_size >= SLICE_UPLOAD_THRESHOLD
}

/// 上传会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Preparing,
    Transferring,
    Complete,
    Failed,
}

/// 单次分片发送
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceRequest {
    pub offset: u64,
    pub length: u64,
    /// 第几次重试，从 0 开始
    pub attempt: u32,
}

/// 服务端跟踪的单个文件上传进度
#[derive(Debug, Clone)]
pub struct UploadSession {
    session: Option<String>,
    offset: u64,
    slice_size: u64,
    file_size: u64,
    retry_count: u32,
    state: UploadState,
}

impl UploadSession {
    /// 开始一个会话，session 为续传时指定的会话标识
    pub fn new(file_size: u64, slice_size: u64, session: Option<String>) -> Self {
        UploadSession {
            session,
            offset: 0,
            slice_size,
            file_size,
            retry_count: 0,
            state: UploadState::Preparing,
        }
    }
    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }
    pub fn offset(&self) -> u64 {
        self.offset
    }
    pub fn slice_size(&self) -> u64 {
        self.slice_size
    }
    pub fn file_size(&self) -> u64 {
        self.file_size
    }
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }
    pub fn state(&self) -> UploadState {
        self.state
    }

    /// 处理prepare的返回结果
    ///
    /// prepare阶段的失败不重试；返回了url代表秒传命中，直接完成
    pub fn on_prepare(&mut self, result: &CosResult) -> UploadState {
        if self.state != UploadState::Preparing {
            return self.state;
        }
        if !result.is_success() {
            self.state = UploadState::Failed;
        } else if result.has_data("url") {
            self.state = UploadState::Complete;
        } else {
            if let Some(session) = result.data_str("session") {
                self.session = Some(session.to_owned());
            }
            if let Some(slice_size) = result.data_u64("slice_size").filter(|v| *v > 0) {
                self.slice_size = slice_size;
            }
            if let Some(offset) = result.data_u64("offset") {
                self.offset = offset.min(self.file_size);
            }
            self.state = if self.session.is_none() {
                UploadState::Failed
            } else if self.offset >= self.file_size {
                UploadState::Complete
            } else {
                UploadState::Transferring
            };
        }
        self.state
    }

    /// 下一个需要发送的分片，失败重试时返回同一区间
    pub fn next_slice(&self) -> Option<SliceRequest> {
        if self.state != UploadState::Transferring || self.offset >= self.file_size {
            return None;
        }
        Some(SliceRequest {
            offset: self.offset,
            length: self.slice_size.min(self.file_size - self.offset),
            attempt: self.retry_count,
        })
    }

    /// 处理分片的返回结果
    ///
    /// - 成功且返回了url，直接完成
    /// - 成功则按协商的分片大小前进，重置重试次数，到达文件末尾即完成
    /// - 失败则重试同一分片，累计失败 3 次后终止
    pub fn on_slice(&mut self, result: &CosResult) -> UploadState {
        if self.state != UploadState::Transferring {
            return self.state;
        }
        if result.is_success() {
            if result.has_data("url") {
                self.state = UploadState::Complete;
                return self.state;
            }
            self.offset = self.offset.saturating_add(self.slice_size).min(self.file_size);
            self.retry_count = 0;
            if self.offset >= self.file_size {
                self.state = UploadState::Complete;
            }
        } else {
            self.retry_count += 1;
            if self.retry_count >= MAX_SLICE_ATTEMPTS {
                self.state = UploadState::Failed;
            }
        }
        self.state
    }
}
