//! multipart/form-data 请求体
//!
//! 文件内容按区间流式读取，不会整体加载到内存中

use crate::Error;
use bytes::{Bytes, BytesMut};
use futures_util::{future, stream, StreamExt};
use hyper::Body;
use std::{
    io::SeekFrom,
    path::{Path, PathBuf},
};
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncSeekExt, BufReader},
};
use tokio_util::io::ReaderStream;

// 文件区间
#[derive(Debug)]
struct FilePart {
    name: String,
    path: PathBuf,
    offset: u64,
    length: u64,
}

/// 表单构建器，最多包含一个文件区间
#[derive(Debug)]
pub(crate) struct Multipart {
    boundary: String,
    fields: Vec<(String, String)>,
    file: Option<(usize, FilePart)>,
}

impl Multipart {
    pub fn new() -> Self {
        Multipart {
            boundary: format!("----CosFormBoundary{:016x}", rand::random::<u64>()),
            fields: Vec::new(),
            file: None,
        }
    }
    /// 添加文本字段
    pub fn field(mut self, name: impl ToString, value: impl ToString) -> Self {
        self.fields.push((name.to_string(), value.to_string()));
        self
    }
    /// 添加文件区间 [offset, offset+length)，文件字段位于此前添加的文本字段之后
    pub fn file(mut self, name: impl ToString, path: impl AsRef<Path>, offset: u64, length: u64) -> Self {
        let part = FilePart {
            name: name.to_string(),
            path: path.as_ref().to_path_buf(),
            offset,
            length,
        };
        self.file = Some((self.fields.len(), part));
        self
    }
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    fn write_field(&self, bs: &mut BytesMut, name: &str, value: &str) {
        bs.extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        bs.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        bs.extend_from_slice(value.as_bytes());
        bs.extend_from_slice(b"\r\n");
    }

    fn write_file_head(&self, bs: &mut BytesMut, part: &FilePart) {
        let filename = part
            .path
            .file_name()
            .map(|v| escape_filename(&v.to_string_lossy()))
            .unwrap_or_else(|| part.name.clone());
        let mime = mime_guess::from_path(&part.path).first_or_octet_stream();
        bs.extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        bs.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.name, filename
            )
            .as_bytes(),
        );
        bs.extend_from_slice(format!("Content-Type: {}\r\n\r\n", mime).as_bytes());
    }

    /// 生成请求体
    ///
    /// - 返回值 0 - Content-Type
    /// - 返回值 1 - Content-Length
    /// - 返回值 2 - 请求体
    pub async fn into_body(self) -> Result<(String, u64, Body), Error> {
        let content_type = self.content_type();
        let mut head = BytesMut::new();
        let mut tail = BytesMut::new();
        let split = self.file.as_ref().map(|(index, _)| *index).unwrap_or(self.fields.len());
        for (name, value) in &self.fields[..split] {
            self.write_field(&mut head, name, value);
        }
        if let Some((_, part)) = &self.file {
            self.write_file_head(&mut head, part);
            tail.extend_from_slice(b"\r\n");
        }
        for (name, value) in &self.fields[split..] {
            self.write_field(&mut tail, name, value);
        }
        tail.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        let head = head.freeze();
        let tail = tail.freeze();
        match self.file {
            None => {
                let mut body = BytesMut::with_capacity(head.len() + tail.len());
                body.extend_from_slice(&head);
                body.extend_from_slice(&tail);
                let content_length = body.len() as u64;
                Ok((content_type, content_length, Body::from(body.freeze())))
            }
            Some((_, part)) => {
                let content_length = head.len() as u64 + part.length + tail.len() as u64;
                //打开文件并定位到区间起点
                let mut file = File::open(&part.path).await?;
                file.seek(SeekFrom::Start(part.offset)).await?;
                let buf = BufReader::with_capacity(131072, file.take(part.length));
                let content = ReaderStream::with_capacity(buf, 16384);
                let body = stream::once(future::ready(Ok::<Bytes, std::io::Error>(head)))
                    .chain(content)
                    .chain(stream::once(future::ready(Ok(tail))));
                Ok((content_type, content_length, Body::wrap_stream(body)))
            }
        }
    }
}

//引号与换行会破坏表单头，按浏览器的方式编码
fn escape_filename(filename: &str) -> String {
    filename
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
