use crate::{config::CosConfig, error::Error};
use base64::{engine::general_purpose, Engine};
use chrono::Utc;
use ring::hmac;
use std::{borrow::Cow, fmt};

/// 签名器
///
/// 签名原文为 `a=AppId&k=SecretId&e=过期时间&t=当前时间&r=随机数&f=资源路径&b=Bucket`，
/// 签名结果为 `base64(HMAC-SHA1(SecretKey, 原文) + 原文)`
#[derive(Clone)]
pub struct Signer {
    app_id: Cow<'static, str>,
    secret_id: Cow<'static, str>,
    secret_key: Cow<'static, str>,
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("app_id", &self.app_id)
            .field("secret_id", &self.secret_id)
            .finish_non_exhaustive()
    }
}

impl Signer {
    pub fn new(config: &CosConfig) -> Self {
        Signer {
            app_id: config.app_id.clone(),
            secret_id: config.secret_id.clone(),
            secret_key: config.secret_key.clone(),
        }
    }
    /// 生成多次有效签名，有效期为从当前开始的 expired_seconds 秒
    ///
    /// 多次有效签名不绑定资源路径，可用于上传、查询、列表、创建目录等操作
    pub fn sign_more(&self, bucket: &str, expired_seconds: u64) -> Result<String, Error> {
        let now = Utc::now().timestamp();
        let expired = now + expired_seconds as i64;
        self.sign_with(bucket, "", expired, now, rand::random::<u32>())
    }
    /// 生成单次有效签名
    ///
    /// fileid 为完整资源路径，即 `/AppId/Bucket/Path`，用于删除、更新、移动等操作
    pub fn sign_once(&self, bucket: &str, fileid: &str) -> Result<String, Error> {
        let now = Utc::now().timestamp();
        self.sign_with(bucket, fileid, 0, now, rand::random::<u32>())
    }

    pub(crate) fn sign_with(
        &self,
        bucket: &str,
        fileid: &str,
        expired: i64,
        now: i64,
        rdm: u32,
    ) -> Result<String, Error> {
        if self.secret_id.is_empty() || self.secret_key.is_empty() {
            return Err(Error::MissingCredential);
        }
        //生成签名原文
        let plain_text = format!(
            "a={}&k={}&e={}&t={}&r={}&f={}&b={}",
            self.app_id, self.secret_id, expired, now, rdm, fileid, bucket
        );
        //计算签名值
        let key = hmac::Key::new(
            hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            self.secret_key.as_bytes(),
        );
        let tag = hmac::sign(&key, plain_text.as_bytes());
        //拼接签名值与原文
        let mut bin = Vec::with_capacity(tag.as_ref().len() + plain_text.len());
        bin.extend_from_slice(tag.as_ref());
        bin.extend_from_slice(plain_text.as_bytes());
        Ok(general_purpose::STANDARD.encode(bin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn signer() -> Signer {
        Signer::new(&CosConfig::new(
            "200001",
            "AKIDUfLUEUigQiXqm7CVSspKJnuaiIKtxqAv",
            "bLcPnl88WU30VY57ipRhSePfPdOfSruK",
        ))
    }

    #[test]
    fn test_sign_layout() {
        let sign = signer()
            .sign_with("newbucket", "", 1_438_669_115, 1_436_077_115, 11_162)
            .expect("sign must success");
        let bin = general_purpose::STANDARD
            .decode(sign)
            .expect("sign must be valid base64");
        // HMAC-SHA1的长度为20字节，其后为签名原文
        assert_eq!(
            String::from_utf8_lossy(&bin[20..]),
            "a=200001&k=AKIDUfLUEUigQiXqm7CVSspKJnuaiIKtxqAv&e=1438669115&t=1436077115&r=11162&f=&b=newbucket"
        );
        let key = hmac::Key::new(
            hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            b"bLcPnl88WU30VY57ipRhSePfPdOfSruK",
        );
        assert!(hmac::verify(&key, &bin[20..], &bin[..20]).is_ok());
    }

    #[test]
    fn test_sign_once_binds_fileid() {
        let sign = signer()
            .sign_once("newbucket", "/200001/newbucket/tencent_test.jpg")
            .expect("sign must success");
        let bin = general_purpose::STANDARD.decode(sign).unwrap();
        let plain_text = String::from_utf8_lossy(&bin[20..]).to_string();
        assert!(plain_text.contains("&e=0&"));
        assert!(plain_text.contains("&f=/200001/newbucket/tencent_test.jpg&"));
        assert!(plain_text.ends_with("&b=newbucket"));
    }

    #[test]
    fn test_sign_more_differs_between_calls() {
        let signer = signer();
        let first = signer.sign_more("newbucket", 60).unwrap();
        let second = signer.sign_more("newbucket", 60).unwrap();
        assert_ne!(first, second);
        for sign in [first, second] {
            let bin = general_purpose::STANDARD.decode(sign).unwrap();
            let plain_text = String::from_utf8_lossy(&bin[20..]).to_string();
            let fields = plain_text
                .split('&')
                .filter_map(|kv| kv.split_once('='))
                .collect::<Vec<_>>();
            let e: i64 = fields.iter().find(|(k, _)| *k == "e").unwrap().1.parse().unwrap();
            let t: i64 = fields.iter().find(|(k, _)| *k == "t").unwrap().1.parse().unwrap();
            assert_eq!(e - t, 60);
        }
    }

    #[test]
    fn test_sign_missing_credential() {
        let signer = Signer::new(&CosConfig::new("200001", "", "key"));
        assert!(matches!(
            signer.sign_more("newbucket", 60),
            Err(Error::MissingCredential)
        ));
        let signer = Signer::new(&CosConfig::new("200001", "id", ""));
        assert!(matches!(
            signer.sign_once("newbucket", "/200001/newbucket/a"),
            Err(Error::MissingCredential)
        ));
    }
}
