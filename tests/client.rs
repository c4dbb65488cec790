use async_trait::async_trait;
use hyper::{body::to_bytes, Body, Request, Response};
use pretty_assertions::assert_eq;
use qcloud_cos_rs::{
    transport::HttpClient, CosClient, CosConfig, Error, ListInfo, StatInfo, COS_NETWORK_ERROR,
    COS_PARAMS_ERROR,
};
use std::{
    collections::VecDeque,
    io::Write,
    sync::{Arc, Mutex},
    time::Duration,
};

#[derive(Default)]
struct Server {
    replies: Mutex<VecDeque<String>>,
    seen: Mutex<Vec<(String, String, Vec<u8>)>>,
}

#[derive(Clone, Default)]
struct ScriptClient(Arc<Server>);

impl ScriptClient {
    fn reply(&self, body: &str) {
        self.0.replies.lock().unwrap().push_back(body.to_owned());
    }
    fn seen(&self) -> Vec<(String, String, Vec<u8>)> {
        self.0.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for ScriptClient {
    async fn request(&self, req: Request<Body>) -> Result<Response<Body>, Error> {
        let (parts, body) = req.into_parts();
        let body = to_bytes(body).await?;
        self.0
            .seen
            .lock()
            .unwrap()
            .push((parts.method.to_string(), parts.uri.to_string(), body.to_vec()));
        let reply = self.0.replies.lock().unwrap().pop_front();
        match reply {
            Some(reply) => Ok(Response::new(Body::from(reply))),
            None => {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(Response::new(Body::empty()))
            }
        }
    }
}

fn client(server: &ScriptClient) -> CosClient {
    let config = CosConfig::new("200001", "AKIDexample", "secret")
        .set_endpoint("http://web.file.myqcloud.com/files/v1")
        .set_timeout(Duration::from_millis(100));
    CosClient::new(config).set_http_client(server.clone())
}

#[tokio::test]
async fn list_and_prefix_search() {
    let server = ScriptClient::default();
    server.reply(
        r#"{"code":0,"message":"SUCCESS","data":{"context":"next","has_more":true,"infos":[{"name":"a.jpg","filelen":1,"sha":"x"}]}}"#,
    );
    server.reply(r#"{"code":0,"message":"SUCCESS","data":{"has_more":false,"infos":[]}}"#);
    let folder = client(&server).bucket("/newbucket/").folder("/photos/2016/");
    let page = folder.list().send().await;
    let info = page.data_as::<ListInfo>().unwrap();
    assert!(info.has_more);
    assert_eq!(info.infos[0].name.as_deref(), Some("a.jpg"));
    folder.prefix_search("IMG_").set_context(info.context).send().await;

    let seen = server.seen();
    assert_eq!(seen[0].0, "GET");
    assert_eq!(
        seen[0].1,
        "http://web.file.myqcloud.com/files/v1/200001/newbucket/photos/2016/?op=list&num=20&pattern=eListBoth&order=0&context="
    );
    assert_eq!(
        seen[1].1,
        "http://web.file.myqcloud.com/files/v1/200001/newbucket/photos/2016/IMG_?op=list&num=20&pattern=eListBoth&order=0&context=next"
    );
}

#[tokio::test]
async fn upload_then_stat() {
    let server = ScriptClient::default();
    server.reply(r#"{"code":0,"message":"SUCCESS","data":{"access_url":"http://example.com/a.txt"}}"#);
    server.reply(r#"{"code":0,"message":"SUCCESS","data":{"filelen":"3","filesize":"3","sha":"a9993e364706816aba3e25717850c26c9cd0d89d"}}"#);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"abc").unwrap();
    file.flush().unwrap();

    let object = client(&server).bucket("newbucket").object("docs/a.txt");
    let uploaded = object.upload().send_file(file.path()).await;
    assert!(uploaded.is_success());
    let stat = object.stat().send().await.data_as::<StatInfo>().unwrap();
    assert_eq!(stat.filelen, Some(3));
    assert_eq!(stat.sha.as_deref(), Some("a9993e364706816aba3e25717850c26c9cd0d89d"));

    let seen = server.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].0, "POST");
    assert!(String::from_utf8_lossy(&seen[0].2).contains("a9993e364706816aba3e25717850c26c9cd0d89d"));
    assert_eq!(
        seen[1].1,
        "http://web.file.myqcloud.com/files/v1/200001/newbucket/docs/a.txt?op=stat"
    );
}

#[tokio::test]
async fn remote_error_code_is_kept() {
    let server = ScriptClient::default();
    server.reply(r#"{"code":-197,"message":"ERROR_CMD_COS_INDEX_ERROR"}"#);
    let result = client(&server)
        .bucket("newbucket")
        .folder("missing")
        .delete()
        .send()
        .await;
    assert_eq!(result.code, -197);
    match result.into_result() {
        Err(Error::Cos { code, message }) => {
            assert_eq!(code, -197);
            assert_eq!(message, "ERROR_CMD_COS_INDEX_ERROR");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn local_errors_never_reach_the_network() {
    let server = ScriptClient::default();
    let bucket = client(&server).bucket("newbucket");
    assert_eq!(bucket.root().delete().send().await.code, COS_PARAMS_ERROR);
    assert_eq!(
        bucket.object("a.txt").upload().send_file("/not/exists").await.code,
        COS_PARAMS_ERROR
    );
    assert_eq!(
        client(&server).bucket("/").object("a.txt").stat().send().await.code,
        COS_PARAMS_ERROR
    );
    assert!(server.seen().is_empty());
}

#[tokio::test]
async fn receive_timeout() {
    let server = ScriptClient::default();
    let result = client(&server)
        .bucket("newbucket")
        .object("a.txt")
        .stat()
        .send()
        .await;
    assert_eq!(result.code, COS_NETWORK_ERROR);
    assert_eq!(result.message, "recv timeout");
}
