use std::time::Duration;

use color_eyre::Result;
use eyre::eyre;
use hyper::{body::Bytes, Request, Uri};
use serde::{Deserialize, Serialize};

pub type HyperHttpClient =
    hyper::Client<hyper_rustls::HttpsConnector<hyper::client::HttpConnector>>;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ApiReply {
    pub ok: Option<bool>,
    pub msg: Option<String>,
}

pub fn mk_hyper_http_client() -> HyperHttpClient {
    // Relay servers usually sit on the LAN behind plain http, but allow https
    // for setups that put a reverse proxy in front.
    let https = hyper_rustls::HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .build();

    hyper::Client::builder().build(https)
}

async fn send_request(
    client: &HyperHttpClient,
    request: Request<hyper::Body>,
    timeout: Duration,
) -> Result<Bytes> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let exchange = async {
        let result = client.request(request).await?;
        let status = result.status();
        let body_bytes = hyper::body::to_bytes(result.into_body()).await?;

        Ok::<_, hyper::Error>((status, body_bytes))
    };

    let (status, body_bytes) = tokio::time::timeout(timeout, exchange)
        .await
        .map_err(|_| eyre!("{} {} timed out after {:?}", method, uri, timeout))??;

    if !status.is_success() {
        let msg = serde_json::from_slice::<ApiReply>(&body_bytes)
            .ok()
            .and_then(|reply| reply.msg)
            .unwrap_or_else(|| String::from_utf8_lossy(&body_bytes).into_owned());

        return Err(eyre!("{} {} failed with {}: {}", method, uri, status, msg));
    }

    Ok(body_bytes)
}

fn deserialize_body<T: for<'a> Deserialize<'a>>(body_bytes: &[u8]) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_slice(body_bytes);
    let response: T = serde_path_to_error::deserialize(de)?;

    Ok(response)
}

pub async fn mk_get_request<T: for<'a> Deserialize<'a>>(
    client: &HyperHttpClient,
    uri: &Uri,
    timeout: Duration,
) -> Result<T> {
    let request = Request::builder()
        .method("GET")
        .header("Accept", "application/json")
        .uri(uri)
        .body(hyper::Body::empty())?;

    let body_bytes = send_request(client, request, timeout).await?;

    deserialize_body(&body_bytes)
}

/// Any 2xx counts as success. The reply body is read as [`ApiReply`] when it
/// parses and ignored otherwise.
pub async fn mk_post_request<RequestBody>(
    client: &HyperHttpClient,
    uri: &Uri,
    body: Option<&RequestBody>,
    timeout: Duration,
) -> Result<ApiReply>
where
    RequestBody: Serialize,
{
    let builder = Request::builder().method("POST").uri(uri);

    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(body)?.into())?,
        None => builder.body(hyper::Body::empty())?,
    };

    let body_bytes = send_request(client, request, timeout).await?;

    if body_bytes.is_empty() {
        return Ok(ApiReply::default());
    }

    let reply = deserialize_body(&body_bytes).unwrap_or_else(|e| {
        log::debug!("POST {} replied with a non-JSON body: {}", uri, e);
        ApiReply::default()
    });

    Ok(reply)
}


#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use hyper::StatusCode;
    use serde::Serialize;

    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[derive(Serialize)]
    struct Ping {
        n: u32,
    }

    #[tokio::test]
    async fn get_request_deserializes_json() {
        let (addr, _) = test_server::spawn(StatusCode::OK, r#"{"a": 1, "b": 2}"#);
        let client = mk_hyper_http_client();
        let uri = format!("http://{}/anything", addr).parse().unwrap();

        let map: HashMap<String, u32> = mk_get_request(&client, &uri, TIMEOUT).await.unwrap();

        assert_eq!(map["a"], 1);
        assert_eq!(map["b"], 2);
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let (addr, _) = test_server::spawn(StatusCode::OK, r#"{"a": "#);
        let client = mk_hyper_http_client();
        let uri = format!("http://{}/anything", addr).parse().unwrap();

        let result: Result<HashMap<String, u32>> = mk_get_request(&client, &uri, TIMEOUT).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn non_success_status_carries_server_msg() {
        let (addr, _) = test_server::spawn(
            StatusCode::CONFLICT,
            r#"{"ok": false, "msg": "Dispositivo ocupado"}"#,
        );
        let client = mk_hyper_http_client();
        let uri = format!("http://{}/api/single", addr).parse().unwrap();

        let err = mk_post_request(&client, &uri, Some(&Ping { n: 1 }), TIMEOUT)
            .await
            .unwrap_err();

        let text = err.to_string();
        assert!(text.contains("409"), "{}", text);
        assert!(text.contains("Dispositivo ocupado"), "{}", text);
    }

    #[tokio::test]
    async fn post_without_body_sends_empty_payload() {
        let (addr, recorded) = test_server::spawn(StatusCode::OK, r#"{"ok": true}"#);
        let client = mk_hyper_http_client();
        let uri = format!("http://{}/api/stop", addr).parse().unwrap();

        let reply = mk_post_request::<()>(&client, &uri, None, TIMEOUT).await.unwrap();

        assert_eq!(reply.ok, Some(true));
        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].method, "POST");
        assert_eq!(recorded[0].path, "/api/stop");
        assert!(recorded[0].body.is_empty());
    }

    #[tokio::test]
    async fn post_accepts_plain_text_success_reply() {
        let (addr, recorded) = test_server::spawn(StatusCode::OK, "OK");
        let client = mk_hyper_http_client();
        let uri = format!("http://{}/api/single", addr).parse().unwrap();

        let reply = mk_post_request(&client, &uri, Some(&Ping { n: 1 }), TIMEOUT)
            .await
            .unwrap();

        assert_eq!(reply.ok, None);
        assert_eq!(recorded.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unanswered_request_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept the connection but never answer.
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        let client = mk_hyper_http_client();
        let uri = format!("http://{}/api/status", addr).parse().unwrap();

        let result: Result<HashMap<String, u32>> =
            mk_get_request(&client, &uri, Duration::from_millis(100)).await;

        let text = result.unwrap_err().to_string();
        assert!(text.contains("timed out"), "{}", text);
    }
}
