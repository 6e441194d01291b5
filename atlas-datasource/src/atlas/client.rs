use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::info;

use super::paths::ApiPath;
use crate::core::{AtlasConfig, AtlasError, Result};

/// Ordered query parameters. Keys may repeat (one `m` per requested metric), so this is
/// deliberately a list of pairs and never a map.
pub type QueryParams = Vec<(String, String)>;

/// Read-only access to the monitoring API, returning the decoded JSON body.
#[async_trait]
pub trait AtlasApi: Send + Sync {
    async fn get(&self, path: &ApiPath, params: &[(String, String)]) -> Result<Value>;
}

/// HTTP client for the Atlas API, authenticated with the account's API key
#[derive(Clone)]
pub struct AtlasClient {
    cfg: AtlasConfig,
    http: reqwest::Client,
}

impl AtlasClient {
    pub fn new(cfg: AtlasConfig) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { cfg, http })
    }

    /// Append `path` to the configured base URL, one percent-encoded segment per path
    /// component, then `params` in order.
    pub fn endpoint_url(&self, path: &ApiPath, params: &[(String, String)]) -> Result<Url> {
        let mut url = Url::parse(&self.cfg.base_url)?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AtlasError::InvalidPath(self.cfg.base_url.clone()))?;
            segments.pop_if_empty();
            for segment in path.segments() {
                if segment == "." || segment == ".." {
                    return Err(AtlasError::InvalidPath(segment.to_string()));
                }
                segments.push(segment);
            }
        }
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }
        Ok(url)
    }
}

#[async_trait]
impl AtlasApi for AtlasClient {
    async fn get(&self, path: &ApiPath, params: &[(String, String)]) -> Result<Value> {
        let url = self.endpoint_url(path, params)?;
        info!("  => Making GET request to {}", url);

        let resp = self
            .http
            .get(url)
            .basic_auth(&self.cfg.username, Some(&self.cfg.api_key))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = match resp.text().await {
                Ok(text) => serde_json::from_str::<Value>(&text)
                    .unwrap_or_else(|_| serde_json::json!({ "error": text })),
                Err(e) => serde_json::json!({
                    "error": format!(
                        "{} (body unreadable: {})",
                        status.canonical_reason().unwrap_or("upstream error"),
                        e
                    )
                }),
            };
            return Err(AtlasError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::paths;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn client(base_url: &str) -> AtlasClient {
        AtlasClient::new(AtlasConfig {
            base_url: base_url.to_string(),
            username: "acct".to_string(),
            api_key: "key".to_string(),
        })
        .unwrap()
    }

    fn pairs(raw: &[(&str, &str)]) -> QueryParams {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Serve a single canned HTTP response; the handle yields the raw request head.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut chunk = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&head).into_owned()
        });
        (format!("http://{}", addr), handle)
    }

    fn authorization(head: &str) -> Option<String> {
        head.lines().find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("authorization")
                .then(|| value.trim().to_string())
        })
    }

    #[test]
    fn repeated_keys_survive() {
        let c = client("https://cloud.mongodb.com/api/atlas/v1.0");
        let params = pairs(&[
            ("granularity", "PT1M"),
            ("m", "CONNECTIONS"),
            ("m", "OPCOUNTER_CMD"),
        ]);
        let url = c
            .endpoint_url(&paths::process_measurements("p1", "a:27017"), &params)
            .unwrap();

        assert_eq!(
            url.path(),
            "/api/atlas/v1.0/groups/p1/processes/a:27017/measurements"
        );
        let metrics: Vec<String> = url
            .query_pairs()
            .filter(|(k, _)| k == "m")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(metrics, vec!["CONNECTIONS", "OPCOUNTER_CMD"]);
    }

    #[test]
    fn params_keep_their_order_and_values() {
        let c = client("http://localhost:9999/");
        let params = pairs(&[
            ("start", "2018-07-31T09:00:24.531Z"),
            ("end", "2018-07-31T15:00:24.532Z"),
        ]);
        let url = c.endpoint_url(&paths::cluster("p1", "c1"), &params).unwrap();

        let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(decoded, params);
        assert_eq!(url.path(), "/groups/p1/clusters/c1");
    }

    #[test]
    fn no_params_means_no_query() {
        let c = client("http://localhost:9999");
        let url = c.endpoint_url(&paths::cluster("p1", "c1"), &[]).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn caller_values_cannot_escape_their_segment() {
        let c = client("https://cloud.mongodb.com/api/atlas/v1.0");

        let url = c
            .endpoint_url(&paths::cluster("p1", "../../../orgs"), &[])
            .unwrap();
        assert_eq!(
            url.path(),
            "/api/atlas/v1.0/groups/p1/clusters/..%2F..%2F..%2Forgs"
        );

        let url = c
            .endpoint_url(&paths::cluster("p1", "c1?envelope=true"), &[])
            .unwrap();
        assert_eq!(url.query(), None);
        assert!(url.path().ends_with("/clusters/c1%3Fenvelope=true"));

        let url = c.endpoint_url(&paths::cluster("p1", "c1#frag"), &[]).unwrap();
        assert_eq!(url.fragment(), None);
        assert!(url.path().ends_with("/clusters/c1%23frag"));
    }

    #[test]
    fn dot_segments_are_rejected() {
        let c = client("https://cloud.mongodb.com/api/atlas/v1.0");
        for bad in [".", ".."] {
            let err = c.endpoint_url(&paths::cluster(bad, "c1"), &[]).unwrap_err();
            assert!(matches!(err, AtlasError::InvalidPath(ref s) if s == bad));
            let err = c.endpoint_url(&paths::cluster("p1", bad), &[]).unwrap_err();
            assert!(matches!(err, AtlasError::InvalidPath(_)));
        }
    }

    #[tokio::test]
    async fn sends_basic_auth_and_decodes_body() {
        let (base, server) = serve_once("200 OK", r#"{"mongoURI":"mongodb://a:27017"}"#).await;

        let body = client(&base)
            .get(&paths::cluster("p1", "c1"), &[])
            .await
            .unwrap();
        assert_eq!(body, json!({ "mongoURI": "mongodb://a:27017" }));

        let head = server.await.unwrap();
        assert!(head.starts_with("GET /groups/p1/clusters/c1 HTTP/1.1"));
        assert_eq!(authorization(&head).as_deref(), Some("Basic YWNjdDprZXk="));
    }

    #[tokio::test]
    async fn upstream_json_error_body_is_forwarded() {
        let (base, server) = serve_once(
            "401 Unauthorized",
            r#"{"detail":"You are not authorized for this resource.","error":401}"#,
        )
        .await;

        let err = client(&base)
            .get(&paths::cluster("p1", "c1"), &[])
            .await
            .unwrap_err();
        match err {
            AtlasError::Upstream { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(
                    body,
                    json!({
                        "detail": "You are not authorized for this resource.",
                        "error": 401
                    })
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let head = server.await.unwrap();
        assert_eq!(authorization(&head).as_deref(), Some("Basic YWNjdDprZXk="));
    }

    #[tokio::test]
    async fn upstream_text_error_is_wrapped() {
        let (base, server) = serve_once("502 Bad Gateway", "upstream down").await;

        let err = client(&base)
            .get(&paths::process_disks("p1", "a:27017"), &[])
            .await
            .unwrap_err();
        match err {
            AtlasError::Upstream { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, json!({ "error": "upstream down" }));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        server.await.unwrap();
    }
}
