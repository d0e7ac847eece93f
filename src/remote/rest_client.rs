use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::storage::entities::{NewWorkLog, WorkLogEntry};

use super::{CategoryStat, LogApi, WeeklyStat};

/// Where the api lives unless told otherwise.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// [LogApi] over HTTP.
#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        trace!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;

        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("{url} responded with {status}: {text}"));
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response from {url}"))
    }
}

#[async_trait]
impl LogApi for RestClient {
    async fn fetch_logs(&self) -> Result<Vec<WorkLogEntry>> {
        let logs: Vec<WorkLogEntry> = self.get("logs").await?;
        debug!("Fetched {} logs", logs.len());
        Ok(logs)
    }

    async fn create_log(&self, log: NewWorkLog) -> Result<WorkLogEntry> {
        let url = self.url("logs");
        trace!("POST {url} {log:?}");
        let response = self
            .client
            .post(&url)
            .json(&log)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;

        let created: WorkLogEntry = Self::read_json(response).await?;
        debug!("Created log {:?}", created.id);
        Ok(created)
    }

    async fn weekly_stats(&self) -> Result<Vec<WeeklyStat>> {
        self.get("stats/weekly").await
    }

    async fn category_stats(&self) -> Result<Vec<CategoryStat>> {
        self.get("stats/categories").await
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    use crate::{
        remote::{rest_client::RestClient, LogApi},
        storage::entities::{Category, NewWorkLog},
    };

    fn client(base_url: impl Into<String>) -> RestClient {
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("Client should build without proxies");
        RestClient::with_client(client, base_url)
    }

    /// Serves a single canned response and hands back the raw request it received.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> Result<(String, JoinHandle<Result<String>>)> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}/api", listener.local_addr()?);

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await?;
            let mut request = Vec::new();
            let mut buffer = [0u8; 1024];
            let header_end = loop {
                let read = socket.read(&mut buffer).await?;
                anyhow::ensure!(read > 0, "connection closed before headers ended");
                request.extend_from_slice(&buffer[..read]);
                if let Some(position) = request.windows(4).position(|v| v == b"\r\n\r\n") {
                    break position + 4;
                }
            };
            let content_length = String::from_utf8_lossy(&request[..header_end])
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            while request.len() < header_end + content_length {
                let read = socket.read(&mut buffer).await?;
                anyhow::ensure!(read > 0, "connection closed before body ended");
                request.extend_from_slice(&buffer[..read]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await?;
            socket.shutdown().await?;
            Ok::<_, anyhow::Error>(String::from_utf8_lossy(&request).to_string())
        });

        Ok((base_url, handle))
    }

    #[tokio::test]
    async fn test_fetch_logs() -> Result<()> {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"[{"id":2,"date":"2024-03-02","hours":1.5,"category":"design","description":"mockups","created_at":"2024-03-02T10:00:00"},
                {"id":1,"date":"2024-03-01","hours":4,"category":"development","description":"api","created_at":"2024-03-01T10:00:00"}]"#,
        )
        .await?;

        let logs = client(base_url).fetch_logs().await?;
        let request = server.await??;

        assert!(request.starts_with("GET /api/logs "));
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].id, Some(2));
        assert_eq!(logs[1].hours.value(), 4.);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_log_sends_body() -> Result<()> {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"id":7,"date":"2024-03-05","hours":2,"category":"meetings","description":"planning","created_at":"2024-03-05T12:00:00"}"#,
        )
        .await?;

        let created = client(format!("{base_url}/"))
            .create_log(NewWorkLog {
                date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                hours: 2.,
                category: Category::Meetings,
                description: "planning".into(),
            })
            .await?;
        let request = server.await??;

        assert!(request.starts_with("POST /api/logs "));
        let body = request.split("\r\n\r\n").nth(1).unwrap_or_default();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(body)?,
            serde_json::json!({
                "date": "2024-03-05",
                "hours": 2.0,
                "category": "meetings",
                "description": "planning",
            })
        );
        assert_eq!(created.id, Some(7));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_log_rejected() -> Result<()> {
        let (base_url, server) =
            serve_once("400 Bad Request", r#"{"detail":"database is locked"}"#).await?;

        let result = client(base_url)
            .create_log(NewWorkLog {
                date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                hours: 2.,
                category: Category::Meetings,
                description: "planning".into(),
            })
            .await;
        server.await??;

        let error = result.unwrap_err().to_string();
        assert!(error.contains("400"), "{error}");
        assert!(error.contains("database is locked"), "{error}");
        Ok(())
    }

    #[tokio::test]
    async fn test_stats() -> Result<()> {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"[{"week":"2024-09","total_hours":12.5,"log_count":4,"avg_hours":3.1}]"#,
        )
        .await?;
        let weekly = client(base_url).weekly_stats().await?;
        assert!(server.await??.starts_with("GET /api/stats/weekly "));
        assert_eq!(weekly[0].week, "2024-09");
        assert_eq!(weekly[0].log_count, 4);

        let (base_url, server) = serve_once(
            "200 OK",
            r#"[{"category":"research","total_hours":3.0,"log_count":1,"avg_hours":3.0}]"#,
        )
        .await?;
        let categories = client(base_url).category_stats().await?;
        assert!(server.await??.starts_with("GET /api/stats/categories "));
        assert_eq!(categories[0].category, Category::Research);
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/api", listener.local_addr().unwrap());
        drop(listener);

        assert!(client(base_url).fetch_logs().await.is_err());
    }
}
