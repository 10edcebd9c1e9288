//! HTTP download of the published sheet export.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::SyncError;

/// Downloads the published CSV export over HTTP.
///
/// The whole download (connect, headers, body) runs under one explicit
/// deadline; a hung server surfaces as [`SyncError::Timeout`] instead of
/// blocking forever.
pub struct SheetFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl SheetFetcher {
    /// Create a fetcher that aborts downloads exceeding `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// Download `url` and decode the body as UTF-8 text.
    ///
    /// A leading byte-order mark is stripped from the decoded text.
    /// Cancelling `cancel` abandons the download at the next await point.
    pub async fn fetch(&self, url: &str, cancel: &CancellationToken) -> Result<String, SyncError> {
        if cancel.is_cancelled() {
            return Err(SyncError::Cancelled);
        }

        debug!(url, timeout_secs = self.timeout.as_secs(), "downloading sheet");
        let download = async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|err| SyncError::Fetch(err.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(SyncError::Fetch(format!("{url} returned HTTP {status}")));
            }

            response
                .bytes()
                .await
                .map_err(|err| SyncError::Fetch(err.to_string()))
        };

        let bytes = tokio::select! {
            _ = cancel.cancelled() => return Err(SyncError::Cancelled),
            outcome = tokio::time::timeout(self.timeout, download) => match outcome {
                Ok(result) => result?,
                Err(_) => return Err(SyncError::Timeout(self.timeout.as_secs())),
            },
        };

        decode_body(bytes.to_vec())
    }
}

fn decode_body(bytes: Vec<u8>) -> Result<String, SyncError> {
    let text = String::from_utf8(bytes)?;
    let text = match text.strip_prefix('\u{FEFF}') {
        Some(rest) => rest.to_string(),
        None => text,
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_returns_decoded_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/export.csv")
            .with_status(200)
            .with_body("Key,en\nGREETING,Hello\n")
            .create_async()
            .await;

        let fetcher = SheetFetcher::new(Duration::from_secs(5));
        let text = fetcher
            .fetch(&format!("{}/export.csv", server.url()), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(text, "Key,en\nGREETING,Hello\n");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn leading_bom_is_stripped() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/export.csv")
            .with_status(200)
            .with_body("\u{FEFF}Key,en\n")
            .create_async()
            .await;

        let fetcher = SheetFetcher::new(Duration::from_secs(5));
        let text = fetcher
            .fetch(&format!("{}/export.csv", server.url()), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(text, "Key,en\n");
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/export.csv")
            .with_status(500)
            .create_async()
            .await;

        let fetcher = SheetFetcher::new(Duration::from_secs(5));
        let err = fetcher
            .fetch(&format!("{}/export.csv", server.url()), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::Fetch(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn invalid_utf8_is_a_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/export.csv")
            .with_status(200)
            .with_body(vec![0xFF, 0xFE, 0x00, 0x41])
            .create_async()
            .await;

        let fetcher = SheetFetcher::new(Duration::from_secs(5));
        let err = fetcher
            .fetch(&format!("{}/export.csv", server.url()), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unresponsive_server_times_out() {
        // Bound but never accepted: the connection sits in the backlog and
        // no response ever arrives.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/export.csv", listener.local_addr().unwrap());

        let fetcher = SheetFetcher::new(Duration::from_millis(50));
        let err = fetcher
            .fetch(&url, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::Timeout(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn cancellation_interrupts_a_waiting_fetch() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/export.csv", listener.local_addr().unwrap());

        let fetcher = SheetFetcher::new(Duration::from_secs(30));
        let cancel = CancellationToken::new();
        let task = {
            let cancel = cancel.clone();
            tokio::spawn(async move { fetcher.fetch(&url, &cancel).await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        cancel.cancel();

        let result = task.await.unwrap();
        assert!(matches!(result, Err(SyncError::Cancelled)));
    }

    #[tokio::test]
    async fn pre_cancelled_token_skips_the_request() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let fetcher = SheetFetcher::new(Duration::from_secs(5));
        let result = fetcher.fetch("http://127.0.0.1:1/", &cancel).await;
        assert!(matches!(result, Err(SyncError::Cancelled)));
    }
}
