//! Helpers shared by the socket-level tests

use std::time::Duration;

/// Base URL for a server started on `port`
pub fn base_url(port: u16) -> String {
    format!("http://127.0.0.1:{}", port)
}

/// Wait for server to be ready with retry logic
///
/// Retries connection up to max_retries times with exponential backoff.
/// More reliable than fixed sleep for test environments.
pub async fn wait_for_server(port: u16, max_retries: u32) -> reqwest::Client {
    let client = reqwest::Client::new();
    let mut delay = Duration::from_millis(10);

    for attempt in 1..=max_retries {
        match client
            .get(format!("{}/health", base_url(port)))
            .timeout(Duration::from_millis(100))
            .send()
            .await
        {
            Ok(_) => return client,
            Err(_) if attempt < max_retries => {
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(delay * 2, Duration::from_millis(200));
            }
            Err(e) => panic!("Server not ready after {} attempts: {}", max_retries, e),
        }
    }
    client
}

/// Check whether anything accepts connections on `port` right now
pub async fn is_listening(port: u16) -> bool {
    tokio::net::TcpStream::connect(("127.0.0.1", port))
        .await
        .is_ok()
}
