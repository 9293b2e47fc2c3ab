//! Test Doubles
//!
//! `StaticSource` returns a fixed quote or a fixed failure, optionally after a
//! delay. `serve_once` answers a single HTTP request on a loopback port so the
//! adapters can be driven end to end.

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use signal_core::{Quote, SourceKind};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::QuoteSource;
use crate::context::FetchContext;
use crate::error::{FeedError, Result};

pub(crate) struct StaticSource {
    kind: SourceKind,
    symbol: String,
    price: Option<(Decimal, Decimal)>,
    delay: Option<Duration>,
}

impl StaticSource {
    pub(crate) fn ok(kind: SourceKind, symbol: &str, price: Decimal, high: Decimal) -> Self {
        Self {
            kind,
            symbol: symbol.into(),
            price: Some((price, high)),
            delay: None,
        }
    }

    pub(crate) fn failing(kind: SourceKind, symbol: &str) -> Self {
        Self {
            kind,
            symbol: symbol.into(),
            price: None,
            delay: None,
        }
    }

    pub(crate) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl QuoteSource for StaticSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    async fn fetch(&self, ctx: &FetchContext) -> Result<Quote> {
        ctx.run(async {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let (price, high) = self
                .price
                .ok_or_else(|| FeedError::DataUnavailable(format!("{} offline", self.symbol)))?;
            Ok(Quote::new(self.symbol.clone(), price, self.kind)?.with_rolling_high(high))
        })
        .await
    }
}

/// Loopback server that answers exactly one request
pub(crate) struct OneShotServer {
    pub(crate) base_url: String,
    request: JoinHandle<String>,
}

impl OneShotServer {
    /// Raw request head as received, lowercased
    pub(crate) async fn request(self) -> String {
        self.request.await.unwrap().to_lowercase()
    }
}

pub(crate) async fn serve_once(status: u16, body: &'static str) -> OneShotServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let request = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0_u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }

        let reason = if status == 200 { "OK" } else { "Error" };
        let response = format!(
            "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&head).into_owned()
    });

    OneShotServer { base_url, request }
}
