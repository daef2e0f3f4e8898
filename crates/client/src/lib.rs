/*
   Copyright The Docker API Authors.

   Licensed under the Apache License, Version 2.0 (the "License");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

       http://www.apache.org/licenses/LICENSE-2.0

   Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an "AS IS" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.
*/

#![cfg_attr(feature = "docs", doc = include_str!("../README.md"))]
// No way to derive Eq with tonic :(
// See https://github.com/hyperium/tonic/issues/1056
#![allow(clippy::derive_partial_eq_without_eq)]

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use hyper_util::rt::TokioIo;
use log::{debug, warn};
use tokio::net::UnixStream;
use tonic::codegen::http::Uri;
use tonic::transport::{Channel, Endpoint};

pub use tonic;

pub mod backoff;
pub mod container;
pub mod context;
pub mod error;

pub use backoff::Backoff;
pub use container::{ContainerSummary, PortMapping};
pub use context::{with_backend, Backend, CONTEXT_KEY, DEFAULT_BACKEND};
pub use error::{Error, Result};

/// Generated `com.docker.api.containers.v1` types and services.
pub mod api {
    tonic::include_proto!("com.docker.api.containers.v1");
}

use api::containers_client::ContainersClient;

/// Socket the daemon listens on by default.
pub const DEFAULT_ADDRESS: &str = "/tmp/backend.sock";

const HEALTH_PROBE_PATH: &str = "/com.docker.api.containers.v1.Containers/Ping";

/// Dial settings for [connect_with].
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    /// Limit for a single dial attempt.
    pub connect_timeout: Option<Duration>,
    /// Deadline applied to every request sent over the channel.
    pub request_timeout: Option<Duration>,
    /// Retry policy for failed dials.
    pub backoff: Backoff,
}

/// Connect creates a unix channel to the daemon GRPC socket.
///
/// This helper intended to be used in conjunction with [Tokio](https://tokio.rs) runtime.
pub async fn connect(path: impl AsRef<Path>) -> Result<Channel> {
    connect_with(path, &ConnectOptions::default()).await
}

/// Same as [connect], retrying failed dials as configured by `options`.
pub async fn connect_with(path: impl AsRef<Path>, options: &ConnectOptions) -> Result<Channel> {
    let path = path.as_ref().to_path_buf();
    let endpoint = endpoint(options)?;

    let mut delays = options.backoff.delays();
    let mut attempts = 0;

    loop {
        attempts += 1;
        debug!("dialing {} (attempt {})", path.display(), attempts);

        let err = match dial(&endpoint, path.clone()).await {
            Ok(channel) => return Ok(channel),
            Err(err) => err,
        };

        match delays.next() {
            Some(delay) => {
                warn!(
                    "failed to connect to {} (attempt {}): {}, retrying in {:?}",
                    path.display(),
                    attempts,
                    err,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            None => {
                return Err(Error::Connect {
                    path,
                    attempts,
                    source: err,
                })
            }
        }
    }
}

/// Build a channel that dials `path` on first use instead of up front.
///
/// Dial failures surface as `Unavailable` statuses on the requests sent over it.
pub fn connect_lazy(path: impl AsRef<Path>, options: &ConnectOptions) -> Result<Channel> {
    let endpoint = endpoint(options)?;
    Ok(endpoint.connect_with_connector_lazy(UnixConnector {
        path: path.as_ref().to_path_buf(),
    }))
}

// The URI only satisfies the endpoint builder, the connector dials the socket path.
fn endpoint(options: &ConnectOptions) -> Result<Endpoint> {
    let mut endpoint = Endpoint::try_from("http://[::]")?;
    if let Some(timeout) = options.connect_timeout {
        endpoint = endpoint.connect_timeout(timeout);
    }
    if let Some(timeout) = options.request_timeout {
        endpoint = endpoint.timeout(timeout);
    }
    Ok(endpoint)
}

/// Connector that ignores the URI and dials a Unix socket.
#[derive(Debug, Clone)]
struct UnixConnector {
    path: PathBuf,
}

impl tower::Service<Uri> for UnixConnector {
    type Response = TokioIo<UnixStream>;
    type Error = std::io::Error;
    type Future = Pin<Box<dyn Future<Output = std::io::Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _uri: Uri) -> Self::Future {
        let path = self.path.clone();
        Box::pin(async move { Ok(TokioIo::new(UnixStream::connect(path).await?)) })
    }
}

async fn dial(
    endpoint: &Endpoint,
    path: PathBuf,
) -> std::result::Result<Channel, tonic::transport::Error> {
    endpoint
        .connect_with_connector(UnixConnector { path })
        .await
}

/// Client to the daemon's containers API.
#[derive(Debug, Clone)]
pub struct Client {
    channel: Channel,
}

impl From<Channel> for Client {
    fn from(value: Channel) -> Self {
        Self { channel: value }
    }
}

impl Client {
    /// Create a new client from UDS socket.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let channel = connect(path).await?;
        Ok(Self { channel })
    }

    /// Create a new client from UDS socket with custom dial settings.
    pub async fn connect_with(path: impl AsRef<Path>, options: &ConnectOptions) -> Result<Self> {
        let channel = connect_with(path, options).await?;
        Ok(Self { channel })
    }

    /// Access to the underlying Tonic channel.
    #[inline]
    pub fn channel(&self) -> Channel {
        self.channel.clone()
    }

    /// Container service client.
    #[inline]
    pub fn containers(&self) -> ContainersClient<Channel> {
        ContainersClient::new(self.channel())
    }

    /// List the containers known to `backend`.
    pub async fn list(&self, backend: &Backend, all: bool) -> Result<Vec<ContainerSummary>> {
        let req = with_backend(tonic::Request::new(api::ListRequest { all }), backend);

        debug!("listing containers on backend {} (all: {})", backend, all);
        let resp = self.containers().list(req).await?;

        Ok(container::decode_list(resp.into_inner()))
    }

    /// Check that the daemon answers on this channel within `timeout`.
    ///
    /// Sends a request for a method the daemon does not serve. An
    /// `Unimplemented` answer proves the connection end to end; any other
    /// status (usually `Unavailable` from a failed dial) is returned as is.
    pub async fn health_check(&self, timeout: Duration) -> Result<()> {
        match tokio::time::timeout(timeout, self.probe()).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(status)) if status.code() == tonic::Code::Unimplemented => Ok(()),
            Ok(Err(status)) => Err(Error::Status(status)),
            Err(_) => Err(Error::Unhealthy(timeout)),
        }
    }

    async fn probe(&self) -> std::result::Result<(), tonic::Status> {
        let mut grpc = tonic::client::Grpc::new(self.channel());
        grpc.ready()
            .await
            .map_err(|e| tonic::Status::unavailable(e.to_string()))?;

        let path = tonic::codegen::http::uri::PathAndQuery::from_static(HEALTH_PROBE_PATH);
        let codec: tonic::codec::ProstCodec<(), ()> = tonic::codec::ProstCodec::default();
        grpc.unary(tonic::Request::new(()), path, codec).await?;

        Ok(())
    }
}
