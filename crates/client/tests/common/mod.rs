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

//! In-process daemon serving `Containers` on a temporary Unix socket.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use backend_client::api::containers_server::{Containers, ContainersServer};
use backend_client::api::{Container, ListRequest, ListResponse};
use backend_client::tonic::{self, transport::Server, Request, Response, Status};
use backend_client::CONTEXT_KEY;
use tempfile::TempDir;
use tokio::net::UnixListener;
use tokio_stream::wrappers::UnixListenerStream;

/// What the daemon saw for one `List` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Seen {
    pub backend: Option<String>,
    pub all: bool,
}

#[derive(Clone, Default)]
pub struct Daemon {
    pub containers: Vec<Container>,
    pub error: Option<Status>,
    /// Time to sit on each request before answering.
    pub delay: Option<Duration>,
    pub seen: Arc<Mutex<Vec<Seen>>>,
}

impl Daemon {
    pub fn with_containers(records: &[(&str, &str)]) -> Self {
        let containers = records
            .iter()
            .map(|(id, image)| Container {
                id: id.to_string(),
                image: image.to_string(),
                ..Default::default()
            })
            .collect();

        Self {
            containers,
            ..Default::default()
        }
    }

    pub fn failing(status: Status) -> Self {
        Self {
            error: Some(status),
            ..Default::default()
        }
    }

    pub fn stalled(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

#[tonic::async_trait]
impl Containers for Daemon {
    async fn list(&self, request: Request<ListRequest>) -> Result<Response<ListResponse>, Status> {
        let backend = request
            .metadata()
            .get(CONTEXT_KEY)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        self.seen.lock().unwrap().push(Seen {
            backend,
            all: request.get_ref().all,
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(status) = &self.error {
            return Err(status.clone());
        }

        Ok(Response::new(ListResponse {
            containers: self.containers.clone(),
        }))
    }
}

/// Temporary socket location, the directory is removed on drop.
pub fn socket() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backend.sock");
    (dir, path)
}

/// Serve `daemon` on `path` until the test runtime shuts down.
pub fn serve(daemon: Daemon, path: &Path) {
    let uds = UnixListener::bind(path).unwrap();
    let incoming = UnixListenerStream::new(uds);

    tokio::spawn(
        Server::builder()
            .add_service(ContainersServer::new(daemon))
            .serve_with_incoming(incoming),
    );
}
