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

mod common;

use std::time::Duration;

use backend_client::tonic::{Code, Status};
use backend_client::{Backend, Backoff, Client, ConnectOptions, Error};
use common::{Daemon, Seen};
use tokio::net::UnixListener;

#[tokio::test]
async fn list_decodes_records_in_order() {
    let (_dir, path) = common::socket();
    let daemon = Daemon::with_containers(&[("c1", "nginx:latest"), ("c2", "redis")]);
    common::serve(daemon.clone(), &path);

    let client = Client::from_path(&path).await.unwrap();
    let containers = client.list(&Backend::default(), false).await.unwrap();

    let pairs: Vec<_> = containers
        .iter()
        .map(|c| (c.id.as_str(), c.image.as_str()))
        .collect();
    assert_eq!(pairs, vec![("c1", "nginx:latest"), ("c2", "redis")]);
}

#[tokio::test]
async fn list_routes_to_backend() {
    let (_dir, path) = common::socket();
    let daemon = Daemon::default();
    common::serve(daemon.clone(), &path);

    let client = Client::from_path(&path).await.unwrap();
    let aci: Backend = "aci".parse().unwrap();

    assert!(client.list(&aci, true).await.unwrap().is_empty());
    assert!(client.list(&Backend::default(), false).await.unwrap().is_empty());

    assert_eq!(
        daemon.seen(),
        vec![
            Seen {
                backend: Some("aci".to_string()),
                all: true,
            },
            Seen {
                backend: Some("moby".to_string()),
                all: false,
            },
        ]
    );
}

#[tokio::test]
async fn server_error_is_status() {
    let (_dir, path) = common::socket();
    common::serve(
        Daemon::failing(Status::not_found("backend \"nope\" not found")),
        &path,
    );

    let client = Client::from_path(&path).await.unwrap();
    let err = client
        .list(&"nope".parse().unwrap(), false)
        .await
        .unwrap_err();

    match err {
        Error::Status(status) => {
            assert_eq!(status.code(), Code::NotFound);
            assert_eq!(status.message(), "backend \"nope\" not found");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn retries_until_socket_appears() {
    let (_dir, path) = common::socket();

    let late = path.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        common::serve(Daemon::with_containers(&[("late", "alpine")]), &late);
    });

    let options = ConnectOptions {
        backoff: Backoff {
            initial: Duration::from_millis(50),
            max: Duration::from_millis(100),
            multiplier: 2.0,
            max_retries: 20,
        },
        ..Default::default()
    };

    let client = Client::connect_with(&path, &options).await.unwrap();
    let containers = client.list(&Backend::default(), false).await.unwrap();
    assert_eq!(containers[0].id, "late");
}

#[tokio::test]
async fn gives_up_after_retries() {
    let (_dir, path) = common::socket();

    let options = ConnectOptions {
        backoff: Backoff {
            initial: Duration::from_millis(1),
            max: Duration::from_millis(5),
            multiplier: 2.0,
            max_retries: 3,
        },
        ..Default::default()
    };

    let err = backend_client::connect_with(&path, &options)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Connect { attempts: 4, .. }));
}

#[tokio::test]
async fn request_timeout_cancels_slow_list() {
    let (_dir, path) = common::socket();
    common::serve(Daemon::stalled(Duration::from_secs(5)), &path);

    let options = ConnectOptions {
        request_timeout: Some(Duration::from_millis(50)),
        ..Default::default()
    };

    let client = Client::connect_with(&path, &options).await.unwrap();
    let err = client
        .list(&Backend::default(), false)
        .await
        .unwrap_err();

    match err {
        Error::Status(status) => assert!(
            matches!(status.code(), Code::Cancelled | Code::DeadlineExceeded),
            "unexpected status: {:?}",
            status
        ),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn health_check_on_live_channel() {
    let (_dir, path) = common::socket();
    common::serve(Daemon::default(), &path);

    let client = Client::from_path(&path).await.unwrap();
    client
        .health_check(Duration::from_secs(1))
        .await
        .unwrap();
}

#[tokio::test]
async fn health_check_fails_without_daemon() {
    let (_dir, path) = common::socket();

    let channel = backend_client::connect_lazy(&path, &ConnectOptions::default()).unwrap();
    let client = Client::from(channel);

    let err = client
        .health_check(Duration::from_secs(1))
        .await
        .unwrap_err();

    match err {
        Error::Status(status) => assert_eq!(status.code(), Code::Unavailable),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn health_check_times_out_on_silent_peer() {
    let (_dir, path) = common::socket();

    // Accepts connections but never speaks HTTP/2.
    let listener = UnixListener::bind(&path).unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    let channel = backend_client::connect_lazy(&path, &ConnectOptions::default()).unwrap();
    let client = Client::from(channel);

    let err = client
        .health_check(Duration::from_millis(200))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unhealthy(timeout) if timeout == Duration::from_millis(200)));
}
