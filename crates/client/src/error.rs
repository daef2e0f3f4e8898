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

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Backend name cannot be sent as a metadata value.
    #[error("Invalid backend name: {0:?}")]
    InvalidBackend(String),

    /// All dial attempts to the daemon socket failed.
    #[error("Failed to connect to {} after {attempts} attempt(s): {source}", .path.display())]
    Connect {
        path: PathBuf,
        attempts: u32,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// The daemon (or the backend behind it) answered with a non-OK status.
    #[error("Request failed with {}: {}", .0.code(), .0.message())]
    Status(#[from] tonic::Status),

    #[error("Channel not ready after {0:?}")]
    Unhealthy(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
