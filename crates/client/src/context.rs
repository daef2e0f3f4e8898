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

//! Backend selection.
//!
//! The daemon multiplexes every call to one of its backends, chosen by the
//! `CONTEXT_KEY` metadata entry of the request.

use std::fmt;
use std::str::FromStr;

use tonic::metadata::{AsciiMetadataValue, MetadataKey};
use tonic::Request;

use crate::error::{Error, Result};

/// Metadata key carrying the backend name.
///
/// Other clients send it as `CONTEXT_KEY`; metadata keys are lowercase on the wire.
pub const CONTEXT_KEY: &str = "context_key";

/// Backend used when none is given.
pub const DEFAULT_BACKEND: &str = "moby";

/// Name of a daemon backend, validated to be sendable as metadata.
#[derive(Clone, PartialEq, Eq)]
pub struct Backend {
    name: String,
    value: AsciiMetadataValue,
}

impl Backend {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidBackend(name));
        }

        let value = AsciiMetadataValue::try_from(name.as_str())
            .map_err(|_| Error::InvalidBackend(name.clone()))?;

        Ok(Self { name, value })
    }

    /// Backend from the first command line argument, `moby` when absent or empty.
    pub fn from_args(first: Option<String>) -> Result<Self> {
        match first {
            Some(name) if !name.is_empty() => Self::new(name),
            _ => Ok(Self::default()),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            name: DEFAULT_BACKEND.to_string(),
            value: AsciiMetadataValue::from_static(DEFAULT_BACKEND),
        }
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Backend").field(&self.name).finish()
    }
}

/// Route `req` to `backend`, replacing any previous selection.
pub fn with_backend<T>(mut req: Request<T>, backend: &Backend) -> Request<T> {
    req.metadata_mut()
        .insert(MetadataKey::from_static(CONTEXT_KEY), backend.value.clone());
    req
}

/// Wrap a message into a `tonic::Request` routed to a backend.
#[macro_export]
macro_rules! with_backend {
    ($req:expr, $backend:expr) => {{
        $crate::context::with_backend($crate::tonic::Request::new($req), &$backend)
    }};
}
