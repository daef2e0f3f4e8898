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

use std::io::{self, Write};

use backend_client::{Backend, Client, ContainerSummary};
use log::debug;

/// Write one `<id> <image>` line per container.
pub fn print_containers<W: Write>(
    containers: &[ContainerSummary],
    out: &mut W,
) -> io::Result<()> {
    for container in containers {
        writeln!(out, "{} {}", container.id, container.image)?;
    }
    out.flush()
}

/// List the containers of `backend` and print them to `out`.
///
/// A failed call is reported on `err` and nothing is printed; the caller
/// keeps going either way. Returns the number of printed containers.
pub async fn list_and_print<O: Write, E: Write>(
    client: &Client,
    backend: &Backend,
    all: bool,
    out: &mut O,
    err: &mut E,
) -> io::Result<usize> {
    let containers = match client.list(backend, all).await {
        Ok(containers) => containers,
        Err(e) => {
            writeln!(err, "{}", e)?;
            return Ok(0);
        }
    };

    debug!("backend {} returned {} container(s)", backend, containers.len());
    print_containers(&containers, out)?;

    Ok(containers.len())
}
