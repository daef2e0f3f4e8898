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

use std::fmt;

use crate::api;

/// Container name used by the ACI backend for single-container groups.
pub const SINGLE_CONTAINER_NAME: &str = "single--container--aci";

/// Published port of a container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortMapping {
    pub host_ip: String,
    pub host_port: u32,
    pub container_port: u32,
    pub protocol: String,
}

impl From<api::Port> for PortMapping {
    fn from(port: api::Port) -> Self {
        Self {
            host_ip: port.host_ip,
            host_port: port.host_port,
            container_port: port.container_port,
            protocol: port.protocol,
        }
    }
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.host_ip.is_empty() {
            write!(f, "{}:", self.host_ip)?;
        }
        write!(f, "{}->{}", self.host_port, self.container_port)?;
        if !self.protocol.is_empty() {
            write!(f, "/{}", self.protocol)?;
        }
        Ok(())
    }
}

/// Container record as returned by `Containers/List`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerSummary {
    pub id: String,
    pub image: String,
    pub status: String,
    pub command: String,
    pub labels: Vec<String>,
    pub ports: Vec<PortMapping>,
}

impl ContainerSummary {
    /// Split an ACI container id into its group and container name.
    ///
    /// `compose_stack_web` belongs to group `compose_stack`; an id without
    /// `_` is a group holding a single container.
    pub fn group_and_name(&self) -> (&str, &str) {
        match self.id.rsplit_once('_') {
            Some((group, name)) => (group, name),
            None => (self.id.as_str(), SINGLE_CONTAINER_NAME),
        }
    }
}

impl From<api::Container> for ContainerSummary {
    fn from(container: api::Container) -> Self {
        Self {
            id: container.id,
            image: container.image,
            status: container.status,
            command: container.command,
            labels: container.labels,
            ports: container.ports.into_iter().map(PortMapping::from).collect(),
        }
    }
}

/// Decode a list response, keeping the server's order.
pub fn decode_list(resp: api::ListResponse) -> Vec<ContainerSummary> {
    resp.containers
        .into_iter()
        .map(ContainerSummary::from)
        .collect()
}
