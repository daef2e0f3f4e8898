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

use backend_client::{Backoff, ConnectOptions, DEFAULT_ADDRESS};
use clap::{ArgAction, Parser};
use log::LevelFilter;

/// List the containers of a daemon backend.
#[derive(Debug, Parser)]
#[command(name = "backend-list", version)]
pub struct Args {
    /// Backend the daemon routes the request to [default: moby]
    pub backend: Option<String>,

    /// Path to the daemon socket
    #[arg(long, env = "BACKEND_SOCKET", default_value = DEFAULT_ADDRESS)]
    pub address: PathBuf,

    /// Show all containers, not only running ones
    #[arg(short, long)]
    pub all: bool,

    /// Request deadline in seconds, 0 disables it
    #[arg(long, default_value_t = 0)]
    pub timeout: u64,

    /// Dial retries before giving up
    #[arg(long, default_value_t = 0)]
    pub retries: u32,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn connect_options(&self) -> ConnectOptions {
        let timeout = (self.timeout > 0).then(|| Duration::from_secs(self.timeout));

        ConnectOptions {
            connect_timeout: timeout,
            request_timeout: timeout,
            backoff: Backoff::retries(self.retries),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
