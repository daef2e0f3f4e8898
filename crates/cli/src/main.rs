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

use std::io;
use std::process::ExitCode;

use backend_client::{Backend, Client, Result};
use clap::Parser;
use log::{debug, error};

mod args;
mod list;
mod logger;

use args::Args;

async fn run(args: Args) -> Result<()> {
    let backend = Backend::from_args(args.backend.clone())?;
    let client = Client::connect_with(&args.address, &args.connect_options()).await?;

    debug!(
        "connected to {}, listing backend {}",
        args.address.display(),
        backend
    );

    let stdout = io::stdout();
    let stderr = io::stderr();
    list::list_and_print(
        &client,
        &backend,
        args.all,
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
    .await?;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = logger::init(args.log_level()) {
        eprintln!("{}", err);
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
