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

use std::env;

use backend_client::{Backend, Client, DEFAULT_ADDRESS};

/// Make sure the backend daemon is running before running this example.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let backend = Backend::from_args(env::args().nth(1)).expect("Invalid backend name");

    let client = Client::from_path(DEFAULT_ADDRESS)
        .await
        .expect("Connect failed");

    let containers = client
        .list(&backend, false)
        .await
        .expect("Failed to list containers");

    for container in containers {
        let (group, name) = container.group_and_name();
        println!("{} {} ({}/{})", container.id, container.image, group, name);
    }
}
