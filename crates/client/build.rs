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

const PROTO_FILES: &[&str] =
    &["vendor/github.com/docker/api/protos/containers/v1/containers.proto"];

fn main() {
    // Prefer an explicitly configured protoc, fall back to the vendored binary.
    if env::var_os("PROTOC").is_none() {
        let protoc = protoc_bin_vendored::protoc_bin_path().expect("Failed to locate protoc");
        env::set_var("PROTOC", protoc);
    }

    // The server half is only used by the in-process test daemon.
    tonic_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_protos(PROTO_FILES, &["vendor/"])
        .expect("Failed to generate GRPC bindings");

    for file in PROTO_FILES {
        println!("cargo:rerun-if-changed={}", file);
    }
}
