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

use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Install the stderr logger. Stdout carries the container list only.
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    SimpleLogger::new().with_level(level).init()
}
