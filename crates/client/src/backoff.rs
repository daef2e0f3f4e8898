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

//! Retry delays for dialing the daemon socket.

use std::time::Duration;

/// Exponential backoff policy.
///
/// `max_retries` counts retries, not attempts: a policy with `max_retries = 2`
/// dials up to three times.
#[derive(Debug, Clone, PartialEq)]
pub struct Backoff {
    /// Delay before the first retry.
    pub initial: Duration,
    /// Upper bound for any single delay.
    pub max: Duration,
    /// Growth factor applied after each retry.
    pub multiplier: f64,
    pub max_retries: u32,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(100),
            max: Duration::from_secs(5),
            multiplier: 2.0,
            max_retries: 0,
        }
    }
}

impl Backoff {
    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Delays to sleep between consecutive attempts.
    pub fn delays(&self) -> Delays<'_> {
        Delays {
            policy: self,
            retry: 0,
        }
    }
}

/// Iterator returned by [Backoff::delays].
#[derive(Debug)]
pub struct Delays<'a> {
    policy: &'a Backoff,
    retry: u32,
}

impl Iterator for Delays<'_> {
    type Item = Duration;

    fn next(&mut self) -> Option<Self::Item> {
        if self.retry >= self.policy.max_retries {
            return None;
        }

        let factor = self.policy.multiplier.powi(self.retry as i32);
        let delay = self.policy.initial.as_secs_f64() * factor;
        self.retry += 1;

        // Overflow saturates to infinity and is capped. A negative or NaN
        // delay comes from a nonsensical multiplier and falls back to the cap.
        let max = self.policy.max.as_secs_f64();
        if delay.is_nan() || delay < 0.0 {
            return Some(self.policy.max);
        }
        Some(Duration::from_secs_f64(delay.min(max)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.policy.max_retries - self.retry) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Delays<'_> {}
