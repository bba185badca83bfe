/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

/// The caller-side authorization check performed before any mutating call.
///
/// The core never consults this itself; [`CounterClient`](crate::client::CounterClient)
/// evaluates it once per `increment`/`add` before touching the transport.
pub trait Authorizer: Send + Sync {
    /// Returns `true` if the current request carries an active, valid session.
    fn has_active_session(&self) -> bool;
}

impl Authorizer for bool {
    fn has_active_session(&self) -> bool {
        *self
    }
}
