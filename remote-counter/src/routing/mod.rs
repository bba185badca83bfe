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

//! The routing front door and the request/response types it speaks.
//!
//! # Routes
//!
//! | Method | Path                          | Action                    |
//! |--------|-------------------------------|---------------------------|
//! | GET    | `/counter/{name}`             | read the value            |
//! | POST   | `/counter/{name}[/increment]` | add one                   |
//! | POST   | `/counter/{name}/add`         | add `{"amount": n}`       |
//!
//! Anything else is `404 {"error": "Not found"}`. An empty name means
//! `default`; names longer than 50 characters are rejected with `400`.

pub use front_door::FrontDoor;
pub use request::CounterRequest;
pub use response::CounterResponse;
pub use route::{Route, RouteAction};

/// Defines [`FrontDoor`].
mod front_door;
/// Defines [`CounterRequest`].
mod request;
/// Defines [`CounterResponse`].
mod response;
/// Defines [`Route`] parsing.
mod route;
