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

use http::Method;
use percent_encoding::percent_decode_str;

use crate::common::CounterName;
use crate::message::CounterError;

/// Every counter path starts with this prefix.
pub(crate) const COUNTER_PREFIX: &str = "/counter/";

/// What a matched route asks the counter to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteAction {
    /// `GET /counter/{name}`
    Get,
    /// `POST /counter/{name}` or `POST /counter/{name}/increment`
    Increment,
    /// `POST /counter/{name}/add`
    Add,
}

/// A parsed and validated counter route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// The validated counter name, `default` when the path omitted it.
    pub name: CounterName,
    /// The requested action.
    pub action: RouteAction,
}

impl Route {
    /// Parses `method` and `path` into a route.
    ///
    /// The name segment is percent-decoded and validated before the method is
    /// looked at, so an over-long name is rejected even on an unknown route.
    /// A single trailing slash is ignored and any query string is dropped.
    ///
    /// # Errors
    ///
    /// * [`CounterError::NotFound`] if the path lacks the `/counter/` prefix or
    ///   the method and suffix match no route.
    /// * [`CounterError::InvalidInput`] if the name is too long, is `.` or
    ///   `..`, or is not UTF-8.
    pub fn parse(method: &Method, path: &str) -> Result<Self, CounterError> {
        let path = path.split_once('?').map_or(path, |(path, _)| path);
        let rest = path
            .strip_prefix(COUNTER_PREFIX)
            .ok_or(CounterError::NotFound)?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let (raw_name, suffix) = match rest.split_once('/') {
            Some((name, suffix)) => (name, Some(suffix)),
            None => (rest, None),
        };
        let decoded = percent_decode_str(raw_name)
            .decode_utf8()
            .map_err(|_| CounterError::InvalidInput("Counter name must be valid UTF-8".to_string()))?;
        let name = CounterName::parse(Some(&*decoded))?;

        let action = match (method, suffix) {
            (&Method::GET, None) => RouteAction::Get,
            (&Method::POST, None | Some("increment")) => RouteAction::Increment,
            (&Method::POST, Some("add")) => RouteAction::Add,
            _ => return Err(CounterError::NotFound),
        };
        Ok(Self { name, action })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::DEFAULT_COUNTER_NAME;

    fn parse(method: Method, path: &str) -> Result<Route, CounterError> {
        Route::parse(&method, path)
    }

    #[test]
    fn matches_the_counter_routes() {
        let route = parse(Method::GET, "/counter/demo").unwrap();
        assert_eq!(route.name.as_str(), "demo");
        assert_eq!(route.action, RouteAction::Get);

        assert_eq!(parse(Method::POST, "/counter/demo").unwrap().action, RouteAction::Increment);
        assert_eq!(
            parse(Method::POST, "/counter/demo/increment").unwrap().action,
            RouteAction::Increment
        );
        assert_eq!(parse(Method::POST, "/counter/demo/add").unwrap().action, RouteAction::Add);
    }

    #[test]
    fn empty_name_means_default() {
        let route = parse(Method::GET, "/counter/").unwrap();
        assert_eq!(route.name.as_str(), DEFAULT_COUNTER_NAME);
        let route = parse(Method::POST, "/counter//increment").unwrap();
        assert_eq!(route.name.as_str(), DEFAULT_COUNTER_NAME);
    }

    #[test]
    fn unknown_paths_and_methods_are_not_found() {
        assert_eq!(parse(Method::GET, "/unknown"), Err(CounterError::NotFound));
        assert_eq!(parse(Method::GET, "/counter"), Err(CounterError::NotFound));
        assert_eq!(parse(Method::GET, "/counter/demo/increment"), Err(CounterError::NotFound));
        assert_eq!(parse(Method::DELETE, "/counter/demo"), Err(CounterError::NotFound));
        assert_eq!(parse(Method::POST, "/counter/demo/reset"), Err(CounterError::NotFound));
        assert_eq!(parse(Method::POST, "/counter/demo/add/more"), Err(CounterError::NotFound));
    }

    #[test]
    fn names_are_decoded_before_validation() {
        let route = parse(Method::GET, "/counter/hello%20world?x=1").unwrap();
        assert_eq!(route.name.as_str(), "hello world");
        assert_eq!(parse(Method::GET, "/counter/demo/").unwrap().name.as_str(), "demo");

        let too_long = "x".repeat(51);
        assert!(matches!(
            parse(Method::GET, &format!("/counter/{too_long}")),
            Err(CounterError::InvalidInput(_))
        ));
        assert!(matches!(
            parse(Method::GET, "/counter/%FF"),
            Err(CounterError::InvalidInput(_))
        ));
    }

    #[test]
    fn dot_segment_names_are_rejected() {
        for path in ["/counter/%2E", "/counter/%2e%2E/increment", "/counter/./add"] {
            assert!(matches!(
                parse(Method::POST, path),
                Err(CounterError::InvalidInput(_))
            ));
        }
        assert_eq!(parse(Method::GET, "/counter/a.b").unwrap().name.as_str(), "a.b");
    }
}
