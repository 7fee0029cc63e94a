//! Query string helpers

use url::form_urlencoded;

/// First value of query parameter `name`, percent-decoded
pub fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
