//! Page location handling: platform detection and query-string parameters

use regex::Regex;

/// Environment the dashboard page is hosted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Loaded from the app bundle inside a native shell (no http/https URL)
    NativeShell,
    /// Served over HTTP to a plain browser or desktop webview
    Browser,
}

/// The URL of the page hosting the dashboard.
///
/// All query-string reads (`ip`, `skin`) and the platform detection are
/// derived from this single URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    url: String,
}

impl PageLocation {
    /// Create a location from a full page URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Full page URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Detect the hosting platform.
    ///
    /// Any URL mentioning `http://` or `https://` is treated as browser-hosted;
    /// everything else (`file://`, app bundle schemes) is a native shell.
    pub fn platform(&self) -> Platform {
        if self.url.contains("http://") || self.url.contains("https://") {
            Platform::Browser
        } else {
            Platform::NativeShell
        }
    }

    /// Whether the page runs inside a native app shell.
    pub fn is_native_shell(&self) -> bool {
        self.platform() == Platform::NativeShell
    }

    /// Query string including the leading `?`, without the fragment.
    ///
    /// Empty when the URL has no query.
    pub fn search(&self) -> &str {
        let without_fragment = match self.url.find('#') {
            Some(idx) => &self.url[..idx],
            None => &self.url,
        };
        match without_fragment.find('?') {
            Some(idx) => &without_fragment[idx..],
            None => "",
        }
    }

    /// Host name of the page, without port. Empty if the URL has no host.
    pub fn host_name(&self) -> String {
        reqwest::Url::parse(&self.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_default()
    }

    /// Read a single query-string parameter, see [`query_parameter`].
    pub fn parameter(&self, name: &str) -> String {
        query_parameter(self.search(), name)
    }
}

/// Read parameter `name` from a query string such as `?ip=10.0.0.2&skin=x`.
///
/// The first `name=value` pair wins. The value is URL-decoded with `+` read as
/// a space. Returns an empty string when the parameter is absent or its value
/// is not valid percent-encoded UTF-8.
pub fn query_parameter(search: &str, name: &str) -> String {
    let pattern = format!(r"[?&]{}=([^&#]*)", regex::escape(name));
    let Ok(regex) = Regex::new(&pattern) else {
        return String::new();
    };

    regex
        .captures(search)
        .and_then(|captures| captures.get(1))
        .and_then(|value| {
            urlencoding::decode(&value.as_str().replace('+', " "))
                .ok()
                .map(|decoded| decoded.into_owned())
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_present_and_absent() {
        let location = PageLocation::new("http://myhost:25555/index.html?ip=192.168.1.5&skin=truck1");
        assert_eq!(location.parameter("ip"), "192.168.1.5");
        assert_eq!(location.parameter("skin"), "truck1");

        let location = PageLocation::new("http://myhost:25555/index.html?skin=truck1");
        assert_eq!(location.parameter("ip"), "");
    }

    #[test]
    fn test_parameter_requires_exact_name() {
        assert_eq!(query_parameter("?vip=1.2.3.4", "ip"), "");
        assert_eq!(query_parameter("?ip2=1.2.3.4", "ip"), "");
        assert_eq!(query_parameter("?vip=1&ip=2", "ip"), "2");
    }

    #[test]
    fn test_parameter_first_occurrence_wins() {
        assert_eq!(query_parameter("?skin=a&skin=b", "skin"), "a");
    }

    #[test]
    fn test_parameter_decoding() {
        assert_eq!(query_parameter("?skin=my+skin", "skin"), "my skin");
        assert_eq!(query_parameter("?skin=my%20skin", "skin"), "my skin");
        assert_eq!(query_parameter("?skin=a%2Bb", "skin"), "a+b");
        assert_eq!(query_parameter("?skin=%D0%BA%D0%B0%D0%BC%D0%B0%D0%B7", "skin"), "камаз");
    }

    #[test]
    fn test_parameter_invalid_encoding_is_absent() {
        assert_eq!(query_parameter("?skin=%FF%FE", "skin"), "");
    }

    #[test]
    fn test_parameter_empty_value() {
        assert_eq!(query_parameter("?ip=&skin=x", "ip"), "");
    }

    #[test]
    fn test_parameter_name_with_brackets() {
        assert_eq!(query_parameter("?ids[]=7&x=1", "ids[]"), "7");
        assert_eq!(query_parameter("?ids=7", "ids[]"), "");
    }

    #[test]
    fn test_parameter_name_is_literal() {
        // '.' must not act as a wildcard
        assert_eq!(query_parameter("?aXb=1", "a.b"), "");
        assert_eq!(query_parameter("?a.b=1", "a.b"), "1");
    }

    #[test]
    fn test_search_excludes_fragment() {
        let location = PageLocation::new("http://host/page.html?skin=x#ip=9.9.9.9");
        assert_eq!(location.search(), "?skin=x");
        assert_eq!(location.parameter("ip"), "");

        let location = PageLocation::new("http://host/page.html#top");
        assert_eq!(location.search(), "");
    }

    #[test]
    fn test_platform_detection() {
        let native = PageLocation::new("file:///android_asset/www/index.html");
        assert_eq!(native.platform(), Platform::NativeShell);
        assert!(native.is_native_shell());

        let browser = PageLocation::new("http://myhost:25555/dashboard.html");
        assert_eq!(browser.platform(), Platform::Browser);

        let secure = PageLocation::new("https://myhost/dashboard.html");
        assert_eq!(secure.platform(), Platform::Browser);
    }

    #[test]
    fn test_host_name() {
        assert_eq!(
            PageLocation::new("http://myhost:25555/dashboard.html").host_name(),
            "myhost"
        );
        assert_eq!(
            PageLocation::new("http://192.168.0.10/index.html?skin=x").host_name(),
            "192.168.0.10"
        );
        assert_eq!(
            PageLocation::new("file:///android_asset/www/index.html").host_name(),
            ""
        );
    }
}
