//! Request URI construction shared by the HTTP transport and diagnostics.

use url::Url;

pub use url::ParseError;

/// Join `path` onto `base` and append `pairs` as the query string.
///
/// The base is treated as a directory even without a trailing slash, so
/// `https://host/v2` + `coupons` yields `https://host/v2/coupons`.
/// An empty `pairs` slice produces a URI without a `?`.
pub fn query_uri<K, V>(base: &str, path: &str, pairs: &[(K, V)]) -> Result<Url, ParseError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut base = Url::parse(base)?;
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }

    let mut url = base.join(path.trim_start_matches('/'))?;
    if !pairs.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(pairs.iter().map(|(k, v)| (k.as_ref(), v.as_ref())));
    }
    Ok(url)
}

/// Fallback text for a request whose URI could not be built.
pub fn raw_request<K, V>(path: &str, pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let query: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k.as_ref(), v.as_ref()))
        .collect();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_uri_joins_under_base_path() {
        let url = query_uri("https://api.example.com/v2", "coupons", &[("query", "pizza")]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v2/coupons?query=pizza");
    }

    #[test]
    fn test_query_uri_encodes_values() {
        let url = query_uri("https://api.example.com/v2/", "/coupons/7", &[("location", "new york")]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v2/coupons/7?location=new+york");
    }

    #[test]
    fn test_query_uri_without_pairs() {
        let pairs: [(&str, &str); 0] = [];
        let url = query_uri("https://api.example.com/v2", "coupons", &pairs).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v2/coupons");
    }

    #[test]
    fn test_query_uri_rejects_relative_base() {
        assert!(query_uri("not a url", "coupons", &[("a", "b")]).is_err());
    }

    #[test]
    fn test_raw_request() {
        assert_eq!(raw_request("coupons", &[("page", "2"), ("radius", "5")]), "coupons?page=2&radius=5");
        let pairs: [(&str, &str); 0] = [];
        assert_eq!(raw_request("coupons", &pairs), "coupons");
    }
}
