//! Strapi-style query parameters.
//!
//! Pairs are passed to `reqwest::RequestBuilder::query`, which
//! percent-encodes the bracket syntax; the store decodes it back.

/// Largest page the store is asked for when listing records.
pub const LIST_LIMIT: u32 = 100;

/// `filters[{field}][$eq]={value}`
pub fn eq_filter(field: &str, value: &str) -> (String, String) {
    (format!("filters[{field}][$eq]"), value.to_string())
}

/// Highest `field` first, one record only.
pub fn latest_by(field: &str) -> Vec<(String, String)> {
    vec![
        ("sort".to_string(), format!("{field}:desc")),
        ("pagination[limit]".to_string(), "1".to_string()),
    ]
}

/// Optional equality filter plus the list page cap.
pub fn list(filter: Option<(&str, &str)>) -> Vec<(String, String)> {
    let mut params: Vec<_> = filter
        .map(|(field, value)| eq_filter(field, value))
        .into_iter()
        .collect();
    params.push(("pagination[limit]".to_string(), LIST_LIMIT.to_string()));
    params
}
