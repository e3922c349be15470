use crate::shared::constants::FALLBACK_IMAGE_URL;

/// Resolve stored object keys to public image URLs.
///
/// Absolute URLs pass through untouched. Relative keys are joined onto the
/// CDN base when one is configured, otherwise served as-is. An empty key list
/// resolves to the placeholder image.
pub fn resolve_image_urls(keys: &[String], cdn_base: Option<&str>) -> Vec<String> {
    let keys: Vec<&String> = keys.iter().filter(|k| !k.is_empty()).collect();
    if keys.is_empty() {
        return vec![FALLBACK_IMAGE_URL.to_string()];
    }

    let base = cdn_base.map(|b| b.trim_end_matches('/'));

    keys.into_iter()
        .map(|key| {
            if key.starts_with("http://") || key.starts_with("https://") {
                return key.clone();
            }
            match base {
                Some(base) => format!("{}/{}", base, key.trim_start_matches('/')),
                None => key.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_keys_resolve_to_placeholder() {
        assert_eq!(
            resolve_image_urls(&[], Some("https://cdn.example.com")),
            vec![FALLBACK_IMAGE_URL.to_string()]
        );
        assert_eq!(
            resolve_image_urls(&keys(&[""]), None),
            vec![FALLBACK_IMAGE_URL.to_string()]
        );
    }

    #[test]
    fn relative_keys_join_the_cdn_base() {
        assert_eq!(
            resolve_image_urls(
                &keys(&["public/gallery/a.jpg", "/public/gallery/b.jpg"]),
                Some("https://cdn.example.com/")
            ),
            vec![
                "https://cdn.example.com/public/gallery/a.jpg",
                "https://cdn.example.com/public/gallery/b.jpg"
            ]
        );
    }

    #[test]
    fn absolute_urls_pass_through() {
        assert_eq!(
            resolve_image_urls(
                &keys(&["https://elsewhere.example.com/x.png"]),
                Some("https://cdn.example.com")
            ),
            vec!["https://elsewhere.example.com/x.png"]
        );
    }

    #[test]
    fn missing_base_serves_keys_unchanged() {
        assert_eq!(
            resolve_image_urls(&keys(&["public/gallery/a.jpg"]), None),
            vec!["public/gallery/a.jpg"]
        );
    }
}
