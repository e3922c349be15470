/// Placeholder shown when a gallery record has no resolvable image keys or no
/// CDN base is configured.
pub const FALLBACK_IMAGE_URL: &str =
    "https://placehold.co/800x600?text=Decora";
