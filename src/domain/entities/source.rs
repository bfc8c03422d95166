//! Image source identity types.

/// Unique identifier for an image resource.
/// Generated from a hash of the source URL or path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageId(pub String);

impl ImageId {
    /// Creates a new `ImageId` from any string-like input.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates an `ImageId` from a URL by hashing it.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let result = hasher.finalize();
        Self(hex::encode(&result[..16]))
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which of the two configured sources is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// The originally requested source.
    #[default]
    Primary,
    /// The alternate source used after the primary is exhausted.
    Fallback,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// A validated (primary, fallback) source pair.
///
/// The primary source is immutable for the pair's lifetime; the fallback is
/// optional. A load is keyed by the whole pair: changing either member means
/// starting a fresh retry cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    primary: String,
    fallback: Option<String>,
}

impl SourceSet {
    /// Creates a source pair from a primary source and an optional fallback.
    ///
    /// Returns `None` if the primary source is empty or whitespace. An empty
    /// fallback is normalized to no fallback.
    #[must_use]
    pub fn new(primary: impl Into<String>, fallback: Option<String>) -> Option<Self> {
        let primary = primary.into();
        if primary.trim().is_empty() {
            return None;
        }
        let fallback = fallback.filter(|f| !f.trim().is_empty());
        Some(Self { primary, fallback })
    }

    /// Returns the primary source.
    #[must_use]
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// Returns the fallback source, if configured.
    #[must_use]
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// Returns the URL for the given source kind.
    ///
    /// Asking for [`SourceKind::Fallback`] when no fallback is configured
    /// yields the primary; callers never switch to a fallback that does not
    /// exist.
    #[must_use]
    pub fn url(&self, kind: SourceKind) -> &str {
        match kind {
            SourceKind::Primary => &self.primary,
            SourceKind::Fallback => self.fallback.as_deref().unwrap_or(&self.primary),
        }
    }

    /// Returns true if a fallback exists and differs from the primary.
    ///
    /// An identical fallback would re-request the same resource, so it is
    /// treated as absent.
    #[must_use]
    pub fn has_distinct_fallback(&self) -> bool {
        self.fallback.as_deref().is_some_and(|f| f != self.primary)
    }

    /// Returns the identity key for this pair.
    ///
    /// Two pairs with the same identity share retry state; a differing
    /// identity requires a fresh load cycle.
    #[must_use]
    pub fn identity(&self) -> String {
        format!("{}|{}", self.primary, self.fallback.as_deref().unwrap_or(""))
    }

    /// Returns the cache identity of the primary source.
    #[must_use]
    pub fn primary_id(&self) -> ImageId {
        ImageId::from_url(&self.primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_id_from_url() {
        let id = ImageId::from_url("https://example.com/products/tv.png");
        assert!(!id.0.is_empty());
        assert_eq!(id.0.len(), 32);
    }

    #[test]
    fn test_image_id_consistency() {
        let url = "https://example.com/image.png";
        assert_eq!(ImageId::from_url(url), ImageId::from_url(url));
    }

    #[test]
    fn test_empty_primary_rejected() {
        assert!(SourceSet::new("", None).is_none());
        assert!(SourceSet::new("   ", None).is_none());
    }

    #[test]
    fn test_empty_fallback_normalized() {
        let sources = SourceSet::new("/img/a.png", Some(String::new())).unwrap();
        assert_eq!(sources.fallback(), None);
        assert!(!sources.has_distinct_fallback());
    }

    #[test]
    fn test_identical_fallback_not_distinct() {
        let sources = SourceSet::new("/img/a.png", Some("/img/a.png".to_string())).unwrap();
        assert!(sources.fallback().is_some());
        assert!(!sources.has_distinct_fallback());
    }

    #[test]
    fn test_url_lookup() {
        let sources = SourceSet::new("/img/a.png", Some("/img/b.png".to_string())).unwrap();
        assert_eq!(sources.url(SourceKind::Primary), "/img/a.png");
        assert_eq!(sources.url(SourceKind::Fallback), "/img/b.png");
    }

    #[test]
    fn test_identity_distinguishes_pairs() {
        let a = SourceSet::new("/img/a.png", Some("/img/b.png".to_string())).unwrap();
        let b = SourceSet::new("/img/a.png", Some("/img/c.png".to_string())).unwrap();
        let c = SourceSet::new("/img/a.png", None).unwrap();
        assert_ne!(a.identity(), b.identity());
        assert_ne!(a.identity(), c.identity());
        assert_eq!(a.identity(), a.clone().identity());
    }
}
