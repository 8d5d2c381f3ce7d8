use serde::Serialize;

/// Supported resource kinds, classified by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Png,
    Gif,
    Tiff,
    Bmp,
    Jpeg,
}

impl ResourceKind {
    /// Every supported kind, in declaration order
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Png,
        ResourceKind::Gif,
        ResourceKind::Tiff,
        ResourceKind::Bmp,
        ResourceKind::Jpeg,
    ];

    /// Canonical extension, including the leading dot
    pub fn extension(self) -> &'static str {
        match self {
            ResourceKind::Png => ".png",
            ResourceKind::Gif => ".gif",
            ResourceKind::Tiff => ".tif",
            ResourceKind::Bmp => ".bmp",
            ResourceKind::Jpeg => ".jpg",
        }
    }

    /// Classify a bare extension (without the dot), case-insensitively
    pub fn from_extension(ext: &str) -> Option<ResourceKind> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ResourceKind::Png),
            "gif" => Some(ResourceKind::Gif),
            "tif" | "tiff" => Some(ResourceKind::Tiff),
            "bmp" => Some(ResourceKind::Bmp),
            "jpg" | "jpeg" => Some(ResourceKind::Jpeg),
            _ => None,
        }
    }

    /// Classify a resource name by its extension
    pub fn from_name(name: &str) -> Option<ResourceKind> {
        crate::naming::extension(name).and_then(ResourceKind::from_extension)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Png => write!(f, "png"),
            ResourceKind::Gif => write!(f, "gif"),
            ResourceKind::Tiff => write!(f, "tiff"),
            ResourceKind::Bmp => write!(f, "bmp"),
            ResourceKind::Jpeg => write!(f, "jpeg"),
        }
    }
}

/// The resolution step that produced a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Filesystem,
    Bundled,
    Packaged,
    Remote,
    Fallback,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Filesystem => write!(f, "filesystem"),
            Strategy::Bundled => write!(f, "bundled"),
            Strategy::Packaged => write!(f, "packaged"),
            Strategy::Remote => write!(f, "remote"),
            Strategy::Fallback => write!(f, "fallback"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(ResourceKind::from_name("icons/logo.png"), Some(ResourceKind::Png));
        assert_eq!(ResourceKind::from_name("photo.JPEG"), Some(ResourceKind::Jpeg));
        assert_eq!(ResourceKind::from_name("scan.tif"), Some(ResourceKind::Tiff));
        assert_eq!(ResourceKind::from_name("scan.tiff"), Some(ResourceKind::Tiff));
        assert_eq!(ResourceKind::from_name("notes.txt"), None);
        assert_eq!(ResourceKind::from_name("Makefile"), None);
    }

    #[test]
    fn test_extension_round_trips_through_classifier() {
        for kind in ResourceKind::ALL {
            let name = format!("image{}", kind.extension());
            assert_eq!(ResourceKind::from_name(&name), Some(kind));
        }
    }

    #[test]
    fn test_strategy_serializes_lowercase() {
        let json = serde_json::to_string(&Strategy::Packaged).unwrap();
        assert_eq!(json, "\"packaged\"");
    }
}
