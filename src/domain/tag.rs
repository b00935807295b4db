use crate::domain::Version;
use regex::Regex;
use std::sync::OnceLock;

/// Release tags look like `v1.2.3` and nothing else.
const VERSION_TAG_PATTERN: &str = r"^v\d+\.\d+\.\d+$";

fn version_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_TAG_PATTERN).expect("version tag pattern is valid"))
}

/// Check if the tag follows the `vX.Y.Z` format
pub fn is_valid_version_tag(tag: &str) -> bool {
    version_tag_regex().is_match(tag)
}

/// Strip a `git describe` suffix from a tag.
///
/// `v1.0.0-7-g73abd8e` -> `v1.0.0`. Tags without a `-` are returned as-is.
pub fn base_tag(described: &str) -> &str {
    let trimmed = described.trim();
    match trimmed.split_once('-') {
        Some((base, _)) => base,
        None => trimmed,
    }
}

/// Pick the highest release tag out of a tag listing.
///
/// Anything that is not a bare `vX.Y.Z` tag is ignored.
pub fn latest_version_tag<'a, I>(tags: I) -> Option<(Version, String)>
where
    I: IntoIterator<Item = &'a str>,
{
    tags.into_iter()
        .filter_map(|tag| Version::from_tag(tag).ok().map(|v| (v, tag.to_string())))
        .max_by(|(a, _), (b, _)| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_version_tags() {
        for tag in ["v0.0.0", "v1.2.3", "v10.20.30", "v01.2.3"] {
            assert!(is_valid_version_tag(tag), "rejected {}", tag);
        }
    }

    #[test]
    fn test_invalid_version_tags() {
        for tag in [
            "1.2.3",
            "V1.2.3",
            "v1.2",
            "v1.2.3.4",
            "v1.2.x",
            "v1.2.3-rc.1",
            "release-1.2.3",
            "v1..3",
            " v1.2.3",
            "",
        ] {
            assert!(!is_valid_version_tag(tag), "accepted {:?}", tag);
        }
    }

    #[test]
    fn test_base_tag_strips_describe_suffix() {
        assert_eq!(base_tag("v1.0.0-7-g73abd8e"), "v1.0.0");
        assert_eq!(base_tag("v1.0.0-7-gabc123\n"), "v1.0.0");
    }

    #[test]
    fn test_base_tag_passthrough() {
        assert_eq!(base_tag("v1.0.0"), "v1.0.0");
        assert_eq!(base_tag("  v2.3.4\n"), "v2.3.4");
    }

    #[test]
    fn test_latest_version_tag_uses_numeric_order() {
        let tags = ["v1.9.0", "v1.10.0", "v1.2.0", "nightly", "v2.0.0-rc1"];
        let (version, tag) = latest_version_tag(tags).unwrap();
        assert_eq!(version, Version::new(1, 10, 0));
        assert_eq!(tag, "v1.10.0");
    }

    #[test]
    fn test_latest_version_tag_none() {
        assert!(latest_version_tag(["nightly", "latest"]).is_none());
        assert!(latest_version_tag(Vec::<&str>::new()).is_none());
    }
}
