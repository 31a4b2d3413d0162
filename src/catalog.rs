use serde::{Deserialize, Serialize};
use std::fmt;

/// Converter pages known at build time. Each one owns a cached resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConverterId {
    #[serde(rename = "mp4-to-mkv")]
    Mp4ToMkv,
    #[serde(rename = "mkv-to-mp4")]
    MkvToMp4,
    #[serde(rename = "mov-to-mp4")]
    MovToMp4,
    #[serde(rename = "mp4-to-webm")]
    Mp4ToWebm,
    #[serde(rename = "avi-to-mp4")]
    AviToMp4,
    #[serde(rename = "webm-to-mp4")]
    WebmToMp4,
}

impl ConverterId {
    pub const ALL: [ConverterId; 6] = [
        ConverterId::Mp4ToMkv,
        ConverterId::MkvToMp4,
        ConverterId::MovToMp4,
        ConverterId::Mp4ToWebm,
        ConverterId::AviToMp4,
        ConverterId::WebmToMp4,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConverterId::Mp4ToMkv => "mp4-to-mkv",
            ConverterId::MkvToMp4 => "mkv-to-mp4",
            ConverterId::MovToMp4 => "mov-to-mp4",
            ConverterId::Mp4ToWebm => "mp4-to-webm",
            ConverterId::AviToMp4 => "avi-to-mp4",
            ConverterId::WebmToMp4 => "webm-to-mp4",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Upper-cased source and target formats, from splitting the id on `-`.
    pub fn formats(self) -> (String, String) {
        split_formats(self.as_str())
    }

    pub fn source_format(self) -> String { self.formats().0 }
    pub fn target_format(self) -> String { self.formats().1 }

    /// Route of the matching converter tool page, e.g. `/tools/mkv-mp4`.
    pub fn tool_path(self) -> String {
        let (from, to) = self.formats();
        format!("/tools/{}-{}", from.to_ascii_lowercase(), to.to_ascii_lowercase())
    }
}

impl fmt::Display for ConverterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.pad(self.as_str()) }
}

/// `"mkv-to-mp4"` -> `("MKV", "MP4")`. A single-part id maps to itself on both sides.
pub(crate) fn split_formats(id: &str) -> (String, String) {
    let parts: Vec<&str> = id.split('-').collect();
    let from = parts.first().copied().unwrap_or_default().to_ascii_uppercase();
    let to = parts.get(2).or(parts.last()).copied().unwrap_or_default().to_ascii_uppercase();
    (from, to)
}

/// Names one cacheable content family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKey {
    Hero,
    Company,
    Converter(ConverterId),
    Ads,
}

impl ResourceKey {
    /// Every key the orchestrator knows about: home content, company profile,
    /// each converter page, then the ad inventory.
    pub fn all() -> Vec<ResourceKey> {
        let mut keys = Vec::with_capacity(ConverterId::ALL.len() + 3);
        keys.push(ResourceKey::Hero);
        keys.push(ResourceKey::Company);
        keys.extend(ConverterId::ALL.into_iter().map(ResourceKey::Converter));
        keys.push(ResourceKey::Ads);
        keys
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResourceKey::Hero => "hero",
            ResourceKey::Company => "company",
            ResourceKey::Converter(c) => c.as_str(),
            ResourceKey::Ads => "ads",
        }
    }

    /// Resolve a key by name. Unknown names (including unknown converter ids)
    /// yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hero" | "home" => Some(ResourceKey::Hero),
            "company" => Some(ResourceKey::Company),
            "ads" => Some(ResourceKey::Ads),
            other => ConverterId::parse(other).map(ResourceKey::Converter),
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.pad(self.name()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_cover_every_family_once() {
        let keys = ResourceKey::all();
        assert_eq!(keys.len(), 9);
        assert_eq!(keys.first(), Some(&ResourceKey::Hero));
        assert_eq!(keys.last(), Some(&ResourceKey::Ads));
        let mut names: Vec<_> = keys.iter().map(|k| k.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 9);
    }

    #[test]
    fn parse_accepts_known_names_only() {
        assert_eq!(ResourceKey::parse("hero"), Some(ResourceKey::Hero));
        assert_eq!(ResourceKey::parse(" Company "), Some(ResourceKey::Company));
        assert_eq!(ResourceKey::parse("mkv-to-mp4"), Some(ResourceKey::Converter(ConverterId::MkvToMp4)));
        assert_eq!(ResourceKey::parse("flac-to-mp3"), None);
        assert_eq!(ResourceKey::parse(""), None);
    }

    #[test]
    fn formats_split_on_dash() {
        assert_eq!(ConverterId::MkvToMp4.formats(), ("MKV".to_string(), "MP4".to_string()));
        assert_eq!(ConverterId::Mp4ToWebm.target_format(), "WEBM");
        assert_eq!(ConverterId::WebmToMp4.tool_path(), "/tools/webm-mp4");
        assert_eq!(split_formats("gif"), ("GIF".to_string(), "GIF".to_string()));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for c in ConverterId::ALL {
            assert_eq!(ConverterId::parse(&c.to_string()), Some(c));
        }
    }
}
