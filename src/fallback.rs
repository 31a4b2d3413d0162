//! Hard-coded substitute payloads used when a live fetch fails and nothing is
//! cached yet. Each builder returns the same type the live API decodes into.

use serde_json::Map;

use crate::catalog::{ConverterId, ResourceKey};
use crate::types::{
    AdGlobalSettings, AdInventory, CompanyProfile, ConversionStep, ConverterContent, ConverterHero, HeroBlock,
    HomeContent, Payload, SocialLinks, WaysBlock,
};

pub const DEFAULT_COMPANY_NAME: &str = "Foxbeep";
pub const DEFAULT_FAVICON: &str = "/favicon.ico";
pub const DEFAULT_TWITTER: &str = "@foxbeeptech";

const HERO_IMAGE: &str = "https://cdn-site-assets.veed.io/cdn-cgi/image/width=1024,quality=75,format=auto/MKV_to_MP_4_bdd29d1ce7/MKV_to_MP_4_bdd29d1ce7.png";
const CONVERTER_HERO_IMAGE: &str = "https://res.cloudinary.com/dg5aeihzx/image/upload/v1748482965/hero-/ihufiif0lfp1cns7bwrp.png";
const WAYS_IMAGE: &str = "https://cdn-site-assets.veed.io/cdn-cgi/image/width=768,quality=75,format=auto/How_to_Convert_GIF_to_MP_4_7dc8870b16/How_to_Convert_GIF_to_MP_4_7dc8870b16.png";

/// Deterministic fallback for any key.
pub fn payload_for(key: &ResourceKey) -> Payload {
    match key {
        ResourceKey::Hero => Payload::Home(home()),
        ResourceKey::Company => Payload::Company(company()),
        ResourceKey::Converter(id) => Payload::Converter(converter(*id)),
        ResourceKey::Ads => Payload::Ads(ads()),
    }
}

pub fn home() -> HomeContent {
    HomeContent {
        hero: HeroBlock {
            title: "Transform Your Video Formats".to_string(),
            description: "Convert between MP4, WebM, MOV, MKV and more with blazing-fast speed and uncompromising quality.".to_string(),
            image: HERO_IMAGE.to_string(),
            image_alt: "Video Formats Illustration".to_string(),
            features: ["Blazing Fast", "High Quality", "100% Free", "Batch Processing"].map(String::from).to_vec(),
        },
        extra: Map::new(),
    }
}

pub fn company() -> CompanyProfile {
    CompanyProfile {
        company_name: DEFAULT_COMPANY_NAME.to_string(),
        favicon: Some(DEFAULT_FAVICON.to_string()),
        logo: None,
        social_links: SocialLinks {
            twitter: Some(DEFAULT_TWITTER.to_string()),
            facebook: Some("https://facebook.com/foxbeep".to_string()),
            instagram: Some("https://instagram.com/foxbeep".to_string()),
            linkedin: Some("https://linkedin.com/company/foxbeep".to_string()),
            youtube: None,
        },
        extra: Map::new(),
    }
}

/// "Convert X to Y" copy built from the converter id.
pub fn converter(id: ConverterId) -> ConverterContent {
    let (from, to) = id.formats();
    ConverterContent {
        hero: ConverterHero {
            title: format!("{from} to {to} Converter"),
            description: format!(
                "Convert your {from} files to {to} format with our lightning-fast converter. No quality loss, no watermarks."
            ),
            image: CONVERTER_HERO_IMAGE.to_string(),
            image_alt: format!("{from} to {to} converter illustration"),
        },
        ways: WaysBlock {
            title: format!("How to convert {from} to {to}:"),
            description: format!("Follow these simple steps to convert your {from} files"),
            image: WAYS_IMAGE.to_string(),
            image_alt: format!("{from} to {to} conversion interface"),
        },
        steps: vec![
            ConversionStep {
                number: 1,
                heading: "Upload your file".to_string(),
                description: format!(
                    "Upload your {from} video file. Our converter supports {from} and all other popular video and audio file formats."
                ),
            },
            ConversionStep {
                number: 2,
                heading: "Select your output".to_string(),
                description: format!("Select {to} as your desired output format from the dropdown."),
            },
            ConversionStep {
                number: 3,
                heading: "Convert & download".to_string(),
                description: format!("Click 'Convert' and download your new {to} file."),
            },
        ],
        extra: Map::new(),
    }
}

/// Empty inventory with ads switched off.
pub fn ads() -> AdInventory {
    AdInventory {
        global_settings: AdGlobalSettings::default(),
        ad_units: Vec::new(),
        all_ads: Vec::new(),
        active_ads: Vec::new(),
        extra: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converter_copy_names_both_formats() {
        let c = converter(ConverterId::MkvToMp4);
        for text in [&c.hero.title, &c.hero.description] {
            assert!(text.contains("MKV"), "{text}");
            assert!(text.contains("MP4"), "{text}");
        }
        assert_eq!(c.hero.title, "MKV to MP4 Converter");
        assert_eq!(c.steps.len(), 3);
        assert_eq!(c.steps.iter().map(|s| s.number).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn fallbacks_are_deterministic() {
        for key in ResourceKey::all() {
            assert_eq!(payload_for(&key), payload_for(&key));
        }
    }

    #[test]
    fn fallback_shape_matches_key() {
        for key in ResourceKey::all() {
            let p = payload_for(&key);
            let ok = match key {
                ResourceKey::Hero => p.as_home().is_some(),
                ResourceKey::Company => p.as_company().is_some(),
                ResourceKey::Converter(_) => p.as_converter().is_some(),
                ResourceKey::Ads => p.as_ads().is_some(),
            };
            assert!(ok, "{key} fallback has the wrong shape");
        }
    }

    #[test]
    fn fallback_survives_the_live_decoder() {
        // Serialized fallbacks decode back through the live path unchanged.
        for key in ResourceKey::all() {
            let p = payload_for(&key);
            let json = serde_json::to_value(&p).unwrap();
            assert_eq!(Payload::decode(&key, json).unwrap(), p);
        }
    }

    #[test]
    fn company_defaults() {
        let c = company();
        assert_eq!(c.company_name, "Foxbeep");
        assert_eq!(c.social_links.twitter.as_deref(), Some("@foxbeeptech"));
        assert!(ads().is_empty());
    }

    #[test]
    fn ads_fallback_carries_empty_ad_units() {
        let json = serde_json::to_value(payload_for(&ResourceKey::Ads)).unwrap();
        assert_eq!(json["adUnits"], serde_json::json!([]));
        assert_eq!(json["allAds"], serde_json::json!([]));
        assert_eq!(json["activeAds"], serde_json::json!([]));
        assert_eq!(json["globalSettings"]["enabled"], serde_json::json!(false));
    }
}
