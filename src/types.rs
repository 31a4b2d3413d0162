use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::catalog::ResourceKey;
use crate::error::FetchError;

// --- Home page ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomeContent {
    pub hero: HeroBlock,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroBlock {
    pub title: String,
    pub description: String,
    pub image: String,
    pub image_alt: String,
    pub features: Vec<String>,
}

// --- Company profile ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyProfile {
    pub company_name: String,
    pub favicon: Option<String>,
    pub logo: Option<String>,
    pub social_links: SocialLinks,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub youtube: Option<String>,
}

// --- Converter pages ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConverterContent {
    pub hero: ConverterHero,
    pub ways: WaysBlock,
    pub steps: Vec<ConversionStep>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConverterHero {
    pub title: String,
    pub description: String,
    pub image: String,
    pub image_alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaysBlock {
    pub title: String,
    pub description: String,
    pub image: String,
    pub image_alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionStep {
    pub number: u32,
    pub heading: String,
    pub description: String,
}

// --- Advertisements ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdInventory {
    pub global_settings: AdGlobalSettings,
    pub ad_units: Vec<Value>,
    pub all_ads: Vec<AdRecord>,
    pub active_ads: Vec<AdRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AdInventory {
    /// Records with `active == true`. `allAds` is authoritative; `activeAds` is
    /// only consulted when the API sent no `allAds`.
    pub fn active(&self) -> Vec<&AdRecord> {
        let pool = if self.all_ads.is_empty() { &self.active_ads } else { &self.all_ads };
        pool.iter().filter(|ad| ad.active).collect()
    }

    pub fn is_empty(&self) -> bool { self.all_ads.is_empty() && self.active_ads.is_empty() }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdGlobalSettings {
    pub enabled: bool,
    pub publisher_id: String,
    pub auto_ads_enabled: bool,
    pub test_mode: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub active: bool,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: String,
    pub description: String,
    pub src: Option<String>,
    pub learn_more_link: Option<String>,
    pub skip_delay_seconds: Option<u32>,
    pub track_impressions: bool,
    pub track_clicks: bool,
}

// Ad ids arrive as numbers from some panels and strings from others.
fn id_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

// --- Payload union ---

/// Cached content for one resource. Live and fallback data share these types.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Home(HomeContent),
    Company(CompanyProfile),
    Converter(ConverterContent),
    Ads(AdInventory),
}

impl Payload {
    /// Decode the `data` member of an API envelope into the shape `key` expects.
    pub fn decode(key: &ResourceKey, data: Value) -> Result<Self, FetchError> {
        if !data.is_object() {
            return Err(FetchError::malformed(format!("{key}: expected an object, got {}", kind_of(&data))));
        }
        Ok(match key {
            ResourceKey::Hero => Payload::Home(serde_json::from_value(data)?),
            ResourceKey::Company => Payload::Company(serde_json::from_value(data)?),
            ResourceKey::Converter(_) => Payload::Converter(serde_json::from_value(data)?),
            ResourceKey::Ads => Payload::Ads(serde_json::from_value(data)?),
        })
    }

    pub fn as_home(&self) -> Option<&HomeContent> { if let Payload::Home(v) = self { Some(v) } else { None } }
    pub fn as_company(&self) -> Option<&CompanyProfile> { if let Payload::Company(v) = self { Some(v) } else { None } }
    pub fn as_converter(&self) -> Option<&ConverterContent> { if let Payload::Converter(v) = self { Some(v) } else { None } }
    pub fn as_ads(&self) -> Option<&AdInventory> { if let Payload::Ads(v) = self { Some(v) } else { None } }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Site identity derived from the company profile, used for page metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoProfile {
    pub site_name: String,
    pub favicon: String,
    pub logo: Option<String>,
    pub twitter_handle: String,
}
