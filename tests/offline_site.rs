use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use foxbeep_content::{
    ContentConfig, ContentSource, ConverterId, FetchError, FetchResult, Orchestrator, ResourceKey, ResourceState,
};
use serde_json::{json, Value};

/// Content API that is down for every resource.
#[derive(Default)]
struct Unreachable {
    calls: AtomicUsize,
}

#[async_trait]
impl ContentSource for Unreachable {
    async fn fetch(&self, _key: &ResourceKey) -> FetchResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(FetchError::transport("connection refused"))
    }
}

#[tokio::test]
async fn whole_site_renders_from_fallbacks_when_api_is_down() {
    let api = Arc::new(Unreachable::default());
    let store = Orchestrator::with_source(api.clone(), &ContentConfig::default());

    let snaps = store.refetch_all(true).await;
    assert_eq!(api.calls.load(Ordering::SeqCst), ResourceKey::all().len());
    assert!(snaps.iter().all(|s| s.state == ResourceState::Fallback && s.error.is_some()));
    assert!(!store.is_loading());

    let hero = store.get_resource(ResourceKey::Hero).expect("hero fallback");
    assert_eq!(hero.as_home().unwrap().hero.title, "Transform Your Video Formats");

    let company = store.get_resource(ResourceKey::Company).expect("company fallback");
    let company = serde_json::to_value(&*company).unwrap();
    assert_eq!(company["companyName"], "Foxbeep");

    let converter = store.get_resource(ResourceKey::Converter(ConverterId::Mp4ToMkv)).expect("converter fallback");
    assert_eq!(converter.as_converter().unwrap().hero.title, "MP4 to MKV Converter");

    let ads = store.get_resource(ResourceKey::Ads).expect("ads fallback");
    let ads = serde_json::to_value(&*ads).unwrap();
    assert_eq!(ads["adUnits"], json!([]));
    assert_eq!(ads["allAds"], json!([]));
    assert_eq!(ads["activeAds"], json!([]));
    assert!(store.random_active_ad().is_none());
    assert!(!store.ads_enabled());

    assert_eq!(store.seo_profile().site_name, "Foxbeep");
}

#[tokio::test]
async fn every_converter_page_gets_its_own_copy() {
    let store = Orchestrator::with_source(Arc::new(Unreachable::default()), &ContentConfig::default());
    store.refetch_all(true).await;
    for id in ConverterId::ALL {
        let page = store.get_resource(ResourceKey::Converter(id)).unwrap();
        let title = &page.as_converter().unwrap().hero.title;
        assert!(title.contains(&id.source_format()) && title.contains(&id.target_format()), "{title}");
    }
}
