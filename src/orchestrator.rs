use anyhow::Result;
use futures::future::{join_all, BoxFuture, FutureExt, Shared};
use rand::seq::SliceRandom;
use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::catalog::ResourceKey;
use crate::config::ContentConfig;
use crate::error::FetchError;
use crate::fallback;
use crate::http::HttpSource;
use crate::source::ContentSource;
use crate::types::{AdRecord, Payload, SeoProfile};

/// Where a resource is in its fetch lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ResourceState {
    #[default]
    Empty,
    Fetching,
    Ready,
    Fallback,
}

impl ResourceState {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceState::Empty => "empty",
            ResourceState::Fetching => "fetching",
            ResourceState::Ready => "ready",
            ResourceState::Fallback => "fallback",
        }
    }
}

/// What a caller of [`Orchestrator::ensure_fresh`] gets back: always a payload
/// (live, retained or fallback) plus the error of the last failed refresh, if any.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub key: ResourceKey,
    pub state: ResourceState,
    pub payload: Arc<Payload>,
    pub error: Option<FetchError>,
}

impl Snapshot {
    pub fn is_fallback(&self) -> bool { self.state == ResourceState::Fallback }
}

type InFlight = Shared<BoxFuture<'static, Snapshot>>;

#[derive(Default)]
struct Slot {
    payload: Option<Arc<Payload>>,
    // Last settled state; never `Fetching`. `in_flight` says whether a fetch runs.
    settled: ResourceState,
    fetched_at: Option<Instant>,
    error: Option<FetchError>,
    in_flight: Option<InFlight>,
}

impl Slot {
    fn state(&self) -> ResourceState {
        if self.in_flight.is_some() { ResourceState::Fetching } else { self.settled }
    }

    fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        if self.payload.is_none() || self.settled == ResourceState::Fallback {
            return false;
        }
        self.fetched_at.is_some_and(|at| now.saturating_duration_since(at) < ttl)
    }
}

struct Inner {
    source: Arc<dyn ContentSource>,
    ttl: Duration,
    request_timeout: Duration,
    slots: Mutex<HashMap<ResourceKey, Slot>>,
}

impl Inner {
    fn slots(&self) -> MutexGuard<'_, HashMap<ResourceKey, Slot>> {
        // The map stays consistent across a panic: every write is a plain field store.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run_fetch(&self, key: ResourceKey) -> Snapshot {
        debug!(%key, "fetching");
        let outcome = match tokio::time::timeout(self.request_timeout, self.source.fetch(&key)).await {
            Ok(Ok(data)) => Payload::decode(&key, data),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(FetchError::Timeout { after: self.request_timeout }),
        };
        self.settle(key, outcome)
    }

    /// Record the outcome of a fetch and release the key for the next request.
    fn settle(&self, key: ResourceKey, outcome: Result<Payload, FetchError>) -> Snapshot {
        let now = Instant::now();
        let mut slots = self.slots();
        let slot = slots.entry(key).or_default();
        slot.in_flight = None;
        let payload = match (outcome, slot.payload.clone()) {
            (Ok(p), _) => {
                info!(%key, "content ready");
                let p = Arc::new(p);
                slot.payload = Some(p.clone());
                slot.settled = ResourceState::Ready;
                slot.fetched_at = Some(now);
                slot.error = None;
                p
            }
            (Err(e), Some(prior)) => {
                warn!(%key, error = %e, state = slot.settled.as_str(), "refresh failed, keeping cached content");
                slot.error = Some(e);
                prior
            }
            (Err(e), None) => {
                warn!(%key, error = %e, "fetch failed, using fallback content");
                let p = Arc::new(fallback::payload_for(&key));
                slot.payload = Some(p.clone());
                slot.settled = ResourceState::Fallback;
                slot.fetched_at = Some(now);
                slot.error = Some(e);
                p
            }
        };
        Snapshot { key, state: slot.settled, payload, error: slot.error.clone() }
    }
}

/// Process-wide content store: fetches, caches, de-duplicates and substitutes
/// fallbacks for every resource the site reads. Clones share one cache.
#[derive(Clone)]
pub struct Orchestrator {
    inner: Arc<Inner>,
}

impl Orchestrator {
    /// Orchestrator backed by the live HTTP content API.
    pub fn new(config: &ContentConfig) -> Result<Self> {
        let source = HttpSource::new(config)?;
        Ok(Self::with_source(Arc::new(source), config))
    }

    pub fn with_source(source: Arc<dyn ContentSource>, config: &ContentConfig) -> Self {
        let inner = Inner {
            source,
            ttl: config.ttl(),
            request_timeout: config.request_timeout(),
            slots: Mutex::new(HashMap::new()),
        };
        Self { inner: Arc::new(inner) }
    }

    pub fn ttl(&self) -> Duration { self.inner.ttl }

    /// Cached payload, if the key was ever populated. Never touches the network.
    pub fn get_resource(&self, key: ResourceKey) -> Option<Arc<Payload>> {
        self.inner.slots().get(&key).and_then(|s| s.payload.clone())
    }

    pub fn get_resource_named(&self, name: &str) -> Option<Arc<Payload>> {
        self.get_resource(resolve(name)?)
    }

    /// Return cached content when it is still fresh, otherwise fetch it.
    ///
    /// Concurrent calls for the same key share one request. A call made while
    /// a request is in flight joins it even with `force_refresh`, so a key never
    /// has two requests outstanding. Failures never escape: the snapshot carries
    /// the fallback or the retained payload, with the error alongside.
    pub async fn ensure_fresh(&self, key: ResourceKey, force_refresh: bool) -> Snapshot {
        let pending = {
            let mut slots = self.inner.slots();
            let slot = slots.entry(key).or_default();
            if let Some(f) = slot.in_flight.clone() {
                debug!(%key, force_refresh, "joining in-flight fetch");
                f
            } else {
                if !force_refresh && slot.is_fresh(Instant::now(), self.inner.ttl) {
                    if let Some(payload) = slot.payload.clone() {
                        return Snapshot { key, state: slot.settled, payload, error: slot.error.clone() };
                    }
                }
                let f = self.start_fetch(key);
                slot.in_flight = Some(f.clone());
                f
            }
        };
        pending.await
    }

    /// String-keyed [`ensure_fresh`](Self::ensure_fresh). Unknown names return
    /// `None` without a request.
    pub async fn ensure_fresh_named(&self, name: &str, force_refresh: bool) -> Option<Snapshot> {
        let key = resolve(name)?;
        Some(self.ensure_fresh(key, force_refresh).await)
    }

    // Runs on its own task so a caller dropping its future cannot strand the
    // key in `Fetching`, and settles even if the source panics. Called with the
    // slot map locked; the task settles after the caller has stored the handle.
    fn start_fetch(&self, key: ResourceKey) -> InFlight {
        let task_inner = self.inner.clone();
        let handle = tokio::spawn(async move {
            match AssertUnwindSafe(task_inner.run_fetch(key)).catch_unwind().await {
                Ok(snapshot) => snapshot,
                Err(panic) => task_inner.settle(key, Err(FetchError::aborted(panic_message(panic.as_ref())))),
            }
        });
        let inner = self.inner.clone();
        async move {
            match handle.await {
                Ok(snapshot) => snapshot,
                Err(e) => inner.settle(key, Err(FetchError::aborted(e.to_string()))),
            }
        }
        .boxed()
        .shared()
    }

    /// True iff a live (non-fallback) payload exists and is younger than the TTL.
    pub fn is_fresh(&self, key: ResourceKey) -> bool {
        self.inner.slots().get(&key).is_some_and(|s| s.is_fresh(Instant::now(), self.inner.ttl))
    }

    pub fn state(&self, key: ResourceKey) -> ResourceState {
        self.inner.slots().get(&key).map(Slot::state).unwrap_or_default()
    }

    /// Error from the last failed refresh of `key`; cleared by a successful fetch.
    pub fn error(&self, key: ResourceKey) -> Option<FetchError> {
        self.inner.slots().get(&key).and_then(|s| s.error.clone())
    }

    /// True while any resource has a request outstanding.
    pub fn is_loading(&self) -> bool { self.inner.slots().values().any(|s| s.in_flight.is_some()) }

    /// Refresh every known key concurrently and wait for all of them.
    pub async fn refetch_all(&self, force_refresh: bool) -> Vec<Snapshot> {
        join_all(ResourceKey::all().into_iter().map(|key| self.ensure_fresh(key, force_refresh))).await
    }

    /// One active ad picked uniformly at random from the cached inventory.
    pub fn random_active_ad(&self) -> Option<AdRecord> {
        let payload = self.get_resource(ResourceKey::Ads)?;
        let active = payload.as_ads()?.active();
        active.choose(&mut rand::thread_rng()).map(|ad| (*ad).clone())
    }

    /// Whether the ad panel has ads switched on. False until the inventory is fetched.
    pub fn ads_enabled(&self) -> bool {
        self.get_resource(ResourceKey::Ads)
            .is_some_and(|p| p.as_ads().is_some_and(|a| a.global_settings.enabled))
    }

    /// Site identity for page metadata, from the company profile or defaults.
    pub fn seo_profile(&self) -> SeoProfile {
        let payload = self.get_resource(ResourceKey::Company);
        let company = payload.as_deref().and_then(Payload::as_company);
        let non_empty = |s: &Option<String>| s.clone().filter(|v| !v.trim().is_empty());
        SeoProfile {
            site_name: company
                .map(|c| c.company_name.clone())
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| fallback::DEFAULT_COMPANY_NAME.to_string()),
            favicon: company
                .and_then(|c| non_empty(&c.favicon))
                .unwrap_or_else(|| fallback::DEFAULT_FAVICON.to_string()),
            logo: company.and_then(|c| non_empty(&c.logo)),
            twitter_handle: company
                .and_then(|c| non_empty(&c.social_links.twitter))
                .unwrap_or_else(|| fallback::DEFAULT_TWITTER.to_string()),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("source panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("source panicked: {s}")
    } else {
        "source panicked".to_string()
    }
}

fn resolve(name: &str) -> Option<ResourceKey> {
    let key = ResourceKey::parse(name);
    if key.is_none() {
        warn!(name, "unknown resource key");
    }
    key
}
