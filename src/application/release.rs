//! Release service - latest release per channel with caching and fallback.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use log::{debug, error, warn};

use crate::cache::SiteCache;
use crate::http::is_rate_limited;
use crate::provider::ContentSource;
use crate::release::{ParsedRelease, Quality, ReleaseRecord, parse_release};
use crate::runtime::Runtime;

pub struct ReleaseService<'a, R: Runtime, S: ContentSource> {
    cache: &'a SiteCache<R>,
    source: &'a S,
    /// Prefer cached release data and persist fresh fetches.
    dev_mode: bool,
    parsed: Mutex<HashMap<Quality, ParsedRelease>>,
}

impl<'a, R: Runtime, S: ContentSource> ReleaseService<'a, R, S> {
    pub fn new(cache: &'a SiteCache<R>, source: &'a S, dev_mode: bool) -> Self {
        Self {
            cache,
            source,
            dev_mode,
            parsed: Mutex::new(HashMap::new()),
        }
    }

    /// Latest release of a channel.
    ///
    /// Never fails: when the record cannot be obtained the fixed fallback
    /// release is returned, so install links degrade to the releases page.
    #[tracing::instrument(skip(self))]
    pub async fn latest_release(&self, quality: Quality) -> ParsedRelease {
        let memoised = self.parsed.lock().unwrap().get(&quality).cloned();
        if let Some(release) = memoised {
            debug!("Using memoised {} release {}", quality, release.version);
            return release;
        }

        match self.load_record(quality).await {
            Ok(record) => {
                let release = parse_release(&record);
                self.parsed
                    .lock()
                    .unwrap()
                    .insert(quality, release.clone());
                release
            }
            Err(e) => {
                if is_rate_limited(&e) {
                    warn!("{:#}", e);
                } else {
                    error!("Error fetching {} release data: {:#}", quality, e);
                }
                ParsedRelease::fallback()
            }
        }
    }

    async fn load_record(&self, quality: Quality) -> Result<ReleaseRecord> {
        if self.dev_mode {
            match self.cache.read_release(quality) {
                Ok(Some(record)) => {
                    debug!("Using cached {} release data", quality);
                    return Ok(record);
                }
                Ok(None) => {}
                Err(e) => warn!("Ignoring unreadable release cache: {:#}", e),
            }
        }

        let record = self.source.latest_release(quality).await?;

        if self.dev_mode
            && let Err(e) = self.cache.write_release(&record, quality)
        {
            warn!("Failed to cache {} release data: {:#}", quality, e);
        }

        Ok(record)
    }
}
