//! Normalization pipeline: fetch → filter → convert → publish.
//!
//! Everything after the fetch is a pure function of the payload, so two
//! refreshes against an unchanged feed publish identical collections.

pub mod refresher;
mod store;

use geojson::{Feature, FeatureCollection};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{Conversion, is_eligible, to_feature};
use crate::sites::{RawLocation, SiteClient, SiteError};

pub use store::{FeatureStore, RefreshTicket, Snapshot, empty_collection};

/// Decode a directory payload into site records.
///
/// Returns `None` for a payload that should leave the store untouched:
/// `null`, anything that isn't an array, or an empty array. Elements that
/// don't decode as a site are dropped; order of the rest is preserved.
pub fn decode_payload(payload: Value) -> Option<Vec<RawLocation>> {
    let Value::Array(items) = payload else {
        return None;
    };
    if items.is_empty() {
        return None;
    }

    let locations = items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value(item) {
            Ok(location) => Some(location),
            Err(e) => {
                warn!(index = idx, error = %e, "dropping undecodable site record");
                None
            }
        })
        .collect();

    Some(locations)
}

/// Output of [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Features in the relative order of their source records.
    pub features: Vec<Feature>,
    /// Records rejected by the eligibility filter.
    pub ineligible: usize,
    /// Eligible records dropped for lack of usable coordinates.
    pub skipped: usize,
}

impl Normalized {
    /// Wrap the features into a collection.
    pub fn into_collection(self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.features,
            foreign_members: None,
        }
    }
}

/// Filter then convert, keeping input order.
pub fn normalize(locations: &[RawLocation]) -> Normalized {
    let mut features = Vec::new();
    let mut ineligible = 0;
    let mut skipped = 0;

    for location in locations {
        if !is_eligible(location) {
            ineligible += 1;
            continue;
        }

        match to_feature(location) {
            Conversion::Converted(feature) => features.push(feature),
            Conversion::Skipped(reason) => {
                debug!(name = %location.name, %reason, "skipping eligible site");
                skipped += 1;
            }
        }
    }

    Normalized {
        features,
        ineligible,
        skipped,
    }
}

/// What a refresh did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new collection replaced the previous one.
    Published {
        features: usize,
        ineligible: usize,
        skipped: usize,
    },
    /// Payload was empty or malformed; store left as it was.
    Unchanged,
    /// Another writer sharing the store published a newer result first;
    /// this one was discarded.
    Superseded,
    /// Another refresh was still in flight; nothing was fetched.
    AlreadyRunning,
}

/// Owns the fetch client and the store it publishes into.
///
/// Several pipelines may share one [`FeatureStore`] (e.g. a primary and a
/// mirror directory); the store's tickets keep the latest-started refresh
/// from being overwritten by an older one that finishes later.
pub struct Pipeline {
    client: SiteClient,
    store: FeatureStore,
    in_flight: Mutex<()>,
}

impl Pipeline {
    /// Create a pipeline publishing into `store`.
    pub fn new(client: SiteClient, store: FeatureStore) -> Self {
        Self {
            client,
            store,
            in_flight: Mutex::new(()),
        }
    }

    /// The store this pipeline publishes into.
    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    /// Fetch the directory and publish a fresh collection.
    ///
    /// At most one refresh runs at a time; a call made while another is in
    /// flight returns [`RefreshOutcome::AlreadyRunning`] immediately. On a
    /// transport error the store is left unchanged and the error returned.
    pub async fn refresh(&self) -> Result<RefreshOutcome, SiteError> {
        let Ok(_guard) = self.in_flight.try_lock() else {
            return Ok(RefreshOutcome::AlreadyRunning);
        };

        let ticket = self.store.ticket();
        info!(url = self.client.source_url(), "fetching site directory");
        let payload = self.client.fetch_all().await?;

        let Some(locations) = decode_payload(payload) else {
            info!("site directory payload empty or malformed; keeping current features");
            return Ok(RefreshOutcome::Unchanged);
        };

        let normalized = normalize(&locations);
        let (features, ineligible, skipped) = (
            normalized.features.len(),
            normalized.ineligible,
            normalized.skipped,
        );

        if !self.store.publish(ticket, normalized.into_collection()).await {
            warn!("discarding superseded refresh result");
            return Ok(RefreshOutcome::Superseded);
        }

        info!(
            records = locations.len(),
            features, ineligible, skipped, "published site features"
        );
        Ok(RefreshOutcome::Published {
            features,
            ineligible,
            skipped,
        })
    }
}
