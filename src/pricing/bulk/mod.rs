//! Bulk pricing index over locally cached offer files
//!
//! Reads vendor-published offer documents from a cache directory
//! (`<root>/<ServiceCode>/<region>.json[.gz]`), memoizes them in memory, and
//! builds a lazy per-service/region price index for O(1) amortized lookups.
//! Missing files are not errors; callers fall through to a remote client.
//!
//! Indexing a given (service, region) pair happens at most once per process
//! lifetime. The build runs under a mutex and publishes a key either fully
//! or not at all, so concurrent first-access never observes partial state.

use crate::config::HOURS_PER_MONTH;
use crate::pricing::offer::{
    self, build_lookup_key, on_demand_hourly_price, OfferDocument,
};
use crate::utils::error::{EngineError, Result};
use dashmap::DashMap;
use flate2::read::GzDecoder;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[cfg(test)]
mod tests;

/// Service/region pairs eagerly indexed at construction.
const PREWARM_SERVICES: &[&str] = &["AmazonEC2", "AmazonRDS"];
const PREWARM_REGIONS: &[&str] = &["us-east-1", "us-west-2", "eu-west-1"];

type OfferKey = (String, String);
type IndexKey = (String, String, String);

/// Index over locally cached bulk offer files
#[derive(Debug)]
pub struct BulkPricingIndex {
    cache_dir: PathBuf,
    /// (service, region) -> parsed offer document, loaded once
    offer_cache: DashMap<OfferKey, Arc<OfferDocument>>,
    /// (service, region, lookup_key) -> hourly price
    price_index: DashMap<IndexKey, f64>,
    /// (service, region, lookup_key) -> chosen SKU
    sku_index: DashMap<IndexKey, String>,
    /// build-once guard for lazy indexing
    indexed: Mutex<HashSet<OfferKey>>,
}

impl BulkPricingIndex {
    /// Open an index over an existing cache directory. A missing directory
    /// is a configuration error; use [`Self::open_if_available`] when the
    /// catalog is optional.
    pub fn new(cache_dir: impl Into<PathBuf>, prewarm: bool) -> Result<Self> {
        let cache_dir = cache_dir.into();
        if !cache_dir.is_dir() {
            return Err(EngineError::config(format!(
                "Pricing cache directory not found: {}",
                cache_dir.display()
            )));
        }

        let index = Self {
            cache_dir,
            offer_cache: DashMap::new(),
            price_index: DashMap::new(),
            sku_index: DashMap::new(),
            indexed: Mutex::new(HashSet::new()),
        };

        if prewarm {
            index.prewarm_common_regions();
        }

        Ok(index)
    }

    /// Open the index if the cache directory exists, else `None`.
    pub fn open_if_available(cache_dir: impl Into<PathBuf>, prewarm: bool) -> Option<Self> {
        let cache_dir = cache_dir.into();
        match Self::new(&cache_dir, prewarm) {
            Ok(index) => Some(index),
            Err(_) => {
                debug!(dir = %cache_dir.display(), "bulk pricing cache not available");
                None
            }
        }
    }

    /// Hourly price for an EC2 instance type. Operating system defaults to
    /// Linux; tenancy is always Shared. Capacity preference (on-demand
    /// "Used" over reservations) is handled by the index tie-break.
    pub fn ec2_instance_price(
        &self,
        instance_type: &str,
        region: &str,
        operating_system: Option<&str>,
    ) -> Option<f64> {
        let filters = vec![
            ("instanceType", instance_type.to_string()),
            (
                "operatingSystem",
                operating_system.unwrap_or("Linux").to_string(),
            ),
            ("tenancy", "Shared".to_string()),
        ];
        self.lookup("AmazonEC2", region, &filters)
    }

    /// Hourly price for an RDS instance class, Single-AZ deployment.
    /// Engine defaults to MySQL; common engine aliases are normalized.
    pub fn rds_instance_price(
        &self,
        instance_type: &str,
        region: &str,
        engine: Option<&str>,
    ) -> Option<f64> {
        let filters = vec![
            ("instanceType", instance_type.to_string()),
            (
                "databaseEngine",
                normalize_engine(engine.unwrap_or("mysql")),
            ),
            ("deploymentOption", "Single-AZ".to_string()),
        ];
        self.lookup("AmazonRDS", region, &filters)
    }

    /// Price lookup: prebuilt index first, then lazy indexing, then a linear
    /// scan whose result is memoized for future calls.
    pub fn lookup(&self, service: &str, region: &str, filters: &[(&str, String)]) -> Option<f64> {
        let index_key = (
            service.to_string(),
            region.to_string(),
            build_lookup_key(filters),
        );

        if let Some(price) = self.price_index.get(&index_key) {
            return Some(*price);
        }

        let document = self.load_offer_file(service, region)?;
        self.index_offer_file(service, region, &document);

        if let Some(price) = self.price_index.get(&index_key) {
            return Some(*price);
        }

        // Not an indexed shape (or an uncommon filter set): scan everything
        // with the same matching and tie-break rules.
        let (price, sku) = offer::select_price(&document, filters)?;
        self.price_index.insert(index_key.clone(), price);
        self.sku_index.insert(index_key, sku);
        Some(price)
    }

    /// Convert an hourly price to a monthly price at 730 hours/month.
    pub fn hourly_to_monthly(&self, hourly_price: f64) -> f64 {
        hourly_price * HOURS_PER_MONTH
    }

    /// Publication date of an offer file, when the document carries one.
    pub fn publication_date(&self, service: &str, region: &str) -> Option<String> {
        self.load_offer_file(service, region)?
            .publication_date
            .clone()
    }

    /// Number of indexed prices (diagnostics and tests).
    pub fn indexed_price_count(&self) -> usize {
        self.price_index.len()
    }

    fn offer_path(&self, service: &str, region: &str) -> Option<PathBuf> {
        let gz = self.cache_dir.join(service).join(format!("{region}.json.gz"));
        if gz.exists() {
            return Some(gz);
        }
        let plain = self.cache_dir.join(service).join(format!("{region}.json"));
        if plain.exists() {
            return Some(plain);
        }
        None
    }

    fn load_offer_file(&self, service: &str, region: &str) -> Option<Arc<OfferDocument>> {
        let cache_key = (service.to_string(), region.to_string());
        if let Some(document) = self.offer_cache.get(&cache_key) {
            return Some(document.clone());
        }

        let path = match self.offer_path(service, region) {
            Some(path) => path,
            None => {
                warn!(service, region, "offer file not found");
                return None;
            }
        };

        match parse_offer_file(&path) {
            Ok(document) => {
                let document = Arc::new(document);
                self.offer_cache.insert(cache_key, document.clone());
                Some(document)
            }
            Err(err) => {
                error!(path = %path.display(), %err, "error loading offer file");
                None
            }
        }
    }

    /// Build the fast lookup index for one offer file. Idempotent; at most
    /// one build per (service, region) per process.
    fn index_offer_file(&self, service: &str, region: &str, document: &OfferDocument) {
        let cache_key = (service.to_string(), region.to_string());
        let mut indexed = self.indexed.lock();
        if indexed.contains(&cache_key) {
            return;
        }

        // (lookup_key -> price, sku, capacity_status), fully built before
        // anything is published
        let mut staged: HashMap<String, (f64, String, String)> = HashMap::new();

        for (sku, product) in &document.products {
            let attributes = &product.attributes;
            match service {
                "AmazonEC2" => {
                    let instance_type = attributes.get("instanceType").map(String::as_str);
                    let os = attributes.get("operatingSystem").map(String::as_str);
                    let tenancy = attributes.get("tenancy").map(String::as_str);
                    let capacity = attributes
                        .get("capacitystatus")
                        .map(String::as_str)
                        .unwrap_or("");
                    let preinstalled = attributes
                        .get("preInstalledSw")
                        .map(String::as_str)
                        .unwrap_or("");

                    let (Some(instance_type), Some(os), Some(tenancy)) =
                        (instance_type, os, tenancy)
                    else {
                        continue;
                    };
                    if instance_type.is_empty() || os.is_empty() || tenancy.is_empty() {
                        continue;
                    }
                    // Only plain images: a generic OS lookup must never
                    // resolve to a bundled-software SKU (e.g. "SQL Web").
                    if !(preinstalled.is_empty() || preinstalled == "NA") {
                        continue;
                    }

                    let Some(price) = on_demand_hourly_price(&document.terms, sku) else {
                        continue;
                    };

                    let lookup_key = build_lookup_key(&[
                        ("instanceType", instance_type.to_string()),
                        ("operatingSystem", os.to_string()),
                        ("tenancy", tenancy.to_string()),
                    ]);

                    let is_used = capacity.eq_ignore_ascii_case("used");
                    match staged.get(&lookup_key) {
                        Some((existing_price, _, existing_capacity)) => {
                            let existing_used = existing_capacity.eq_ignore_ascii_case("used");
                            // a "Used" SKU replaces a reservation-flavored
                            // entry; among equals the lowest price wins
                            let replace = (is_used && !existing_used)
                                || (is_used == existing_used && price < *existing_price);
                            if replace {
                                staged.insert(
                                    lookup_key,
                                    (price, sku.clone(), capacity.to_string()),
                                );
                            }
                        }
                        None => {
                            if is_used {
                                staged.insert(
                                    lookup_key,
                                    (price, sku.clone(), capacity.to_string()),
                                );
                            }
                        }
                    }
                }
                "AmazonRDS" => {
                    let instance_type = attributes.get("instanceType").map(String::as_str);
                    let engine = attributes.get("databaseEngine").map(String::as_str);
                    let deployment = attributes.get("deploymentOption").map(String::as_str);

                    let (Some(instance_type), Some(engine), Some(deployment)) =
                        (instance_type, engine, deployment)
                    else {
                        continue;
                    };
                    if instance_type.is_empty() || engine.is_empty() || deployment.is_empty() {
                        continue;
                    }

                    let Some(price) = on_demand_hourly_price(&document.terms, sku) else {
                        continue;
                    };

                    let lookup_key = build_lookup_key(&[
                        ("instanceType", instance_type.to_string()),
                        ("databaseEngine", engine.to_string()),
                        ("deploymentOption", deployment.to_string()),
                    ]);
                    let keep = staged
                        .get(&lookup_key)
                        .map(|(existing_price, _, _)| price < *existing_price)
                        .unwrap_or(true);
                    if keep {
                        staged.insert(lookup_key, (price, sku.clone(), String::new()));
                    }
                }
                _ => {}
            }
        }

        let staged_count = staged.len();
        for (lookup_key, (price, sku, _)) in staged {
            let index_key = (service.to_string(), region.to_string(), lookup_key);
            self.price_index.insert(index_key.clone(), price);
            self.sku_index.insert(index_key, sku);
        }
        indexed.insert(cache_key);

        if staged_count > 0 {
            debug!(service, region, count = staged_count, "indexed prices");
        }
    }

    /// Eagerly index common service/region pairs so first requests skip the
    /// indexing pass. Best-effort only; failures are swallowed.
    fn prewarm_common_regions(&self) {
        let before = self.price_index.len();
        for &service in PREWARM_SERVICES {
            for &region in PREWARM_REGIONS {
                if let Some(document) = self.load_offer_file(service, region) {
                    self.index_offer_file(service, region, &document);
                } else {
                    debug!(service, region, "skipping pre-warm");
                }
            }
        }
        let added = self.price_index.len() - before;
        if added > 0 {
            info!(count = added, "pre-warmed pricing index");
        }
    }
}

/// Normalize a database engine alias to the catalog's engine name.
pub fn normalize_engine(engine: &str) -> String {
    match engine.to_lowercase().as_str() {
        "mysql" => "MySQL".to_string(),
        "mariadb" => "MariaDB".to_string(),
        "postgres" | "postgresql" => "PostgreSQL".to_string(),
        "sqlserver" => "SQL Server".to_string(),
        "oracle" => "Oracle".to_string(),
        _ => engine.to_string(),
    }
}

fn parse_offer_file(path: &Path) -> Result<OfferDocument> {
    let file = File::open(path)?;
    let document = if path.extension().and_then(|ext| ext.to_str()) == Some("gz") {
        serde_json::from_reader(BufReader::new(GzDecoder::new(file)))?
    } else {
        serde_json::from_reader(BufReader::new(file))?
    };
    Ok(document)
}
