//! Vendor-shaped offer document model and SKU selection
//!
//! Offer documents carry `products` (SKU -> attribute map) and on-demand
//! `terms` (SKU -> term -> price dimensions). The selection rules here are
//! shared by the bulk index and the AWS remote client: filter matching is
//! case-insensitive for engine/OS attributes, reservation-flavored SKUs
//! lose to on-demand "Used" capacity, and ties resolve to the lowest hourly
//! price so results stay deterministic across map iteration orders.

use serde::Deserialize;
use std::collections::HashMap;

/// Attribute fields compared case-insensitively during filter matching.
const CASE_INSENSITIVE_FIELDS: &[&str] = &["databaseengine", "operatingsystem", "enginename"];

/// A parsed offer document for one service/region
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferDocument {
    #[serde(default)]
    pub products: HashMap<String, OfferProduct>,
    #[serde(default)]
    pub terms: OfferTerms,
    #[serde(rename = "publicationDate", default)]
    pub publication_date: Option<String>,
}

/// One product SKU and its attributes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferProduct {
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

/// Pricing terms, on-demand only
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferTerms {
    #[serde(rename = "OnDemand", default)]
    pub on_demand: HashMap<String, HashMap<String, OfferTerm>>,
}

/// One term with its price dimensions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferTerm {
    #[serde(rename = "priceDimensions", default)]
    pub price_dimensions: HashMap<String, PriceDimension>,
}

/// One price dimension
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceDimension {
    #[serde(rename = "pricePerUnit", default)]
    pub price_per_unit: HashMap<String, String>,
}

/// Map snake_case filter keys to the camelCase attribute keys offer files use.
pub fn normalize_attribute_key(key: &str) -> &str {
    match key.to_ascii_lowercase().as_str() {
        "instance_type" => "instanceType",
        "operating_system" => "operatingSystem",
        "database_engine" => "databaseEngine",
        "deployment_option" => "deploymentOption",
        _ => key,
    }
}

/// Deterministic lookup key: field names sorted, `field:value` pairs joined
/// with `|`. Engine/OS values are lower-cased so case variants collapse to
/// one key.
pub fn build_lookup_key(filters: &[(&str, String)]) -> String {
    let mut parts: Vec<(&str, String)> = filters
        .iter()
        .map(|(key, value)| {
            let value = if CASE_INSENSITIVE_FIELDS.contains(&key.to_ascii_lowercase().as_str()) {
                value.to_lowercase()
            } else {
                value.clone()
            };
            (*key, value)
        })
        .collect();
    parts.sort_by(|a, b| a.0.cmp(b.0));
    parts
        .iter()
        .map(|(key, value)| format!("{key}:{value}"))
        .collect::<Vec<_>>()
        .join("|")
}

/// Whether a product's attributes satisfy every filter.
pub fn filters_match(attributes: &HashMap<String, String>, filters: &[(&str, String)]) -> bool {
    filters.iter().all(|(key, value)| {
        let attr_key = normalize_attribute_key(key);
        let attr_value = attributes.get(attr_key).map(String::as_str).unwrap_or("");
        if CASE_INSENSITIVE_FIELDS.contains(&key.to_ascii_lowercase().as_str()) {
            attr_value.eq_ignore_ascii_case(value)
        } else {
            attr_value == value
        }
    })
}

/// Capacity-status tie-break priority: lower is better.
/// Used < unused-reservation < allocated-reservation < unknown.
pub fn capacity_priority(capacity_status: &str) -> u8 {
    let status = capacity_status.to_lowercase();
    if status == "used" {
        0
    } else if status.contains("unused") {
        1
    } else if status.contains("allocated") {
        2
    } else {
        3
    }
}

/// Lowest on-demand hourly USD price across a SKU's dimensions.
pub fn on_demand_hourly_price(terms: &OfferTerms, sku: &str) -> Option<f64> {
    let term_entries = terms.on_demand.get(sku)?;
    let mut best: Option<f64> = None;
    for term in term_entries.values() {
        for dimension in term.price_dimensions.values() {
            if let Some(raw) = dimension.price_per_unit.get("USD") {
                if let Ok(price) = raw.parse::<f64>() {
                    if best.map(|current| price < current).unwrap_or(true) {
                        best = Some(price);
                    }
                }
            }
        }
    }
    best
}

/// Linear scan over all products: match filters, prefer "Used" capacity, and
/// return the lowest-priced candidate with its SKU.
pub fn select_price(document: &OfferDocument, filters: &[(&str, String)]) -> Option<(f64, String)> {
    let mut matching: Vec<(&String, u8)> = Vec::new();
    for (sku, product) in &document.products {
        if filters_match(&product.attributes, filters) {
            let capacity = product
                .attributes
                .get("capacitystatus")
                .map(String::as_str)
                .unwrap_or("");
            matching.push((sku, capacity_priority(capacity)));
        }
    }

    if matching.is_empty() {
        return None;
    }

    let best_priority = matching.iter().map(|(_, priority)| *priority).min()?;
    let mut best: Option<(f64, String)> = None;
    for (sku, priority) in matching {
        if priority != best_priority {
            continue;
        }
        if let Some(price) = on_demand_hourly_price(&document.terms, sku) {
            let better = best
                .as_ref()
                .map(|(current, _)| price < *current)
                .unwrap_or(true);
            if better {
                best = Some((price, sku.clone()));
            }
        }
    }
    best
}
