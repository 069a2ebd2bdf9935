use std::collections::HashSet;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use super::error::{DataIntegrityError, RecordKind};
use super::graph::{AdjacencyRecord, GraphIndex, IndustryNode, Link};

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawDataset {
    pub(super) nodes: Vec<RawNode>,
    #[serde(default)]
    pub(super) suppliers: Vec<RawSupplierRecord>,
    #[serde(default)]
    pub(super) customers: Vec<RawCustomerRecord>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawNode {
    pub(super) id: String,
    pub(super) name: String,
    pub(super) upstreamness: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawSupplierRecord {
    pub(super) id: String,
    #[serde(default)]
    pub(super) suppliers: Vec<String>,
    #[serde(default)]
    pub(super) percentages: Vec<f64>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawCustomerRecord {
    pub(super) id: String,
    #[serde(default)]
    pub(super) customers: Vec<String>,
    #[serde(default)]
    pub(super) percentages: Vec<f64>,
}

pub(super) fn decode_dataset(raw: &str) -> Result<RawDataset> {
    serde_json::from_str(raw).context("invalid production network JSON")
}

pub(super) fn build_index(raw: RawDataset) -> Result<GraphIndex, DataIntegrityError> {
    if raw.nodes.is_empty() {
        return Err(DataIntegrityError::Empty);
    }

    let mut known = HashSet::with_capacity(raw.nodes.len());
    for node in &raw.nodes {
        if !known.insert(node.id.as_str()) {
            return Err(DataIntegrityError::DuplicateNode {
                id: node.id.clone(),
            });
        }
    }

    let suppliers = raw
        .suppliers
        .iter()
        .map(|record| {
            pair_links(
                RecordKind::Suppliers,
                &record.id,
                &record.suppliers,
                &record.percentages,
                &known,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    let customers = raw
        .customers
        .iter()
        .map(|record| {
            pair_links(
                RecordKind::Customers,
                &record.id,
                &record.customers,
                &record.percentages,
                &known,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let supplier_owners = record_owners(RecordKind::Suppliers, &suppliers)?;
    let customer_owners = record_owners(RecordKind::Customers, &customers)?;
    for node in &raw.nodes {
        if !supplier_owners.contains(node.id.as_str()) {
            return Err(DataIntegrityError::MissingRecord {
                kind: RecordKind::Suppliers,
                id: node.id.clone(),
            });
        }
        if !customer_owners.contains(node.id.as_str()) {
            return Err(DataIntegrityError::MissingRecord {
                kind: RecordKind::Customers,
                id: node.id.clone(),
            });
        }
    }

    for (supplier_record, customer_record) in suppliers.iter().filter_map(|record| {
        customers
            .iter()
            .find(|candidate| candidate.id == record.id)
            .map(|customer| (record, customer))
    }) {
        if !shared_ids_in_same_order(supplier_record, customer_record) {
            warn!(
                industry = %supplier_record.id,
                "industries that are both supplier and customer appear in a different order in the two lists"
            );
        }
    }

    let nodes = raw
        .nodes
        .into_iter()
        .map(|node| IndustryNode {
            id: node.id,
            name: node.name,
            upstreamness: node.upstreamness,
        })
        .collect();

    Ok(GraphIndex::new(nodes, suppliers, customers))
}

fn record_owners(
    kind: RecordKind,
    records: &[AdjacencyRecord],
) -> Result<HashSet<&str>, DataIntegrityError> {
    let mut owners = HashSet::with_capacity(records.len());
    for record in records {
        if !owners.insert(record.id.as_str()) {
            return Err(DataIntegrityError::DuplicateRecord {
                kind,
                id: record.id.clone(),
            });
        }
    }
    Ok(owners)
}

fn pair_links(
    kind: RecordKind,
    owner: &str,
    ids: &[String],
    percentages: &[f64],
    known: &HashSet<&str>,
) -> Result<AdjacencyRecord, DataIntegrityError> {
    if !known.contains(owner) {
        return Err(DataIntegrityError::UnknownNode {
            kind,
            owner: owner.to_owned(),
            id: owner.to_owned(),
        });
    }

    if ids.len() != percentages.len() {
        return Err(DataIntegrityError::LengthMismatch {
            kind,
            id: owner.to_owned(),
            ids: ids.len(),
            percentages: percentages.len(),
        });
    }

    let mut seen = HashSet::with_capacity(ids.len());
    let mut links = Vec::with_capacity(ids.len());
    for (id, &pct) in ids.iter().zip(percentages) {
        if id == owner {
            return Err(DataIntegrityError::SelfLink {
                kind,
                id: owner.to_owned(),
            });
        }
        if !known.contains(id.as_str()) {
            return Err(DataIntegrityError::UnknownNode {
                kind,
                owner: owner.to_owned(),
                id: id.clone(),
            });
        }
        if !seen.insert(id.as_str()) {
            return Err(DataIntegrityError::DuplicateLink {
                kind,
                owner: owner.to_owned(),
                id: id.clone(),
            });
        }
        links.push(Link {
            id: id.clone(),
            pct,
        });
    }

    Ok(AdjacencyRecord {
        id: owner.to_owned(),
        links,
    })
}

fn shared_ids_in_same_order(suppliers: &AdjacencyRecord, customers: &AdjacencyRecord) -> bool {
    let upstream = suppliers
        .ids()
        .filter(|id| customers.contains(id))
        .collect::<Vec<_>>();
    let downstream = customers
        .ids()
        .filter(|id| suppliers.contains(id))
        .collect::<Vec<_>>();
    upstream == downstream
}
