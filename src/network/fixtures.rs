use std::collections::HashSet;

use super::dataset::{RawCustomerRecord, RawDataset, RawNode, RawSupplierRecord, build_index};
use super::graph::GraphIndex;

#[derive(Default)]
pub(crate) struct GraphBuilder {
    nodes: Vec<RawNode>,
    suppliers: Vec<RawSupplierRecord>,
    customers: Vec<RawCustomerRecord>,
}

impl GraphBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn industry(mut self, id: &str, upstreamness: f64) -> Self {
        self.declare(id);
        if let Some(node) = self.nodes.iter_mut().find(|node| node.id == id) {
            node.upstreamness = upstreamness;
        }
        self
    }

    pub(crate) fn named(mut self, id: &str, name: &str) -> Self {
        self.declare(id);
        if let Some(node) = self.nodes.iter_mut().find(|node| node.id == id) {
            node.name = name.to_owned();
        }
        self
    }

    pub(crate) fn suppliers(mut self, id: &str, links: &[(&str, f64)]) -> Self {
        self.declare(id);
        for (link, _) in links {
            self.declare(link);
        }
        self.suppliers.retain(|record| record.id != id);
        self.suppliers.push(RawSupplierRecord {
            id: id.to_owned(),
            suppliers: links.iter().map(|(link, _)| (*link).to_owned()).collect(),
            percentages: links.iter().map(|(_, pct)| *pct).collect(),
        });
        self
    }

    pub(crate) fn customers(mut self, id: &str, links: &[(&str, f64)]) -> Self {
        self.declare(id);
        for (link, _) in links {
            self.declare(link);
        }
        self.customers.retain(|record| record.id != id);
        self.customers.push(RawCustomerRecord {
            id: id.to_owned(),
            customers: links.iter().map(|(link, _)| (*link).to_owned()).collect(),
            percentages: links.iter().map(|(_, pct)| *pct).collect(),
        });
        self
    }

    pub(crate) fn build(mut self) -> GraphIndex {
        let with_suppliers = self
            .suppliers
            .iter()
            .map(|record| record.id.clone())
            .collect::<HashSet<_>>();
        let with_customers = self
            .customers
            .iter()
            .map(|record| record.id.clone())
            .collect::<HashSet<_>>();

        for node in &self.nodes {
            if !with_suppliers.contains(&node.id) {
                self.suppliers.push(RawSupplierRecord {
                    id: node.id.clone(),
                    suppliers: Vec::new(),
                    percentages: Vec::new(),
                });
            }
            if !with_customers.contains(&node.id) {
                self.customers.push(RawCustomerRecord {
                    id: node.id.clone(),
                    customers: Vec::new(),
                    percentages: Vec::new(),
                });
            }
        }

        build_index(RawDataset {
            nodes: self.nodes,
            suppliers: self.suppliers,
            customers: self.customers,
        })
        .expect("fixture dataset is consistent")
    }

    fn declare(&mut self, id: &str) {
        if self.nodes.iter().any(|node| node.id == id) {
            return;
        }
        self.nodes.push(RawNode {
            id: id.to_owned(),
            name: format!("Industry {id}"),
            upstreamness: 2.0,
        });
    }
}
