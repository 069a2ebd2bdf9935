use std::collections::HashMap;

use super::error::{NetworkError, RecordKind};

#[derive(Clone, Debug, PartialEq)]
pub struct IndustryNode {
    pub id: String,
    pub name: String,
    pub upstreamness: f64,
}

impl IndustryNode {
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub id: String,
    pub pct: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AdjacencyRecord {
    pub id: String,
    pub links: Vec<Link>,
}

impl AdjacencyRecord {
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|link| link.id.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.links.iter().any(|link| link.id == id)
    }

    pub fn link(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.id == id)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }
}

/// Built only by the validating loader, so every industry in `nodes` owns
/// exactly one supplier record and one customer record.
#[derive(Clone, Debug)]
pub struct GraphIndex {
    nodes: Vec<IndustryNode>,
    suppliers: Vec<AdjacencyRecord>,
    customers: Vec<AdjacencyRecord>,
    node_by_id: HashMap<String, usize>,
    supplier_by_id: HashMap<String, usize>,
    customer_by_id: HashMap<String, usize>,
}

impl GraphIndex {
    pub(super) fn new(
        nodes: Vec<IndustryNode>,
        suppliers: Vec<AdjacencyRecord>,
        customers: Vec<AdjacencyRecord>,
    ) -> Self {
        fn index_of<T>(items: &[T], key: impl Fn(&T) -> &str) -> HashMap<String, usize> {
            let mut index = HashMap::with_capacity(items.len());
            for (position, item) in items.iter().enumerate() {
                index.entry(key(item).to_owned()).or_insert(position);
            }
            index
        }

        let node_by_id = index_of(&nodes, |node| node.id.as_str());
        let supplier_by_id = index_of(&suppliers, |record| record.id.as_str());
        let customer_by_id = index_of(&customers, |record| record.id.as_str());

        Self {
            nodes,
            suppliers,
            customers,
            node_by_id,
            supplier_by_id,
            customer_by_id,
        }
    }

    pub fn supplier_record(&self, id: &str) -> Result<&AdjacencyRecord, NetworkError> {
        self.supplier_by_id
            .get(id)
            .map(|&index| &self.suppliers[index])
            .ok_or_else(|| NetworkError::NotFound {
                kind: RecordKind::Suppliers,
                id: id.to_owned(),
            })
    }

    pub fn customer_record(&self, id: &str) -> Result<&AdjacencyRecord, NetworkError> {
        self.customer_by_id
            .get(id)
            .map(|&index| &self.customers[index])
            .ok_or_else(|| NetworkError::NotFound {
                kind: RecordKind::Customers,
                id: id.to_owned(),
            })
    }

    pub fn node_info(&self, id: &str) -> Result<&IndustryNode, NetworkError> {
        self.node_by_id
            .get(id)
            .map(|&index| &self.nodes[index])
            .ok_or_else(|| NetworkError::NotFound {
                kind: RecordKind::Node,
                id: id.to_owned(),
            })
    }

    pub fn name_of(&self, id: &str) -> Result<&str, NetworkError> {
        self.node_info(id).map(|node| node.name.as_str())
    }

    pub fn upstreamness_of(&self, id: &str) -> Result<f64, NetworkError> {
        self.node_info(id).map(|node| node.upstreamness)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_by_id.contains_key(id)
    }

    /// Industries in dataset order.
    pub fn nodes(&self) -> &[IndustryNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.suppliers.iter().map(AdjacencyRecord::len).sum::<usize>()
            + self.customers.iter().map(AdjacencyRecord::len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_index() -> GraphIndex {
        GraphIndex::new(
            vec![
                IndustryNode {
                    id: "111CA".to_owned(),
                    name: "Farms".to_owned(),
                    upstreamness: 2.71,
                },
                IndustryNode {
                    id: "311FT".to_owned(),
                    name: "Food and beverage".to_owned(),
                    upstreamness: 1.42,
                },
            ],
            vec![AdjacencyRecord {
                id: "311FT".to_owned(),
                links: vec![Link {
                    id: "111CA".to_owned(),
                    pct: 0.25,
                }],
            }],
            vec![AdjacencyRecord {
                id: "111CA".to_owned(),
                links: vec![Link {
                    id: "311FT".to_owned(),
                    pct: 0.5,
                }],
            }],
        )
    }

    #[test]
    fn lookups_hit_indexed_records() {
        let index = tiny_index();

        assert_eq!(index.name_of("111CA").unwrap(), "Farms");
        assert_eq!(index.upstreamness_of("311FT").unwrap(), 1.42);
        assert!(index.contains("311FT"));
        assert!(index.supplier_record("311FT").unwrap().contains("111CA"));
        assert_eq!(
            index.customer_record("111CA").unwrap().link("311FT").unwrap().pct,
            0.5
        );
        assert_eq!(index.link_count(), 2);
    }

    #[test]
    fn missing_ids_report_not_found() {
        let index = tiny_index();

        assert_eq!(
            index.supplier_record("111CA").unwrap_err(),
            NetworkError::NotFound {
                kind: RecordKind::Suppliers,
                id: "111CA".to_owned(),
            }
        );
        assert!(matches!(
            index.node_info("999XX"),
            Err(NetworkError::NotFound {
                kind: RecordKind::Node,
                ..
            })
        ));
    }

    #[test]
    fn display_name_appends_code() {
        let index = tiny_index();
        assert_eq!(
            index.node_info("111CA").unwrap().display_name(),
            "Farms (111CA)"
        );
    }
}
