use tracing::debug;

use crate::util::format_percent;

use super::error::NetworkError;
use super::graph::{GraphIndex, Link};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Group {
    Focus,
    Supplier,
    Customer,
    Both,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassifiedNode {
    pub id: String,
    pub name: String,
    pub group: Group,
    pub group_index: usize,
    pub detail1: String,
    pub detail2: String,
    pub upstream_suppliers: Vec<Link>,
    pub downstream_customers: Vec<Link>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FocusResolution {
    pub focus_id: String,
    pub nodes: Vec<ClassifiedNode>,
    pub upstream_ids: Vec<String>,
    pub downstream_ids: Vec<String>,
}

impl FocusResolution {
    pub fn in_group(&self, group: Group) -> impl Iterator<Item = &ClassifiedNode> {
        self.nodes.iter().filter(move |node| node.group == group)
    }

    pub fn group_count(&self, group: Group) -> usize {
        self.in_group(group).count()
    }

    pub fn node(&self, id: &str) -> Option<&ClassifiedNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn is_upstream(&self, id: &str) -> bool {
        self.upstream_ids.iter().any(|candidate| candidate == id)
    }

    pub fn is_downstream(&self, id: &str) -> bool {
        self.downstream_ids.iter().any(|candidate| candidate == id)
    }
}

fn supplier_detail(id: &str, pct: f64) -> String {
    format!(
        "% of focus industry's supplies purchased from industry {id}: {}",
        format_percent(pct)
    )
}

fn customer_detail(id: &str, pct: f64) -> String {
    format!(
        "% of focus industry's output sold to industry {id} : {}",
        format_percent(pct)
    )
}

/// Classifies every industry touching `focus_id`. Pure in `graph` and `focus_id`.
pub fn resolve_focus(graph: &GraphIndex, focus_id: &str) -> Result<FocusResolution, NetworkError> {
    let (Ok(upstream), Ok(downstream)) = (
        graph.supplier_record(focus_id),
        graph.customer_record(focus_id),
    ) else {
        return Err(NetworkError::UnknownFocusIndustry(focus_id.to_owned()));
    };

    let display_name = |id: &str| {
        graph
            .node_info(id)
            .map(|node| node.display_name())
            .map_err(NetworkError::into_integrity)
    };

    let mut nodes = Vec::with_capacity(1 + upstream.len() + downstream.len());
    nodes.push(ClassifiedNode {
        id: focus_id.to_owned(),
        name: display_name(focus_id)?,
        group: Group::Focus,
        group_index: 0,
        detail1: String::new(),
        detail2: String::new(),
        upstream_suppliers: Vec::new(),
        downstream_customers: Vec::new(),
    });

    let mut supplier_index = 0;
    let mut both_index = 0;
    for link in &upstream.links {
        let name = display_name(&link.id)?;
        if let Some(customer_link) = downstream.link(&link.id) {
            nodes.push(ClassifiedNode {
                id: link.id.clone(),
                name,
                group: Group::Both,
                group_index: both_index,
                detail1: supplier_detail(&link.id, link.pct),
                detail2: customer_detail(&link.id, customer_link.pct),
                upstream_suppliers: Vec::new(),
                downstream_customers: Vec::new(),
            });
            both_index += 1;
        } else {
            let upstream_suppliers = graph
                .supplier_record(&link.id)
                .map_err(NetworkError::into_integrity)?
                .links
                .clone();
            nodes.push(ClassifiedNode {
                id: link.id.clone(),
                name,
                group: Group::Supplier,
                group_index: supplier_index,
                detail1: supplier_detail(&link.id, link.pct),
                detail2: String::new(),
                upstream_suppliers,
                downstream_customers: Vec::new(),
            });
            supplier_index += 1;
        }
    }

    let mut customer_index = 0;
    for link in &downstream.links {
        if upstream.contains(&link.id) {
            continue;
        }

        let downstream_customers = graph
            .customer_record(&link.id)
            .map_err(NetworkError::into_integrity)?
            .links
            .clone();
        nodes.push(ClassifiedNode {
            id: link.id.clone(),
            name: display_name(&link.id)?,
            group: Group::Customer,
            group_index: customer_index,
            detail1: customer_detail(&link.id, link.pct),
            detail2: String::new(),
            upstream_suppliers: Vec::new(),
            downstream_customers,
        });
        customer_index += 1;
    }

    debug!(
        focus = focus_id,
        suppliers = supplier_index,
        customers = customer_index,
        both = both_index,
        "resolved focus industry"
    );

    Ok(FocusResolution {
        focus_id: focus_id.to_owned(),
        nodes,
        upstream_ids: upstream.ids().map(str::to_owned).collect(),
        downstream_ids: downstream.ids().map(str::to_owned).collect(),
    })
}
