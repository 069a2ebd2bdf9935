use super::focus::{FocusResolution, Group};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Upstream,
    Downstream,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SecondDegreeNode {
    pub side: Side,
    pub parent_id: String,
    pub horizontal_index: usize,
    pub vertical_index: usize,
    pub name: String,
}

/// Suppliers of supplier-only nodes and customers of customer-only nodes.
/// Both-group nodes are never expanded.
pub fn expand_second_degree(resolution: &FocusResolution) -> Vec<SecondDegreeNode> {
    let mut expanded = Vec::new();

    for parent in resolution.in_group(Group::Supplier) {
        expanded.extend(
            parent
                .upstream_suppliers
                .iter()
                .enumerate()
                .map(|(vertical_index, link)| SecondDegreeNode {
                    side: Side::Upstream,
                    parent_id: parent.id.clone(),
                    horizontal_index: parent.group_index,
                    vertical_index,
                    name: link.id.clone(),
                }),
        );
    }

    for parent in resolution.in_group(Group::Customer) {
        expanded.extend(
            parent
                .downstream_customers
                .iter()
                .enumerate()
                .map(|(vertical_index, link)| SecondDegreeNode {
                    side: Side::Downstream,
                    parent_id: parent.id.clone(),
                    horizontal_index: parent.group_index,
                    vertical_index,
                    name: link.id.clone(),
                }),
        );
    }

    expanded
}
