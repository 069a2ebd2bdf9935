use eframe::egui::{Pos2, pos2, vec2};

use crate::network::{ClassifiedNode, FocusResolution, Group, SecondDegreeNode, Side};
use crate::util::truncate_label;

use super::geometry::SceneGeometry;
use super::scale::LinearScale;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverText {
    pub title: String,
    pub detail1: String,
    pub detail2: String,
}

impl HoverText {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        [&self.title, &self.detail1, &self.detail2]
            .into_iter()
            .map(String::as_str)
            .filter(|line| !line.is_empty())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stem {
    pub from_y: f32,
    pub to_y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub id: String,
    pub name: String,
    pub label: String,
    pub group: Group,
    pub group_index: usize,
    pub position: Pos2,
    pub radius: f32,
    pub stem: Option<Stem>,
    pub hover: HoverText,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SecondDegreePlacement {
    pub node: SecondDegreeNode,
    pub anchor: Pos2,
    pub connector: f32,
    pub radius: f32,
}

impl SecondDegreePlacement {
    pub fn dot(&self) -> Pos2 {
        self.anchor + vec2(self.connector, 0.0)
    }

    pub fn label_anchor(&self) -> Pos2 {
        self.anchor + vec2(self.connector + 10.0, 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    Supplier,
    Customer,
    Both,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneEdge {
    pub kind: EdgeKind,
    pub from: Pos2,
    pub to: Pos2,
}

impl SceneEdge {
    pub fn arrow_at_start(&self) -> bool {
        self.kind == EdgeKind::Both
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub focus_id: String,
    pub nodes: Vec<SceneNode>,
    pub second_degree: Vec<SecondDegreePlacement>,
    pub edges: Vec<SceneEdge>,
}

impl Scene {
    pub fn node(&self, id: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

struct GroupScales {
    upstream: LinearScale,
    downstream: LinearScale,
    both: LinearScale,
}

impl GroupScales {
    fn new(resolution: &FocusResolution, geometry: &SceneGeometry) -> Self {
        Self {
            upstream: LinearScale::spread(
                resolution.group_count(Group::Supplier),
                geometry.group_half_step,
            ),
            downstream: LinearScale::spread(
                resolution.group_count(Group::Customer),
                geometry.group_half_step,
            ),
            both: LinearScale::spread(
                resolution.group_count(Group::Both),
                geometry.both_half_step,
            ),
        }
    }
}

fn hover_for(node: &ClassifiedNode) -> HoverText {
    let (detail1, detail2) = match node.group {
        Group::Focus => (String::new(), String::new()),
        Group::Supplier | Group::Customer => (node.detail1.clone(), String::new()),
        Group::Both => (node.detail1.clone(), node.detail2.clone()),
    };
    HoverText {
        title: node.name.clone(),
        detail1,
        detail2,
    }
}

fn place_first_degree(
    node: &ClassifiedNode,
    scales: &GroupScales,
    geometry: &SceneGeometry,
) -> SceneNode {
    let focus = geometry.focus;
    let index = node.group_index;
    let step = geometry.second_degree_step;
    let gap = geometry.second_degree_gap;

    let (position, stem) = match node.group {
        Group::Focus => (focus, None),
        Group::Supplier => (
            pos2(focus.x + scales.upstream.map_index(index), geometry.supplier_y),
            Some(Stem {
                from_y: -gap,
                to_y: -gap - step * node.upstream_suppliers.len() as f32,
            }),
        ),
        Group::Customer => (
            pos2(focus.x + scales.downstream.map_index(index), geometry.customer_y),
            Some(Stem {
                from_y: gap,
                to_y: gap + step * node.downstream_customers.len() as f32,
            }),
        ),
        Group::Both => (
            pos2(geometry.both_x, focus.y + scales.both.map_index(index)),
            None,
        ),
    };

    SceneNode {
        id: node.id.clone(),
        name: node.name.clone(),
        label: truncate_label(&node.name, geometry.label_max_chars),
        group: node.group,
        group_index: index,
        position,
        radius: if node.group == Group::Focus {
            geometry.focus_radius
        } else {
            geometry.node_radius
        },
        stem,
        hover: hover_for(node),
    }
}

fn place_second_degree(
    node: &SecondDegreeNode,
    scales: &GroupScales,
    geometry: &SceneGeometry,
) -> SecondDegreePlacement {
    let stack = geometry.second_degree_step * (node.vertical_index + 1) as f32;
    let anchor = match node.side {
        Side::Upstream => pos2(
            geometry.focus.x + scales.upstream.map_index(node.horizontal_index),
            geometry.supplier_y - geometry.second_degree_gap - stack,
        ),
        Side::Downstream => pos2(
            geometry.focus.x + scales.downstream.map_index(node.horizontal_index),
            geometry.customer_y + geometry.second_degree_gap + stack,
        ),
    };

    SecondDegreePlacement {
        node: node.clone(),
        anchor,
        connector: geometry.second_degree_connector,
        radius: geometry.second_degree_radius,
    }
}

fn derive_edges(
    resolution: &FocusResolution,
    scales: &GroupScales,
    geometry: &SceneGeometry,
) -> Vec<SceneEdge> {
    let focus = geometry.focus;
    let taper = geometry.edge_focus_taper;
    let mut edges = Vec::new();

    for node in resolution.in_group(Group::Supplier) {
        let offset = scales.upstream.map_index(node.group_index);
        edges.push(SceneEdge {
            kind: EdgeKind::Supplier,
            from: pos2(
                focus.x + offset,
                geometry.supplier_y + geometry.edge_node_clearance,
            ),
            to: pos2(
                focus.x + offset / taper,
                focus.y - geometry.edge_focus_clearance,
            ),
        });
    }

    for node in resolution.in_group(Group::Customer) {
        let offset = scales.downstream.map_index(node.group_index);
        edges.push(SceneEdge {
            kind: EdgeKind::Customer,
            from: pos2(
                focus.x + offset / taper,
                focus.y + geometry.edge_focus_clearance,
            ),
            to: pos2(
                focus.x + offset,
                geometry.customer_y - geometry.edge_node_clearance,
            ),
        });
    }

    for node in resolution.in_group(Group::Both) {
        let y = focus.y + scales.both.map_index(node.group_index);
        edges.push(SceneEdge {
            kind: EdgeKind::Both,
            from: pos2(focus.x + geometry.both_edge_start, y),
            to: pos2(focus.x + geometry.both_edge_end, y),
        });
    }

    edges
}

pub fn layout_scene(
    resolution: &FocusResolution,
    second_degree: &[SecondDegreeNode],
    geometry: &SceneGeometry,
) -> Scene {
    let scales = GroupScales::new(resolution, geometry);

    Scene {
        focus_id: resolution.focus_id.clone(),
        nodes: resolution
            .nodes
            .iter()
            .map(|node| place_first_degree(node, &scales, geometry))
            .collect(),
        second_degree: second_degree
            .iter()
            .map(|node| place_second_degree(node, &scales, geometry))
            .collect(),
        edges: derive_edges(resolution, &scales, geometry),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::network::fixtures::GraphBuilder;
    use crate::network::{expand_second_degree, resolve_focus};

    fn scene_for(graph: &crate::network::GraphIndex, focus: &str) -> Scene {
        let resolution = resolve_focus(graph, focus).unwrap();
        let second_degree = expand_second_degree(&resolution);
        layout_scene(&resolution, &second_degree, &SceneGeometry::default())
    }

    fn network() -> crate::network::GraphIndex {
        GraphBuilder::new()
            .suppliers("X", &[("A", 0.4), ("B", 0.6), ("D", 0.1)])
            .customers("X", &[("B", 0.7), ("C", 0.3)])
            .suppliers("A", &[("P", 0.5), ("Q", 0.5)])
            .customers("C", &[("R", 0.2)])
            .build()
    }

    #[test]
    fn places_groups_on_their_baselines() {
        let scene = scene_for(&network(), "X");

        let positions = scene
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), node.position))
            .collect::<Vec<_>>();
        assert_eq!(
            positions,
            vec![
                ("X", pos2(325.0, 350.0)),
                ("A", pos2(225.0, 200.0)),
                ("B", pos2(560.0, 350.0)),
                ("D", pos2(425.0, 200.0)),
                ("C", pos2(325.0, 500.0)),
            ]
        );
        assert_eq!(scene.node("X").unwrap().radius, 25.0);
        assert_eq!(scene.node("C").unwrap().radius, 17.0);
    }

    #[test]
    fn stems_reach_second_degree_stacks() {
        let scene = scene_for(&network(), "X");

        assert_eq!(
            scene.node("A").unwrap().stem,
            Some(Stem {
                from_y: -20.0,
                to_y: -80.0,
            })
        );
        assert_eq!(
            scene.node("D").unwrap().stem,
            Some(Stem {
                from_y: -20.0,
                to_y: -20.0,
            })
        );
        assert_eq!(
            scene.node("C").unwrap().stem,
            Some(Stem {
                from_y: 20.0,
                to_y: 50.0,
            })
        );
        assert_eq!(scene.node("B").unwrap().stem, None);
    }

    #[test]
    fn second_degree_stacks_away_from_baseline() {
        let scene = scene_for(&network(), "X");

        let anchors = scene
            .second_degree
            .iter()
            .map(|placement| (placement.node.name.as_str(), placement.anchor))
            .collect::<Vec<_>>();
        assert_eq!(
            anchors,
            vec![
                ("P", pos2(225.0, 150.0)),
                ("Q", pos2(225.0, 120.0)),
                ("R", pos2(325.0, 550.0)),
            ]
        );
        assert_eq!(scene.second_degree[0].dot(), pos2(240.0, 150.0));
    }

    #[test]
    fn both_column_spreads_by_group_index() {
        let graph = GraphBuilder::new()
            .suppliers("F", &[("A", 0.1), ("B", 0.1), ("C", 0.1)])
            .customers("F", &[("C", 0.1), ("B", 0.1), ("A", 0.1)])
            .build();
        let scene = scene_for(&graph, "F");

        let ys = ["A", "B", "C"]
            .iter()
            .map(|id| scene.node(id).unwrap().position.y)
            .collect::<Vec<_>>();
        assert_eq!(ys, vec![305.0, 350.0, 395.0]);
        assert!(scene.nodes.iter().skip(1).all(|node| node.position.x == 560.0));
    }

    #[test]
    fn edges_follow_classification() {
        let scene = scene_for(&network(), "X");

        assert_eq!(
            scene.edges,
            vec![
                SceneEdge {
                    kind: EdgeKind::Supplier,
                    from: pos2(225.0, 225.0),
                    to: pos2(325.0 - 100.0 / 15.0, 317.0),
                },
                SceneEdge {
                    kind: EdgeKind::Supplier,
                    from: pos2(425.0, 225.0),
                    to: pos2(325.0 + 100.0 / 15.0, 317.0),
                },
                SceneEdge {
                    kind: EdgeKind::Customer,
                    from: pos2(325.0, 383.0),
                    to: pos2(325.0, 475.0),
                },
                SceneEdge {
                    kind: EdgeKind::Both,
                    from: pos2(405.0, 350.0),
                    to: pos2(485.0, 350.0),
                },
            ]
        );
        assert!(scene.edges[3].arrow_at_start());
        assert!(!scene.edges[0].arrow_at_start());
    }

    #[test]
    fn hover_text_depends_on_group() {
        let scene = scene_for(&network(), "X");

        assert_eq!(scene.node("X").unwrap().hover.lines().count(), 1);
        assert_eq!(scene.node("A").unwrap().hover.lines().count(), 2);
        let both = &scene.node("B").unwrap().hover;
        assert_eq!(both.title, "Industry B (B)");
        assert!(both.detail2.starts_with("% of focus industry's output sold"));
    }

    #[test]
    fn labels_are_truncated() {
        let scene = scene_for(&network(), "X");
        assert_eq!(scene.node("A").unwrap().label, "Industry A (A)");

        let mut geometry = SceneGeometry::default();
        geometry.label_max_chars = 8;
        let resolution = resolve_focus(&network(), "X").unwrap();
        let short = layout_scene(&resolution, &[], &geometry);
        assert_eq!(short.nodes[0].label, "Industry...");
        assert!(short.second_degree.is_empty());
    }
}
