use std::collections::HashMap;
use std::f64::consts::PI;

use eframe::egui::{Pos2, pos2};
use tracing::info;

use crate::network::{FocusResolution, GraphIndex};
use crate::util::golden_direction;

use super::scale::LinearScale;
use super::scene::HoverText;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeeswarmConfig {
    pub center: Pos2,
    pub height: f32,
    pub upstreamness_domain: (f32, f32),
    pub charge_strength: f64,
    pub x_target: f64,
    pub x_strength: f64,
    pub y_strength: f64,
    pub collision_radius: f64,
    pub collision_strength: f64,
    pub iterations: usize,
    pub alpha_min: f64,
    pub velocity_decay: f64,
    pub node_radius: f32,
    pub stroke_width: f32,
    pub caption_gap: f32,
    pub width: f32,
}

impl Default for BeeswarmConfig {
    fn default() -> Self {
        Self {
            center: pos2(100.0, 250.0),
            height: 400.0,
            upstreamness_domain: (4.5, 1.0),
            charge_strength: 15.0,
            x_target: 0.0,
            x_strength: 0.1,
            y_strength: 0.1,
            collision_radius: 13.0,
            collision_strength: 1.0,
            iterations: 300,
            alpha_min: 0.001,
            velocity_decay: 0.4,
            node_radius: 10.0,
            stroke_width: 4.0,
            caption_gap: 30.0,
            width: 200.0,
        }
    }
}

impl BeeswarmConfig {
    pub fn upstream_caption(&self) -> Pos2 {
        pos2(
            self.center.x,
            self.center.y - self.height / 2.0 - self.caption_gap,
        )
    }

    pub fn downstream_caption(&self) -> Pos2 {
        pos2(
            self.center.x,
            self.center.y + self.height / 2.0 + self.caption_gap,
        )
    }

    fn y_scale(&self) -> LinearScale {
        LinearScale::new(self.upstreamness_domain, (0.0, self.height))
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Body {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
}

fn jiggle(index: usize) -> f64 {
    let (x, _) = golden_direction(index, 0.29);
    f64::from(x) * 1e-6
}

struct Simulation {
    bodies: Vec<Body>,
    targets_y: Vec<f64>,
    alpha: f64,
    alpha_decay: f64,
    config: BeeswarmConfig,
}

impl Simulation {
    fn new(targets_y: Vec<f64>, config: BeeswarmConfig) -> Self {
        let initial_angle = PI * (3.0 - 5.0_f64.sqrt());
        let bodies = (0..targets_y.len())
            .map(|index| {
                let radius = 10.0 * (0.5 + index as f64).sqrt();
                let angle = index as f64 * initial_angle;
                Body {
                    x: radius * angle.cos(),
                    y: radius * angle.sin(),
                    vx: 0.0,
                    vy: 0.0,
                }
            })
            .collect();
        let alpha_decay = 1.0 - config.alpha_min.powf(1.0 / config.iterations.max(1) as f64);

        Self {
            bodies,
            targets_y,
            alpha: 1.0,
            alpha_decay,
            config,
        }
    }

    fn tick(&mut self) {
        self.alpha += -self.alpha * self.alpha_decay;

        self.apply_charge();
        self.apply_center();
        self.apply_axis_pull();
        self.apply_collision();

        let retain = 1.0 - self.config.velocity_decay;
        for body in &mut self.bodies {
            body.vx *= retain;
            body.vy *= retain;
            body.x += body.vx;
            body.y += body.vy;
        }
    }

    /// Positive strength attracts, negative repels.
    fn apply_charge(&mut self) {
        let strength = self.config.charge_strength * self.alpha;
        let count = self.bodies.len();
        let mut deltas = vec![(0.0, 0.0); count];

        for i in 0..count {
            for j in 0..count {
                if i == j {
                    continue;
                }
                let mut dx = self.bodies[j].x - self.bodies[i].x;
                let mut dy = self.bodies[j].y - self.bodies[i].y;
                if dx == 0.0 {
                    dx = jiggle(i + j);
                }
                if dy == 0.0 {
                    dy = jiggle(i * 31 + j);
                }
                let mut distance_sq = dx * dx + dy * dy;
                if distance_sq < 1.0 {
                    distance_sq = distance_sq.sqrt();
                }
                let weight = strength / distance_sq;
                deltas[i].0 += dx * weight;
                deltas[i].1 += dy * weight;
            }
        }

        for (body, (dvx, dvy)) in self.bodies.iter_mut().zip(deltas) {
            body.vx += dvx;
            body.vy += dvy;
        }
    }

    fn apply_center(&mut self) {
        let count = self.bodies.len() as f64;
        let (sum_x, sum_y) = self
            .bodies
            .iter()
            .fold((0.0, 0.0), |(x, y), body| (x + body.x, y + body.y));
        let shift_x = sum_x / count - f64::from(self.config.center.x);
        let shift_y = sum_y / count - f64::from(self.config.center.y);
        for body in &mut self.bodies {
            body.x -= shift_x;
            body.y -= shift_y;
        }
    }

    fn apply_axis_pull(&mut self) {
        let x_pull = self.config.x_strength * self.alpha;
        let y_pull = self.config.y_strength * self.alpha;
        for (body, &target_y) in self.bodies.iter_mut().zip(&self.targets_y) {
            body.vx += (self.config.x_target - body.x) * x_pull;
            body.vy += (target_y - body.y) * y_pull;
        }
    }

    fn apply_collision(&mut self) {
        let radius = self.config.collision_radius;
        let reach = radius + radius;
        // Equal radii share every correction evenly.
        let share = (radius * radius) / (radius * radius + radius * radius);
        let count = self.bodies.len();

        for i in 0..count {
            let xi = self.bodies[i].x + self.bodies[i].vx;
            let yi = self.bodies[i].y + self.bodies[i].vy;
            for j in (i + 1)..count {
                let other = self.bodies[j];
                let mut dx = xi - other.x - other.vx;
                let mut dy = yi - other.y - other.vy;
                let mut distance_sq = dx * dx + dy * dy;
                if distance_sq >= reach * reach {
                    continue;
                }
                if dx == 0.0 {
                    dx = jiggle(i + j);
                    distance_sq += dx * dx;
                }
                if dy == 0.0 {
                    dy = jiggle(i * 31 + j);
                    distance_sq += dy * dy;
                }
                let distance = distance_sq.sqrt();
                let push = (reach - distance) / distance * self.config.collision_strength;
                dx *= push;
                dy *= push;

                self.bodies[i].vx += dx * share;
                self.bodies[i].vy += dy * share;
                self.bodies[j].vx -= dx * (1.0 - share);
                self.bodies[j].vy -= dy * (1.0 - share);
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct BeeswarmLayout {
    ids: Vec<String>,
    positions: Vec<Pos2>,
    index_by_id: HashMap<String, usize>,
    config: BeeswarmConfig,
}

impl BeeswarmLayout {
    pub fn compute(graph: &GraphIndex, config: BeeswarmConfig) -> Self {
        let y_scale = config.y_scale();
        let targets_y = graph
            .nodes()
            .iter()
            .map(|node| f64::from(y_scale.map(node.upstreamness as f32)))
            .collect::<Vec<_>>();

        let mut simulation = Simulation::new(targets_y, config);
        if !simulation.bodies.is_empty() {
            for _ in 0..config.iterations {
                simulation.tick();
            }
        }

        let ids = graph
            .nodes()
            .iter()
            .map(|node| node.id.clone())
            .collect::<Vec<_>>();
        let positions = simulation
            .bodies
            .iter()
            .map(|body| pos2(body.x as f32, body.y as f32))
            .collect::<Vec<_>>();
        let index_by_id = ids
            .iter()
            .enumerate()
            .map(|(index, id)| (id.clone(), index))
            .collect();

        let layout = Self {
            ids,
            positions,
            index_by_id,
            config,
        };
        info!(
            industries = layout.len(),
            iterations = config.iterations,
            "beeswarm layout settled"
        );
        layout
    }

    pub fn position(&self, id: &str) -> Option<Pos2> {
        self.index_by_id.get(id).map(|&index| self.positions[index])
    }

    pub fn config(&self) -> &BeeswarmConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BeeswarmRole {
    Focus,
    Supplier,
    Customer,
    Both,
    Unrelated,
}

pub fn beeswarm_role(resolution: &FocusResolution, id: &str) -> BeeswarmRole {
    let upstream = resolution.is_upstream(id);
    let downstream = resolution.is_downstream(id);
    if upstream && downstream {
        BeeswarmRole::Both
    } else if upstream {
        BeeswarmRole::Supplier
    } else if downstream {
        BeeswarmRole::Customer
    } else if id == resolution.focus_id {
        BeeswarmRole::Focus
    } else {
        BeeswarmRole::Unrelated
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BeeswarmNode {
    pub id: String,
    pub position: Pos2,
    pub radius: f32,
    pub role: BeeswarmRole,
    pub hover: HoverText,
}

/// Restyles the frozen beeswarm for the current focus; positions never move.
pub fn style_beeswarm(
    graph: &GraphIndex,
    layout: &BeeswarmLayout,
    resolution: &FocusResolution,
) -> Vec<BeeswarmNode> {
    graph
        .nodes()
        .iter()
        .filter_map(|node| {
            let position = layout.position(&node.id)?;
            Some(BeeswarmNode {
                id: node.id.clone(),
                position,
                radius: layout.config.node_radius,
                role: beeswarm_role(resolution, &node.id),
                hover: HoverText {
                    title: node.display_name(),
                    detail1: format!("Upstreamness: {}", node.upstreamness),
                    detail2: String::new(),
                },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::fixtures::GraphBuilder;
    use crate::network::resolve_focus;

    fn swarm() -> GraphIndex {
        GraphBuilder::new()
            .industry("RAW", 4.2)
            .industry("MID", 2.8)
            .industry("MID2", 2.7)
            .industry("MID3", 2.9)
            .industry("END", 1.1)
            .suppliers("END", &[("MID", 0.3), ("MID2", 0.2)])
            .customers("MID", &[("END", 0.4)])
            .suppliers("MID", &[("RAW", 0.6)])
            .build()
    }

    #[test]
    fn layout_is_deterministic() {
        let graph = swarm();
        let first = BeeswarmLayout::compute(&graph, BeeswarmConfig::default());
        let second = BeeswarmLayout::compute(&graph, BeeswarmConfig::default());

        assert_eq!(first.len(), graph.node_count());
        for node in graph.nodes() {
            let position = first.position(&node.id).unwrap();
            assert_eq!(second.position(&node.id), Some(position));
            assert!(position.x.is_finite() && position.y.is_finite());
        }
    }

    #[test]
    fn upstreamness_orders_vertically() {
        let layout = BeeswarmLayout::compute(&swarm(), BeeswarmConfig::default());
        let raw = layout.position("RAW").unwrap();
        let mid = layout.position("MID").unwrap();
        let end = layout.position("END").unwrap();

        assert!(raw.y < mid.y);
        assert!(mid.y < end.y);
    }

    #[test]
    fn swarm_is_centred_and_separated() {
        let graph = swarm();
        let layout = BeeswarmLayout::compute(&graph, BeeswarmConfig::default());
        let positions = graph
            .nodes()
            .iter()
            .filter_map(|node| layout.position(&node.id))
            .collect::<Vec<_>>();
        let count = layout.len() as f32;
        let mean_x = positions.iter().map(|position| position.x).sum::<f32>() / count;
        assert!((mean_x - 100.0).abs() < 1.0, "mean x was {mean_x}");

        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                assert!(a.distance(*b) > 10.0, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn roles_prefer_both_then_single_sides() {
        let graph = GraphBuilder::new()
            .suppliers("F", &[("A", 0.1), ("B", 0.1)])
            .customers("F", &[("B", 0.1), ("C", 0.1)])
            .industry("U", 2.0)
            .build();
        let resolution = resolve_focus(&graph, "F").unwrap();

        assert_eq!(beeswarm_role(&resolution, "A"), BeeswarmRole::Supplier);
        assert_eq!(beeswarm_role(&resolution, "B"), BeeswarmRole::Both);
        assert_eq!(beeswarm_role(&resolution, "C"), BeeswarmRole::Customer);
        assert_eq!(beeswarm_role(&resolution, "F"), BeeswarmRole::Focus);
        assert_eq!(beeswarm_role(&resolution, "U"), BeeswarmRole::Unrelated);
    }

    #[test]
    fn styling_keeps_positions() {
        let graph = swarm();
        let layout = BeeswarmLayout::compute(&graph, BeeswarmConfig::default());
        let for_end = style_beeswarm(&graph, &layout, &resolve_focus(&graph, "END").unwrap());
        let for_mid = style_beeswarm(&graph, &layout, &resolve_focus(&graph, "MID").unwrap());

        for (a, b) in for_end.iter().zip(&for_mid) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.position, b.position);
        }
        let raw = for_mid.iter().find(|node| node.id == "RAW").unwrap();
        assert_eq!(raw.role, BeeswarmRole::Supplier);
        assert_eq!(raw.hover.title, "Industry RAW (RAW)");
        assert_eq!(raw.hover.detail1, "Upstreamness: 4.2");
    }

    #[test]
    fn captions_frame_the_plot() {
        let config = BeeswarmConfig::default();
        assert_eq!(config.upstream_caption(), pos2(100.0, 20.0));
        assert_eq!(config.downstream_caption(), pos2(100.0, 480.0));
    }
}
