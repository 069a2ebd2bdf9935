use eframe::egui::{Pos2, pos2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneGeometry {
    pub focus: Pos2,
    pub both_x: f32,
    pub supplier_y: f32,
    pub customer_y: f32,
    pub group_half_step: f32,
    pub both_half_step: f32,
    pub focus_radius: f32,
    pub node_radius: f32,
    pub second_degree_radius: f32,
    pub second_degree_gap: f32,
    pub second_degree_step: f32,
    pub second_degree_connector: f32,
    pub edge_node_clearance: f32,
    pub edge_focus_clearance: f32,
    pub edge_focus_taper: f32,
    pub both_edge_start: f32,
    pub both_edge_end: f32,
    pub label_max_chars: usize,
    pub width: f32,
    pub height: f32,
}

impl Default for SceneGeometry {
    fn default() -> Self {
        Self {
            focus: pos2(325.0, 350.0),
            both_x: 560.0,
            supplier_y: 200.0,
            customer_y: 500.0,
            group_half_step: 50.0,
            both_half_step: 15.0,
            focus_radius: 25.0,
            node_radius: 17.0,
            second_degree_radius: 4.0,
            second_degree_gap: 20.0,
            second_degree_step: 30.0,
            second_degree_connector: 15.0,
            edge_node_clearance: 25.0,
            edge_focus_clearance: 33.0,
            edge_focus_taper: 15.0,
            both_edge_start: 80.0,
            both_edge_end: 160.0,
            label_max_chars: 18,
            width: 700.0,
            height: 700.0,
        }
    }
}
