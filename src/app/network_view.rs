use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2, pos2, vec2};

use crate::layout::SceneKeyed;

use super::interaction::{Action, PointerEvent, Target, action_for};
use super::render_utils::{
    EDGE_COLOR, draw_arrow, draw_background, draw_hover_box, fit_zoom, screen_to_world,
    with_opacity, world_to_screen,
};
use super::{Surface, ViewModel};

const LABEL_BACKGROUND_OPACITY: f32 = 0.7;
const STEM_OPACITY: f32 = 0.5;

#[derive(Clone, Copy)]
struct Projection {
    rect: Rect,
    pan: Vec2,
    scale: f32,
    center: Pos2,
}

impl Projection {
    fn to_screen(self, world: Pos2) -> Pos2 {
        world_to_screen(self.rect, self.pan, self.scale, self.center, world)
    }

    fn to_world(self, screen: Pos2) -> Pos2 {
        screen_to_world(self.rect, self.pan, self.scale, self.center, screen)
    }
}

impl ViewModel {
    fn network_projection(&self, rect: Rect) -> Projection {
        let geometry = self.session.geometry();
        let design = vec2(geometry.width, geometry.height);
        Projection {
            rect,
            pan: self.pan,
            scale: fit_zoom(rect, design) * self.zoom,
            center: pos2(geometry.width / 2.0, geometry.height / 2.0),
        }
    }

    fn handle_network_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = self.network_projection(rect).to_world(pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.25, 6.0);
        let after = self.network_projection(rect);
        self.pan = pointer - rect.center() - ((world_before - after.center) * after.scale);
    }

    fn handle_network_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    pub(in crate::app) fn reset_network_view(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
    }

    pub(in crate::app) fn draw_network(&mut self, ui: &mut Ui, now: f64) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        self.handle_network_zoom(ui, rect, &response);
        self.handle_network_pan(&response);

        let projection = self.network_projection(rect);
        let scale = projection.scale;
        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .filter(|pointer| rect.contains(*pointer));
        let clicked = response.clicked();
        let view = self.session.view();

        let edge_alpha = self.edge_opacity(now);
        let edge_stroke = Stroke::new(1.5 * scale, with_opacity(EDGE_COLOR, edge_alpha));
        for edge in &view.scene.edges {
            draw_arrow(
                &painter,
                projection.to_screen(edge.from),
                projection.to_screen(edge.to),
                edge_stroke,
                8.0 * scale,
                edge.arrow_at_start(),
            );
        }

        let small_font = FontId::proportional(11.0 * scale);
        for placement in &view.scene.second_degree {
            let key = placement.scene_key();
            let Some(frame) = self.second_degree.frame(&key, now) else {
                continue;
            };
            let alpha = self.second_degree.opacity(&key, now);
            let offset = frame.position - placement.anchor;

            painter.line_segment(
                [
                    projection.to_screen(frame.position),
                    projection.to_screen(placement.dot() + offset),
                ],
                Stroke::new(2.0 * scale, with_opacity(frame.paint.stroke, alpha)),
            );
            painter.circle_filled(
                projection.to_screen(placement.dot() + offset),
                placement.radius * scale,
                with_opacity(frame.paint.fill, alpha),
            );
            painter.text(
                projection.to_screen(placement.label_anchor() + offset),
                Align2::LEFT_CENTER,
                &placement.node.name,
                small_font.clone(),
                with_opacity(Color32::BLACK, alpha),
            );
        }

        let label_font = FontId::proportional(12.0 * scale);
        let mut hovered = None;
        for node in &view.scene.nodes {
            let key = node.scene_key();
            let Some(frame) = self.first_degree.frame(&key, now) else {
                continue;
            };
            let alpha = self.first_degree.opacity(&key, now);
            let center = projection.to_screen(frame.position);
            let radius = node.radius * scale;

            painter.circle_filled(center, radius, with_opacity(frame.paint.fill, alpha));
            painter.rect_filled(
                Rect::from_min_size(center + vec2(-50.0, -11.0) * scale, vec2(100.0, 20.0) * scale),
                0.0,
                with_opacity(Color32::WHITE, LABEL_BACKGROUND_OPACITY * alpha),
            );
            painter.text(
                center,
                Align2::CENTER_CENTER,
                &node.label,
                label_font.clone(),
                with_opacity(Color32::BLACK, alpha),
            );
            if let Some(stem) = node.stem {
                painter.line_segment(
                    [
                        center + vec2(0.0, stem.from_y * scale),
                        center + vec2(0.0, stem.to_y * scale),
                    ],
                    Stroke::new(
                        2.0 * scale,
                        with_opacity(frame.paint.stroke, STEM_OPACITY * alpha),
                    ),
                );
            }

            if let Some(pointer) = pointer
                && center.distance(pointer) <= radius
            {
                hovered = Some(node);
            }
        }

        let mut actions = Vec::new();
        match hovered {
            Some(node) => {
                actions.push((
                    node.id.clone(),
                    action_for(Target::FirstDegree(node), PointerEvent::Hover),
                ));
                if clicked {
                    actions.push((
                        node.id.clone(),
                        action_for(Target::FirstDegree(node), PointerEvent::Click),
                    ));
                }
            }
            None => {
                if let Some(previous) = self.hovered_on(Surface::Network) {
                    let action = view.scene.node(&previous).map_or(Action::HideHover, |node| {
                        action_for(Target::FirstDegree(node), PointerEvent::Leave)
                    });
                    actions.push((previous, action));
                }
            }
        }

        for (node_id, action) in actions {
            self.dispatch(Surface::Network, &node_id, action, pointer);
        }

        if let Some(hover) = self
            .hover
            .as_ref()
            .filter(|hover| hover.surface == Surface::Network)
        {
            draw_hover_box(&painter, rect, hover.pointer, &hover.text);
        }
    }
}
