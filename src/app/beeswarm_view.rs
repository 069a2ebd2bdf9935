use eframe::egui::{Align2, FontId, Sense, Stroke, Ui, Vec2, vec2};

use crate::layout::SceneKeyed;

use super::interaction::{Action, PointerEvent, Target, action_for};
use super::render_utils::{
    CAPTION_COLOR, draw_background, draw_hover_box, fit_zoom, with_opacity, world_to_screen,
};
use super::{Surface, ViewModel};

impl ViewModel {
    pub(in crate::app) fn draw_beeswarm(&mut self, ui: &mut Ui, now: f64) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        let layout = self.session.beeswarm();
        if layout.is_empty() {
            ui.label("No industries to place.");
            return;
        }

        let config = *layout.config();
        let design = vec2(config.width, config.center.y * 2.0);
        let scale = fit_zoom(rect, design);
        let to_screen = |world| world_to_screen(rect, Vec2::ZERO, scale, config.center, world);

        let caption_font = FontId::proportional(14.0 * scale);
        painter.text(
            to_screen(config.upstream_caption()),
            Align2::CENTER_CENTER,
            "upstream",
            caption_font.clone(),
            CAPTION_COLOR,
        );
        painter.text(
            to_screen(config.downstream_caption()),
            Align2::CENTER_CENTER,
            "downstream",
            caption_font,
            CAPTION_COLOR,
        );

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .filter(|pointer| rect.contains(*pointer));
        let clicked = response.clicked();
        let view = self.session.view();

        let mut hovered = None;
        for node in &view.beeswarm {
            let key = node.scene_key();
            let Some(frame) = self.beeswarm.frame(&key, now) else {
                continue;
            };
            let alpha = self.beeswarm.opacity(&key, now);
            let center = to_screen(frame.position);
            let radius = node.radius * scale;

            painter.circle(
                center,
                radius,
                with_opacity(frame.paint.fill, alpha),
                Stroke::new(
                    config.stroke_width * scale,
                    with_opacity(frame.paint.stroke, alpha),
                ),
            );

            // Later circles are drawn on top, so they win the hit test.
            if let Some(pointer) = pointer
                && center.distance(pointer) <= radius + config.stroke_width * scale / 2.0
            {
                hovered = Some(node);
            }
        }

        let mut actions = Vec::new();
        match hovered {
            Some(node) => {
                actions.push((
                    node.id.clone(),
                    action_for(Target::Beeswarm(node), PointerEvent::Hover),
                ));
                if clicked {
                    actions.push((
                        node.id.clone(),
                        action_for(Target::Beeswarm(node), PointerEvent::Click),
                    ));
                }
            }
            None => {
                if let Some(previous) = self.hovered_on(Surface::Beeswarm) {
                    let action = view
                        .beeswarm
                        .iter()
                        .find(|node| node.id == previous)
                        .map_or(Action::HideHover, |node| {
                            action_for(Target::Beeswarm(node), PointerEvent::Leave)
                        });
                    actions.push((previous, action));
                }
            }
        }

        for (node_id, action) in actions {
            self.dispatch(Surface::Beeswarm, &node_id, action, pointer);
        }

        if let Some(hover) = self
            .hover
            .as_ref()
            .filter(|hover| hover.surface == Surface::Beeswarm)
        {
            draw_hover_box(&painter, rect, hover.pointer, &hover.text);
        }
    }
}
