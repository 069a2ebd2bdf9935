use eframe::egui::{
    Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, StrokeKind, Vec2, pos2, vec2,
};

use crate::layout::{BeeswarmRole, HoverText};
use crate::network::Group;

use super::transition::Paint;

pub(super) const SUPPLIER_COLOR: Color32 = Color32::from_rgb(0xFE, 0xC2, 0x60);
pub(super) const FOCUS_COLOR: Color32 = Color32::from_rgb(0xA1, 0x00, 0x35);
pub(super) const CUSTOMER_COLOR: Color32 = Color32::from_rgb(0x3F, 0xA7, 0x96);
pub(super) const BOTH_COLOR: Color32 = Color32::from_rgb(0x2A, 0x09, 0x44);
pub(super) const EDGE_COLOR: Color32 = Color32::from_rgb(0x99, 0x99, 0x99);
pub(super) const ARROW_COLOR: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);
pub(super) const STEM_COLOR: Color32 = Color32::GRAY;
pub(super) const CAPTION_COLOR: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);
pub(super) const HOVER_FILL: Color32 = Color32::from_rgb(0xEE, 0xEE, 0xEE);
const UNRELATED_STROKE: Color32 = Color32::from_rgb(0xAA, 0xAA, 0xAA);
const UNRELATED_FILL: Color32 = Color32::from_rgb(0xEE, 0xEE, 0xEE);

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let opacity = opacity.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (color.a() as f32 * opacity) as u8,
    )
}

pub(super) fn group_color(group: Group) -> Color32 {
    match group {
        Group::Focus => FOCUS_COLOR,
        Group::Supplier => SUPPLIER_COLOR,
        Group::Customer => CUSTOMER_COLOR,
        Group::Both => BOTH_COLOR,
    }
}

pub(super) fn group_paint(group: Group) -> Paint {
    let fill = group_color(group);
    Paint {
        fill,
        stroke: if group == Group::Focus {
            FOCUS_COLOR
        } else {
            STEM_COLOR
        },
    }
}

pub(super) fn role_paint(role: BeeswarmRole) -> Paint {
    let color = match role {
        BeeswarmRole::Focus => FOCUS_COLOR,
        BeeswarmRole::Supplier => SUPPLIER_COLOR,
        BeeswarmRole::Customer => CUSTOMER_COLOR,
        BeeswarmRole::Both => BOTH_COLOR,
        BeeswarmRole::Unrelated => {
            return Paint {
                fill: UNRELATED_FILL,
                stroke: UNRELATED_STROKE,
            };
        }
    };
    Paint {
        fill: color,
        stroke: color,
    }
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::WHITE);
}

pub(super) fn fit_zoom(rect: Rect, design: Vec2) -> f32 {
    let zoom = (rect.width() / design.x).min(rect.height() / design.y);
    if zoom.is_finite() && zoom > 0.0 {
        zoom
    } else {
        1.0
    }
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, center: Pos2, world: Pos2) -> Pos2 {
    rect.center() + pan + (world - center) * zoom
}

pub(super) fn screen_to_world(
    rect: Rect,
    pan: Vec2,
    zoom: f32,
    center: Pos2,
    screen: Pos2,
) -> Pos2 {
    center + (screen - rect.center() - pan) / zoom
}

fn arrow_head(painter: &Painter, tip: Pos2, direction: Vec2, size: f32, color: Color32) {
    let direction = direction.normalized();
    let normal = vec2(-direction.y, direction.x);
    let base = tip - direction * size;
    let half_width = size * 0.3125;
    painter.add(Shape::convex_polygon(
        vec![tip, base + normal * half_width, base - normal * half_width],
        color,
        Stroke::NONE,
    ));
}

pub(super) fn draw_arrow(
    painter: &Painter,
    from: Pos2,
    to: Pos2,
    stroke: Stroke,
    head_size: f32,
    head_at_start: bool,
) {
    let direction = to - from;
    if direction.length_sq() <= f32::EPSILON {
        return;
    }

    painter.line_segment([from, to], stroke);
    let head_color = with_opacity(ARROW_COLOR, stroke.color.a() as f32 / 255.0);
    arrow_head(painter, to, direction, head_size, head_color);
    if head_at_start {
        arrow_head(painter, from, -direction, head_size, head_color);
    }
}

const HOVER_LINE_HEIGHT: f32 = 20.0;
const HOVER_PADDING: f32 = 10.0;

pub(super) fn hover_box_size(text_width: f32, line_count: usize) -> Vec2 {
    vec2(
        text_width + 2.0 * HOVER_PADDING,
        HOVER_PADDING + HOVER_LINE_HEIGHT * line_count as f32,
    )
}

pub(super) fn hover_box_origin(bounds: Rect, pointer: Pos2, size: Vec2) -> Pos2 {
    pos2(
        (pointer.x + HOVER_PADDING).min(bounds.right() - size.x - HOVER_PADDING),
        pointer.y + HOVER_PADDING,
    )
}

pub(super) fn draw_hover_box(painter: &Painter, bounds: Rect, pointer: Pos2, hover: &HoverText) {
    let font = FontId::proportional(13.0);
    let galleys = hover
        .lines()
        .map(|line| painter.layout_no_wrap(line.to_owned(), font.clone(), Color32::BLACK))
        .collect::<Vec<_>>();
    if galleys.is_empty() {
        return;
    }

    let text_width = galleys
        .iter()
        .map(|galley| galley.size().x)
        .fold(0.0, f32::max);
    let size = hover_box_size(text_width, galleys.len());
    let origin = hover_box_origin(bounds, pointer, size);
    painter.rect(
        Rect::from_min_size(origin, size),
        10.0,
        with_opacity(HOVER_FILL, 0.9),
        Stroke::new(1.0, with_opacity(Color32::BLACK, 0.9)),
        StrokeKind::Inside,
    );

    for (index, galley) in galleys.into_iter().enumerate() {
        let baseline = origin.y + HOVER_LINE_HEIGHT * (index as f32 + 1.0);
        let top = baseline - galley.size().y * 0.8;
        painter.galley(pos2(origin.x + HOVER_PADDING, top), galley, Color32::BLACK);
    }
}
