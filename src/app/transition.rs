use std::collections::HashMap;
use std::hash::Hash;

use eframe::egui::{Color32, Pos2};

use crate::layout::KeyedDiff;

use super::render_utils::blend_color;

pub(super) const MOVE_SECS: f64 = 0.5;
pub(super) const FADE_SECS: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Paint {
    pub(super) fill: Color32,
    pub(super) stroke: Color32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Frame {
    pub(super) position: Pos2,
    pub(super) paint: Paint,
}

#[derive(Clone, Copy, Debug)]
struct Tracked {
    from: Frame,
    to: Frame,
    moved_at: f64,
    entered_at: f64,
}

fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

fn progress(since: f64, now: f64, duration: f64) -> f64 {
    ((now - since) / duration).clamp(0.0, 1.0)
}

fn interpolate(from: Frame, to: Frame, t: f32) -> Frame {
    Frame {
        position: from.position + (to.position - from.position) * t,
        paint: Paint {
            fill: blend_color(from.paint.fill, to.paint.fill, t),
            stroke: blend_color(from.paint.stroke, to.paint.stroke, t),
        },
    }
}

pub(super) struct Transitions<K> {
    entries: HashMap<K, Tracked>,
}

impl<K: Clone + Eq + Hash> Transitions<K> {
    pub(super) fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub(super) fn apply(&mut self, diff: &KeyedDiff<K>, targets: &HashMap<K, Frame>, now: f64) {
        for key in &diff.exiting {
            self.entries.remove(key);
        }

        for key in &diff.entering {
            let Some(&target) = targets.get(key) else {
                continue;
            };
            self.entries.insert(
                key.clone(),
                Tracked {
                    from: target,
                    to: target,
                    moved_at: now - MOVE_SECS,
                    entered_at: now,
                },
            );
        }

        for key in &diff.updating {
            let Some(&target) = targets.get(key) else {
                continue;
            };
            let current = self.frame(key, now).unwrap_or(target);
            let entered_at = self
                .entries
                .get(key)
                .map_or(now - FADE_SECS, |tracked| tracked.entered_at);
            self.entries.insert(
                key.clone(),
                Tracked {
                    from: current,
                    to: target,
                    moved_at: now,
                    entered_at,
                },
            );
        }
    }

    pub(super) fn frame(&self, key: &K, now: f64) -> Option<Frame> {
        let tracked = self.entries.get(key)?;
        let t = ease_cubic_in_out(progress(tracked.moved_at, now, MOVE_SECS));
        Some(interpolate(tracked.from, tracked.to, t as f32))
    }

    pub(super) fn opacity(&self, key: &K, now: f64) -> f32 {
        self.entries
            .get(key)
            .map_or(0.0, |tracked| progress(tracked.entered_at, now, FADE_SECS) as f32)
    }

    pub(super) fn is_animating(&self, now: f64) -> bool {
        self.entries.values().any(|tracked| {
            now - tracked.moved_at < MOVE_SECS || now - tracked.entered_at < FADE_SECS
        })
    }
}
