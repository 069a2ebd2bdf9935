use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::{Context as _, Result, anyhow};
use eframe::egui::{self, Context, Pos2, Vec2};
use tracing::{error, warn};

use crate::layout::{
    BeeswarmConfig, BeeswarmKey, BeeswarmNode, FirstDegreeKey, HoverText, KeyedDiff, SceneDiff, SceneGeometry,
    SceneKeyed, SecondDegreeKey,
};
use crate::network::{GraphIndex, load_dataset};

mod beeswarm_view;
mod interaction;
mod network_view;
mod render_utils;
mod session;
mod transition;
mod ui;

use interaction::Action;
use render_utils::{STEM_COLOR, group_paint, role_paint};
use session::Session;
use transition::{FADE_SECS, Frame, Paint, Transitions};

pub struct LaunchConfig {
    pub dataset_path: PathBuf,
    pub initial_focus: String,
}

pub struct ProductionNetworkApp {
    launch: LaunchConfig,
    state: AppState,
    reload_rx: Option<Receiver<Result<Session, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Session, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Surface {
    Network,
    Beeswarm,
}

struct HoverBox {
    surface: Surface,
    node_id: String,
    text: HoverText,
    pointer: Pos2,
}

struct ViewModel {
    dataset_path: PathBuf,
    session: Session,
    first_degree: Transitions<FirstDegreeKey>,
    second_degree: Transitions<SecondDegreeKey>,
    beeswarm: Transitions<BeeswarmKey>,
    edges_since: f64,
    synced: bool,
    hover: Option<HoverBox>,
    pending_focus: Option<String>,
    rejected_focus: Option<String>,
    search: String,
    pan: Vec2,
    zoom: f32,
}

impl ViewModel {
    fn select_focus(&mut self, focus_id: &str, now: f64) {
        match self.session.select_focus(focus_id) {
            Ok(diff) => {
                self.rejected_focus = None;
                self.hover = None;
                self.sync_scene(&diff, now);
            }
            Err(error) => {
                self.rejected_focus = Some(error.to_string());
            }
        }
    }

    fn sync_scene(&mut self, diff: &SceneDiff, now: f64) {
        let view = self.session.view();

        let first_targets = view
            .scene
            .nodes
            .iter()
            .map(|node| {
                (
                    node.scene_key(),
                    Frame {
                        position: node.position,
                        paint: group_paint(node.group),
                    },
                )
            })
            .collect::<HashMap<_, _>>();
        let second_targets = view
            .scene
            .second_degree
            .iter()
            .map(|placement| {
                (
                    placement.scene_key(),
                    Frame {
                        position: placement.anchor,
                        paint: Paint {
                            fill: STEM_COLOR,
                            stroke: STEM_COLOR,
                        },
                    },
                )
            })
            .collect::<HashMap<_, _>>();
        let swarm_targets = view
            .beeswarm
            .iter()
            .map(|node| {
                (
                    node.scene_key(),
                    Frame {
                        position: node.position,
                        paint: role_paint(node.role),
                    },
                )
            })
            .collect::<HashMap<_, _>>();
        let previous_swarm: &[BeeswarmNode] = if self.synced {
            &view.beeswarm
        } else {
            &[]
        };
        let swarm_diff = KeyedDiff::between(previous_swarm, &view.beeswarm);

        self.first_degree
            .apply(&diff.first_degree, &first_targets, now);
        self.second_degree
            .apply(&diff.second_degree, &second_targets, now);
        self.beeswarm.apply(&swarm_diff, &swarm_targets, now);
        self.edges_since = now;
        self.synced = true;
    }

    fn ensure_synced(&mut self, now: f64) {
        if self.synced {
            return;
        }
        let diff = SceneDiff::between(None, &self.session.view().scene);
        self.sync_scene(&diff, now);
    }

    fn dispatch(&mut self, surface: Surface, node_id: &str, action: Action, pointer: Option<Pos2>) {
        match action {
            Action::SelectFocus(focus_id) => self.pending_focus = Some(focus_id),
            Action::ShowHover(text) => {
                if let Some(pointer) = pointer {
                    self.hover = Some(HoverBox {
                        surface,
                        node_id: node_id.to_owned(),
                        text,
                        pointer,
                    });
                }
            }
            Action::HideHover => {
                if self
                    .hover
                    .as_ref()
                    .is_some_and(|hover| hover.surface == surface)
                {
                    self.hover = None;
                }
            }
        }
    }

    fn hovered_on(&self, surface: Surface) -> Option<String> {
        self.hover
            .as_ref()
            .filter(|hover| hover.surface == surface)
            .map(|hover| hover.node_id.clone())
    }

    fn edge_opacity(&self, now: f64) -> f32 {
        ((now - self.edges_since) / FADE_SECS).clamp(0.0, 1.0) as f32
    }

    fn is_animating(&self, now: f64) -> bool {
        now - self.edges_since < FADE_SECS
            || self.first_degree.is_animating(now)
            || self.second_degree.is_animating(now)
            || self.beeswarm.is_animating(now)
    }
}

fn initial_focus(graph: &GraphIndex, requested: &str) -> Result<String> {
    if graph.contains(requested) {
        return Ok(requested.to_owned());
    }

    let fallback = graph
        .nodes()
        .first()
        .ok_or_else(|| anyhow!("dataset has no industries"))?;
    warn!(
        requested,
        fallback = %fallback.id,
        "requested focus industry is not in the dataset"
    );
    Ok(fallback.id.clone())
}

fn prepare_session(dataset_path: &Path, requested_focus: &str) -> Result<Session> {
    let graph = load_dataset(dataset_path)?;
    let focus = initial_focus(&graph, requested_focus)?;
    Session::new(
        Arc::new(graph),
        &focus,
        SceneGeometry::default(),
        BeeswarmConfig::default(),
    )
    .with_context(|| format!("failed to lay out focus industry {focus}"))
}

impl ProductionNetworkApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, launch: LaunchConfig) -> Self {
        let state = Self::start_load(&launch);
        Self {
            launch,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(launch: &LaunchConfig) -> Receiver<Result<Session, String>> {
        let (tx, rx) = mpsc::channel();
        let dataset_path = launch.dataset_path.clone();
        let requested_focus = launch.initial_focus.clone();

        thread::spawn(move || {
            let result = prepare_session(&dataset_path, &requested_focus).map_err(|error| {
                error!(path = %dataset_path.display(), "failed to load production network: {error:#}");
                format!("{error:#}")
            });
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(launch: &LaunchConfig) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(launch),
        }
    }

    fn ready(&self, session: Session) -> AppState {
        AppState::Ready(Box::new(ViewModel::new(
            session,
            self.launch.dataset_path.clone(),
        )))
    }
}

impl eframe::App for ProductionNetworkApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(session)) => transition = Some(Ok(session)),
                    Ok(Err(error)) => transition = Some(Err(error)),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(Err("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading production network...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                let mut retry = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the production network");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    retry = ui.button("Retry").clicked();
                });
                if retry {
                    self.state = Self::start_load(&self.launch);
                    return;
                }
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(&self.launch));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(result),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            self.state = match result {
                Ok(session) => self.ready(session),
                Err(error) => AppState::Error(error),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::fixtures::GraphBuilder;

    #[test]
    fn requested_focus_is_kept_when_present() {
        let graph = GraphBuilder::new()
            .suppliers("111CA", &[("211", 0.2)])
            .build();
        assert_eq!(initial_focus(&graph, "111CA").unwrap(), "111CA");
    }

    #[test]
    fn unknown_focus_falls_back_to_first_industry() {
        let graph = GraphBuilder::new()
            .suppliers("311FT", &[("111CA", 0.2)])
            .build();
        assert_eq!(initial_focus(&graph, "999").unwrap(), "311FT");
    }

    #[test]
    fn missing_dataset_reports_path() {
        let error = prepare_session(Path::new("/nonexistent/network.json"), "111CA").unwrap_err();
        assert!(format!("{error:#}").contains("/nonexistent/network.json"));
    }
}
