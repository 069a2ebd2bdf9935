use std::path::PathBuf;

use eframe::egui::{self, Align, Color32, Context, Layout, Vec2};

use super::super::session::Session;
use super::super::transition::Transitions;
use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(session: Session, dataset_path: PathBuf) -> Self {
        Self {
            dataset_path,
            session,
            first_degree: Transitions::new(),
            second_degree: Transitions::new(),
            beeswarm: Transitions::new(),
            edges_since: f64::NEG_INFINITY,
            synced: false,
            hover: None,
            pending_focus: None,
            rejected_focus: None,
            search: String::new(),
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context, reload_requested: &mut bool, is_loading: bool) {
        let now = ctx.input(|input| input.time);
        self.ensure_synced(now);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Production network");
                    ui.separator();
                    let graph = self.session.graph();
                    let focus_label = graph
                        .node_info(self.session.focus_id())
                        .map_or_else(|_| self.session.focus_id().to_owned(), |node| node.display_name());
                    ui.label(format!("focus: {focus_label}"));
                    ui.label(format!("data: {}", self.dataset_path.display()));
                    ui.label(format!("industries: {}", graph.node_count()));
                    ui.label(format!("links: {}", graph.link_count()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload data"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    if ui.button("Reset view").clicked() {
                        self.reset_network_view();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(error) = &self.rejected_focus {
                            ui.colored_label(Color32::from_rgb(0xB0, 0x20, 0x20), error);
                        }
                    });
                });
            });

        egui::SidePanel::left("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                self.draw_search(ui);
                ui.separator();
                self.draw_details(ui);
            });

        egui::SidePanel::right("beeswarm")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Upstreamness");
                ui.add_space(4.0);
                self.draw_beeswarm(ui, now);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading production network...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_network(ui, now);
            }
        });

        if let Some(focus_id) = self.pending_focus.take() {
            self.select_focus(&focus_id, now);
        }
        if self.is_animating(now) {
            ctx.request_repaint();
        }
    }
}
