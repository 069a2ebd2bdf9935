use eframe::egui::{self, RichText, Ui};

use crate::network::{GraphIndex, Group, Link};
use crate::util::format_percent;

use super::super::ViewModel;

#[derive(Debug, PartialEq)]
struct LinkRow {
    id: String,
    name: String,
    share: String,
}

fn ranked_links(graph: &GraphIndex, links: &[Link]) -> Vec<LinkRow> {
    let mut ranked = links.iter().collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.pct.total_cmp(&a.pct).then_with(|| a.id.cmp(&b.id)));
    ranked
        .into_iter()
        .map(|link| LinkRow {
            id: link.id.clone(),
            name: graph
                .name_of(&link.id)
                .map_or_else(|_| link.id.clone(), |name| format!("{name} ({})", link.id)),
            share: format_percent(link.pct),
        })
        .collect()
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Focus industry");
        ui.add_space(6.0);

        let graph = self.session.graph();
        let focus_id = self.session.focus_id().to_owned();
        let Ok(focus) = graph.node_info(&focus_id) else {
            ui.label("The focus industry is missing from the dataset.");
            return;
        };

        ui.label(RichText::new(focus.name.as_str()).strong());
        ui.small(focus.id.as_str());
        if let Ok(upstreamness) = graph.upstreamness_of(&focus_id) {
            ui.label(format!("Upstreamness: {upstreamness}"));
        }

        let view = self.session.view();
        let resolution = &view.resolution;
        ui.label(format!(
            "Suppliers only: {}",
            resolution.group_count(Group::Supplier)
        ));
        ui.label(format!(
            "Customers only: {}",
            resolution.group_count(Group::Customer)
        ));
        ui.label(format!(
            "Both supplier and customer: {}",
            resolution.group_count(Group::Both)
        ));
        ui.label(format!(
            "Second-degree industries: {}",
            view.scene.second_degree.len()
        ));

        let suppliers = graph
            .supplier_record(&focus_id)
            .map(|record| ranked_links(graph, &record.links))
            .unwrap_or_default();
        let customers = graph
            .customer_record(&focus_id)
            .map(|record| ranked_links(graph, &record.links))
            .unwrap_or_default();

        let mut clicked = None;
        ui.separator();
        ui.label(RichText::new("Supplies purchased from").strong());
        Self::draw_link_rows(ui, "suppliers_scroll", &suppliers, &mut clicked);

        ui.separator();
        ui.label(RichText::new("Output sold to").strong());
        Self::draw_link_rows(ui, "customers_scroll", &customers, &mut clicked);

        if let Some(id) = clicked {
            self.pending_focus = Some(id);
        }
    }

    fn draw_link_rows(ui: &mut Ui, id_salt: &str, rows: &[LinkRow], clicked: &mut Option<String>) {
        if rows.is_empty() {
            ui.label("None.");
            return;
        }

        egui::ScrollArea::vertical()
            .id_salt(id_salt)
            .max_height(220.0)
            .auto_shrink([false, true])
            .show_rows(ui, 20.0, rows.len(), |ui, row_range| {
                for row in &rows[row_range] {
                    let label = format!("{}  {}", row.share, row.name);
                    if ui.link(label).on_hover_text(row.id.as_str()).clicked() {
                        *clicked = Some(row.id.clone());
                    }
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::network::fixtures::GraphBuilder;

    #[test]
    fn links_are_ranked_by_share() {
        let graph = GraphBuilder::new()
            .named("211", "Oil and gas extraction")
            .suppliers("X", &[("A", 0.05), ("211", 0.42), ("B", 0.05)])
            .build();
        let record = graph.supplier_record("X").unwrap();

        assert_eq!(
            ranked_links(&graph, &record.links),
            vec![
                LinkRow {
                    id: "211".to_owned(),
                    name: "Oil and gas extraction (211)".to_owned(),
                    share: "42.0%".to_owned(),
                },
                LinkRow {
                    id: "A".to_owned(),
                    name: "Industry A (A)".to_owned(),
                    share: "5.0%".to_owned(),
                },
                LinkRow {
                    id: "B".to_owned(),
                    name: "Industry B (B)".to_owned(),
                    share: "5.0%".to_owned(),
                },
            ]
        );
    }
}
