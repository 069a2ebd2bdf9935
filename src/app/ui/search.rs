use eframe::egui::{RichText, TextEdit, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::network::{GraphIndex, IndustryNode};

use super::super::ViewModel;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

pub(in crate::app) fn search_industries<'a>(
    graph: &'a GraphIndex,
    query: &str,
    limit: usize,
) -> Vec<&'a IndustryNode> {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored = graph
        .nodes()
        .iter()
        .filter_map(|node| {
            let score = fuzzy_match_score(&matcher, &node.name, query)
                .max(fuzzy_match_score(&matcher, &node.id, query))?;
            Some((score, node))
        })
        .collect::<Vec<_>>();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.id.cmp(&b.1.id)));
    scored.truncate(limit);
    scored.into_iter().map(|(_, node)| node).collect()
}

impl ViewModel {
    pub(in crate::app) const SEARCH_RESULT_ROWS: usize = 12;

    pub(in crate::app) fn draw_search(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Find industry").strong());
        ui.add(TextEdit::singleline(&mut self.search).hint_text("name or industry code"));

        let matches = search_industries(self.session.graph(), &self.search, Self::SEARCH_RESULT_ROWS)
            .into_iter()
            .map(|node| (node.id.clone(), node.display_name()))
            .collect::<Vec<_>>();

        if matches.is_empty() {
            if !self.search.trim().is_empty() {
                ui.small("No matching industries.");
            }
            return;
        }

        for (id, label) in matches {
            let is_focus = id == self.session.focus_id();
            if ui.selectable_label(is_focus, label).clicked() && !is_focus {
                self.pending_focus = Some(id);
            }
        }
    }
}
