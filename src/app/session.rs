use std::sync::Arc;

use tracing::{info, warn};

use crate::layout::{
    BeeswarmConfig, BeeswarmLayout, BeeswarmNode, Scene, SceneDiff, SceneGeometry, layout_scene,
    style_beeswarm,
};
use crate::network::{FocusResolution, GraphIndex, NetworkError, expand_second_degree, resolve_focus};

#[derive(Clone, Debug, PartialEq)]
pub struct FocusView {
    pub resolution: FocusResolution,
    pub scene: Scene,
    pub beeswarm: Vec<BeeswarmNode>,
}

fn derive_view(
    graph: &GraphIndex,
    beeswarm: &BeeswarmLayout,
    geometry: &SceneGeometry,
    focus_id: &str,
) -> Result<FocusView, NetworkError> {
    let resolution = resolve_focus(graph, focus_id)?;
    let second_degree = expand_second_degree(&resolution);
    let scene = layout_scene(&resolution, &second_degree, geometry);
    let beeswarm = style_beeswarm(graph, beeswarm, &resolution);

    Ok(FocusView {
        resolution,
        scene,
        beeswarm,
    })
}

#[derive(Debug)]
pub struct Session {
    graph: Arc<GraphIndex>,
    geometry: SceneGeometry,
    beeswarm: BeeswarmLayout,
    focus_id: String,
    view: FocusView,
}

impl Session {
    pub fn new(
        graph: Arc<GraphIndex>,
        focus_id: &str,
        geometry: SceneGeometry,
        beeswarm_config: BeeswarmConfig,
    ) -> Result<Self, NetworkError> {
        let beeswarm = BeeswarmLayout::compute(&graph, beeswarm_config);
        let view = derive_view(&graph, &beeswarm, &geometry, focus_id)?;

        Ok(Self {
            graph,
            geometry,
            beeswarm,
            focus_id: focus_id.to_owned(),
            view,
        })
    }

    /// Leaves the current view untouched when `focus_id` cannot be resolved.
    pub fn select_focus(&mut self, focus_id: &str) -> Result<SceneDiff, NetworkError> {
        let next = derive_view(&self.graph, &self.beeswarm, &self.geometry, focus_id)
            .inspect_err(|error| warn!(focus = focus_id, %error, "rejected focus change"))?;

        let diff = SceneDiff::between(Some(&self.view.scene), &next.scene);
        info!(
            from = %self.focus_id,
            to = focus_id,
            entering = diff.first_degree.entering.len(),
            exiting = diff.first_degree.exiting.len(),
            "focus changed"
        );

        self.focus_id = focus_id.to_owned();
        self.view = next;
        Ok(diff)
    }

    pub fn focus_id(&self) -> &str {
        &self.focus_id
    }

    pub fn view(&self) -> &FocusView {
        &self.view
    }

    pub fn graph(&self) -> &GraphIndex {
        &self.graph
    }

    pub fn beeswarm(&self) -> &BeeswarmLayout {
        &self.beeswarm
    }

    pub fn geometry(&self) -> &SceneGeometry {
        &self.geometry
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::layout::FirstDegreeKey;
    use crate::network::fixtures::GraphBuilder;

    fn session() -> Session {
        let graph = GraphBuilder::new()
            .suppliers("X", &[("A", 0.4), ("B", 0.6)])
            .customers("X", &[("B", 0.7), ("C", 0.3)])
            .suppliers("A", &[("C", 0.5)])
            .customers("A", &[("X", 0.1)])
            .build();
        Session::new(
            Arc::new(graph),
            "X",
            SceneGeometry::default(),
            BeeswarmConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn round_trip_reproduces_the_first_view() {
        let mut session = session();
        let initial = session.view().clone();

        session.select_focus("A").unwrap();
        assert_eq!(session.focus_id(), "A");
        assert_ne!(session.view().resolution, initial.resolution);

        session.select_focus("X").unwrap();
        assert_eq!(session.view(), &initial);
    }

    #[test]
    fn unknown_focus_keeps_previous_view() {
        let mut session = session();
        let before = session.view().clone();

        let error = session.select_focus("NOPE").unwrap_err();
        assert_eq!(error, NetworkError::UnknownFocusIndustry("NOPE".to_owned()));
        assert_eq!(session.focus_id(), "X");
        assert_eq!(session.view(), &before);
    }

    #[test]
    fn focus_change_reports_scene_diff() {
        let mut session = session();
        let diff = session.select_focus("A").unwrap();

        assert!(
            diff.first_degree
                .updating
                .contains(&FirstDegreeKey("X".to_owned()))
        );
        assert!(
            diff.first_degree
                .exiting
                .contains(&FirstDegreeKey("B".to_owned()))
        );
    }

    #[test]
    fn beeswarm_positions_survive_focus_changes() {
        let mut session = session();
        let before = session
            .view()
            .beeswarm
            .iter()
            .map(|node| (node.id.clone(), node.position))
            .collect::<Vec<_>>();

        session.select_focus("C").unwrap();
        let after = session
            .view()
            .beeswarm
            .iter()
            .map(|node| (node.id.clone(), node.position))
            .collect::<Vec<_>>();
        assert_eq!(before, after);
    }

    #[test]
    fn unknown_initial_focus_fails() {
        let graph = GraphBuilder::new().industry("A", 2.0).build();
        let result = Session::new(
            Arc::new(graph),
            "Z",
            SceneGeometry::default(),
            BeeswarmConfig::default(),
        );
        assert!(matches!(
            result,
            Err(NetworkError::UnknownFocusIndustry(_))
        ));
    }
}
