mod beeswarm;
mod diff;
mod geometry;
mod scale;
mod scene;

pub use beeswarm::{BeeswarmConfig, BeeswarmLayout, BeeswarmNode, BeeswarmRole, style_beeswarm};
pub use diff::{BeeswarmKey, FirstDegreeKey, KeyedDiff, SceneDiff, SceneKeyed, SecondDegreeKey};
pub use geometry::SceneGeometry;
pub use scene::{HoverText, Scene, SceneNode, layout_scene};
