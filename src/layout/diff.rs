use std::collections::HashSet;
use std::hash::Hash;

use crate::network::Side;

use super::beeswarm::BeeswarmNode;
use super::scene::{Scene, SceneNode, SecondDegreePlacement};

pub trait SceneKeyed {
    type Key: Clone + Eq + Hash;

    fn scene_key(&self) -> Self::Key;
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FirstDegreeKey(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SecondDegreeKey {
    pub side: Side,
    pub parent_id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BeeswarmKey(pub String);

impl SceneKeyed for SceneNode {
    type Key = FirstDegreeKey;

    fn scene_key(&self) -> FirstDegreeKey {
        FirstDegreeKey(self.id.clone())
    }
}

impl SceneKeyed for SecondDegreePlacement {
    type Key = SecondDegreeKey;

    fn scene_key(&self) -> SecondDegreeKey {
        SecondDegreeKey {
            side: self.node.side,
            parent_id: self.node.parent_id.clone(),
            name: self.node.name.clone(),
        }
    }
}

impl SceneKeyed for BeeswarmNode {
    type Key = BeeswarmKey;

    fn scene_key(&self) -> BeeswarmKey {
        BeeswarmKey(self.id.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyedDiff<K> {
    pub entering: Vec<K>,
    pub updating: Vec<K>,
    pub exiting: Vec<K>,
}

impl<K: Clone + Eq + Hash> KeyedDiff<K> {
    pub fn between<T: SceneKeyed<Key = K>>(previous: &[T], next: &[T]) -> Self {
        let previous_keys = previous.iter().map(SceneKeyed::scene_key).collect::<Vec<_>>();
        let next_keys = next.iter().map(SceneKeyed::scene_key).collect::<Vec<_>>();
        let before = previous_keys.iter().collect::<HashSet<_>>();
        let after = next_keys.iter().collect::<HashSet<_>>();

        let (updating, entering): (Vec<_>, Vec<_>) = next_keys
            .iter()
            .cloned()
            .partition(|key| before.contains(key));
        let exiting = previous_keys
            .iter()
            .filter(|key| !after.contains(key))
            .cloned()
            .collect();

        Self {
            entering,
            updating,
            exiting,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneDiff {
    pub first_degree: KeyedDiff<FirstDegreeKey>,
    pub second_degree: KeyedDiff<SecondDegreeKey>,
}

impl SceneDiff {
    pub fn between(previous: Option<&Scene>, next: &Scene) -> Self {
        let (first, second): (&[SceneNode], &[SecondDegreePlacement]) = match previous {
            Some(scene) => (&scene.nodes, &scene.second_degree),
            None => (&[], &[]),
        };

        Self {
            first_degree: KeyedDiff::between(first, &next.nodes),
            second_degree: KeyedDiff::between(second, &next.second_degree),
        }
    }
}
