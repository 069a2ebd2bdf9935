use crate::layout::{BeeswarmNode, HoverText, SceneNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Click,
    Hover,
    Leave,
}

#[derive(Clone, Copy, Debug)]
pub enum Target<'a> {
    FirstDegree(&'a SceneNode),
    Beeswarm(&'a BeeswarmNode),
}

impl Target<'_> {
    fn id(&self) -> &str {
        match self {
            Self::FirstDegree(node) => &node.id,
            Self::Beeswarm(node) => &node.id,
        }
    }

    fn hover(&self) -> &HoverText {
        match self {
            Self::FirstDegree(node) => &node.hover,
            Self::Beeswarm(node) => &node.hover,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    SelectFocus(String),
    ShowHover(HoverText),
    HideHover,
}

pub fn action_for(target: Target<'_>, event: PointerEvent) -> Action {
    match event {
        PointerEvent::Click => Action::SelectFocus(target.id().to_owned()),
        PointerEvent::Hover => Action::ShowHover(target.hover().clone()),
        PointerEvent::Leave => Action::HideHover,
    }
}
