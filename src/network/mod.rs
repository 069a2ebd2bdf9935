mod dataset;
mod error;
#[cfg(test)]
pub(crate) mod fixtures;
mod focus;
mod graph;
mod load;
mod second_degree;

pub use error::NetworkError;
pub use focus::{ClassifiedNode, FocusResolution, Group, resolve_focus};
pub use graph::{GraphIndex, IndustryNode, Link};
pub use load::load_dataset;
pub use second_degree::{SecondDegreeNode, Side, expand_second_degree};
