use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::dataset::{build_index, decode_dataset};
use super::graph::GraphIndex;

pub fn load_dataset(path: &Path) -> Result<GraphIndex> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;
    let index = parse_dataset(&raw)
        .with_context(|| format!("failed to load dataset {}", path.display()))?;

    info!(
        path = %path.display(),
        industries = index.node_count(),
        links = index.link_count(),
        "loaded production network"
    );
    Ok(index)
}

pub fn parse_dataset(raw: &str) -> Result<GraphIndex> {
    let dataset = decode_dataset(raw)?;
    let index = build_index(dataset)?;
    Ok(index)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_dataset_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "nodes": [
                    {{"id": "A", "name": "Alpha", "upstreamness": 1.5}},
                    {{"id": "B", "name": "Beta", "upstreamness": 2.5}}
                ],
                "suppliers": [
                    {{"id": "A", "suppliers": ["B"], "percentages": [0.3]}},
                    {{"id": "B", "suppliers": [], "percentages": []}}
                ],
                "customers": [
                    {{"id": "A", "customers": [], "percentages": []}},
                    {{"id": "B", "customers": ["A"], "percentages": [0.9]}}
                ]
            }}"#
        )
        .unwrap();

        let index = load_dataset(file.path()).unwrap();
        assert_eq!(index.node_count(), 2);
        assert_eq!(index.link_count(), 2);
    }

    #[test]
    fn missing_file_names_path() {
        let error = load_dataset(Path::new("/nonexistent/production_network.json")).unwrap_err();
        assert!(format!("{error:#}").contains("/nonexistent/production_network.json"));
    }

    #[test]
    fn integrity_errors_surface_through_anyhow() {
        let error = parse_dataset(r#"{"nodes": []}"#).unwrap_err();
        assert!(
            error
                .downcast_ref::<crate::network::error::DataIntegrityError>()
                .is_some()
        );
    }
}
