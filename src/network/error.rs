use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Node,
    Suppliers,
    Customers,
}

impl RecordKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Suppliers => "supplier record",
            Self::Customers => "customer record",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum DataIntegrityError {
    #[error("dataset contains no industries")]
    Empty,
    #[error("industry {id} is listed more than once in `nodes`")]
    DuplicateNode { id: String },
    #[error("{} for {id} has {ids} ids but {percentages} percentages", .kind.label())]
    LengthMismatch {
        kind: RecordKind,
        id: String,
        ids: usize,
        percentages: usize,
    },
    #[error("{} for {owner} references unknown industry {id}", .kind.label())]
    UnknownNode {
        kind: RecordKind,
        owner: String,
        id: String,
    },
    #[error("industry {id} has more than one {}", .kind.label())]
    DuplicateRecord { kind: RecordKind, id: String },
    #[error("industry {id} has no {}", .kind.label())]
    MissingRecord { kind: RecordKind, id: String },
    #[error("{} for {owner} lists {id} more than once", .kind.label())]
    DuplicateLink {
        kind: RecordKind,
        owner: String,
        id: String,
    },
    #[error("{} for {id} lists the industry itself", .kind.label())]
    SelfLink { kind: RecordKind, id: String },
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum NetworkError {
    #[error("data integrity violation: {0}")]
    DataIntegrity(#[from] DataIntegrityError),
    #[error("unknown focus industry {0}")]
    UnknownFocusIndustry(String),
    #[error("no {} found for industry {id}", .kind.label())]
    NotFound { kind: RecordKind, id: String },
}

impl NetworkError {
    /// Lookups of an already-validated id can only miss if the index itself is
    /// inconsistent, which is fatal.
    pub fn into_integrity(self) -> Self {
        match self {
            Self::NotFound { kind, id } => {
                Self::DataIntegrity(DataIntegrityError::MissingRecord { kind, id })
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_lookups_become_integrity_errors() {
        let miss = NetworkError::NotFound {
            kind: RecordKind::Customers,
            id: "311FT".to_owned(),
        };
        assert_eq!(
            miss.into_integrity(),
            NetworkError::DataIntegrity(DataIntegrityError::MissingRecord {
                kind: RecordKind::Customers,
                id: "311FT".to_owned(),
            })
        );

        let unknown = NetworkError::UnknownFocusIndustry("999".to_owned());
        assert_eq!(unknown.clone().into_integrity(), unknown);
    }

    #[test]
    fn duplicate_record_names_its_kind() {
        let error = DataIntegrityError::DuplicateRecord {
            kind: RecordKind::Suppliers,
            id: "111CA".to_owned(),
        };
        assert_eq!(
            error.to_string(),
            "industry 111CA has more than one supplier record"
        );
    }
}
