use crate::semantic_type::SemanticType;

/// The kind of use a [`ContainerObservation`] records (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservationKind {
    Append,
    Assign,
    KeyAssign,
    Read,
    KeyRead,
}

/// A single observed use of a container symbol, collected during flow
/// analysis (spec.md §4.7) or by the cross-file collector. `key_type` is
/// populated only for `KeyAssign`/`KeyRead` observations (dictionary-shaped
/// usage); its absence across every observation means the container was
/// only ever used as an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerObservation {
    pub kind: ObservationKind,
    pub value_type: SemanticType,
    pub key_type: Option<SemanticType>,
    pub high_confidence: bool,
    pub source_file_id: u32,
}

/// `get_container_element_type` result (spec.md §4.6): the unified element
/// type, and the unified key type when any observation implied a
/// dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    pub element_type: SemanticType,
    pub key_type: Option<SemanticType>,
}

/// Merges a container usage profile into a single [`ContainerInfo`]
/// (spec.md §4.7): homogeneous observations yield a single concrete type,
/// mixed observations yield a union, and an empty profile yields `Variant`
/// with no key type — this is a pure reducer, independent of which file
/// (local or cross-file) an observation came from.
pub fn merge_container_observations(observations: &[ContainerObservation]) -> ContainerInfo {
    if observations.is_empty() {
        return ContainerInfo { element_type: SemanticType::variant(), key_type: None };
    }
    let element_type = SemanticType::union(observations.iter().map(|o| o.value_type.clone()));
    let key_types: Vec<SemanticType> = observations.iter().filter_map(|o| o.key_type.clone()).collect();
    let key_type = if key_types.is_empty() { None } else { Some(SemanticType::union(key_types)) };
    ContainerInfo { element_type, key_type }
}
