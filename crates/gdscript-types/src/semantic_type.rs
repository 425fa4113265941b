use std::fmt;

/// The non-container, non-class scalar types (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Int,
    Float,
    Bool,
    String,
    Void,
    Variant,
    Null,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PrimitiveType::Int => "int",
            PrimitiveType::Float => "float",
            PrimitiveType::Bool => "bool",
            PrimitiveType::String => "String",
            PrimitiveType::Void => "void",
            PrimitiveType::Variant => "Variant",
            PrimitiveType::Null => "null",
        };
        write!(f, "{s}")
    }
}

/// Packed-array element kinds (spec.md §3's `PackedInt32Array`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackedArrayKind {
    Int32,
    Float32,
    String,
    Byte,
    Vector2,
    Vector3,
}

impl PackedArrayKind {
    /// The semantic type of a single element when indexed.
    pub fn element_type(self) -> SemanticType {
        match self {
            PackedArrayKind::Int32 => SemanticType::Primitive(PrimitiveType::Int),
            PackedArrayKind::Float32 => SemanticType::Primitive(PrimitiveType::Float),
            PackedArrayKind::String => SemanticType::Primitive(PrimitiveType::String),
            PackedArrayKind::Byte => SemanticType::Primitive(PrimitiveType::Int),
            PackedArrayKind::Vector2 => SemanticType::Named("Vector2".to_string()),
            PackedArrayKind::Vector3 => SemanticType::Named("Vector3".to_string()),
        }
    }
}

impl fmt::Display for PackedArrayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PackedArrayKind::Int32 => "PackedInt32Array",
            PackedArrayKind::Float32 => "PackedFloat32Array",
            PackedArrayKind::String => "PackedStringArray",
            PackedArrayKind::Byte => "PackedByteArray",
            PackedArrayKind::Vector2 => "PackedVector2Array",
            PackedArrayKind::Vector3 => "PackedVector3Array",
        };
        write!(f, "{s}")
    }
}

/// `Callable[[Tᵢ], R]` (spec.md §3).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallableSignature {
    pub parameters: Vec<SemanticType>,
    pub return_type: Box<SemanticType>,
}

/// The sum of semantic type variants a script-analysis expression or
/// declaration can carry (spec.md §3). Equality is structural after
/// canonicalisation: [`SemanticType::union`] always returns a
/// deduplicated, sorted form, so two unions built from the same member set
/// in any order compare (and hash) equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Primitive(PrimitiveType),
    Named(String),
    Array(Box<SemanticType>),
    Dictionary(Box<SemanticType>, Box<SemanticType>),
    Packed(PackedArrayKind),
    Callable(CallableSignature),
    Union(Vec<SemanticType>),
    Unknown,
}

impl SemanticType {
    pub fn int() -> Self {
        SemanticType::Primitive(PrimitiveType::Int)
    }
    pub fn float() -> Self {
        SemanticType::Primitive(PrimitiveType::Float)
    }
    pub fn bool() -> Self {
        SemanticType::Primitive(PrimitiveType::Bool)
    }
    pub fn string() -> Self {
        SemanticType::Primitive(PrimitiveType::String)
    }
    pub fn void() -> Self {
        SemanticType::Primitive(PrimitiveType::Void)
    }
    pub fn variant() -> Self {
        SemanticType::Primitive(PrimitiveType::Variant)
    }
    pub fn null() -> Self {
        SemanticType::Primitive(PrimitiveType::Null)
    }

    pub fn array(element: SemanticType) -> Self {
        SemanticType::Array(Box::new(element))
    }

    pub fn dictionary(key: SemanticType, value: SemanticType) -> Self {
        SemanticType::Dictionary(Box::new(key), Box::new(value))
    }

    pub fn callable(parameters: Vec<SemanticType>, return_type: SemanticType) -> Self {
        SemanticType::Callable(CallableSignature { parameters, return_type: Box::new(return_type) })
    }

    /// Builds a canonical union: flattens nested unions, deduplicates, and
    /// sorts by display name so member order never affects equality
    /// (spec.md §3). Collapses to the single member, or [`SemanticType::Unknown`]
    /// for an empty input.
    pub fn union(members: impl IntoIterator<Item = SemanticType>) -> Self {
        let mut flat = Vec::new();
        for member in members {
            match member {
                SemanticType::Union(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        flat.sort_by_key(|t| t.display_name());
        flat.dedup();
        if flat.len() <= 1 {
            flat.pop().unwrap_or(SemanticType::Unknown)
        } else {
            SemanticType::Union(flat)
        }
    }

    pub fn is_union(&self) -> bool {
        matches!(self, SemanticType::Union(_))
    }

    pub fn union_members(&self) -> Option<&[SemanticType]> {
        match self {
            SemanticType::Union(members) => Some(members),
            _ => None,
        }
    }

    /// Whether this type accepts `null` as a value (spec.md §4.8:
    /// "`null` is assignable to any reference type").
    pub fn is_reference_type(&self) -> bool {
        !matches!(
            self,
            SemanticType::Primitive(PrimitiveType::Int)
                | SemanticType::Primitive(PrimitiveType::Float)
                | SemanticType::Primitive(PrimitiveType::Bool)
                | SemanticType::Primitive(PrimitiveType::Void)
        )
    }

    /// The container's element type, if this is an `Array`, `Dictionary`, or
    /// packed array (spec.md §4.6's indexer rule).
    pub fn element_type(&self) -> Option<SemanticType> {
        match self {
            SemanticType::Array(t) => Some((**t).clone()),
            SemanticType::Dictionary(_, v) => Some((**v).clone()),
            SemanticType::Packed(kind) => Some(kind.element_type()),
            _ => None,
        }
    }

    pub fn key_type(&self) -> Option<SemanticType> {
        match self {
            SemanticType::Dictionary(k, _) => Some((**k).clone()),
            _ => None,
        }
    }

    /// The canonical display name (spec.md §3: `Callable[[int, String], bool]`,
    /// `Array[Dictionary[String, int]]`).
    pub fn display_name(&self) -> String {
        match self {
            SemanticType::Primitive(p) => p.to_string(),
            SemanticType::Named(name) => name.clone(),
            SemanticType::Array(t) => format!("Array[{}]", t.display_name()),
            SemanticType::Dictionary(k, v) => format!("Dictionary[{}, {}]", k.display_name(), v.display_name()),
            SemanticType::Packed(kind) => kind.to_string(),
            SemanticType::Callable(sig) => {
                let params = sig.parameters.iter().map(SemanticType::display_name).collect::<Vec<_>>().join(", ");
                format!("Callable[[{}], {}]", params, sig.return_type.display_name())
            }
            SemanticType::Union(members) => {
                members.iter().map(SemanticType::display_name).collect::<Vec<_>>().join(" | ")
            }
            SemanticType::Unknown => "Unknown".to_string(),
        }
    }

    /// Whether a value of type `self` may be assigned to a symbol declared
    /// `target` (spec.md §4.8): identical types; `int -> float` widening;
    /// `null` into any reference type; anything into `Variant`.
    pub fn is_assignable_to(&self, target: &SemanticType) -> bool {
        if self == target {
            return true;
        }
        match target {
            SemanticType::Primitive(PrimitiveType::Variant) => true,
            SemanticType::Primitive(PrimitiveType::Float) if *self == SemanticType::int() => true,
            _ if *self == SemanticType::null() && target.is_reference_type() => true,
            SemanticType::Union(members) => members.contains(self),
            _ => false,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_is_order_insensitive_after_canonicalisation() {
        let a = SemanticType::union([SemanticType::int(), SemanticType::string()]);
        let b = SemanticType::union([SemanticType::string(), SemanticType::int()]);
        assert_eq!(a, b);
    }

    #[test]
    fn union_collapses_single_member() {
        let t = SemanticType::union([SemanticType::int(), SemanticType::int()]);
        assert_eq!(t, SemanticType::int());
    }

    #[test]
    fn union_flattens_nested_unions() {
        let inner = SemanticType::union([SemanticType::int(), SemanticType::string()]);
        let outer = SemanticType::union([inner, SemanticType::bool()]);
        assert_eq!(outer.union_members().unwrap().len(), 3);
    }

    #[test]
    fn display_grammar_matches_spec_examples() {
        let callable = SemanticType::callable(vec![SemanticType::int(), SemanticType::string()], SemanticType::bool());
        assert_eq!(callable.display_name(), "Callable[[int, String], bool]");

        let nested = SemanticType::array(SemanticType::dictionary(SemanticType::string(), SemanticType::int()));
        assert_eq!(nested.display_name(), "Array[Dictionary[String, int]]");
    }

    #[test]
    fn int_is_assignable_to_float_but_not_reverse() {
        assert!(SemanticType::int().is_assignable_to(&SemanticType::float()));
        assert!(!SemanticType::float().is_assignable_to(&SemanticType::int()));
    }

    #[test]
    fn null_assignable_to_reference_types_only() {
        assert!(SemanticType::null().is_assignable_to(&SemanticType::Named("Node".to_string())));
        assert!(!SemanticType::null().is_assignable_to(&SemanticType::int()));
    }

    #[test]
    fn everything_assignable_to_variant() {
        assert!(SemanticType::int().is_assignable_to(&SemanticType::variant()));
        assert!(SemanticType::Named("Node".to_string()).is_assignable_to(&SemanticType::variant()));
    }

    #[test]
    fn indexer_element_types() {
        let array = SemanticType::array(SemanticType::int());
        assert_eq!(array.element_type(), Some(SemanticType::int()));

        let dict = SemanticType::dictionary(SemanticType::string(), SemanticType::bool());
        assert_eq!(dict.key_type(), Some(SemanticType::string()));
        assert_eq!(dict.element_type(), Some(SemanticType::bool()));

        let packed = SemanticType::Packed(PackedArrayKind::Int32);
        assert_eq!(packed.element_type(), Some(SemanticType::int()));
    }
}
