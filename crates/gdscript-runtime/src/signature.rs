/// A formal parameter in a [`GlobalFunctionSignature`] or [`MemberSignature`].
///
/// `type_name` is a display-grammar string (spec.md §3's "display name
/// grammar"), parsed by `gdscript-types` rather than stored as a resolved
/// `SemanticType` here — the runtime provider sits below the type engine in
/// the dependency order (spec.md §2) and must not depend back on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: &'static str,
    pub type_name: &'static str,
}

/// `get_global_function` result (spec.md §4.5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalFunctionSignature {
    pub parameters: Vec<ParameterInfo>,
    pub return_type: &'static str,
    pub is_varargs: bool,
}

/// Classification of a [`GlobalConstantInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantKind {
    Numeric,
    KeyCode,
    Other,
}

/// `get_global_constant` result (spec.md §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalConstantInfo {
    pub type_name: &'static str,
    pub kind: ConstantKind,
}

/// Kind of a class member returned by `get_member` (spec.md §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method,
    Property,
    Signal,
}

/// `get_member` result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub kind: MemberKind,
    /// For methods: `Callable[[Ps], R]`-style display signature. For
    /// properties: the property's type name. For signals: the signal's
    /// parameter-list display, matched by [`SignalInfo`] instead when the
    /// full parameter list (not just a display string) is needed.
    pub signature: &'static str,
}

/// A declared signal and its parameter list, used by `await` inference
/// (spec.md §4.6) and by emit/connect argument-count diagnostics
/// (spec.md §4.8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalInfo {
    pub name: &'static str,
    pub parameters: Vec<ParameterInfo>,
}
