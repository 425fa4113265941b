use crate::signature::{GlobalConstantInfo, GlobalFunctionSignature, MemberInfo, SignalInfo};

/// External catalog of built-in types, methods, signals, and constants
/// (spec.md §4.5). Exposed as a set of pure functions returning optional
/// results, with no observable side effects (spec.md §6). Implementations
/// must be safe for concurrent reads — multiple method-level flow analyses
/// may consult the same provider in parallel (spec.md §5).
pub trait RuntimeProvider: Send + Sync {
    fn is_known_type(&self, name: &str) -> bool;
    fn get_global_function(&self, name: &str) -> Option<GlobalFunctionSignature>;
    fn get_global_constant(&self, name: &str) -> Option<GlobalConstantInfo>;
    fn get_member(&self, class_name: &str, member: &str) -> Option<MemberInfo>;
    fn signals_of(&self, class_name: &str) -> Vec<SignalInfo>;

    /// Optional project-provider extension (spec.md §4.5): resolves a
    /// `res://`-style path to a resource's declared type name. `None` by
    /// default — a conformant base provider need not resolve project
    /// resources.
    fn get_resource(&self, _path: &str) -> Option<&'static str> {
        None
    }

    /// Optional project-provider extension resolving a script path to its
    /// base class name.
    fn get_script(&self, _path: &str) -> Option<&'static str> {
        None
    }
}
