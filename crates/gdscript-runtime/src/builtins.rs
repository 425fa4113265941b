use std::collections::HashMap;
use std::sync::OnceLock;

use crate::provider::RuntimeProvider;
use crate::signature::{
    ConstantKind, GlobalConstantInfo, GlobalFunctionSignature, MemberInfo, ParameterInfo, SignalInfo,
};

fn param(name: &'static str, type_name: &'static str) -> ParameterInfo {
    ParameterInfo { name, type_name }
}

fn functions() -> &'static HashMap<&'static str, GlobalFunctionSignature> {
    static TABLE: OnceLock<HashMap<&'static str, GlobalFunctionSignature>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut t = HashMap::new();

        // Numeric built-ins with fixed, spec-mandated return types
        // (spec.md §4.5): the float/int split is load-bearing for callers
        // that branch on it, so these are not inferred from usage.
        t.insert(
            "abs",
            GlobalFunctionSignature { parameters: vec![param("x", "float")], return_type: "float", is_varargs: false },
        );
        t.insert(
            "absi",
            GlobalFunctionSignature { parameters: vec![param("x", "int")], return_type: "int", is_varargs: false },
        );
        t.insert(
            "min",
            GlobalFunctionSignature { parameters: vec![param("a", "float"), param("b", "float")], return_type: "float", is_varargs: true },
        );
        t.insert(
            "max",
            GlobalFunctionSignature { parameters: vec![param("a", "float"), param("b", "float")], return_type: "float", is_varargs: true },
        );
        t.insert(
            "mini",
            GlobalFunctionSignature { parameters: vec![param("a", "int"), param("b", "int")], return_type: "int", is_varargs: true },
        );
        t.insert(
            "maxi",
            GlobalFunctionSignature { parameters: vec![param("a", "int"), param("b", "int")], return_type: "int", is_varargs: true },
        );
        t.insert(
            "clamp",
            GlobalFunctionSignature {
                parameters: vec![param("value", "float"), param("min", "float"), param("max", "float")],
                return_type: "float",
                is_varargs: false,
            },
        );
        t.insert(
            "clampi",
            GlobalFunctionSignature {
                parameters: vec![param("value", "int"), param("min", "int"), param("max", "int")],
                return_type: "int",
                is_varargs: false,
            },
        );
        t.insert("randi", GlobalFunctionSignature { parameters: vec![], return_type: "int", is_varargs: false });
        t.insert("randf", GlobalFunctionSignature { parameters: vec![], return_type: "float", is_varargs: false });
        t.insert(
            "randi_range",
            GlobalFunctionSignature { parameters: vec![param("from", "int"), param("to", "int")], return_type: "int", is_varargs: false },
        );

        // Variadic diagnostic/formatting built-ins (spec.md §4.8: these
        // never produce a wrong-argument-count diagnostic).
        t.insert("str", GlobalFunctionSignature { parameters: vec![], return_type: "String", is_varargs: true });
        t.insert("print", GlobalFunctionSignature { parameters: vec![], return_type: "void", is_varargs: true });
        t.insert("printerr", GlobalFunctionSignature { parameters: vec![], return_type: "void", is_varargs: true });
        t.insert("push_error", GlobalFunctionSignature { parameters: vec![], return_type: "void", is_varargs: true });
        t.insert("push_warning", GlobalFunctionSignature { parameters: vec![], return_type: "void", is_varargs: true });

        // Fixed-arity built-ins referenced by diagnostics rules (spec.md §4.8).
        t.insert(
            "is_instance_of",
            GlobalFunctionSignature {
                parameters: vec![param("object", "Variant"), param("type", "Variant")],
                return_type: "bool",
                is_varargs: false,
            },
        );
        t.insert(
            "is_instance_valid",
            GlobalFunctionSignature { parameters: vec![param("instance", "Variant")], return_type: "bool", is_varargs: false },
        );

        t
    })
}

fn constants() -> &'static HashMap<&'static str, GlobalConstantInfo> {
    static TABLE: OnceLock<HashMap<&'static str, GlobalConstantInfo>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut t = HashMap::new();
        t.insert("PI", GlobalConstantInfo { type_name: "float", kind: ConstantKind::Numeric });
        t.insert("TAU", GlobalConstantInfo { type_name: "float", kind: ConstantKind::Numeric });
        t.insert("INF", GlobalConstantInfo { type_name: "float", kind: ConstantKind::Numeric });
        t.insert("NAN", GlobalConstantInfo { type_name: "float", kind: ConstantKind::Numeric });

        // A representative slice of the engine's keyboard-key constants
        // (spec.md §4.5): exposed as integers so they resolve without
        // triggering undefined-identifier diagnostics. Not exhaustive —
        // a project runtime provider may layer the full catalog on top.
        const KEY_NAMES: &[&str] = &[
            "KEY_SPACE", "KEY_ENTER", "KEY_ESCAPE", "KEY_TAB", "KEY_BACKSPACE",
            "KEY_UP", "KEY_DOWN", "KEY_LEFT", "KEY_RIGHT",
            "KEY_SHIFT", "KEY_CTRL", "KEY_ALT",
            "KEY_A", "KEY_B", "KEY_C", "KEY_D", "KEY_E", "KEY_F", "KEY_G", "KEY_H",
            "KEY_I", "KEY_J", "KEY_K", "KEY_L", "KEY_M", "KEY_N", "KEY_O", "KEY_P",
            "KEY_Q", "KEY_R", "KEY_S", "KEY_T", "KEY_U", "KEY_V", "KEY_W", "KEY_X",
            "KEY_Y", "KEY_Z",
            "KEY_0", "KEY_1", "KEY_2", "KEY_3", "KEY_4",
            "KEY_5", "KEY_6", "KEY_7", "KEY_8", "KEY_9",
        ];
        for name in KEY_NAMES {
            t.insert(*name, GlobalConstantInfo { type_name: "int", kind: ConstantKind::KeyCode });
        }
        t
    })
}

/// The default, engine-provided [`RuntimeProvider`]: the built-in global
/// function/constant tables from spec.md §4.5, with no project-specific
/// class catalog. A host embedding this core layers project resources and
/// user-defined classes on top, typically by wrapping this provider and
/// falling back to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRuntimeProvider;

impl RuntimeProvider for DefaultRuntimeProvider {
    fn is_known_type(&self, name: &str) -> bool {
        matches!(
            name,
            "int" | "float" | "bool" | "String" | "StringName" | "NodePath" | "Variant" | "void" | "null"
                | "Array" | "Dictionary" | "Callable" | "Signal" | "Object" | "Node" | "Node2D" | "Node3D"
                | "Control" | "Resource" | "PackedInt32Array" | "PackedFloat32Array" | "PackedStringArray"
                | "PackedByteArray" | "PackedVector2Array" | "PackedVector3Array" | "Vector2" | "Vector3"
                | "Color" | "Rect2" | "Transform2D" | "Basis" | "Quaternion"
        )
    }

    fn get_global_function(&self, name: &str) -> Option<GlobalFunctionSignature> {
        functions().get(name).cloned()
    }

    fn get_global_constant(&self, name: &str) -> Option<GlobalConstantInfo> {
        constants().get(name).copied()
    }

    fn get_member(&self, _class_name: &str, _member: &str) -> Option<MemberInfo> {
        None
    }

    fn signals_of(&self, _class_name: &str) -> Vec<SignalInfo> {
        Vec::new()
    }
}
