use crate::semantic_type::{PackedArrayKind, SemanticType};

/// Parses a display-grammar type name (the inverse of
/// [`SemanticType::display_name`]) into a [`SemanticType`]. Unparseable or
/// unknown input becomes [`SemanticType::Unknown`] — callers treat that as
/// a low-confidence result plus a diagnostic (spec.md §7), never a panic.
pub fn parse_type_name(input: &str) -> SemanticType {
    parse_union(input.trim())
}

fn parse_union(input: &str) -> SemanticType {
    let parts = split_top_level(input, '|');
    if parts.len() > 1 {
        return SemanticType::union(parts.iter().map(|p| parse_single(p.trim())));
    }
    parse_single(input.trim())
}

fn parse_single(input: &str) -> SemanticType {
    match input {
        "int" => return SemanticType::int(),
        "float" => return SemanticType::float(),
        "bool" => return SemanticType::bool(),
        "String" | "string" => return SemanticType::string(),
        "void" => return SemanticType::void(),
        "Variant" | "variant" => return SemanticType::variant(),
        "null" => return SemanticType::null(),
        "PackedInt32Array" => return SemanticType::Packed(PackedArrayKind::Int32),
        "PackedFloat32Array" => return SemanticType::Packed(PackedArrayKind::Float32),
        "PackedStringArray" => return SemanticType::Packed(PackedArrayKind::String),
        "PackedByteArray" => return SemanticType::Packed(PackedArrayKind::Byte),
        "PackedVector2Array" => return SemanticType::Packed(PackedArrayKind::Vector2),
        "PackedVector3Array" => return SemanticType::Packed(PackedArrayKind::Vector3),
        "" => return SemanticType::Unknown,
        _ => {}
    }

    if let Some(rest) = input.strip_prefix("Array[").and_then(|s| s.strip_suffix(']')) {
        return SemanticType::array(parse_union(rest));
    }
    if let Some(rest) = input.strip_prefix("Dictionary[").and_then(|s| s.strip_suffix(']')) {
        let parts = split_top_level(rest, ',');
        if parts.len() == 2 {
            return SemanticType::dictionary(parse_union(parts[0].trim()), parse_union(parts[1].trim()));
        }
        return SemanticType::Unknown;
    }
    if input == "Callable" {
        // The plain, parameterless form — helper utilities return empty/none for it.
        return SemanticType::callable(Vec::new(), SemanticType::variant());
    }
    if let Some(rest) = input.strip_prefix("Callable[[").and_then(|s| s.strip_suffix(']')) {
        if let Some((params_part, ret_part)) = split_callable_body(rest) {
            let params = split_top_level(&params_part, ',')
                .iter()
                .filter(|p| !p.trim().is_empty())
                .map(|p| parse_union(p.trim()))
                .collect();
            return SemanticType::callable(params, parse_union(ret_part.trim()));
        }
        return SemanticType::Unknown;
    }

    // A bare identifier is treated as a named (engine or user-defined) class.
    if input.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_') {
        return SemanticType::Named(input.to_string());
    }
    SemanticType::Unknown
}

/// Splits `Callable[[params], ret]`'s inner content (after removing the
/// leading `[[` / trailing `]`) at the `], ` boundary that separates the
/// parameter list from the return type, respecting nested brackets.
fn split_callable_body(inner: &str) -> Option<(String, String)> {
    let mut depth = 0i32;
    let bytes: Vec<char> = inner.chars().collect();
    for (i, &c) in bytes.iter().enumerate() {
        match c {
            '[' => depth += 1,
            ']' => {
                if depth == 0 {
                    let params: String = bytes[..i].iter().collect();
                    let rest: String = bytes[i + 1..].iter().collect();
                    let ret = rest.trim_start_matches(',').trim();
                    return Some((params, ret.to_string()));
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

/// Splits `input` on `sep` at bracket-nesting depth zero only.
fn split_top_level(input: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for c in input.chars() {
        match c {
            '[' => {
                depth += 1;
                current.push(c);
            }
            ']' => {
                depth -= 1;
                current.push(c);
            }
            c if c == sep && depth == 0 => {
                parts.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    parts.push(current);
    parts
}

/// `extract_callable_return_type("Callable[[…], R]")` (spec.md §4.6).
/// Returns `None` for the plain `Callable` or any unparseable form.
pub fn extract_callable_return_type(display: &str) -> Option<SemanticType> {
    match parse_type_name(display) {
        SemanticType::Callable(sig) if !display.trim().eq("Callable") => Some(*sig.return_type),
        _ => None,
    }
}

/// `extract_callable_parameter_types` (spec.md §4.6). Returns `None` for
/// the plain `Callable` or any unparseable form, `Some(vec![])` for a
/// callable with no parameters.
pub fn extract_callable_parameter_types(display: &str) -> Option<Vec<SemanticType>> {
    match parse_type_name(display) {
        SemanticType::Callable(sig) if !display.trim().eq("Callable") => Some(sig.parameters),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_primitives() {
        assert_eq!(parse_type_name("int"), SemanticType::int());
        assert_eq!(parse_type_name("float"), SemanticType::float());
    }

    #[test]
    fn parses_nested_containers() {
        let t = parse_type_name("Array[Dictionary[String, int]]");
        assert_eq!(t.display_name(), "Array[Dictionary[String, int]]");
    }

    #[test]
    fn parses_callable_and_helpers_extract_parts() {
        let display = "Callable[[int, String], bool]";
        assert_eq!(extract_callable_return_type(display), Some(SemanticType::bool()));
        assert_eq!(extract_callable_parameter_types(display), Some(vec![SemanticType::int(), SemanticType::string()]));
    }

    #[test]
    fn plain_callable_yields_no_parts() {
        assert_eq!(extract_callable_return_type("Callable"), None);
        assert_eq!(extract_callable_parameter_types("Callable"), None);
    }

    #[test]
    fn parses_union() {
        let t = parse_type_name("int | String");
        assert!(t.is_union());
    }

    #[test]
    fn unknown_class_name_becomes_named() {
        assert_eq!(parse_type_name("PlayerController"), SemanticType::Named("PlayerController".to_string()));
    }

    #[test]
    fn garbage_input_is_unknown() {
        assert_eq!(parse_type_name("@@@"), SemanticType::Unknown);
    }
}
