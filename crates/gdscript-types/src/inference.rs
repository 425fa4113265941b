use gdscript_runtime::RuntimeProvider;

use crate::confidence::Confidence;
use crate::expr::{AwaitTarget, Expr, LambdaInfo};
use crate::parse::parse_type_name;
use crate::semantic_type::SemanticType;
use crate::type_info::TypeInfo;

/// What [`TypeContext::resolve_identifier`] found for a bare identifier
/// reference (spec.md §4.6: "resolve via scope + runtime provider").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierResolution {
    /// A local symbol with the given declared/inferred pairing, as already
    /// computed by [`get_type_info`] for its declaration.
    Symbol { declared_type: Option<SemanticType>, inferred_type: Option<SemanticType>, confidence: Confidence },
    /// A runtime-provider global constant.
    GlobalConstant(SemanticType),
    Unresolved,
}

/// What [`TypeContext::resolve_member`] found for `base.member`
/// (spec.md §4.6: "resolve via class definition or runtime provider").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberResolution {
    pub member_type: SemanticType,
}

/// Host-supplied resolution surface the type inference engine consults for
/// identifiers, member access, and signal/coroutine lookups. Implemented by
/// whatever layer holds the scope graph and the current class context
/// (typically `gdscript-flow` or the `gdscript-analysis` facade) — this
/// crate stays ignorant of the scope graph's and syntax tree's concrete
/// shapes so it can be reused from either.
pub trait TypeContext {
    fn runtime(&self) -> &dyn RuntimeProvider;
    fn current_class(&self) -> &str;
    fn resolve_identifier(&self, name: &str) -> IdentifierResolution;
    fn resolve_member(&self, base: &SemanticType, member: &str) -> Option<MemberResolution>;
    /// Declared parameter types of a user-defined signal on the current
    /// class, if one by this name exists (spec.md §4.6's `await` rule).
    fn signal_parameter_types(&self, name: &str) -> Option<Vec<SemanticType>>;
    /// Declared return type of a coroutine (a user method marked to be
    /// awaited), if the callee resolves to one.
    fn coroutine_return_type(&self, callee: &Expr) -> Option<SemanticType>;
}

/// A declaration the engine can assign a declared/inferred type pairing to
/// (spec.md §4.6's declaration rules): a variable, constant, or parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub type_annotation: Option<String>,
    pub initializer: Option<Expr>,
    pub has_default: bool,
}

/// Number literal rule (spec.md §4.6): a `.` anywhere in the text makes it
/// a `float`, otherwise an `int`.
fn infer_number_literal(text: &str) -> SemanticType {
    if text.contains('.') {
        SemanticType::float()
    } else {
        SemanticType::int()
    }
}

/// `infer_type(expression) -> SemanticType` (spec.md §4.6's public surface).
pub fn infer_type(expr: &Expr, ctx: &dyn TypeContext) -> SemanticType {
    match expr {
        Expr::NumberLiteral(text) => infer_number_literal(text),
        Expr::StringLiteral(_) => SemanticType::string(),
        Expr::BooleanLiteral(_) => SemanticType::bool(),

        Expr::Identifier(name) => match ctx.resolve_identifier(name) {
            IdentifierResolution::Symbol { declared_type, inferred_type, .. } => {
                declared_type.or(inferred_type).unwrap_or_else(SemanticType::variant)
            }
            IdentifierResolution::GlobalConstant(t) => t,
            IdentifierResolution::Unresolved => SemanticType::variant(),
        },

        Expr::Array(elements) => {
            if elements.is_empty() {
                return SemanticType::array(SemanticType::Unknown);
            }
            let element_type = SemanticType::union(elements.iter().map(|e| infer_type(e, ctx)));
            SemanticType::array(element_type)
        }

        Expr::Dictionary(entries) => {
            if entries.is_empty() {
                return SemanticType::dictionary(SemanticType::Unknown, SemanticType::Unknown);
            }
            let key_type = SemanticType::union(entries.iter().map(|(k, _)| infer_type(k, ctx)));
            let value_type = SemanticType::union(entries.iter().map(|(_, v)| infer_type(v, ctx)));
            SemanticType::dictionary(key_type, value_type)
        }

        Expr::Indexer { base, .. } => infer_type(base, ctx).element_type().unwrap_or_else(SemanticType::variant),

        Expr::MemberAccess { base, member } => {
            let base_type = infer_type(base, ctx);
            ctx.resolve_member(&base_type, member).map(|m| m.member_type).unwrap_or_else(SemanticType::variant)
        }

        Expr::Call { callee, .. } => infer_call_type(callee, ctx),

        Expr::Lambda(lambda) => infer_lambda_type(lambda, ctx),

        Expr::Await(target) => infer_await_type(target, ctx),

        Expr::Yield => SemanticType::Named("Signal".to_string()),

        Expr::Unary { operand } => infer_type(operand, ctx),
        Expr::Binary { left, .. } => infer_type(left, ctx),
        Expr::Ternary { then_branch, else_branch } => {
            SemanticType::union([infer_type(then_branch, ctx), infer_type(else_branch, ctx)])
        }
    }
}

/// `infer_type_node(expression) -> TypeNode`. Our [`SemanticType`] already
/// encodes generic arguments structurally, so this is the same computation
/// as [`infer_type`] under a name matching spec.md §4.6's public surface.
pub fn infer_type_node(expr: &Expr, ctx: &dyn TypeContext) -> SemanticType {
    infer_type(expr, ctx)
}

fn infer_call_type(callee: &Expr, ctx: &dyn TypeContext) -> SemanticType {
    match infer_type(callee, ctx) {
        SemanticType::Callable(sig) => *sig.return_type,
        _ => match callee {
            Expr::Identifier(name) => ctx
                .runtime()
                .get_global_function(name)
                .map(|sig| parse_type_name(sig.return_type))
                .unwrap_or_else(SemanticType::variant),
            _ => SemanticType::variant(),
        },
    }
}

/// `Ps` from declared parameter annotations (missing -> `Variant`);
/// `R` from the declared return type, else the union of the body's
/// `return` expression types, else `void` (spec.md §4.6).
fn infer_lambda_type(lambda: &LambdaInfo, ctx: &dyn TypeContext) -> SemanticType {
    let params = lambda
        .parameters
        .iter()
        .map(|p| p.type_annotation.as_deref().map(parse_type_name).unwrap_or_else(SemanticType::variant))
        .collect();
    let return_type = infer_lambda_return_type(lambda, ctx);
    SemanticType::callable(params, return_type)
}

/// `infer_lambda_return_type(lambda_expr) -> SemanticType` (spec.md §4.6).
pub fn infer_lambda_return_type(lambda: &LambdaInfo, ctx: &dyn TypeContext) -> SemanticType {
    if let Some(annotation) = &lambda.declared_return_type {
        return parse_type_name(annotation);
    }
    if lambda.return_expressions.is_empty() {
        return SemanticType::void();
    }
    SemanticType::union(lambda.return_expressions.iter().map(|e| infer_type(e, ctx)))
}

/// `await` rule (spec.md §4.6): 0-param signal -> `void`, 1-param -> that
/// param's type, >=2 -> `Array`; coroutine call -> its declared return
/// type; unknown/null -> `Variant`.
fn infer_await_type(target: &AwaitTarget, ctx: &dyn TypeContext) -> SemanticType {
    match target {
        AwaitTarget::Signal(name) => match ctx.signal_parameter_types(name) {
            Some(params) if params.is_empty() => SemanticType::void(),
            Some(mut params) if params.len() == 1 => params.remove(0),
            Some(params) if params.len() >= 2 => SemanticType::Named("Array".to_string()),
            _ => SemanticType::variant(),
        },
        AwaitTarget::CoroutineCall(callee) => {
            ctx.coroutine_return_type(callee).unwrap_or_else(SemanticType::variant)
        }
        AwaitTarget::Unknown => SemanticType::variant(),
    }
}

/// `get_type_info` for a declaration (spec.md §4.6): an explicit type
/// annotation is `Certain`; an inferred initializer type is `Likely`; a
/// bare parameter with neither is `Variant` at `Guess` confidence.
pub fn type_info_for_declaration(decl: &Declaration, ctx: &dyn TypeContext) -> TypeInfo {
    if let Some(annotation) = &decl.type_annotation {
        return TypeInfo::new(Some(parse_type_name(annotation)), None, Confidence::Certain);
    }
    if let Some(initializer) = &decl.initializer {
        let inferred = infer_type(initializer, ctx);
        return TypeInfo::new(None, Some(inferred), Confidence::Likely);
    }
    TypeInfo::new(None, Some(SemanticType::variant()), Confidence::Guess)
}

/// `get_type_info` for a bare expression reference.
pub fn type_info_for_expr(expr: &Expr, ctx: &dyn TypeContext) -> TypeInfo {
    TypeInfo::new(None, Some(infer_type(expr, ctx)), Confidence::Likely)
}
