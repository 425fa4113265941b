#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
mod confidence;
mod container;
mod expr;
mod inference;
mod parse;
mod semantic_type;
mod type_info;

pub use confidence::Confidence;
pub use container::{merge_container_observations, ContainerInfo, ContainerObservation, ObservationKind};
pub use expr::{AwaitTarget, Expr, ExprParam, LambdaInfo};
pub use inference::{
    infer_lambda_return_type, infer_type, infer_type_node, type_info_for_declaration, type_info_for_expr,
    Declaration, IdentifierResolution, MemberResolution, TypeContext,
};
pub use parse::{extract_callable_parameter_types, extract_callable_return_type, parse_type_name};
pub use semantic_type::{CallableSignature, PackedArrayKind, PrimitiveType, SemanticType};
pub use type_info::TypeInfo;
