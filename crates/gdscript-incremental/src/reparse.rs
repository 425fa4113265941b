use gdscript_span::{TextChange, TextSpan};
use gdscript_syntax::{compare_structure, validate, ElementId, Tree};

use crate::config::IncrementalConfig;
use crate::parser_facade::ParserFacade;
use crate::result::{ChangedMember, IncrementalKind, IncrementalResult};

fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map(|(b, _)| b).unwrap_or(s.len())
}

fn char_count(s: &str) -> usize {
    s.chars().count()
}

fn slice_span<'a>(text: &'a str, span: TextSpan) -> &'a str {
    let start = char_to_byte(text, span.start());
    let end = char_to_byte(text, span.end());
    &text[start..end]
}

/// The bounding span of every token reachable from `id`, in `tree`'s own
/// coordinates. `None` for an id with no token descendants (shouldn't
/// happen for a well-formed member, but an empty member is not a crash).
fn token_span_of(tree: &Tree, id: ElementId) -> Option<TextSpan> {
    let mut acc: Option<TextSpan> = None;
    let mut stack = vec![id];
    while let Some(cur) = stack.pop() {
        if let Some(token) = tree.token_of(cur) {
            acc = Some(match acc {
                Some(a) => a.union(token.span),
                None => token.span,
            });
        }
        stack.extend(tree.children_of(cur).iter().copied());
    }
    acc
}

/// Net code-point delta contributed by every change that lies entirely
/// before `offset` in `T0`'s coordinates.
fn cumulative_delta_before(changes: &[TextChange], offset: usize) -> i64 {
    changes.iter().filter(|c| c.start() + c.old_length() <= offset).map(TextChange::delta).sum()
}

/// Finds, for each change, the single top-level member of `tree` whose
/// span contains the change's original region. Returns `None` if any
/// change's region isn't fully contained in exactly one member (a
/// cross-member edit) or falls before the first member (a class-header
/// edit) — both cases force a full reparse upstream.
fn assign_changes_to_members(
    tree: &Tree,
    members: &[ElementId],
    member_spans: &[TextSpan],
    changes: &[TextChange],
) -> Option<Vec<(usize, Vec<usize>)>> {
    let _ = tree;
    let mut by_member: Vec<Vec<usize>> = vec![Vec::new(); members.len()];
    for (change_idx, change) in changes.iter().enumerate() {
        let region = change.original_span();
        let owner = member_spans.iter().position(|span| span.contains_span(region))?;
        by_member[owner].push(change_idx);
    }
    Some(by_member.into_iter().enumerate().filter(|(_, v)| !v.is_empty()).collect())
}

/// Tiered-fallback incremental reparse (spec.md §4.3): attempts to splice
/// only the affected top-level members of `previous` rather than
/// reparsing `new_text` wholesale, falling back to a full reparse the
/// moment any tier's precondition fails.
///
/// `changes` are in `previous.to_string_lossless()`'s coordinates;
/// `new_text` is the already-computed result of applying them (the
/// caller, not this function, owns change application — spec.md §6's
/// text-buffer interface hands over both the previous tree and the new
/// full text).
pub fn parse_incremental(
    parser: &dyn ParserFacade,
    previous: &Tree,
    new_text: &str,
    changes: &[TextChange],
    config: &IncrementalConfig,
) -> IncrementalResult {
    if changes.is_empty() {
        return IncrementalResult { tree: previous.clone(), kind: IncrementalKind::IsNoChange, changed_members: Vec::new() };
    }

    match try_incremental(parser, previous, new_text, changes, config) {
        Some(result) => result,
        None => full_reparse(parser, new_text),
    }
}

fn full_reparse(parser: &dyn ParserFacade, new_text: &str) -> IncrementalResult {
    let tree = match parser.parse_file(new_text) {
        Ok(tree) => tree,
        Err(_) => {
            // The external parser itself failed; spec.md §7 guarantees the
            // parser always returns *some* tree, so a conformant `P`
            // cannot reach this arm in practice. There is nothing sound to
            // splice, so surface the emptiest possible tree rather than
            // panic — callers see it fail AST validation immediately.
            previous_placeholder()
        }
    };
    IncrementalResult { tree, kind: IncrementalKind::IsFullReparse, changed_members: Vec::new() }
}

fn previous_placeholder() -> Tree {
    let mut builder = gdscript_syntax::TreeBuilder::new();
    builder.start_node(gdscript_syntax::NodeKind::ClassDecl);
    builder.finish_node();
    builder.finish()
}

fn try_incremental(
    parser: &dyn ParserFacade,
    previous: &Tree,
    new_text: &str,
    changes: &[TextChange],
    config: &IncrementalConfig,
) -> Option<IncrementalResult> {
    let source_len = char_count(&previous.to_string_lossless());

    for change in changes {
        let size = (change.old_length() + change.new_length()) as f64;
        if source_len > 0 && size / source_len as f64 > config.change_size_threshold {
            tracing::debug!(start = change.start(), "change exceeds size threshold, falling back to full reparse");
            return None;
        }
    }

    let members = previous.members();
    if members.is_empty() {
        return None;
    }
    let member_spans: Vec<TextSpan> = members.iter().map(|&id| token_span_of(previous, id)).collect::<Option<_>>()?;

    // Class-level attribute region: anything before the first member.
    let header_end = member_spans[0].start();
    if changes.iter().any(|c| c.start() < header_end) {
        tracing::debug!("change touches the class header region, falling back to full reparse");
        return None;
    }

    let grouped = assign_changes_to_members(previous, &members, &member_spans, changes)?;
    if grouped.len() > config.max_affected_members {
        tracing::debug!(affected = grouped.len(), cap = config.max_affected_members, "above member cap, falling back to full reparse");
        return None;
    }

    let mut working = previous.deep_clone();
    let mut changed_members = Vec::with_capacity(grouped.len());

    for (member_index, change_indices) in &grouped {
        let member_id = members[*member_index];
        let original_span = member_spans[*member_index];
        let new_start = (original_span.start() as i64 + cumulative_delta_before(changes, original_span.start())) as usize;
        let length_delta: i64 = change_indices.iter().map(|&i| changes[i].delta()).sum();
        let new_length = (original_span.length() as i64 + length_delta).max(0) as usize;
        let new_span = TextSpan::new(new_start, new_length);
        if new_span.end() > char_count(new_text) {
            return None;
        }
        let member_text = slice_span(new_text, new_span);

        let member_tree = match parser.parse_member(member_text) {
            Ok(tree) => tree,
            Err(_) => return None,
        };

        let new_member = match working.replace_node(member_id, member_tree) {
            Ok(id) => id,
            Err(_) => return None,
        };
        changed_members.push(ChangedMember { index: *member_index, old_member: member_id, new_member });
    }

    let validation = validate(Some(&working), Some(new_text));
    if !validation.is_valid {
        tracing::debug!(errors = ?validation.errors, "spliced tree failed validation, falling back to full reparse");
        return None;
    }

    Some(IncrementalResult { tree: working, kind: IncrementalKind::IsIncremental, changed_members })
}

/// The spans in `t1` whose structure differs from `t0`, at member
/// granularity (spec.md §4.3's `GetChangedRanges`).
pub fn get_changed_ranges(t0: &Tree, t1: &Tree) -> Vec<TextSpan> {
    let t0_members = t0.members();
    let t1_members = t1.members();
    let mut out = Vec::new();
    for (i, &m1) in t1_members.iter().enumerate() {
        let differs = match t0_members.get(i) {
            Some(&m0) => !compare_structure(&t0.subtree(m0), &t1.subtree(m1)).is_empty(),
            None => true,
        };
        if differs {
            if let Some(span) = token_span_of(t1, m1) {
                out.push(span);
            }
        }
    }
    out
}
