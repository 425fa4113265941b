//! The two bit-stable report file formats spec.md §6 names: a generic
//! block-verified format (used to snapshot any keyed set of findings for
//! human verification) and a flow-narrowing report grouped by method.
//! Both directions — write and parse — are implemented and round-trip.

use std::fmt::Write as _;

/// A reviewer's verdict on one reported entry, recorded as a trailing
/// `# OK|FP|SKIP` comment (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Ok,
    FalsePositive,
    Skip,
}

impl Verdict {
    fn as_str(self) -> &'static str {
        match self {
            Verdict::Ok => "OK",
            Verdict::FalsePositive => "FP",
            Verdict::Skip => "SKIP",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "OK" => Some(Verdict::Ok),
            "FP" => Some(Verdict::FalsePositive),
            "SKIP" => Some(Verdict::Skip),
            _ => None,
        }
    }
}

/// One `<entry-block>` in the block-verified format: a key line, an
/// optional verdict, and zero or more `key: value` detail lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEntry {
    pub key: String,
    pub verdict: Option<Verdict>,
    pub details: Vec<(String, String)>,
}

/// One `<file-block>`: a file path followed by its entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlock {
    pub file_path: String,
    pub entries: Vec<BlockEntry>,
}

/// Renders `blocks` in the block-verified grammar (spec.md §6), separating
/// blocks with a blank line. `global_comments` are emitted first, each on
/// its own `#`-prefixed line at column 0.
pub fn write_block_verified(blocks: &[FileBlock], global_comments: &[String]) -> String {
    let mut out = String::new();
    for comment in global_comments {
        let _ = writeln!(out, "# {comment}");
    }
    if !global_comments.is_empty() && !blocks.is_empty() {
        out.push('\n');
    }
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", block.file_path);
        for entry in &block.entries {
            match entry.verdict {
                Some(v) => {
                    let _ = writeln!(out, "  {} # {}", entry.key, v.as_str());
                }
                None => {
                    let _ = writeln!(out, "  {}", entry.key);
                }
            }
            for (k, v) in &entry.details {
                let _ = writeln!(out, "    {k}: {v}");
            }
        }
    }
    out
}

/// Parses text in the block-verified grammar back into [`FileBlock`]s.
/// Lines beginning with `#` at column 0 are skipped as global comments;
/// blank lines separate file blocks. Malformed lines are skipped rather
/// than failing the whole parse, matching a tolerant report reader.
pub fn parse_block_verified(text: &str) -> Vec<FileBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<FileBlock> = None;

    for raw_line in text.lines() {
        if raw_line.starts_with('#') {
            continue;
        }
        if raw_line.trim().is_empty() {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            continue;
        }
        if let Some(detail) = raw_line.strip_prefix("    ") {
            if let Some(block) = current.as_mut() {
                if let Some(entry) = block.entries.last_mut() {
                    if let Some((k, v)) = detail.split_once(": ") {
                        entry.details.push((k.to_string(), v.to_string()));
                    }
                }
            }
            continue;
        }
        if let Some(entry_line) = raw_line.strip_prefix("  ") {
            if let Some(block) = current.as_mut() {
                let (key_part, verdict) = match entry_line.split_once(" # ") {
                    Some((k, v)) => (k, Verdict::parse(v.trim())),
                    None => (entry_line, None),
                };
                block.entries.push(BlockEntry { key: key_part.to_string(), verdict, details: Vec::new() });
            }
            continue;
        }
        if let Some(block) = current.take() {
            blocks.push(block);
        }
        current = Some(FileBlock { file_path: raw_line.to_string(), entries: Vec::new() });
    }
    if let Some(block) = current {
        blocks.push(block);
    }
    blocks
}

/// One narrowing finding: a variable narrowed to `narrowed_type` from
/// `base_type` at `line:col` inside some method (spec.md §6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrowingEntry {
    pub line: u32,
    pub column: u32,
    pub variable: String,
    pub narrowed_type: String,
    pub base_type: String,
    pub verdict: Option<Verdict>,
}

/// All the narrowing entries observed inside one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodNarrowings {
    pub method: String,
    pub entries: Vec<NarrowingEntry>,
}

/// All the methods' narrowings observed inside one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNarrowings {
    pub file_path: String,
    pub methods: Vec<MethodNarrowings>,
}

/// Renders `files` in the flow-narrowing report grammar (spec.md §6).
pub fn write_flow_narrowing_report(files: &[FileNarrowings]) -> String {
    let mut out = String::new();
    for (i, file) in files.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", file.file_path);
        for method in &file.methods {
            let _ = writeln!(out, "  {}()", method.method);
            for entry in &method.entries {
                match entry.verdict {
                    Some(v) => {
                        let _ = writeln!(
                            out,
                            "    {}:{} {} -> {} (base: {}) # {}",
                            entry.line,
                            entry.column,
                            entry.variable,
                            entry.narrowed_type,
                            entry.base_type,
                            v.as_str()
                        );
                    }
                    None => {
                        let _ = writeln!(
                            out,
                            "    {}:{} {} -> {} (base: {})",
                            entry.line, entry.column, entry.variable, entry.narrowed_type, entry.base_type
                        );
                    }
                }
            }
        }
    }
    out
}

/// Parses a flow-narrowing report back into [`FileNarrowings`].
pub fn parse_flow_narrowing_report(text: &str) -> Vec<FileNarrowings> {
    let mut files = Vec::new();
    let mut current_file: Option<FileNarrowings> = None;

    for raw_line in text.lines() {
        if raw_line.trim().is_empty() {
            continue;
        }
        if let Some(entry_line) = raw_line.strip_prefix("    ") {
            if let Some(file) = current_file.as_mut() {
                if let Some(method) = file.methods.last_mut() {
                    if let Some(entry) = parse_narrowing_line(entry_line) {
                        method.entries.push(entry);
                    }
                }
            }
            continue;
        }
        if let Some(method_line) = raw_line.strip_prefix("  ") {
            if let Some(file) = current_file.as_mut() {
                let method = method_line.trim_end_matches("()").to_string();
                file.methods.push(MethodNarrowings { method, entries: Vec::new() });
            }
            continue;
        }
        if let Some(file) = current_file.take() {
            files.push(file);
        }
        current_file = Some(FileNarrowings { file_path: raw_line.to_string(), methods: Vec::new() });
    }
    if let Some(file) = current_file {
        files.push(file);
    }
    files
}

fn parse_narrowing_line(line: &str) -> Option<NarrowingEntry> {
    let (body, verdict) = match line.split_once(" # ") {
        Some((b, v)) => (b, Verdict::parse(v.trim())),
        None => (line, None),
    };
    let (pos, rest) = body.split_once(' ')?;
    let (line_str, col_str) = pos.split_once(':')?;
    let line_no: u32 = line_str.parse().ok()?;
    let column: u32 = col_str.parse().ok()?;
    let (variable, rest) = rest.split_once(" -> ")?;
    let (narrowed_type, base_part) = rest.split_once(" (base: ")?;
    let base_type = base_part.strip_suffix(')')?;
    Some(NarrowingEntry {
        line: line_no,
        column,
        variable: variable.to_string(),
        narrowed_type: narrowed_type.to_string(),
        base_type: base_type.to_string(),
        verdict,
    })
}
