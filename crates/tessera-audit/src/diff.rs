//! Document diff computation for --output-diff

use std::fmt;

/// Lines of look-ahead used to resynchronize after a mismatch
const RESYNC_WINDOW: usize = 3;

/// One line of a document diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine<'a> {
    Same(&'a str),
    Added(&'a str),
    Removed(&'a str),
}

impl DiffLine<'_> {
    pub fn is_change(&self) -> bool {
        !matches!(self, DiffLine::Same(_))
    }
}

impl fmt::Display for DiffLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffLine::Same(line) => write!(f, "  {}", line),
            DiffLine::Added(line) => write!(f, "+ {}", line),
            DiffLine::Removed(line) => write!(f, "- {}", line),
        }
    }
}

/// Line-by-line diff between two serialized documents
pub fn diff_lines<'a>(before: &'a str, after: &'a str) -> Vec<DiffLine<'a>> {
    let before_lines: Vec<&str> = before.lines().collect();
    let after_lines: Vec<&str> = after.lines().collect();

    let mut out = Vec::new();
    let mut bi = 0;
    let mut ai = 0;

    while bi < before_lines.len() || ai < after_lines.len() {
        match (before_lines.get(bi).copied(), after_lines.get(ai).copied()) {
            (Some(b), Some(a)) if b == a => {
                out.push(DiffLine::Same(b));
                bi += 1;
                ai += 1;
            }
            (Some(b), Some(a)) => {
                // Inserted run: the current before-line shows up shortly after
                let added = after_lines[ai..]
                    .iter()
                    .take(RESYNC_WINDOW + 1)
                    .position(|line| *line == b);
                if let Some(offset) = added {
                    let run = &after_lines[ai..ai + offset];
                    out.extend(run.iter().copied().map(DiffLine::Added));
                    ai += offset;
                    continue;
                }

                let removed = before_lines[bi..]
                    .iter()
                    .take(RESYNC_WINDOW + 1)
                    .position(|line| *line == a);
                if let Some(offset) = removed {
                    let run = &before_lines[bi..bi + offset];
                    out.extend(run.iter().copied().map(DiffLine::Removed));
                    bi += offset;
                    continue;
                }

                out.push(DiffLine::Removed(b));
                out.push(DiffLine::Added(a));
                bi += 1;
                ai += 1;
            }
            (Some(b), None) => {
                out.push(DiffLine::Removed(b));
                bi += 1;
            }
            (None, Some(a)) => {
                out.push(DiffLine::Added(a));
                ai += 1;
            }
            (None, None) => break,
        }
    }

    out
}

/// Render the diff of two serialized documents as text
pub fn compute_document_diff(before: &str, after: &str) -> String {
    diff_lines(before, after)
        .iter()
        .map(|line| format!("{}\n", line))
        .collect()
}
