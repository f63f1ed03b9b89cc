//! ASCII tree rendering of summaries.

use std::io::{self, Write};

use crate::summary::tree::{build_tree, TreeNode};
use crate::summary::{SummaryMap, NO_SUMMARY};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Writes `node` below `prefix`.
///
/// Children are listed directories first, then files, each group in
/// ascending name order. Summary lines sit under their file name at the
/// child's indentation without a connector.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn render<W: Write>(node: &TreeNode, prefix: &str, out: &mut W) -> io::Result<()> {
    let children = match node {
        TreeNode::Directory(children) => children,
        TreeNode::File(summary) => return render_summary(summary, prefix, out),
    };

    let (dirs, files): (Vec<_>, Vec<_>) =
        children.iter().partition(|(_, child)| matches!(child, TreeNode::Directory(_)));
    let ordered: Vec<_> = dirs.into_iter().chain(files).collect();

    let count = ordered.len();
    for (i, (name, child)) in ordered.into_iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        writeln!(out, "{prefix}{connector}{name}")?;

        let child_prefix = format!("{prefix}{}", if is_last { SPACE } else { PIPE });
        render(child, &child_prefix, out)?;
    }
    Ok(())
}

fn render_summary<W: Write>(summary: &str, prefix: &str, out: &mut W) -> io::Result<()> {
    let summary = if summary.trim().is_empty() { NO_SUMMARY } else { summary };
    for line in summary.lines() {
        writeln!(out, "{prefix}{line}")?;
    }
    Ok(())
}

/// Prints the banner and the summary tree for a project.
///
/// An empty map prints a single notice instead.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn print_summaries_tree<W: Write>(
    project_name: &str,
    summaries: &SummaryMap,
    out: &mut W,
) -> io::Result<()> {
    if summaries.is_empty() {
        writeln!(out, "No summaries to display.")?;
        return Ok(());
    }
    writeln!(out, "\n\n---Project Summaries: {project_name} ---")?;
    render(&build_tree(summaries), "", out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::ERROR_SUMMARY;

    fn map(entries: &[(&str, &str)]) -> SummaryMap {
        entries.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    fn rendered(summaries: &SummaryMap) -> String {
        let mut out = Vec::new();
        render(&build_tree(summaries), "", &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn directories_precede_files() {
        let text = rendered(&map(&[("b.py", "s1"), ("a/c.py", "s2")]));
        assert_eq!(text, "├── a\n│   └── c.py\n│       s2\n└── b.py\n    s1\n");
    }

    #[test]
    fn groups_sorted_alphabetically() {
        let text = rendered(&map(&[
            ("zeta.py", "z"),
            ("alpha.py", "a"),
            ("lib/x.rs", "x"),
            ("docs/readme.md", "r"),
        ]));
        let names: Vec<&str> = text
            .lines()
            .filter_map(|l| l.strip_prefix(BRANCH).or_else(|| l.strip_prefix(LAST_BRANCH)))
            .collect();
        assert_eq!(names, vec!["docs", "lib", "alpha.py", "zeta.py"]);
    }

    #[test]
    fn trailing_newline_and_crlf_do_not_add_lines() {
        let text = rendered(&map(&[("a.py", "first\r\nsecond\n")]));
        assert_eq!(text, "└── a.py\n    first\n    second\n");
    }

    #[test]
    fn insertion_order_does_not_change_output() {
        let mut forward = SummaryMap::new();
        forward.insert("src/b.py".into(), "B".into());
        forward.insert("a.py".into(), "A".into());
        let mut backward = SummaryMap::new();
        backward.insert("a.py".into(), "A".into());
        backward.insert("src/b.py".into(), "B".into());

        assert_eq!(rendered(&forward), rendered(&backward));
        assert_eq!(forward.keys().next().map(String::as_str), Some("a.py"));
    }

    #[test]
    fn nested_continuation_bars() {
        let text = rendered(&map(&[("a/b/c.py", "deep"), ("a/d.py", "shallow"), ("e.py", "top")]));
        let expected = "\
├── a
│   ├── b
│   │   └── c.py
│   │       deep
│   └── d.py
│       shallow
└── e.py
    top
";
        assert_eq!(text, expected);
    }

    #[test]
    fn blank_summaries_use_placeholder() {
        let text = rendered(&map(&[("a.py", ""), ("b.py", "   ")]));
        assert_eq!(text, "├── a.py\n│   No summary provided.\n└── b.py\n    No summary provided.\n");
    }

    #[test]
    fn error_placeholder_renders_verbatim() {
        let text = rendered(&map(&[("a.py", ERROR_SUMMARY)]));
        assert_eq!(text, "└── a.py\n    Error occurred during summarization.\n");
    }

    #[test]
    fn multi_line_summary_keeps_indent() {
        let text = rendered(&map(&[("a.py", "line one\nline two")]));
        assert_eq!(text, "└── a.py\n    line one\n    line two\n");
    }

    #[test]
    fn empty_directory_renders_nothing() {
        let mut out = Vec::new();
        render(&TreeNode::empty_dir(), "", &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn empty_map_prints_notice() {
        let mut out = Vec::new();
        print_summaries_tree("demo", &SummaryMap::new(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No summaries to display.\n");
    }

    #[test]
    fn banner_precedes_tree() {
        let mut out = Vec::new();
        print_summaries_tree("demo", &map(&[("b.py", "Does Y")]), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\n\n---Project Summaries: demo ---\n└── b.py\n    Does Y\n"
        );
    }
}
