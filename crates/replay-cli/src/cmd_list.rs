use anyhow::Result;
use replay::{Commit, ReplayOptions, Vcs};

/// Validate and resolve like a session would, then print instead of
/// checking anything out.
pub fn run(vcs: &dyn Vcs, opts: &ReplayOptions, json: bool) -> Result<()> {
    println!("{}", render(vcs, opts, json)?);
    Ok(())
}

fn render(vcs: &dyn Vcs, opts: &ReplayOptions, json: bool) -> Result<String> {
    replay::validate(vcs, opts)?;

    let Some(start) = opts.start.as_deref() else {
        let candidates = vcs.recent_revisions(opts.candidate_limit)?;
        return if json {
            let output = serde_json::json!({ "candidates": candidates });
            Ok(serde_json::to_string_pretty(&output)?)
        } else {
            Ok(lines(&candidates))
        };
    };

    let end = opts.end_ref();
    let commits = replay::resolve(vcs, start, end)?;
    if json {
        let output = serde_json::json!({
            "start": start,
            "end": end,
            "commits": commits,
        });
        Ok(serde_json::to_string_pretty(&output)?)
    } else {
        Ok(lines(&commits))
    }
}

fn lines(commits: &[Commit]) -> String {
    let total = commits.len();
    commits
        .iter()
        .enumerate()
        .map(|(i, c)| format!("[{}/{}] {} {}", i + 1, total, c.hash, truncate(&c.message, 72)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_numbering() {
        let commits = vec![Commit::new("abc1234", "one"), Commit::new("def5678", "two")];
        assert_eq!(lines(&commits), "[1/2] abc1234 one\n[2/2] def5678 two");
    }

    #[test]
    fn test_truncate_short() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long() {
        assert_eq!(truncate("hello world, this is long", 10), "hello w...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("日本語テスト日本語テスト", 8), "日本語テス...");
    }
}
