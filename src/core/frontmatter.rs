//! Minimal line-oriented frontmatter reader.
//!
//! Only the `skills:` list is understood. Everything else in the metadata
//! block is skipped. This is not a YAML parser.

const DELIMITER: &str = "---";
const SKILLS_KEY: &str = "skills:";

/// Skill identifiers declared in the metadata block plus the remaining body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    pub skills: Vec<String>,
    pub body: String,
}

/// Split a persona document into its declared skills and body text.
///
/// Without a delimiter on the first line, or without a closing delimiter,
/// the whole input is body and no skills are declared.
#[must_use]
pub fn parse(content: &str) -> Frontmatter {
    let lines: Vec<&str> = content.lines().collect();
    if lines.first().is_none_or(|first| first.trim() != DELIMITER) {
        return whole_body(&lines);
    }

    let mut skills = Vec::new();
    let mut collecting = false;
    let mut closing = None;

    for (index, line) in lines.iter().enumerate().skip(1) {
        let trimmed = line.trim();
        if trimmed == DELIMITER {
            closing = Some(index);
            break;
        }
        if line.starts_with(SKILLS_KEY) {
            collecting = true;
            continue;
        }
        if !collecting {
            continue;
        }
        if let Some(item) = trimmed.strip_prefix('-') {
            skills.push(item.trim().to_string());
        } else if !trimmed.is_empty() {
            collecting = false;
        }
    }

    let Some(closing) = closing else {
        return whole_body(&lines);
    };

    Frontmatter {
        skills,
        body: trim_blank_lines(&lines[closing + 1..]),
    }
}

fn whole_body(lines: &[&str]) -> Frontmatter {
    Frontmatter {
        skills: Vec::new(),
        body: trim_blank_lines(lines),
    }
}

fn trim_blank_lines(lines: &[&str]) -> String {
    let start = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(start, |last| last + 1);
    lines[start..end].join("\n")
}
