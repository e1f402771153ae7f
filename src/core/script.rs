//! Script reader: turns dialogue script text into `(text, tags)` lines.
//!
//! Supported subset of the authoring format:
//! - blank lines and `//` comments are skipped
//! - knot headers (`== name ==`) and diverts (`-> target`) are skipped
//! - `#` starts a tag; `\#` is a literal `#`
//! - a line holding only tags applies them to the next text line

/// One line produced by a narrative script.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptLine {
    pub text: String,
    pub tags: Vec<String>,
}

/// A parsed dialogue script.
#[derive(Debug, Clone, Default)]
pub struct Script {
    lines: Vec<ScriptLine>,
}

impl Script {
    pub fn parse(input: &str) -> Script {
        let mut lines = Vec::new();
        let mut pending_tags: Vec<String> = Vec::new();

        for raw in input.lines() {
            let raw = raw.trim();
            if raw.is_empty() || raw.starts_with("//") {
                continue;
            }
            if raw.starts_with("==") || raw.starts_with("->") {
                continue;
            }

            let (text, tags) = split_line(raw);
            if text.is_empty() {
                pending_tags.extend(tags);
                continue;
            }

            let mut line_tags = std::mem::take(&mut pending_tags);
            line_tags.extend(tags);
            lines.push(ScriptLine {
                text,
                tags: line_tags,
            });
        }

        Script { lines }
    }

    pub fn lines(&self) -> &[ScriptLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl IntoIterator for Script {
    type Item = ScriptLine;
    type IntoIter = std::vec::IntoIter<ScriptLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

/// Split a script line into its text and `#` tags.
fn split_line(raw: &str) -> (String, Vec<String>) {
    let mut segments = vec![String::new()];
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'#') => {
                chars.next();
                if let Some(current) = segments.last_mut() {
                    current.push('#');
                }
            }
            '#' => segments.push(String::new()),
            _ => {
                if let Some(current) = segments.last_mut() {
                    current.push(c);
                }
            }
        }
    }

    let text = segments.remove(0).trim().to_string();
    let tags = segments
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();
    (text, tags)
}
