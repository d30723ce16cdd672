//! Regex-based stripping of a target function's body.
//!
//! This is pattern matching over source text, not parsing. An occurrence of
//! the target function is located by a header pattern plus parenthesis-depth
//! counting for the parameter list, its extent is bounded by indentation, and
//! the body is cut down to the final return statement. The matcher sits
//! behind the small [`Stripper`] / [`Occurrence`] interface so it could later
//! be swapped for a real tokenizer without touching the driver.
//!
//! Known limitation: every parenthesis in the parameter list is treated as
//! structural. A parenthesis inside a string-literal default value therefore
//! truncates the matched header. Likewise, `return` inside a string or
//! comment is indistinguishable from a real return statement.

use regex::Regex;
use thiserror::Error;

/// The function whose bodies the purge tool removes.
pub const TARGET_FUNCTION: &str = "compute_rewards";

/// Error type for the stripper.
#[derive(Debug, Error)]
pub enum StripError {
    /// The target name could not be compiled into a header pattern.
    #[error("invalid target function pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A parameter list was opened but never closed.
    #[error("unterminated parameter list for `{name}` at byte {offset}")]
    UnterminatedParams { name: String, offset: usize },

    /// One occurrence's header lies inside another occurrence's extent.
    ///
    /// Nested or overlapping definitions would be silently mismatched by a
    /// textual approach, so they are rejected instead.
    #[error("nested `{name}` definitions at bytes {outer} and {inner}")]
    NestedOccurrence { name: String, outer: usize, inner: usize },
}

/// Convenience result type for stripper operations.
pub type StripResult<T> = Result<T, StripError>;

/// One located instance of the target function within a document.
///
/// Offsets are byte positions into the source text; captured slices borrow
/// from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence<'a> {
    /// Start of the occurrence: the decorator line when present, otherwise
    /// the header line.
    pub start: usize,
    /// End of the occurrence: just past the final return statement.
    pub end: usize,
    /// Decorator line preserved verbatim, without its trailing newline.
    pub decorator: Option<&'a str>,
    /// The `def` header, from line start through the trailing colon.
    pub header: &'a str,
    /// Discarded text between the header's colon and the final return line.
    pub body: &'a str,
    /// Final return statement, without leading indentation.
    pub ret: &'a str,
    /// Leading whitespace of the final return line.
    pub ret_indent: &'a str,
    /// End of the whole function region; scanning for the next occurrence
    /// resumes here.
    region_end: usize,
}

/// Result of stripping one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripped {
    /// The possibly-modified text.
    pub content: String,
    /// Whether `content` differs from the input.
    pub changed: bool,
}

/// Locates occurrences of one target function and rewrites them down to
/// signature plus final return.
#[derive(Debug)]
pub struct Stripper {
    name: String,
    needle: String,
    header_re: Regex,
    tail_re: Regex,
    return_re: Regex,
}

impl Stripper {
    /// Compile the patterns for `name`.
    pub fn new(name: &str) -> StripResult<Self> {
        let quoted = regex::escape(name);
        let header_re = Regex::new(&format!(r"(?m)^[ \t]*def[ \t]+{quoted}[ \t]*\("))?;
        // After the closing parenthesis: optional return-type annotation,
        // then the header's trailing colon.
        let tail_re = Regex::new(r"^\s*(?:->\s*[^:]+?)?\s*:")?;
        let return_re = Regex::new(r"(?m)^[ \t]*return\b[^\n]*")?;

        Ok(Self {
            name: name.to_string(),
            needle: format!("def {name}"),
            header_re,
            tail_re,
            return_re,
        })
    }

    /// Target function name this stripper was built for.
    pub fn target(&self) -> &str {
        &self.name
    }

    /// Fast rejection: does the text contain a definition of the target at
    /// all? Used by the driver before any backup is created.
    pub fn mentions_target(&self, source: &str) -> bool {
        source.contains(&self.needle)
    }

    /// Find the next occurrence starting at or after byte offset `from`.
    ///
    /// Candidate headers whose parameter list never closes by end of input
    /// are an error; candidates with no trailing colon or no return
    /// statement in their region are skipped.
    pub fn find_next<'a>(&self, source: &'a str, from: usize) -> StripResult<Option<Occurrence<'a>>> {
        let mut search_at = from;

        while let Some(m) = self.header_re.find_at(source, search_at) {
            let header_start = m.start();

            // The parameter list runs to the first closing parenthesis not
            // matched by a nested open.
            let mut depth = 1usize;
            let mut close = None;
            for (i, b) in source[m.end()..].bytes().enumerate() {
                match b {
                    b'(' => depth += 1,
                    b')' => {
                        depth -= 1;
                        if depth == 0 {
                            close = Some(m.end() + i);
                            break;
                        }
                    }
                    _ => {}
                }
            }
            let close = close.ok_or_else(|| StripError::UnterminatedParams {
                name: self.name.clone(),
                offset: header_start,
            })?;

            // Not a definition header after all (no trailing colon); keep
            // scanning behind it.
            let Some(tail) = self.tail_re.find(&source[close + 1..]) else {
                search_at = m.end();
                continue;
            };
            let colon_end = close + 1 + tail.end();

            let header_line = &source[header_start..m.end()];
            let def_indent = indent_width(header_line);

            // First line start after the line holding the colon.
            let colon_line_end = source[colon_end..]
                .find('\n')
                .map(|i| colon_end + i + 1)
                .unwrap_or(source.len());

            // The region ends at the next non-blank line indented at or
            // below the `def` line, or at end of input.
            let mut region_end = source.len();
            let mut pos = colon_line_end;
            while pos < source.len() {
                let line_end = source[pos..].find('\n').map(|i| pos + i).unwrap_or(source.len());
                let line = &source[pos..line_end];
                if !line.trim().is_empty() && indent_width(line) <= def_indent {
                    region_end = pos;
                    break;
                }
                pos = line_end + 1;
            }

            if let Some(inner) = self.header_re.find_at(source, colon_line_end) {
                if inner.start() < region_end {
                    return Err(StripError::NestedOccurrence {
                        name: self.name.clone(),
                        outer: header_start,
                        inner: inner.start(),
                    });
                }
            }

            // Last return statement inside the region wins.
            let region = &source[colon_line_end..region_end];
            let mut last = None;
            for ret in self.return_re.find_iter(region) {
                last = Some(ret);
            }
            let Some(ret) = last else {
                search_at = region_end;
                continue;
            };

            let ret_start = colon_line_end + ret.start();
            let ret_end = colon_line_end + ret.end();
            let ret_line = &source[ret_start..ret_end];
            let ret_stmt = ret_line.trim_start_matches(|c| c == ' ' || c == '\t');
            let ret_indent = &ret_line[..ret_line.len() - ret_stmt.len()];

            let (start, decorator) = match decorator_before(source, header_start) {
                Some((dec_start, dec)) => (dec_start, Some(dec)),
                None => (header_start, None),
            };

            return Ok(Some(Occurrence {
                start,
                end: ret_end,
                decorator,
                header: &source[header_start..colon_end],
                body: &source[colon_end..ret_start],
                ret: ret_stmt,
                ret_indent,
                region_end,
            }));
        }

        Ok(None)
    }

    /// Reduce every occurrence of the target function to its declaration, a
    /// placeholder line, and its final return statement.
    ///
    /// All text outside the occurrences is preserved byte for byte, in
    /// original order. Occurrences are independent of each other.
    pub fn strip(&self, source: &str) -> StripResult<Stripped> {
        if !self.mentions_target(source) {
            return Ok(Stripped { content: source.to_string(), changed: false });
        }

        let mut out = String::with_capacity(source.len());
        let mut copied = 0;
        let mut from = 0;

        while let Some(occ) = self.find_next(source, from)? {
            out.push_str(&source[copied..occ.start]);
            if let Some(decorator) = occ.decorator {
                out.push_str(decorator);
                out.push('\n');
            }
            out.push_str(occ.header);
            out.push('\n');
            out.push_str(occ.ret_indent);
            out.push('\n');
            out.push_str(occ.ret_indent);
            out.push_str(occ.ret);

            copied = occ.end;
            from = occ.region_end;
        }
        out.push_str(&source[copied..]);

        let changed = out != source;
        Ok(Stripped { content: out, changed })
    }
}

/// Width in bytes of a line's leading blank space.
fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start_matches(|c| c == ' ' || c == '\t').len()
}

/// The single line immediately above `header_start`, if it is a decorator.
fn decorator_before(source: &str, header_start: usize) -> Option<(usize, &str)> {
    if header_start == 0 {
        return None;
    }
    let before = &source[..header_start - 1];
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line = &source[line_start..header_start - 1];
    if line.trim_start().starts_with('@') {
        Some((line_start, line))
    } else {
        None
    }
}
