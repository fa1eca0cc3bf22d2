//! Layout of member bodies.
//!
//! Bodies are plain text. Text starting with whitespace or a `#` directive
//! becomes a braced block, anything else an expression body, and empty
//! text renders as `{ }`.

use crate::builder::CodeBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyStyle {
    Empty,
    Block,
    Expression,
}

pub(crate) fn body_style(body: &str) -> BodyStyle {
    match body.chars().next() {
        None => BodyStyle::Empty,
        Some(c) if c.is_whitespace() || c == '#' => BodyStyle::Block,
        Some(_) => BodyStyle::Expression,
    }
}

/// Emit `header` followed by the body.
pub(crate) fn emit_body(out: &mut CodeBuilder, header: &str, body: &str) {
    match body_style(body) {
        BodyStyle::Empty => {
            out.push_line(&format!("{} {{ }}", header));
        }
        BodyStyle::Block => {
            out.push_line(header).push_line("{").push_indent();
            for line in dedent(body) {
                out.push_line(&line);
            }
            out.push_dedent().push_line("}");
        }
        BodyStyle::Expression => emit_expression(out, &format!("{} =>", header), body),
    }
}

/// Emit `prefix expression;`, continuing extra lines one level deeper.
pub(crate) fn emit_expression(out: &mut CodeBuilder, prefix: &str, expression: &str) {
    let expression = expression.trim_end();
    let expression = expression.strip_suffix(';').unwrap_or(expression);
    let (first, rest) = match expression.split_once('\n') {
        Some((first, rest)) => (first.trim_end(), dedent(rest)),
        None => (expression, Vec::new()),
    };

    if rest.is_empty() {
        out.push_line(&format!("{} {};", prefix, first));
        return;
    }

    out.push_line(&format!("{} {}", prefix, first)).push_indent();
    let last = rest.len() - 1;
    for (index, line) in rest.iter().enumerate() {
        if index == last {
            out.push_line(&format!("{};", line));
        } else {
            out.push_line(line);
        }
    }
    out.push_dedent();
}

/// Strip the common indentation and surrounding blank lines.
fn dedent(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let start = lines.iter().position(|line| !line.is_empty());
    let end = lines.iter().rposition(|line| !line.is_empty());
    let (Some(start), Some(end)) = (start, end) else {
        return Vec::new();
    };
    let lines = &lines[start..=end];

    let common = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| line.chars().skip(common).collect())
        .collect()
}
