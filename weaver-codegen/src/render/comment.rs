//! XML documentation comments.

use quick_xml::escape::partial_escape;

use crate::builder::CodeBuilder;

/// Emit `text` as an XML doc comment.
///
/// The text is inspected before anything is written: a line break after
/// the first visible character makes it a multi-line `<summary>` block,
/// otherwise it stays on one line. Plain text has `&`, `<` and `>`
/// escaped. Text that already starts with an XML tag is written verbatim,
/// one `///` line per line.
pub(crate) fn emit_doc(out: &mut CodeBuilder, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }

    if text.starts_with('<') {
        for line in text.lines() {
            push_doc_line(out, line.trim());
        }
        return;
    }

    if !text.contains('\n') {
        out.push_line(&format!("/// <summary>{}</summary>", partial_escape(text)));
        return;
    }

    push_doc_line(out, "<summary>");
    for line in text.lines() {
        push_doc_line(out, &partial_escape(line.trim()));
    }
    push_doc_line(out, "</summary>");
}

fn push_doc_line(out: &mut CodeBuilder, line: &str) {
    if line.is_empty() {
        out.push_line("///");
    } else {
        out.push_line(&format!("/// {}", line));
    }
}
