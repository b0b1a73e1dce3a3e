/// Minimal PDF generator for text content only (Helvetica, single page).
/// Mirrors the dashboard's snapshot export: sanitize to printable ASCII,
/// wrap at 90 columns, one text object, hand-built xref.
pub fn build_simple_pdf(lines: &[String]) -> String {
    let content_lines: Vec<String> = lines.iter().flat_map(|line| wrap_text(line, 90)).collect();

    let mut content = Vec::new();
    content.push("BT".to_owned());
    content.push("/F1 12 Tf".to_owned());
    content.push("14 TL".to_owned());
    content.push("72 760 Td".to_owned());
    for (idx, line) in content_lines.iter().enumerate() {
        let text = if line.is_empty() { " " } else { line.as_str() };
        content.push(format!("({}) Tj", escape_text(text)));
        if idx < content_lines.len() - 1 {
            content.push("T*".to_owned());
        }
    }
    content.push("ET".to_owned());
    let content_stream = content.join("\n");

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::new();
    let mut add_object = |pdf: &mut String, obj: String| {
        offsets.push(pdf.len());
        pdf.push_str(&obj);
        pdf.push('\n');
    };

    add_object(&mut pdf, "1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj".to_owned());
    add_object(&mut pdf, "2 0 obj << /Type /Pages /Kids [3 0 R] /Count 1 >> endobj".to_owned());
    add_object(
        &mut pdf,
        "3 0 obj << /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >> endobj"
            .to_owned(),
    );
    add_object(
        &mut pdf,
        format!(
            "4 0 obj << /Length {} >> stream\n{}\nendstream endobj",
            content_stream.len(),
            content_stream
        ),
    );
    add_object(
        &mut pdf,
        "5 0 obj << /Type /Font /Subtype /Type1 /BaseFont /Helvetica >> endobj".to_owned(),
    );

    let xref_offset = pdf.len();
    pdf.push_str("xref\n");
    pdf.push_str(&format!("0 {}\n", offsets.len() + 1));
    pdf.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        pdf.push_str(&format!("{:010} 00000 n \n", offset));
    }
    pdf.push_str(&format!(
        "trailer << /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF",
        offsets.len() + 1,
        xref_offset
    ));

    pdf
}

fn sanitize(text: &str) -> String {
    text.chars()
        .map(|ch| if (' '..='~').contains(&ch) { ch } else { '?' })
        .collect()
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '(' | ')' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn wrap_text(text: &str, max: usize) -> Vec<String> {
    let sanitized = sanitize(text);
    let mut wrapped = Vec::new();
    let mut line = String::new();
    for word in sanitized.split(' ') {
        if line.len() + word.len() > max {
            wrapped.push(line.trim_end().to_owned());
            line.clear();
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        wrapped.push(line);
    }
    if wrapped.is_empty() {
        wrapped.push(String::new());
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_has_header_xref_and_trailer() {
        let pdf = build_simple_pdf(&["Sachio Operations Dashboard".to_owned()]);
        assert!(pdf.starts_with("%PDF-1.4\n"));
        assert!(pdf.contains("stream\nBT\n/F1 12 Tf"));
        assert!(pdf.contains("(Sachio Operations Dashboard) Tj"));
        assert!(pdf.contains("xref\n0 6\n0000000000 65535 f \n"));
        assert!(pdf.ends_with("%%EOF"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let pdf = build_simple_pdf(&["line".to_owned()]);
        let xref_start = pdf.find("xref\n").unwrap();
        let table = &pdf[xref_start..];
        for entry in table.lines().skip(3).take(4) {
            let offset: usize = entry[..10].parse().unwrap();
            let tail = &pdf[offset..];
            assert!(tail.starts_with(char::is_numeric), "offset {offset} not at an object");
        }
    }

    #[test]
    fn parentheses_and_backslashes_are_escaped() {
        let pdf = build_simple_pdf(&["Revenue (MTD): NGN 1,000".to_owned()]);
        assert!(pdf.contains("(Revenue \\(MTD\\): NGN 1,000) Tj"));
    }

    #[test]
    fn non_ascii_collapses_to_question_marks() {
        let pdf = build_simple_pdf(&["na\u{ef}ra \u{20a6}600".to_owned()]);
        assert!(pdf.contains("(na?ra ?600) Tj"));
    }

    #[test]
    fn long_lines_wrap_into_multiple_text_ops() {
        let line = "word ".repeat(40).trim_end().to_owned();
        let pdf = build_simple_pdf(&[line]);
        let tj_count = pdf.matches(") Tj").count();
        assert!(tj_count >= 3, "expected wrapped output, got {tj_count} ops");
        assert!(pdf.contains("T*"));
    }

    #[test]
    fn empty_input_still_renders_a_blank_page_line() {
        let pdf = build_simple_pdf(&[String::new()]);
        assert!(pdf.contains("( ) Tj"));
    }
}
