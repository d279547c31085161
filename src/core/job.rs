use crate::domain::model::PlacedEntry;

/// RIP 工作描述的外層設定
#[derive(Debug, Clone, PartialEq)]
pub struct JobEnvelope {
    pub print_unit: String,
    pub delete_after_print: bool,
}

/// 產生送給 RIP 控制器的 XML。每張圖一個 `<Page>`，順序與排版順序相同。
pub fn render_job(envelope: &JobEnvelope, placed: &[PlacedEntry]) -> String {
    let mut lines = Vec::with_capacity(placed.len() + 3);
    lines.push(r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string());
    lines.push(format!(
        r#"<Job PrintUnit="{}">"#,
        escape_attr(&envelope.print_unit)
    ));

    for entry in placed {
        lines.push(format!(
            r#"  <Page X="{:.3}" Y="{:.3}" FileName="{}" DeleteAfterPrint="{}"/>"#,
            entry.x,
            entry.y,
            escape_attr(&entry.artifact.to_string()),
            envelope.delete_after_print
        ));
    }

    lines.push("</Job>".to_string());
    lines.join("\n")
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ArtifactRef, SizeClass};

    fn placed(path: &str, x: f64, y: f64) -> PlacedEntry {
        PlacedEntry {
            artifact: ArtifactRef::new(path),
            size_class: SizeClass::S3xl,
            x,
            y,
            width: 11.0,
            height: 5.0,
        }
    }

    #[test]
    fn test_render_job_pages_in_order() {
        let envelope = JobEnvelope {
            print_unit: "DTG-2".to_string(),
            delete_after_print: true,
        };
        let xml = render_job(
            &envelope,
            &[placed("/art/HD-FOX-S-3XL.png", 0.0, 0.0), placed("/art/TS-OWL-S-3XL.png", 11.25, 0.0)],
        );

        let expected = [
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<Job PrintUnit="DTG-2">"#,
            r#"  <Page X="0.000" Y="0.000" FileName="/art/HD-FOX-S-3XL.png" DeleteAfterPrint="true"/>"#,
            r#"  <Page X="11.250" Y="0.000" FileName="/art/TS-OWL-S-3XL.png" DeleteAfterPrint="true"/>"#,
            "</Job>",
        ]
        .join("\n");
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_render_empty_job() {
        let envelope = JobEnvelope {
            print_unit: "1".to_string(),
            delete_after_print: false,
        };
        let xml = render_job(&envelope, &[]);
        assert!(xml.ends_with("<Job PrintUnit=\"1\">\n</Job>"));
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let envelope = JobEnvelope {
            print_unit: "A&B".to_string(),
            delete_after_print: false,
        };
        let xml = render_job(&envelope, &[placed("/art/\"odd\" <name>.png", 0.0, 0.0)]);
        assert!(xml.contains(r#"PrintUnit="A&amp;B""#));
        assert!(xml.contains(r#"FileName="/art/&quot;odd&quot; &lt;name&gt;.png""#));
        assert!(xml.contains(r#"DeleteAfterPrint="false""#));
    }
}
