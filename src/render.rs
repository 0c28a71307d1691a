//! Page templates for the two client variants. Rendering is pure; the
//! sanitizer runs inside the template so no raw answer text can reach the
//! HTML output.

/// Which template a handler renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStyle {
    /// Styled page for standard browsers.
    Full,
    /// Bare markup for feature phones.
    Legacy,
}

impl PageStyle {
    pub fn form_action(self) -> &'static str {
        match self {
            Self::Full => "/chat",
            Self::Legacy => "/legacy",
        }
    }
}

/// Escape angle brackets in model output before it is embedded in HTML.
/// Only `<` and `>` are rewritten; the answer is display text, not markup.
pub fn escape_model_output(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

/// Render the form page. The question goes back into the textarea so the
/// user keeps what they typed; the answer, when present, is sanitized and
/// appended below the form.
pub fn render_page(style: PageStyle, question: &str, answer: Option<&str>) -> String {
    let action = style.form_action();
    let reply = match (style, answer) {
        (_, None) => String::new(),
        (PageStyle::Full, Some(answer)) => {
            format!(
                "\n    <div class=\"reply\"><b>AI:</b> {}</div>",
                escape_model_output(answer)
            )
        }
        (PageStyle::Legacy, Some(answer)) => {
            format!("\n    <div><b>AI:</b> {}</div>", escape_model_output(answer))
        }
    };

    let head = match style {
        PageStyle::Full => concat!(
            "\n    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">",
            "\n    <title>Mini AI Chat</title>",
            "\n    <link rel=\"stylesheet\" href=\"/style.css\">",
        ),
        PageStyle::Legacy => "\n    <title>Mini AI Chat</title>",
    };

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>{head}
  </head>
  <body>
    <form method="POST" action="{action}">
      <textarea name="q" rows="2">{question}</textarea>
      <button type="submit">Send</button>
    </form>{reply}
  </body>
</html>
"#
    )
}

/// Error page: the failure description inside a plain paragraph.
pub fn render_error(message: &str) -> String {
    format!("<p>Error: {message}</p>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_angle_brackets_only() {
        assert_eq!(
            escape_model_output("<script>alert(\"x\") & more</script>"),
            "&lt;script&gt;alert(\"x\") & more&lt;/script&gt;"
        );
    }

    #[test]
    fn answer_markup_never_survives_rendering() {
        let page = render_page(PageStyle::Full, "q", Some("<script>evil()</script>"));
        assert!(page.contains("&lt;script&gt;evil()&lt;/script&gt;"));
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn question_is_kept_verbatim_in_textarea() {
        let page = render_page(PageStyle::Full, "what is rust?", Some("a language"));
        assert!(page.contains(">what is rust?</textarea>"));
    }

    #[test]
    fn empty_form_has_no_reply_block() {
        let page = render_page(PageStyle::Legacy, "", None);
        assert!(!page.contains("AI:"));
        assert!(page.contains(r#"action="/legacy""#));
    }

    #[test]
    fn legacy_page_skips_the_stylesheet() {
        let page = render_page(PageStyle::Legacy, "", None);
        assert!(!page.contains("style.css"));
        assert!(render_page(PageStyle::Full, "", None).contains("style.css"));
    }
}
