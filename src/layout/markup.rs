//! The one piece of inline styling debtor documents use: `<b>bold</b>` spans.

/// A stretch of text drawn in a single weight
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Run<'a> {
    pub text: &'a str,
    pub bold: bool,
}

const OPEN: &str = "<b>";
const CLOSE: &str = "</b>";

/// Split markup into runs. An unclosed `<b>` stays bold until the end of the text,
/// a stray `</b>` is dropped, and empty runs are skipped.
pub fn parse_markup(markup: &str) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    let mut rest = markup;
    let mut bold = false;

    while !rest.is_empty() {
        let next_open = rest.find(OPEN);
        let next_close = rest.find(CLOSE);
        let (end, tag_len, next_bold) = match (next_open, next_close) {
            (Some(open), Some(close)) if open < close => (open, OPEN.len(), true),
            (_, Some(close)) => (close, CLOSE.len(), false),
            (Some(open), None) => (open, OPEN.len(), true),
            (None, None) => (rest.len(), 0, bold),
        };

        if end > 0 {
            runs.push(Run {
                text: &rest[..end],
                bold,
            });
        }
        bold = next_bold;
        rest = &rest[end + tag_len..];
    }

    runs
}

/// The text with all bold tags removed
pub fn strip_markup(markup: &str) -> String {
    parse_markup(markup).into_iter().map(|run| run.text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_bold_spans() {
        assert_eq!(
            parse_markup("Total <b>125,00</b> DKK"),
            vec![
                Run {
                    text: "Total ",
                    bold: false
                },
                Run {
                    text: "125,00",
                    bold: true
                },
                Run {
                    text: " DKK",
                    bold: false
                },
            ]
        );
    }

    #[test]
    fn plain_text_is_one_run() {
        assert_eq!(
            parse_markup("Varenr."),
            vec![Run {
                text: "Varenr.",
                bold: false
            }]
        );
        assert!(parse_markup("").is_empty());
        assert!(parse_markup("<b></b>").is_empty());
    }

    #[test]
    fn unbalanced_tags_degrade_gracefully() {
        assert_eq!(
            parse_markup("<b>Intraface"),
            vec![Run {
                text: "Intraface",
                bold: true
            }]
        );
        assert_eq!(strip_markup("a</b>b"), "ab");
    }
}
