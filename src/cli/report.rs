// ============================================================
// Layer 1 — Report Formatting
// ============================================================
// Turns label lists into the two styles the tutorial prints:
//
//   array style: ['positive' 'negative']    (space separated)
//   list style:  ['positive', 'negative']   (comma separated)
//
// The tree's predictions come back as an array, the keyword
// rules' as a plain list, so both styles are kept.
//
// Arrays wrap the way numpy prints them: a line never runs past
// ARRAY_LINE_WIDTH, and continuation lines start with one space
// so they line up under the opening bracket.

use crate::domain::label::Label;

pub const PREDICTIONS_HEADER: &str = "These are the classifier predictions: ";

/// numpy's default `linewidth`
pub const ARRAY_LINE_WIDTH: usize = 75;

pub fn array_style(labels: &[Label]) -> String {
    // Room left for the element once the closing bracket is reserved
    let elem_width = ARRAY_LINE_WIDTH - 1;
    let indent     = " ";

    let mut out  = String::new();
    let mut line = String::from(indent);
    let words    = quoted(labels);

    for (i, word) in words.iter().enumerate() {
        let wraps = line.len() + word.len() > elem_width && line.len() > indent.len();
        if wraps {
            out.push_str(line.trim_end());
            out.push('\n');
            line = String::from(indent);
        }
        line.push_str(word);
        if i + 1 < words.len() {
            line.push(' ');
        }
    }
    out.push_str(&line);

    format!("[{}]", &out[indent.len()..])
}

pub fn list_style(labels: &[Label]) -> String {
    format!("[{}]", quoted(labels).join(", "))
}

/// The header line followed by the labels on the next line.
pub fn predictions_report(formatted: &str) -> String {
    format!("{PREDICTIONS_HEADER}\n {formatted}")
}

fn quoted(labels: &[Label]) -> Vec<String> {
    labels.iter().map(|l| format!("'{l}'")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::label::Label::{Negative as N, Positive as P};

    #[test]
    fn test_array_and_list_styles() {
        assert_eq!(array_style(&[P, N]), "['positive' 'negative']");
        assert_eq!(list_style(&[P, N]),  "['positive', 'negative']");
        assert_eq!(list_style(&[]),      "[]");
        assert_eq!(array_style(&[]),     "[]");
    }

    #[test]
    fn test_array_wraps_at_numpy_line_width() {
        // Six labels fit on one line
        let six = array_style(&[P, P, N, P, N, P]);
        assert!(!six.contains('\n'));
        assert_eq!(six, "['positive' 'positive' 'negative' 'positive' 'negative' 'positive']");

        // The seventh would pass 75 characters, so it moves down
        let seven = array_style(&[P, P, N, P, N, P, N]);
        assert_eq!(
            seven,
            "['positive' 'positive' 'negative' 'positive' 'negative' 'positive'\n 'negative']"
        );
        assert!(seven.lines().all(|l| l.len() <= ARRAY_LINE_WIDTH));
    }

    #[test]
    fn test_report_layout() {
        assert_eq!(
            predictions_report("[]"),
            "These are the classifier predictions: \n []"
        );
    }
}
