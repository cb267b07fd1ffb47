//! Paragraph line-wrapping and justification
//!
//! Wrapping is a greedy fill against a caller-supplied measurement
//! function: the next word joins the current line if the joined
//! candidate still fits that line's budget. The first line may carry a
//! different budget than continuation lines (to reserve an indent).
//! Justification then spreads each non-final line's slack evenly across
//! its inter-word gaps; the final line and single-word lines stay
//! left-aligned.

/// One wrapped line, words still separate so justification can place
/// them individually.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub words: Vec<String>,
    /// Final line of its paragraph; never justified.
    pub is_last: bool,
}

impl WrappedLine {
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

/// A word and its x offset from the line start.
#[derive(Debug, Clone, PartialEq)]
pub struct WordPlacement {
    pub x: f64,
    pub text: String,
}

/// Greedily wrap `text` into lines whose measured width stays within
/// budget. A single word wider than the budget still gets a line of its
/// own; there is no hyphenation.
pub fn wrap_words<F>(text: &str, measure: &F, first_budget: f64, cont_budget: f64) -> Vec<WrappedLine>
where
    F: Fn(&str) -> f64,
{
    let mut lines: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut budget = first_budget;

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push(word.to_string());
            continue;
        }
        let candidate = format!("{} {}", current.join(" "), word);
        if measure(&candidate) <= budget {
            current.push(word.to_string());
        } else {
            lines.push(std::mem::take(&mut current));
            current.push(word.to_string());
            budget = cont_budget;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    let count = lines.len();
    lines
        .into_iter()
        .enumerate()
        .map(|(i, words)| WrappedLine {
            words,
            is_last: i + 1 == count,
        })
        .collect()
}

/// Place a line's words for drawing. Justified lines get their slack
/// (budget minus summed word widths) distributed equally over the gaps;
/// a line with no gaps cannot be justified and is emitted as-is.
pub fn place_words<F>(line: &WrappedLine, budget: f64, measure: &F) -> Vec<WordPlacement>
where
    F: Fn(&str) -> f64,
{
    if line.is_last || line.words.len() < 2 {
        return vec![WordPlacement {
            x: 0.0,
            text: line.text(),
        }];
    }

    let words_width: f64 = line.words.iter().map(|w| measure(w)).sum();
    let gaps = (line.words.len() - 1) as f64;
    let extra_per_gap = (budget - words_width) / gaps;

    let mut x = 0.0;
    line.words
        .iter()
        .map(|word| {
            let placement = WordPlacement {
                x,
                text: word.clone(),
            };
            x += measure(word) + extra_per_gap;
            placement
        })
        .collect()
}
