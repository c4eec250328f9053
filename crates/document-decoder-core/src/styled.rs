//! Styled text
//!
//! An ordered list of runs plus the post-processing applied to a finished
//! rendering.

use std::fmt;

use crate::run::Run;

/// Ordered runs of attributed text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    runs: Vec<Run>,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_runs(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn runs_mut(&mut self) -> &mut [Run] {
        &mut self.runs
    }

    pub fn into_runs(self) -> Vec<Run> {
        self.runs
    }

    pub fn push(&mut self, run: Run) {
        self.runs.push(run);
    }

    pub fn append(&mut self, other: StyledText) {
        self.runs.extend(other.runs);
    }

    /// Check if the text has no characters (runs may still exist)
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.text.is_empty())
    }

    /// Check if the last character is `c`
    pub fn ends_with(&self, c: char) -> bool {
        self.runs
            .iter()
            .rev()
            .find(|run| !run.text.is_empty())
            .is_some_and(|run| run.text.ends_with(c))
    }

    /// Concatenated text of all runs
    pub fn plain_text(&self) -> String {
        let len = self.runs.iter().map(|run| run.text.len()).sum();
        let mut text = String::with_capacity(len);
        for run in &self.runs {
            text.push_str(&run.text);
        }
        text
    }

    /// Strip leading and trailing newlines, dropping runs left empty.
    pub fn trim_newlines(&mut self) {
        let mut leading = 0;
        for run in &mut self.runs {
            let trimmed = run.text.len() - run.text.trim_start_matches('\n').len();
            run.text.drain(..trimmed);
            if !run.text.is_empty() {
                break;
            }
            leading += 1;
        }
        self.runs.drain(..leading);

        while let Some(last) = self.runs.last_mut() {
            let keep = last.text.trim_end_matches('\n').len();
            if keep > 0 {
                last.text.truncate(keep);
                break;
            }
            self.runs.pop();
        }
    }

    /// Merge adjacent runs that carry equal attribute sets
    pub fn coalesced(self) -> Self {
        let mut runs: Vec<Run> = Vec::with_capacity(self.runs.len());

        for run in self.runs {
            if run.text.is_empty() {
                continue;
            }
            match runs.last_mut() {
                Some(prev) if prev.attributes == run.attributes => prev.text.push_str(&run.text),
                _ => runs.push(run),
            }
        }

        Self { runs }
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for run in &self.runs {
            f.write_str(&run.text)?;
        }
        Ok(())
    }
}

impl From<Vec<Run>> for StyledText {
    fn from(runs: Vec<Run>) -> Self {
        Self::from_runs(runs)
    }
}

impl FromIterator<Run> for StyledText {
    fn from_iter<I: IntoIterator<Item = Run>>(iter: I) -> Self {
        Self::from_runs(iter.into_iter().collect())
    }
}

impl IntoIterator for StyledText {
    type Item = Run;
    type IntoIter = std::vec::IntoIter<Run>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.into_iter()
    }
}
