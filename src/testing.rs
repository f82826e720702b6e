//! Test doubles shared by unit and integration tests.

use std::collections::VecDeque;

use crate::ui::{Notice, PanelUi};

/// A [`PanelUi`] that answers prompts from a script and records what it was shown.
///
/// Once the script runs out every prompt is declined.
#[derive(Debug, Default)]
pub struct ScriptedUi {
    pub answers: VecDeque<Option<String>>,
    pub prompts: Vec<String>,
    pub notices: Vec<Notice>,
}

impl ScriptedUi {
    pub fn answering<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| a.map(Into::into)).collect(),
            ..Self::default()
        }
    }

    /// Everything reported as [`Notice::Error`].
    pub fn errors(&self) -> Vec<&crate::error::PanelError> {
        self.notices
            .iter()
            .filter_map(|notice| match notice {
                Notice::Error(error) => Some(error),
                _ => None,
            })
            .collect()
    }
}

impl PanelUi for ScriptedUi {
    fn prompt(&mut self, question: &str) -> Option<String> {
        self.prompts.push(question.to_string());
        self.answers.pop_front().flatten()
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
