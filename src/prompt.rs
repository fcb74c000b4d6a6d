//! Rendering the next prompt from the previous command's outcome.

use crate::status::{ExecutionOutcome, ExitKind};

const PROMPT_DEFAULT: &str = "tinysh % ";
const EXIT_PREFIX: &str = "tinysh [exit:";
const SIGN_PREFIX: &str = "tinysh [sign:";
const STATUS_SUFFIX: &str = "] % ";

/// Upper bound on a rendered prompt, suffix included.
const PROMPT_MAX_LEN: usize = 128;

/// What the next prompt should say.
///
/// Owned by the main loop and replaced once per dispatched command;
/// `Initial` is only ever rendered before the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    Initial,
    AfterExit { code: i32, elapsed_ms: u64 },
    AfterSignal { signal: i32, elapsed_ms: u64 },
}

impl PromptState {
    /// The state the next prompt is rendered from once `outcome` is recorded.
    pub fn from_outcome(outcome: &ExecutionOutcome) -> Self {
        match outcome.kind {
            ExitKind::Exited(code) => PromptState::AfterExit {
                code,
                elapsed_ms: outcome.elapsed_ms,
            },
            ExitKind::Signaled(signal) => PromptState::AfterSignal {
                signal,
                elapsed_ms: outcome.elapsed_ms,
            },
        }
    }

    /// Renders the prompt text, clamped to [`PROMPT_MAX_LEN`] bytes.
    pub fn render(&self) -> String {
        self.render_clamped(PROMPT_MAX_LEN)
    }

    fn render_clamped(&self, max_len: usize) -> String {
        let prompt = match self {
            PromptState::Initial => return PROMPT_DEFAULT.to_string(),
            PromptState::AfterExit { code, elapsed_ms } => {
                format!("{}{}|{}ms{}", EXIT_PREFIX, code, elapsed_ms, STATUS_SUFFIX)
            }
            PromptState::AfterSignal { signal, elapsed_ms } => {
                format!("{}{}|{}ms{}", SIGN_PREFIX, signal, elapsed_ms, STATUS_SUFFIX)
            }
        };
        clamp(prompt, max_len)
    }
}

/// Cuts an over-long prompt so it still ends with the closing marker
/// rather than stopping mid-text.
fn clamp(prompt: String, max_len: usize) -> String {
    if prompt.len() <= max_len {
        return prompt;
    }
    let keep = max_len.saturating_sub(STATUS_SUFFIX.len());
    let mut cut: String = prompt.chars().take(keep).collect();
    cut.push_str(STATUS_SUFFIX);
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn initial_state_renders_the_default_prompt() {
        assert_eq!(PromptState::Initial.render(), "tinysh % ");
    }

    #[test]
    fn exit_state_embeds_code_and_duration() {
        let state = PromptState::AfterExit { code: 0, elapsed_ms: 12 };
        assert_eq!(state.render(), "tinysh [exit:0|12ms] % ");
    }

    #[test]
    fn signal_state_embeds_signal_and_duration() {
        let state = PromptState::AfterSignal { signal: 9, elapsed_ms: 5 };
        assert_eq!(state.render(), "tinysh [sign:9|5ms] % ");
    }

    #[test]
    fn outcome_kinds_map_to_their_states() {
        let started = Instant::now();
        let exited = ExecutionOutcome::new(ExitKind::Exited(7), started);
        assert!(matches!(
            PromptState::from_outcome(&exited),
            PromptState::AfterExit { code: 7, .. }
        ));

        let killed = ExecutionOutcome::new(ExitKind::Signaled(15), started);
        assert!(matches!(
            PromptState::from_outcome(&killed),
            PromptState::AfterSignal { signal: 15, .. }
        ));
    }

    #[test]
    fn overlong_prompt_is_cut_before_the_suffix() {
        let state = PromptState::AfterExit { code: 1234567, elapsed_ms: 98765432 };
        let rendered = state.render_clamped(24);
        assert_eq!(rendered.len(), 24);
        assert!(rendered.ends_with("] % "), "got: {}", rendered);
        assert!(rendered.starts_with("tinysh [exit:"), "got: {}", rendered);
    }

    #[test]
    fn short_prompt_is_untouched_by_the_bound() {
        let state = PromptState::AfterExit { code: 0, elapsed_ms: 1 };
        assert_eq!(state.render_clamped(128), state.render());
    }
}
