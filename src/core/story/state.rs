use tracing::{debug, info};

use super::judge::StoryJudge;
use super::outcome::{FINISHED_TEXT, INTRO_TEXT, NarrativeOutcome};
use crate::core::llm::LLMError;
use crate::core::stt::TRANSCRIPT_SENTINEL;

/// Position in the story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoryStep {
    /// Zippy has not told the story yet
    #[default]
    Intro,
    /// The question was asked; the next utterance is judged
    AwaitingJudgment,
    /// Terminal until restart
    Finished,
}

impl StoryStep {
    /// Numeric step counter (0, 1, 2).
    pub fn index(self) -> u8 {
        match self {
            Self::Intro => 0,
            Self::AwaitingJudgment => 1,
            Self::Finished => 2,
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Intro => Self::AwaitingJudgment,
            Self::AwaitingJudgment | Self::Finished => Self::Finished,
        }
    }
}

impl From<u8> for StoryStep {
    /// Anything past 2 is still finished.
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Intro,
            1 => Self::AwaitingJudgment,
            _ => Self::Finished,
        }
    }
}

/// One response produced by the story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub text: &'static str,
    pub is_finished: bool,
    /// Set only on the judged turn
    pub outcome: Option<NarrativeOutcome>,
}

/// Conversation state for one listener.
#[derive(Debug, Clone, Default)]
pub struct StoryState {
    step: StoryStep,
}

impl StoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> StoryStep {
        self.step
    }

    pub fn is_finished(&self) -> bool {
        self.step == StoryStep::Finished
    }

    /// Back to the intro, whatever the current step.
    pub fn restart(&mut self) {
        debug!("Story restarted from step {}", self.step.index());
        self.step = StoryStep::Intro;
    }

    /// Produce the next response and move the story forward.
    ///
    /// Only `AwaitingJudgment` consults the judge; an absent utterance is
    /// judged as the `"..."` sentinel. When the judge fails the step is left
    /// unchanged so the same turn can be retried.
    pub async fn advance(
        &mut self,
        utterance: Option<&str>,
        judge: &dyn StoryJudge,
    ) -> Result<Turn, LLMError> {
        let turn = match self.step {
            StoryStep::Intro => Turn {
                text: INTRO_TEXT,
                is_finished: false,
                outcome: None,
            },
            StoryStep::AwaitingJudgment => {
                let utterance = utterance.unwrap_or(TRANSCRIPT_SENTINEL);
                let outcome = judge.judge(utterance).await?;
                info!("Answer judged {} by {} judge", outcome, judge.name());
                Turn {
                    text: outcome.text(),
                    is_finished: true,
                    outcome: Some(outcome),
                }
            }
            StoryStep::Finished => Turn {
                text: FINISHED_TEXT,
                is_finished: true,
                outcome: None,
            },
        };

        self.step = self.step.next();
        Ok(turn)
    }
}
