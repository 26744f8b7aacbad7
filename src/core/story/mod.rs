//! The Honest Woodcutter story.
//!
//! A three-step conversation: Zippy tells the story and asks what Tim should
//! say, the child answers once and is judged, and the story ends.

mod judge;
mod outcome;
mod prompt;
mod state;

pub use judge::{KeywordJudge, LlmJudge, StoryJudge};
pub use outcome::{FINISHED_TEXT, INTRO_TEXT, NarrativeOutcome};
pub use prompt::{JUDGE_TEMPLATE, render_judge_prompt};
pub use state::{StoryState, StoryStep, Turn};
