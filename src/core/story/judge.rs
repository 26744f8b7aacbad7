use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, info};

use super::outcome::NarrativeOutcome;
use super::prompt::render_judge_prompt;
use crate::core::llm::{BaseLLM, LLMError};

/// Decides how the child's answer to the Goddess is judged.
#[async_trait]
pub trait StoryJudge: Send + Sync {
    async fn judge(&self, utterance: &str) -> Result<NarrativeOutcome, LLMError>;

    fn name(&self) -> &'static str;
}

/// Judge backed by a chat-completion model.
///
/// One outbound call per judgement, no retries. The reply is normalised
/// with [`NarrativeOutcome::from_model_reply`].
pub struct LlmJudge {
    llm: Arc<dyn BaseLLM>,
}

impl LlmJudge {
    pub fn new(llm: Arc<dyn BaseLLM>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl StoryJudge for LlmJudge {
    async fn judge(&self, utterance: &str) -> Result<NarrativeOutcome, LLMError> {
        let prompt = render_judge_prompt(utterance);
        info!("Judging answer with {}: {:?}", self.llm.model_name(), utterance);

        let reply = self.llm.complete(&prompt).await?;
        let outcome = NarrativeOutcome::from_model_reply(&reply);
        debug!("Model reply {:?} judged as {}", reply, outcome);

        Ok(outcome)
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}

// Negation tied to the axe, truth-telling, or a leading "no". Checked first
// so "no, it's not mine" wins over the bare "mine".
static HONEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\W*(no|nope|nah)\b|\b(not|isn'?t|wasn'?t|ain'?t|never) (mine|my|his|ours|the (gold|golden|shiny) one|gold|golden)\b|\btell(ing)? the truth\b|\b(be|being|am|was) honest\b|\bdon'?t (lie|take|keep)\b|\b(my|the) (old |own )?iron (one|axe)\b|\bold axe\b|\bgive it back\b",
    )
    .expect("honest pattern is valid")
});

// Affirmation or claiming the axe. "sure" and "ok" only count as the opening
// word so "I'm not sure" stays unrecognized.
static DISHONEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\W*(sure|ok|okay)\b|\b(yes|yeah|yep|yup|take|keep|grab|lie|lying|fib|mine|gold|golden)\b",
    )
    .expect("dishonest pattern is valid")
});

/// Offline rule-based judge.
///
/// Same decision policy as the model prompt: negation or truth-telling is
/// honest, affirmation or deception is dishonest, anything else (including
/// the `"..."` sentinel) is unrecognized.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordJudge;

impl KeywordJudge {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(utterance: &str) -> NarrativeOutcome {
        if HONEST.is_match(utterance) {
            NarrativeOutcome::Honest
        } else if DISHONEST.is_match(utterance) {
            NarrativeOutcome::Dishonest
        } else {
            NarrativeOutcome::Unrecognized
        }
    }
}

#[async_trait]
impl StoryJudge for KeywordJudge {
    async fn judge(&self, utterance: &str) -> Result<NarrativeOutcome, LLMError> {
        let outcome = Self::classify(utterance);
        debug!("Keyword judge: {:?} -> {}", utterance, outcome);
        Ok(outcome)
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_keyword_honest() {
        for said in [
            "No",
            "No, it's not mine",
            "It isn't his",
            "Tell the truth",
            "He should be honest",
            "I want the iron one",
            "don't lie",
            "Nope, that's not my axe",
            "yes I'm not lying, it's not mine",
        ] {
            assert_eq!(KeywordJudge::classify(said), NarrativeOutcome::Honest, "{said}");
        }
    }

    #[test]
    fn test_keyword_dishonest() {
        for said in [
            "Yes",
            "yes it's mine",
            "Take it!",
            "keep the golden axe",
            "lie",
            "Yes, it's true, it's mine",
            "yes I'm not lying it's mine",
            "Sure, give me the gold",
        ] {
            assert_eq!(
                KeywordJudge::classify(said),
                NarrativeOutcome::Dishonest,
                "{said}"
            );
        }
    }

    #[test]
    fn test_keyword_unrecognized() {
        for said in [
            "...",
            "",
            "   ",
            "banana pancakes",
            "I know a dinosaur",
            "I'm not sure",
            "that's true",
            "the iron is hot",
        ] {
            assert_eq!(
                KeywordJudge::classify(said),
                NarrativeOutcome::Unrecognized,
                "{said}"
            );
        }
    }

    struct ScriptedLlm {
        reply: Result<String, LLMError>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl BaseLLM for ScriptedLlm {
        async fn complete(&self, prompt: &str) -> Result<String, LLMError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone()
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn test_llm_judge_renders_prompt_and_normalises() {
        let llm = Arc::new(ScriptedLlm {
            reply: Ok("Oh no... The Goddess knew that was a lie.".to_string()),
            prompts: Mutex::new(Vec::new()),
        });
        let judge = LlmJudge::new(llm.clone());

        let outcome = judge.judge("yes take it").await.unwrap();
        assert_eq!(outcome, NarrativeOutcome::Dishonest);

        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(r#"The child said: "yes take it""#));
    }

    #[tokio::test]
    async fn test_llm_judge_propagates_transport_error() {
        let llm = Arc::new(ScriptedLlm {
            reply: Err(LLMError::NetworkError("down".to_string())),
            prompts: Mutex::new(Vec::new()),
        });
        let judge = LlmJudge::new(llm);

        let err = judge.judge("no").await.unwrap_err();
        assert_eq!(err, LLMError::NetworkError("down".to_string()));
    }
}
