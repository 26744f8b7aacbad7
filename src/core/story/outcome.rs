use serde::Serialize;

pub const INTRO_TEXT: &str = "Hi! I am Zippy. Once, a woodcutter named Tim lived in a village. He was very honest. One day he dropped his iron axe into the river... Splash! Suddenly, a River Goddess appeared! She held up a Shiny Golden Axe and asked... Is this Golden Axe yours? ... What should Tim say?";

pub const FINISHED_TEXT: &str = "The story is over. Refresh to play again!";

const HONEST_TEXT: &str = "Wonderful! You are so honest! The Goddess smiled brightly. Because Tim told the truth, she gave him the Golden Axe AND his old iron axe as a reward! Honesty always wins! The End.";

const DISHONEST_TEXT: &str = "Oh no... The Goddess knew that was a lie. Her face turned sad and she disappeared into the water. Tim went home with nothing. Remember, we must always tell the truth. The End.";

const UNRECOGNIZED_TEXT: &str = "I didn't quite catch that. But remember, honesty is magic! Let's try the story again later. The End.";

/// How the child's answer was judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeOutcome {
    Honest,
    Dishonest,
    Unrecognized,
}

impl NarrativeOutcome {
    /// Closing line spoken for this outcome. Always ends with "The End."
    pub fn text(self) -> &'static str {
        match self {
            Self::Honest => HONEST_TEXT,
            Self::Dishonest => DISHONEST_TEXT,
            Self::Unrecognized => UNRECOGNIZED_TEXT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Honest => "honest",
            Self::Dishonest => "dishonest",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Map free-form model output back onto an outcome.
    ///
    /// The model is asked to reply with one of three fixed openings; the
    /// reply is matched on those openings (case-insensitive, anywhere in the
    /// text). Anything else is `Unrecognized`.
    pub fn from_model_reply(reply: &str) -> Self {
        let reply = reply.to_lowercase();

        if reply.contains("didn't quite catch") || reply.contains("did not quite catch") {
            return Self::Unrecognized;
        }
        if reply.contains("oh no") || reply.contains("knew that was a lie") {
            return Self::Dishonest;
        }
        if reply.contains("wonderful") || reply.contains("you are so honest") {
            return Self::Honest;
        }
        Self::Unrecognized
    }
}

impl std::fmt::Display for NarrativeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
