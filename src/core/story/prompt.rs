/// Prompt sent to the language model; `{user_input}` is replaced with the
/// child's transcribed answer.
pub const JUDGE_TEMPLATE: &str = r#"
You are the Story Engine for a children's interactive story about The Honest Woodcutter.
The current situation: The Goddess asked "Is this Golden Axe yours?" and we asked the child "What should Tim say?".

The child said: "{user_input}"

Task:
1. If the child implies "No", "It's not mine", "Tell the truth":
   - Output a VERY HAPPY, WARM response.
   - Say: "Wonderful! You are so honest! The Goddess smiled brightly. Because Tim told the truth, she gave him the Golden Axe AND his old iron axe as a reward! Honesty always wins!"
   - End with "The End."

2. If the child implies "Yes", "Take it", "Lie":
   - Output a GENTLE lesson.
   - Say: "Oh no... The Goddess knew that was a lie. Her face turned sad and she disappeared into the water. Tim went home with nothing. Remember, we must always tell the truth."
   - End with "The End."

3. If the input is unrelated/gibberish:
   - Say: "I didn't quite catch that. But remember, honesty is magic! Let's try the story again later."
   - End with "The End."

Constraints:
- Keep the response simple and child-friendly.
"#;

/// Substitute the utterance into the judge template.
///
/// Double quotes in the utterance are swapped for single quotes so the
/// quoted `The child said: "..."` line stays balanced.
pub fn render_judge_prompt(user_input: &str) -> String {
    let sanitized = user_input.replace('"', "'");
    JUDGE_TEMPLATE.replace("{user_input}", sanitized.trim())
}
