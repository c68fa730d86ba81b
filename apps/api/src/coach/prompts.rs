// Interview coach prompt templates.
// All prompts sent to remote models are built here.

use crate::models::conversation::InterviewSession;

/// How much of the resume is quoted in the opening prompt, in characters.
pub const RESUME_EXCERPT_CHARS: usize = 300;

pub const OPENING_PROMPT: &str = "\
Interview Coach: Hi! I'm your AI interview coach for a {role} position. \
Based on your resume: {resume_excerpt}... \n\n\
Let's begin! Can you tell me about a challenging project you worked on and how you handled it?";

pub const FOLLOW_UP_PROMPT: &str = "\
Interview Coach: The user answered: \"{user_message}\"\n\n\
Great answer! Score: 8/10. You provided good details about the project. \
Next question: Can you describe a time when you had to work with a difficult team member?";

/// Builds the remote-model prompt for this turn.
/// Only the latest message is quoted; the history is not part of the prompt.
pub fn build_prompt(session: &InterviewSession) -> String {
    if session.is_opening() {
        OPENING_PROMPT
            .replace("{role}", session.role.label())
            .replace("{resume_excerpt}", &resume_excerpt(&session.resume_text))
    } else {
        FOLLOW_UP_PROMPT.replace("{user_message}", &session.user_message)
    }
}

/// First `RESUME_EXCERPT_CHARS` characters, never splitting a code point.
pub fn resume_excerpt(resume_text: &str) -> String {
    resume_text.chars().take(RESUME_EXCERPT_CHARS).collect()
}
