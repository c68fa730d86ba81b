//! Mock Responder: the local, always-available interview coach.
//!
//! Used as the last link of the responder chain when no remote model answers.
//! The structure of each reply is fixed by the conversation position; the
//! feedback line, improvement tip and final score are drawn from an injected RNG.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::coach::responder::Responder;
use crate::inference_client::InferenceError;
use crate::models::conversation::InterviewSession;
use crate::models::role::Role;

pub const QUESTIONS_PER_ROLE: usize = 6;

type QuestionBank = [&'static str; QUESTIONS_PER_ROLE];

const SOFTWARE_ENGINEER: QuestionBank = [
    "Can you tell me about a challenging project you worked on and how you handled it?",
    "Describe a time when you had to debug a complex issue. What was your approach?",
    "How do you stay updated with the latest technologies and programming languages?",
    "Tell me about a time when you had to work with a difficult team member.",
    "What's your experience with version control systems like Git?",
    "How do you approach code reviews and ensuring code quality?",
];

const PRODUCT_MANAGER: QuestionBank = [
    "Can you walk me through a product you've managed from conception to launch?",
    "How do you prioritize features when resources are limited?",
    "Describe a time when you had to make a difficult product decision.",
    "How do you gather and analyze user feedback?",
    "Tell me about a time when a project was behind schedule. How did you handle it?",
    "What metrics do you use to measure product success?",
];

const DATA_ANALYST: QuestionBank = [
    "Can you describe a data analysis project you worked on?",
    "What tools and technologies do you use for data analysis?",
    "Tell me about a time when you had to clean messy data.",
    "How do you ensure the accuracy of your analysis?",
    "Describe a situation where you had to present complex data to non-technical stakeholders.",
    "What's your experience with SQL and data visualization tools?",
];

const DATA_SCIENTIST: QuestionBank = [
    "Can you walk me through a machine learning project you've worked on?",
    "How do you handle overfitting in your models?",
    "Describe your experience with different ML algorithms.",
    "How do you validate your model performance?",
    "Tell me about a time when you had to explain a complex model to stakeholders.",
    "What's your approach to feature engineering?",
];

const UX_DESIGNER: QuestionBank = [
    "Can you walk me through your design process for a recent project?",
    "How do you conduct user research and gather insights?",
    "Describe a time when you had to design for accessibility.",
    "How do you handle feedback from stakeholders or users?",
    "Tell me about a project where you had to balance user needs with business constraints.",
    "What tools do you use for prototyping and design?",
];

const MARKETING: QuestionBank = [
    "Can you describe a successful marketing campaign you've worked on?",
    "How do you measure the ROI of your marketing efforts?",
    "Tell me about a time when you had to adapt a campaign strategy.",
    "How do you stay updated with marketing trends?",
    "Describe a situation where you had to work with a limited budget.",
    "What's your experience with digital marketing tools and platforms?",
];

const SALES: QuestionBank = [
    "Can you tell me about your biggest sale and how you achieved it?",
    "How do you handle objections from potential customers?",
    "Describe your sales process and methodology.",
    "How do you build and maintain relationships with clients?",
    "Tell me about a time when you had to meet a challenging sales target.",
    "What CRM systems have you worked with?",
];

const GENERAL: QuestionBank = [
    "Can you tell me about a challenging project you worked on and how you handled it?",
    "Describe a time when you had to work with a difficult team member.",
    "How do you handle stress and pressure in the workplace?",
    "Tell me about a time when you had to learn a new skill quickly.",
    "What are your career goals for the next few years?",
    "How do you stay motivated and productive?",
];

pub const FEEDBACK_TEMPLATES: [&str; 6] = [
    "Great answer! Score: 8/10. You provided good details and showed strong problem-solving skills. ",
    "Excellent response! Score: 9/10. Your answer demonstrated leadership and technical expertise. ",
    "Good answer! Score: 7/10. You covered the key points well. Consider adding more specific examples. ",
    "Solid response! Score: 8/10. You showed good analytical thinking. ",
    "Well done! Score: 8/10. Your answer was comprehensive and well-structured. ",
    "Good job! Score: 7/10. You addressed the question effectively. ",
];

pub const IMPROVEMENT_TIPS: [&str; 6] = [
    "Try to include more specific metrics or quantifiable results.",
    "Consider adding more context about the challenges you faced.",
    "You could elaborate more on the lessons learned from this experience.",
    "Try to connect your answer more directly to the role requirements.",
    "Consider mentioning how this experience prepared you for future challenges.",
    "You could add more details about the team dynamics and collaboration.",
];

/// Inclusive bounds of the overall score given at the end of an interview.
pub const MIN_OVERALL_SCORE: u32 = 7;
pub const MAX_OVERALL_SCORE: u32 = 9;

const CLOSING_SUMMARY: &str = "\
Strengths:
✅ Strong technical knowledge
✅ Good communication skills
✅ Relevant experience

Areas to Improve:
📝 Add more specific examples
📝 Quantify your achievements
📝 Practice STAR method responses

Great job! Keep practicing and you'll do well in your interviews!";

/// Returns the question bank for a role.
pub fn question_bank(role: Role) -> &'static [&'static str] {
    match role {
        Role::SoftwareEngineer => &SOFTWARE_ENGINEER,
        Role::ProductManager => &PRODUCT_MANAGER,
        Role::DataAnalyst => &DATA_ANALYST,
        Role::DataScientist => &DATA_SCIENTIST,
        Role::UxDesigner => &UX_DESIGNER,
        Role::Marketing => &MARKETING,
        Role::Sales => &SALES,
        Role::General => &GENERAL,
    }
}

/// Builds the coach's reply for the current conversation position.
///
/// Position `k = history.len() / 2`:
/// - opening (empty message): greeting + first question
/// - `k < bank.len() - 1`: feedback + tip + `bank[k + 1]`
/// - otherwise: feedback + tip + closing summary with a score in
///   [`MIN_OVERALL_SCORE`, `MAX_OVERALL_SCORE`]
pub fn mock_response<R: Rng + ?Sized>(session: &InterviewSession, rng: &mut R) -> String {
    let questions = question_bank(session.role);

    if session.is_opening() {
        return format!(
            "Hi! I'm your AI interview coach for a {role} position. \
             I've reviewed your resume and I'm excited to help you practice.\n\n\
             Let's begin! {question}\n\n\
             Remember to be specific and provide concrete examples from your experience.",
            role = session.role,
            question = questions[0],
        );
    }

    let feedback = FEEDBACK_TEMPLATES[rng.gen_range(0..FEEDBACK_TEMPLATES.len())];
    let tip = IMPROVEMENT_TIPS[rng.gen_range(0..IMPROVEMENT_TIPS.len())];

    let position = session.question_index();
    if position + 1 < questions.len() {
        return format!(
            "{feedback}{tip}\n\nNext question: {}",
            questions[position + 1]
        );
    }

    let overall = rng.gen_range(MIN_OVERALL_SCORE..=MAX_OVERALL_SCORE);
    format!(
        "{feedback}{tip}\n\n🎉 Interview Complete! \n\nOverall Score: {overall}/10\n\n{CLOSING_SUMMARY}"
    )
}

/// Infallible responder backed by the canned question banks.
pub struct MockResponder {
    rng: Mutex<StdRng>,
}

impl MockResponder {
    /// Production constructor, seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic constructor for tests and reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn respond(&self, session: &InterviewSession) -> String {
        // A panic while drawing cannot leave the RNG in an unusable state.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        mock_response(session, &mut *rng)
    }
}

#[async_trait]
impl Responder for MockResponder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn attempt(
        &self,
        session: &InterviewSession,
        _prompt: &str,
    ) -> Result<String, InferenceError> {
        Ok(self.respond(session))
    }
}
