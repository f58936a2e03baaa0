//! Prompt construction

use crate::types::Difficulty;

/// First `max_chars` characters of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Build the quiz instruction prompt.
///
/// `difficulty` is echoed as given; its guidance text falls back to the
/// medium tier when the name is not recognised.
pub fn build_quiz_prompt(corpus: &str, count: usize, difficulty: &str, max_chars: usize) -> String {
    let instruction = Difficulty::parse_or_medium(difficulty).instruction();
    let content = truncate_chars(corpus, max_chars);

    format!(
        r#"
Based on the following text content, generate {count} quiz questions with the difficulty level: {difficulty}.

{instruction}

Text Content:
{content}

Requirements:
1. Generate exactly {count} questions
2. Each question should have:
   - A clear, well-formed question
   - 4 multiple choice options (A, B, C, D)
   - The correct answer (A, B, C, or D)
   - A brief explanation of why the answer is correct
   - A difficulty tag and a topic tag
3. Questions should be diverse and cover different aspects of the content
4. Avoid questions that are too obvious or too obscure
5. Make sure all questions are answerable based on the provided content

Please respond with a JSON object in the following format:
{{
    "quizzes": [
        {{
            "question": "Your question here?",
            "options": {{
                "A": "Option A",
                "B": "Option B",
                "C": "Option C",
                "D": "Option D"
            }},
            "correct_answer": "A",
            "explanation": "Explanation of why this answer is correct",
            "difficulty": "{difficulty}",
            "topic": "Main topic this question covers"
        }}
    ]
}}

IMPORTANT: Respond ONLY with valid JSON. Do not include any other text or formatting.
"#
    )
}
