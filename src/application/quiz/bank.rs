//! Question sources for generated quizzes.
//!
//! Known topics draw from a curated bank; anything else is filled from five
//! templates interpolated with the topic and the course title.

use crate::domain::quiz::{QuizDifficulty, QuizQuestion};

struct Entry {
    question: &'static str,
    options: [&'static str; 4],
    correct_answer: usize,
    explanation: &'static str,
}

impl Entry {
    fn to_question(&self) -> QuizQuestion {
        QuizQuestion {
            question: self.question.to_string(),
            options: self.options.iter().map(|o| (*o).to_string()).collect(),
            correct_answer: self.correct_answer,
            explanation: self.explanation.to_string(),
        }
    }
}

struct Bank {
    topic: &'static str,
    easy: &'static [Entry],
    medium: &'static [Entry],
    hard: &'static [Entry],
}

impl Bank {
    fn entries(&self, difficulty: QuizDifficulty) -> &'static [Entry] {
        match difficulty {
            QuizDifficulty::Easy => self.easy,
            QuizDifficulty::Medium => self.medium,
            QuizDifficulty::Hard => self.hard,
        }
    }
}

const BANKS: &[Bank] = &[
    Bank {
        topic: "python",
        easy: &[
            Entry {
                question: "What is the correct way to create a list in Python?",
                options: ["list = (1, 2, 3)", "list = [1, 2, 3]", "list = {1, 2, 3}", "list = <1, 2, 3>"],
                correct_answer: 1,
                explanation: "Square brackets [] are used to create lists in Python.",
            },
            Entry {
                question: "Which keyword is used to define a function in Python?",
                options: ["function", "def", "func", "define"],
                correct_answer: 1,
                explanation: "The \"def\" keyword is used to define functions in Python.",
            },
        ],
        medium: &[Entry {
            question: "What is a list comprehension in Python?",
            options: [
                "A way to compress lists",
                "A concise way to create lists",
                "A method to understand lists",
                "A type of data structure",
            ],
            correct_answer: 1,
            explanation: "List comprehensions provide a concise way to create lists.",
        }],
        hard: &[Entry {
            question: "What is the GIL (Global Interpreter Lock) in Python?",
            options: [
                "A security feature",
                "A mutex preventing multiple threads from executing Python bytecode",
                "A graphics library",
                "A locking mechanism for files",
            ],
            correct_answer: 1,
            explanation: "The GIL is a mutex that protects Python objects, preventing multiple threads from executing Python bytecode at once.",
        }],
    },
    Bank {
        topic: "machine learning",
        easy: &[Entry {
            question: "What is supervised learning?",
            options: [
                "Learning without labels",
                "Learning with labeled training data",
                "Learning through rewards",
                "Learning by supervision only",
            ],
            correct_answer: 1,
            explanation: "Supervised learning uses labeled training data.",
        }],
        medium: &[Entry {
            question: "What is overfitting in machine learning?",
            options: [
                "Model is too simple",
                "Model memorizes training data too well",
                "Model has too few parameters",
                "Model trains too fast",
            ],
            correct_answer: 1,
            explanation: "Overfitting occurs when a model learns training data too well, including noise.",
        }],
        hard: &[Entry {
            question: "What is the purpose of regularization in ML?",
            options: [
                "To make data regular",
                "To prevent overfitting by penalizing complexity",
                "To speed up training",
                "To normalize input data",
            ],
            correct_answer: 1,
            explanation: "Regularization adds penalty terms to prevent overfitting.",
        }],
    },
    Bank {
        topic: "data structures",
        easy: &[Entry {
            question: "What is the time complexity of accessing an element in an array by index?",
            options: ["O(n)", "O(1)", "O(log n)", "O(n²)"],
            correct_answer: 1,
            explanation: "Array access by index is O(1) - constant time.",
        }],
        medium: &[Entry {
            question: "What is the average time complexity of binary search?",
            options: ["O(1)", "O(log n)", "O(n)", "O(n log n)"],
            correct_answer: 1,
            explanation: "Binary search has O(log n) time complexity.",
        }],
        hard: &[Entry {
            question: "What is amortized time complexity?",
            options: [
                "Average time over many operations",
                "Worst case time",
                "Best case time",
                "Time with memory included",
            ],
            correct_answer: 0,
            explanation: "Amortized analysis considers average time per operation over a sequence.",
        }],
    },
];

/// Build `count` questions for `topic`, cycling through the source.
#[must_use]
pub fn questions(
    topic: &str,
    course_title: &str,
    difficulty: QuizDifficulty,
    count: usize,
) -> Vec<QuizQuestion> {
    let lower = topic.to_lowercase();
    let pool = match BANKS.iter().find(|b| lower.contains(b.topic)) {
        Some(bank) => bank.entries(difficulty).iter().map(Entry::to_question).collect(),
        None => templates(topic, course_title),
    };
    pool.iter().cycle().take(count).cloned().collect()
}

fn templates(topic: &str, course_title: &str) -> Vec<QuizQuestion> {
    let q = |question: String, options: [&str; 4], correct_answer: usize, explanation: String| {
        QuizQuestion {
            question,
            options: options.iter().map(|o| o.replace("{topic}", topic)).collect(),
            correct_answer,
            explanation,
        }
    };
    vec![
        q(
            format!("What is the primary purpose of {topic} in {course_title}?"),
            [
                "To provide fundamental understanding of {topic} concepts",
                "To memorize specific {topic} definitions",
                "To avoid learning {topic} entirely",
                "To replace traditional {topic} methods",
            ],
            0,
            format!("The primary purpose is to provide a fundamental understanding of {topic} concepts, which forms the foundation for advanced learning."),
        ),
        q(
            format!("Which of the following best describes {topic}?"),
            [
                "A theoretical concept with no practical application",
                "An important skill used in professional environments",
                "An outdated practice no longer relevant",
                "A simple task requiring minimal effort",
            ],
            1,
            format!("{topic} is an important skill widely used in professional environments, making it valuable for career development."),
        ),
        q(
            format!("When applying {topic}, what is the most critical factor to consider?"),
            [
                "Understanding the underlying principles and best practices",
                "Memorizing exact steps without understanding",
                "Avoiding documentation and resources",
                "Working in isolation without feedback",
            ],
            0,
            format!("Understanding the underlying principles and best practices is crucial for effective application of {topic}."),
        ),
        q(
            format!("What is a common mistake when learning {topic}?"),
            [
                "Practicing regularly with varied examples",
                "Rushing through concepts without proper understanding",
                "Asking questions when confused",
                "Reviewing previous material periodically",
            ],
            1,
            "Rushing through concepts without proper understanding is a common mistake that can lead to gaps in knowledge.".to_string(),
        ),
        q(
            format!("How does {topic} relate to real-world applications in {course_title}?"),
            [
                "It has no practical applications",
                "It forms the foundation for solving industry problems",
                "It only applies to academic settings",
                "It contradicts professional practices",
            ],
            1,
            format!("{topic} forms the foundation for solving industry problems and is essential for professional work in {course_title}."),
        ),
    ]
}
