//! Cosmetic text attached to moods: note prompts and share-card captions/tags.
//!
//! Candidate lists are fixed per level; the caller supplies the random source.

use crate::models::MoodLevel;
use rand::Rng;
use rand::seq::SliceRandom;

pub const DEFAULT_PROMPT: &str = "How are you feeling today?";

pub fn note_prompts(mood: MoodLevel) -> &'static [&'static str] {
    match mood {
        MoodLevel::Great => &[
            "What made today special?",
            "Share your win!",
            "What are you grateful for?",
        ],
        MoodLevel::Good => &[
            "What went well today?",
            "What made you smile?",
            "Any small victories?",
        ],
        MoodLevel::Okay => &[
            "Just a normal day?",
            "How could it have been better?",
            "Any bright spots?",
        ],
        MoodLevel::Bad => &[
            "What's bringing you down?",
            "How can tomorrow be better?",
            "What would help right now?",
        ],
        MoodLevel::Terrible => &[
            "Let it all out - what happened?",
            "What self-care do you need?",
            "Who could you reach out to?",
        ],
    }
}

pub fn card_captions(mood: MoodLevel) -> &'static [&'static str] {
    match mood {
        MoodLevel::Great => &[
            "Floating on cloud nine today! ✨",
            "Can't stop the good vibes flowing!",
            "Today's energy is immaculate ✨",
        ],
        MoodLevel::Good => &[
            "Good days deserve to be celebrated 💫",
            "Sunny disposition, bright outlook ☀️",
            "Feeling pretty good about things today!",
        ],
        MoodLevel::Okay => &[
            "Just cruising through today 🌊",
            "Middle ground kind of day",
            "Neutral vibes, steady pace",
        ],
        MoodLevel::Bad => &[
            "Not my best day, but still breathing ✨",
            "Sometimes it's okay to not be okay",
            "Tomorrow is another chance ❤️‍🩹",
        ],
        MoodLevel::Terrible => &[
            "Even the darkest nights end with sunrise 🌅",
            "Honoring all my feelings today",
            "This too shall pass ✨",
        ],
    }
}

pub fn card_tags(mood: MoodLevel) -> &'static [&'static str] {
    match mood {
        MoodLevel::Great => &["#thriving", "#gratitude", "#blessed", "#glowup"],
        MoodLevel::Good => &["#goodvibes", "#contentment", "#grateful", "#positive"],
        MoodLevel::Okay => &["#balance", "#neutral", "#steadygoing", "#midweekvibes"],
        MoodLevel::Bad => &["#selfcare", "#recovery", "#itsokaynottobeokay", "#rest"],
        MoodLevel::Terrible => &["#mentalhealth", "#healing", "#support", "#breakthrough"],
    }
}

pub fn pick_prompt<R: Rng + ?Sized>(mood: Option<MoodLevel>, rng: &mut R) -> &'static str {
    mood.and_then(|mood| note_prompts(mood).choose(rng).copied())
        .unwrap_or(DEFAULT_PROMPT)
}

pub fn pick_caption<R: Rng + ?Sized>(mood: MoodLevel, rng: &mut R) -> &'static str {
    card_captions(mood).choose(rng).copied().unwrap_or_default()
}

/// Two distinct tags for the level.
pub fn pick_tags<R: Rng + ?Sized>(mood: MoodLevel, rng: &mut R) -> Vec<&'static str> {
    card_tags(mood).choose_multiple(rng, 2).copied().collect()
}
