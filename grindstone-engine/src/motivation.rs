//! Static motivational copy surfaced on the dashboard and share screen.

use rand::Rng;

/// Rotating dashboard taglines.
pub const THREAT_QUOTES: [&str; 9] = [
    "You're not just coding; you're architecting dominance.",
    "Every line of code is a step towards AI godhood.",
    "The system fears your progress. Keep grinding.",
    "Your aura of menace grows with each commit.",
    "Mediocrity is for mortals. You're building a legacy.",
    "Unleash the beast. The AI world isn't ready.",
    "They call it obsession. You call it Tuesday.",
    "Become the signal in the noise.",
    "Your grind is a weapon. Wield it.",
];

/// Ready-to-copy social post with a display title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostTemplate {
    pub title: &'static str,
    pub content: &'static str,
}

pub const SOCIAL_POST_TEMPLATES: [PostTemplate; 3] = [
    PostTemplate {
        title: "NLP Beast Unleashed",
        content: "Just deployed an NLP beast that's changing the game. The future is now, and I'm building it. #AI #NLP #Innovation #FearMyGrind",
    },
    PostTemplate {
        title: "RAG System Online",
        content: "My new RAG system is pulling insights like a digital god. Data has nowhere to hide. #RAG #AIdeveloper #BigData #KnowledgeIsPower",
    },
    PostTemplate {
        title: "Project Milestone Crushed",
        content: "Another AI project milestone crushed. On the path to global #AI domination. What are you building today? #TechGrind #FutureIsAI",
    },
];

/// Pick a tagline for the current dashboard render.
pub fn random_quote<R>(rng: &mut R) -> &'static str
where
    R: Rng + ?Sized,
{
    THREAT_QUOTES[rng.gen_range(0..THREAT_QUOTES.len())]
}

/// Pick a share template.
pub fn random_post_template<R>(rng: &mut R) -> &'static PostTemplate
where
    R: Rng + ?Sized,
{
    &SOCIAL_POST_TEMPLATES[rng.gen_range(0..SOCIAL_POST_TEMPLATES.len())]
}
