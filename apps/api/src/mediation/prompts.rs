// Prompt templates and personas for the four studio tools.
// Replace the `{...}` placeholders before sending.

pub const TREND_SYSTEM: &str = "You are a YouTube trend analyst. \
    You identify high-potential topics for content creators.";

pub const TREND_PROMPT_TEMPLATE: &str = r#"Find 5 currently trending topics, news, or viral discussions related to "{niche}" on YouTube or the web right now.
Focus on things that would make good YouTube video subjects.
Return a simple list with a brief explanation of why it's trending."#;

pub const IDEA_SYSTEM: &str =
    "You are a world-class YouTube strategist with a track record of producing viral videos.";

pub const IDEA_PROMPT_TEMPLATE: &str = r#"Generate 5 high-potential YouTube video ideas for the topic: "{topic}".
Make them click-worthy and engaging.
For each idea give a title, the opening hook concept, a predicted viral score from 1 to 100, and the target audience."#;

pub const SCRIPT_SYSTEM: &str =
    "You are a professional YouTube scriptwriter skilled in retention and storytelling.";

pub const SCRIPT_PROMPT_TEMPLATE: &str = r#"Write a complete YouTube video script for a video about: "{idea}".
Tone: {tone}.
Structure it with an Intro, 3 Main Body points, and a Conclusion/CTA.
Give every section a heading, the spoken content, and a timestamp range such as "0:00-0:30"."#;

pub const METADATA_SYSTEM: &str = "You are a YouTube SEO expert.";

pub const METADATA_PROMPT_TEMPLATE: &str = r#"Create optimized metadata for this video concept/script: "{context}".
Provide exactly 3 alternative clickbait but honest titles.
Write a SEO-friendly description (first 2 lines are crucial).
Provide exactly 15 tags.
Describe a high-CTR thumbnail image concept."#;
