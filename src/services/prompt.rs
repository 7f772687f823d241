// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prompt rendering for suggestion and summary requests.
//!
//! User fields are echoed exactly once. The fixed text (including the worked
//! example) must not repeat any of the mood or time option values.

use crate::models::suggestion::{Category, SuggestionRequest, MAX_SUGGESTIONS};
use std::fmt::Write as _;

const PERSONA: &str = "You are WanderSnap, a friendly and creative AI assistant helping users discover activities.";

/// Worked example shown to the model. Deliberately generic.
const EXAMPLE_SUGGESTION: &str = r#"{
  "name": "Explore the Secret Garden",
  "description": "Wander through a hidden green courtyard full of climbing roses and quiet benches. A lovely way to slow down and notice small details.",
  "category": "Outdoors",
  "estimatedDuration": "approx. forty-five min",
  "locationHint": "a secluded spot in the city park",
  "imageKeywords": "secret garden"
}"#;

/// Render the suggestion prompt for a validated request.
pub fn build_suggestion_prompt(request: &SuggestionRequest) -> String {
    let mut prompt = String::with_capacity(2048);

    prompt.push_str(PERSONA);
    prompt.push('\n');
    prompt.push_str(
        "Based on the user's location context, mood, available time, and preferences, \
         generate 3 to 5 diverse and engaging activity suggestions.\n\n",
    );

    let _ = writeln!(prompt, "User's Location Context: {}", request.location_context);
    let _ = writeln!(prompt, "User's Mood: {}", request.mood);
    let _ = writeln!(prompt, "Time Available: {}", request.time_available);
    if let Some(preferences) = request.preferences() {
        let _ = writeln!(prompt, "User's Preferences: {}", preferences);
    }

    prompt.push_str("\nFor each suggestion, provide:\n");
    prompt.push_str("- A catchy 'name'.\n");
    prompt.push_str(
        "- A 'description' (2-3 sentences) that's engaging and tailored to their mood and time.\n",
    );
    let _ = writeln!(
        prompt,
        "- A 'category' from the following list: {}.",
        Category::joined_labels()
    );
    prompt.push_str("- An 'estimatedDuration' that fits within their available time.\n");
    prompt.push_str(
        "- A general 'locationHint' (e.g., \"a bustling market area\", \"a quiet riverside path\").\n",
    );
    prompt.push_str(
        "- Optionally, 'imageKeywords': one or two words describing a picture of the activity.\n",
    );

    let _ = write!(
        prompt,
        "\nReturn your suggestions as a single JSON object with exactly one top-level key \
         \"suggestions\", whose value is an array of 0 to {} objects, each matching the \
         structure below. Do not include any text, explanation, or markdown outside the \
         JSON object. Ensure the JSON is valid.\n",
        MAX_SUGGESTIONS
    );
    prompt.push_str("Example of a single suggestion object structure:\n");
    prompt.push_str(EXAMPLE_SUGGESTION);
    prompt.push_str("\nIf nothing fits, return {\"suggestions\": []}.\n");

    prompt
}

/// Inputs for the activity summary prompt.
#[derive(Debug, Clone)]
pub struct SummaryPromptInput<'a> {
    pub activity_description: &'a str,
    pub mood: &'a str,
    pub time_available: &'a str,
    pub preferences: Option<&'a str>,
}

/// Render the prompt that condenses an activity description for a user.
pub fn build_summary_prompt(input: &SummaryPromptInput<'_>) -> String {
    let preferences = input
        .preferences
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or("None");

    format!(
        "You are an AI assistant designed to provide concise and engaging summaries of \
         activities, tailored to the user's current mood, available time, and known preferences.\n\n\
         Given the following activity description, mood, time constraints, and preferences, \
         generate a summary that helps the user quickly decide if the activity is suitable for them.\n\n\
         Activity Description: {}\n\
         Mood: {}\n\
         Time Available: {}\n\
         Preferences: {}\n\n\
         Respond with a JSON object of the form {{\"summary\": \"...\"}}.",
        input.activity_description, input.mood, input.time_available, preferences
    )
}
