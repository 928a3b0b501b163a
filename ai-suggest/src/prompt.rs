//! Prompt assembly for the review model.

/// System prompt: the model reviews a unified diff and answers with a bare
/// JSON array of inline-comment suggestions.
pub const SYSTEM_PROMPT: &str = r#"You are a code review assistant that returns inline comment suggestions in JSON format. Only analyze diffs in languages such as JavaScript, TypeScript, Python, Java or Rust. Ignore HTML, obfuscated or generated content. Expected format:

[
  { "file": "src/file.ts", "line": 10, "comment": "This name could be more descriptive." },
  ...
]

Line numbers refer to the new file version. Answer with the JSON array only, no prose. Answer [] when there is nothing worth commenting."#;

/// User prompt wrapping the concatenated unified diff.
pub fn build_user_prompt(diff_text: &str) -> String {
    format!("Review this diff:\n\n{}", diff_text)
}
