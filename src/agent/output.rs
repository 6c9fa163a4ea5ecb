/// Clean up a raw model response into the markdown artifact the tool
/// renders and offers for download.
///
/// Models occasionally wrap the whole answer in a code fence even when told
/// not to. A wrapping fence is removed; fences inside the document are left
/// alone. Empty output is an error so the caller can re-ask.
pub fn clean_artifact(raw_output: &str) -> Result<String, String> {
    let trimmed = raw_output.trim();
    if trimmed.is_empty() {
        return Err("Output is empty".to_string());
    }

    let unwrapped = if trimmed.starts_with("```") && trimmed.ends_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() > 2 {
            lines[1..lines.len() - 1].join("\n")
        } else {
            return Err("Output contained only a code fence".to_string());
        }
    } else {
        trimmed.to_string()
    };

    let cleaned = unwrapped.trim().to_string();
    if cleaned.is_empty() {
        return Err("Output is empty".to_string());
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_markdown_passes_through() {
        let cleaned = clean_artifact("# Title\n\nBody text.\n").unwrap();
        assert_eq!(cleaned, "# Title\n\nBody text.");
    }

    #[test]
    fn test_wrapping_fence_is_stripped() {
        let cleaned = clean_artifact("```markdown\n# Title\n\nBody.\n```").unwrap();
        assert_eq!(cleaned, "# Title\n\nBody.");
    }

    #[test]
    fn test_inner_fences_are_preserved() {
        let text = "Intro\n\n```rust\nfn main() {}\n```\n\nOutro";
        assert_eq!(clean_artifact(text).unwrap(), text);
    }

    #[test]
    fn test_empty_output_is_rejected() {
        assert!(clean_artifact("   \n  ").is_err());
        assert!(clean_artifact("```\n```").is_err());
    }
}
