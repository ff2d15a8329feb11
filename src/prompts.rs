//! Prompt templates
//!
//! [`assemble`] renders the meta-prompt sent with an uploaded document: the model is asked to
//! write a reusable task prompt (with a `{voice_dictation}` slot for a later transcription)
//! rather than to answer anything itself. The remaining templates wrap caller content for the
//! question and optimize modes.

/// Placeholder left in generated prompts for the dictation text supplied later
pub const DICTATION_PLACEHOLDER: &str = "{voice_dictation}";

/// Content of the key validation call
pub const KEY_PROBE: &str = "hello";

/// Inputs of the meta-prompt. Every field is required; empty strings are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptParts {
    pub system_prompt: String,
    pub instructions: String,
    pub example_output: String,
    pub document_text: String,
}

/// Render the document meta-prompt. Pure substitution, no truncation.
pub fn assemble(parts: &PromptParts) -> String {
    format!(
        "You are an advanced prompt generator designed to construct precise and standardized task prompts for AI models. Using the following inputs:
    System Prompt:
    {system_prompt}

    Transcription: {placeholder}

    Carefully analyze the provided medical transcription. Extract all relevant information and organize it according to the following categories and structure:
    {document_text}

    Using the following structure and clinical standards, generate the response as per example output:
    {example_output}

    Strictly follow these Instructions:
    {instructions}

    Using the inputs provided, construct the final task prompt as follows:
    - Clearly define the role and expertise of the model based on the System Prompt.
    - Include the Example Output to demonstrate the expected format, structure, and level of detail.
    - Emphasize the Strict Instructions to ensure strict adherence to formatting, clinical accuracy, and domain-specific standards.
    - Ensure clarity, completeness, and consistency suitable for use in high-stakes medical or clinical environments.

    IMPORTANT: Your output MUST be only the final structured task prompt, formatted as plain text.
    Do NOT output any JSON, code blocks, or interpretations. Output the prompt text only.",
        system_prompt = parts.system_prompt,
        placeholder = DICTATION_PLACEHOLDER,
        document_text = parts.document_text,
        example_output = parts.example_output,
        instructions = parts.instructions,
    )
}

/// Direct Q&A wrapper
pub fn question_prompt(content: &str) -> String {
    format!("\n    Question: {}\n", content)
}

/// Editor persona that may only rephrase: nothing removed, nothing invented.
pub fn optimize_prompt(content: &str) -> String {
    format!(
        "
You are a highly skilled editor and prompt optimizer. Your task is to refine and optimize the following prompt data to enhance its clarity, conciseness, structure, and effectiveness. Here is the prompt data you will be working with:

<prompt_data>
{content}
</prompt_data>

Your objective is to improve the given prompt while adhering to these key principles:

1. Preserve all original information and context
2. Do not remove any meaningful content
3. Do not hallucinate or fabricate new information
4. Only rephrase or restructure existing content to make it more precise and professional

Follow these guidelines when optimizing the prompt:

1. Enhance clarity: Ensure each sentence is clear and unambiguous
2. Improve conciseness: Remove redundant words or phrases without losing meaning
3. Refine structure: Organize information logically and coherently
4. Boost effectiveness: Make the prompt more compelling and action-oriented
5. Polish language: Correct any grammatical errors and improve overall readability
6. Maintain professionalism: Use a formal, professional tone throughout

Your output should meet the following requirements:

1. Retain all original context and details from the input prompt
2. Contain no assumptions or information beyond what was provided
3. Demonstrate improved clarity, flow, grammar, and effectiveness
4. Be written in clear, professional English
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_parts() -> PromptParts {
        PromptParts {
            system_prompt: "You are a cardiology scribe.".to_string(),
            instructions: "Use SOAP headings. Never guess dosages.".to_string(),
            example_output: "S: ...\nO: BP {bp}\nA: ...\nP: ...".to_string(),
            document_text: "Patient: John Doe, BP 120/80\n".to_string(),
        }
    }

    #[test]
    fn test_assemble_is_deterministic() {
        assert_eq!(assemble(&sample_parts()), assemble(&sample_parts()));
    }

    #[test]
    fn test_assemble_embeds_inputs_verbatim() {
        let parts = sample_parts();
        let prompt = assemble(&parts);
        assert!(prompt.contains(&parts.system_prompt));
        assert!(prompt.contains(&parts.instructions));
        assert!(prompt.contains(&parts.example_output));
        assert!(prompt.contains(&parts.document_text));
        assert!(prompt.contains(DICTATION_PLACEHOLDER));
        assert!(prompt.ends_with("Output the prompt text only."));
    }

    #[test]
    fn test_assemble_keeps_large_documents_whole() {
        let mut parts = sample_parts();
        parts.document_text = "line of findings\n".repeat(20_000);
        let prompt = assemble(&parts);
        assert!(prompt.contains(&parts.document_text));
    }

    #[test]
    fn test_assemble_accepts_empty_fields() {
        let prompt = assemble(&PromptParts {
            system_prompt: String::new(),
            instructions: String::new(),
            example_output: String::new(),
            document_text: String::new(),
        });
        assert!(prompt.starts_with("You are an advanced prompt generator"));
    }

    #[test]
    fn test_question_and_optimize_wrappers() {
        assert!(question_prompt("What is the dose?").contains("Question: What is the dose?"));

        let optimized = optimize_prompt("Summarize the visit.");
        assert!(optimized.contains("<prompt_data>\nSummarize the visit.\n</prompt_data>"));
        assert!(optimized.contains("Do not hallucinate or fabricate new information"));
    }
}
