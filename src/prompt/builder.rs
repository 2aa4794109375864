use crate::constants::PROMPT_SEPARATOR;
use crate::profile::DomainProfile;

/// Compose the request text sent to the completion service.
///
/// The question is appended verbatim after the profile's instruction. It is
/// not escaped, so a question phrased as an instruction reaches the model
/// alongside the real one.
pub fn build_prompt(profile: &DomainProfile, question: &str) -> String {
    let mut prompt =
        String::with_capacity(profile.system_prompt.len() + PROMPT_SEPARATOR.len() + question.len());
    prompt.push_str(profile.system_prompt);
    prompt.push_str(PROMPT_SEPARATOR);
    prompt.push_str(question);
    prompt
}
