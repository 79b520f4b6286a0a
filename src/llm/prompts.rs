/// Fixed instruction for per-speaker sentiment analysis, embedding the full
/// conversation text. Single-turn, no system message.
pub fn insight_prompt(conversation_text: &str) -> String {
    format!(
        "Analyse the following conversation and provide one short critical paragraph each \
         for each speaker. In your paragraphs, provide sentiment or psychological insights \
         derived from the conversation, some insights about speakers, analyze traits such as \
         reliability, optimism, confidence, and courage. Offer deep insights about each \
         speaker, such as favorite and least favorite topics, and create a personal profile \
         with recommendations on how the user should interact with the speaker in future \
         interactions. Assess the speakers' attitudes towards each other or any third \
         person, answering common human questions like 'Did he like me?' and 'Does he trust \
         me?'. Please DO NOT provide summary of the overall conversation, key words, etc. \
         Output should be related to sentimental analysis. :\n\n{}",
        conversation_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_conversation() {
        let prompt = insight_prompt("Speaker 0: hello\n\nSpeaker 1: hi\n\n");
        assert!(prompt.contains("Speaker 0: hello"));
        assert!(prompt.contains("Speaker 1: hi"));
    }

    #[test]
    fn test_prompt_asks_for_per_speaker_paragraphs() {
        let prompt = insight_prompt("");
        assert!(prompt.contains("one short critical paragraph each"));
        assert!(prompt.contains("DO NOT provide summary"));
    }
}
