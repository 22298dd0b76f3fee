//! Tokenization shared by expansion and the lexical rescore.

/// Split text into terms on whitespace and punctuation boundaries.
/// Punctuation is treated as a delimiter and never appears in a term.
pub(crate) fn terms(text: &str) -> Vec<&str> {
    text.split(|c: char| c.is_whitespace() || is_punctuation(c))
        .filter(|t| !t.is_empty())
        .collect()
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '？' | '。'
                | '，'
                | '、'
                | '：'
                | '；'
                | '！'
                | '（'
                | '）'
                | '《'
                | '》'
                | '【'
                | '】'
                | '“'
                | '”'
                | '‘'
                | '’'
                | '…'
                | '—'
                | '·'
        )
}
