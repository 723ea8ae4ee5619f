#![no_main]

use libfuzzer_sys::fuzz_target;
use nova_highlight::{tokenize_line, LexerState, LineState};

/// Tokenizing is linear in line length; bigger inputs only slow the fuzzer down.
const MAX_INPUT_SIZE: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let rest = &rest[..rest.len().min(MAX_INPUT_SIZE)];
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };

    let entry = LexerState::ALL[usize::from(selector) % LexerState::ALL.len()];
    let mut state = LineState::new(entry);
    for line in text.split('\n') {
        match tokenize_line(line, state) {
            Ok(tokenized) => {
                assert_eq!(tokenized.text_len(), line.len());
                assert!(tokenized.tokens.iter().all(|token| token.len > 0));
                state = tokenized.state;
            }
            Err(err) => {
                assert!(line.is_char_boundary(err.offset() as usize));
                state = LineState::INITIAL;
            }
        }
    }
});
