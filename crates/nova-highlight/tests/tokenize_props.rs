use nova_highlight::{tokenize_line, tokenize_text, LexerState, LineState, LineStateCache};
use proptest::prelude::*;

const PROPTEST_CASES: u32 = 256;

fn arb_char() -> impl Strategy<Value = char> {
    // Every character here is recognized by some rule. The letters cannot spell
    // `class`, which would switch to the stricter after-class state.
    prop_oneof![
        8 => prop::sample::select(vec!['a', 'b', 'x', 'y', 'Z', '_', '$', '0', '7']),
        4 => prop::sample::select(vec![' ', '\t']),
        6 => prop::sample::select(vec![
            ':', ',', ';', '{', '}', '[', ']', '.', '=', '(', ')', '>', '|', '-', '*', '+', '<',
        ]),
        3 => prop::sample::select(vec!['/', '*', '\'', '"']),
        1 => Just('é'),
        1 => Just('中'),
    ]
}

fn arb_line() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_char(), 0..48).prop_map(|chars| chars.into_iter().collect())
}

fn arb_state() -> impl Strategy<Value = LexerState> {
    prop::sample::select(LexerState::ALL.to_vec())
}

fn arb_lenient_state() -> impl Strategy<Value = LexerState> {
    prop::sample::select(vec![
        LexerState::TopLevel,
        LexerState::InsideSingleQuoteString,
        LexerState::InsideDoubleQuoteString,
        LexerState::InsideBlockComment,
    ])
}

fn arb_document_line() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "/*", "*/", "x", "a */ b", "// c", "'s", "\"t", "", "int y = 1;", " * doc",
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn tokens_cover_the_whole_line(line in arb_line(), state in arb_lenient_state()) {
        let tokenized = tokenize_line(&line, LineState::new(state))
            .map_err(|err| TestCaseError::fail(format!("{line:?}: {err}")))?;
        prop_assert_eq!(tokenized.text_len(), line.len());
        prop_assert!(tokenized.tokens.iter().all(|token| token.len > 0));
    }

    #[test]
    fn tokenizing_is_deterministic(line in any::<String>(), state in arb_state()) {
        let state = LineState::new(state);
        prop_assert_eq!(tokenize_line(&line, state), tokenize_line(&line, state));
    }

    #[test]
    fn arbitrary_input_never_panics(line in any::<String>(), state in arb_state()) {
        match tokenize_line(&line, LineState::new(state)) {
            Ok(tokenized) => {
                prop_assert_eq!(tokenized.text_len(), line.len());
                let spans: String = tokenized.spans(&line).map(|(_, text)| text).collect();
                prop_assert_eq!(spans, line);
            }
            Err(err) => {
                let offset = err.offset() as usize;
                prop_assert!(offset < line.len());
                prop_assert!(line.is_char_boundary(offset));
            }
        }
    }

    #[test]
    fn document_lengths_sum_to_text_length(lines in prop::collection::vec(arb_line(), 0..8)) {
        let text = lines.join("\n");
        let tokens = tokenize_text(&text, LineState::INITIAL)
            .map_err(|err| TestCaseError::fail(format!("{text:?}: {err}")))?;
        let total: usize = tokens.tokens.iter().map(|token| token.len as usize).sum();
        prop_assert_eq!(total, text.len());
    }

    #[test]
    fn incremental_cache_matches_rebuild(
        before in prop::collection::vec(arb_document_line(), 0..12),
        first in 0usize..12,
        removed in 0usize..4,
        replacement in prop::collection::vec(arb_document_line(), 0..4),
    ) {
        let first = first.min(before.len());
        let removed = removed.min(before.len() - first);

        let mut after = before.clone();
        after.splice(first..first + removed, replacement.iter().copied());

        let mut cache = LineStateCache::new();
        cache.rebuild(before.iter().copied()).unwrap();
        let range = cache.apply_edit(&after, first, removed, replacement.len()).unwrap();

        let mut expected = LineStateCache::new();
        expected.rebuild(after.iter().copied()).unwrap();

        prop_assert_eq!(range.start, first);
        prop_assert!(range.end >= (first + replacement.len()).min(after.len()));
        prop_assert_eq!(cache, expected);
    }
}
