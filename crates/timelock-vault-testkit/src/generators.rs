//! Proptest generators for property-based testing.

use proptest::prelude::*;

use timelock_vault_core::DURATIONS;

/// Any supported duration token.
pub fn duration_token() -> impl Strategy<Value = &'static str> {
    prop::sample::select(DURATIONS.iter().map(|(token, _)| *token).collect::<Vec<_>>())
}

/// A supported token with random ASCII casing.
pub fn duration_token_any_case() -> impl Strategy<Value = String> {
    (duration_token(), any::<u64>()).prop_map(|(token, mask)| {
        token
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if mask & (1 << (i % 64)) != 0 {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect()
    })
}

/// Non-empty plaintext up to `max_len` bytes.
pub fn plaintext(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..=max_len)
}

/// A plausible filename.
pub fn filename() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,24}(\\.[a-z]{1,4})?".prop_map(String::from)
}

/// Parameters for one encrypt call.
#[derive(Debug, Clone)]
pub struct SealParams {
    pub plaintext: Vec<u8>,
    pub duration: &'static str,
    pub filename: String,
}

impl Arbitrary for SealParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (plaintext(512), duration_token(), filename())
            .prop_map(|(plaintext, duration, filename)| SealParams {
                plaintext,
                duration,
                filename,
            })
            .boxed()
    }
}
