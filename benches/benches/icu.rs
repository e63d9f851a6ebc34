use criterion::{criterion_group, criterion_main, Criterion};
use icu_normalizer::{ComposingNormalizer, DecomposingNormalizer};
use unicode_normalizing::Normalizer;

mod group;

group!("./../test_data/texts", None, nfc, test_nfc, "nfc", "icu", ComposingNormalizer, ComposingNormalizer::new_nfc());

group!("./../test_data/texts", None, nfd, test_nfd, "nfd", "icu", DecomposingNormalizer, DecomposingNormalizer::new_nfd());

group!(
    "./../test_data/texts",
    Some(Normalizer::new_nfd()),
    dec,
    test_dec,
    "dec",
    "icu",
    ComposingNormalizer,
    ComposingNormalizer::new_nfc()
);

criterion_group!(benches, nfc, nfd, dec);
criterion_main!(benches);
