use criterion::{criterion_group, criterion_main, Criterion};
use unicode_normalizing::Normalizer;

mod group;

group!("./../test_data/texts", None, nfc, test_nfc, "nfc", "my", Normalizer<'static>, Normalizer::new_nfc());

group!("./../test_data/texts", None, nfd, test_nfd, "nfd", "my", Normalizer<'static>, Normalizer::new_nfd());

group!("./../test_data/texts", None, fcc, test_fcc, "fcc", "my", Normalizer<'static>, Normalizer::new_fcc());

group!("./../test_data/texts", None, fcd, test_fcd, "fcd", "my", Normalizer<'static>, Normalizer::new_fcd());

group!(
    "./../test_data/texts",
    Some(Normalizer::new_nfd()),
    dec,
    test_dec,
    "dec",
    "my",
    Normalizer<'static>,
    Normalizer::new_nfc()
);

criterion_group!(benches, nfc, nfd, fcc, fcd, dec);
criterion_main!(benches);
