use icu_normalizer::{ComposingNormalizer, DecomposingNormalizer};
use unicode_normalizing::{Form, Normalizer, QuickCheck};

/// сравниваем с результатами нормализации ICU
#[test]
fn icu()
{
    let icu_nfc = ComposingNormalizer::new_nfc();
    let icu_nfd = DecomposingNormalizer::new_nfd();

    let nfc = Normalizer::new_nfc();
    let nfd = Normalizer::new_nfd();

    for (name, text) in crate::data::files() {
        let expected_nfc = icu_nfc.normalize(&text);
        let expected_nfd = icu_nfd.normalize(&text);

        assert_eq!(nfc.normalize(&text), expected_nfc, "nfc - {}", name);
        assert_eq!(nfd.normalize(&text), expected_nfd, "nfd - {}", name);

        // нормализованный текст проходит проверку
        assert!(nfc.is_normalized(&expected_nfc), "nfc is_normalized - {}", name);
        assert!(nfd.is_normalized(&expected_nfd), "nfd is_normalized - {}", name);
        assert_eq!(nfc.is_normalized(&text), icu_nfc.is_normalized(&text), "nfc is_normalized - {}", name);
    }
}

/// тексты, прошедшие NFD, снова собираются в NFC ICU
#[test]
fn icu_recomposition()
{
    let icu_nfc = ComposingNormalizer::new_nfc();
    let nfc = Normalizer::new_nfc();
    let nfd = Normalizer::new_nfd();

    for (name, text) in crate::data::files() {
        let decomposed = nfd.normalize(&text);

        assert_ne!(nfc.quick_check(&decomposed), QuickCheck::No, "{}", name);
        assert_eq!(nfc.normalize(&decomposed), icu_nfc.normalize(&decomposed), "{}", name);
    }
}

/// нормализация текста по частям совпадает с нормализацией целиком
#[test]
fn chunks()
{
    for form in [Form::Nfc, Form::Nfd, Form::Fcc] {
        let normalizer = Normalizer::with_data(unicode_normalizing::NormalizationData::canonical(), form);

        for (name, text) in crate::data::files() {
            let expected = normalizer.normalize(&text);
            let mut result = String::new();

            let chars: Vec<char> = text.chars().collect();

            for chunk in chars.chunks(7) {
                let chunk: String = chunk.iter().collect();
                normalizer.normalize_second_and_append(&mut result, &chunk);
            }

            assert_eq!(result, expected, "{:?} - {}", form, name);
        }
    }
}
