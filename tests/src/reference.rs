use unicode_normalization::UnicodeNormalization;
use unicode_normalizing::{Form, NormalizationData, Normalizer, QuickCheck};

fn data() -> &'static NormalizationData
{
    NormalizationData::canonical()
}

/// сравниваем с крейтом unicode-normalization на текстах
#[test]
fn texts()
{
    let data = data();

    for (name, text) in crate::data::files() {
        assert_eq!(data.decompose(&text), text.nfd().collect::<String>(), "nfd - {}", name);
        assert_eq!(data.compose(&text, false), text.nfc().collect::<String>(), "nfc - {}", name);
    }
}

/// каждый кодпоинт по отдельности
#[test]
fn every_codepoint()
{
    let data = data();

    for c in (0 .. 0x110000).filter_map(char::from_u32) {
        let s = c.to_string();

        let nfd: String = s.nfd().collect();
        let nfc: String = s.nfc().collect();

        assert_eq!(data.decompose(&s), nfd, "nfd U+{:04X}", c as u32);
        assert_eq!(data.compose(&s, false), nfc, "nfc U+{:04X}", c as u32);
        assert_eq!(data.decompose(&data.compose(&s, true)), nfd, "fcc U+{:04X}", c as u32);

        assert_eq!(data.is_normalized(&s, Form::Nfd), s == nfd, "is_nfd U+{:04X}", c as u32);
        assert_eq!(data.is_normalized(&s, Form::Nfc), s == nfc, "is_nfc U+{:04X}", c as u32);

        assert_eq!(
            data.combining_class(c as u32),
            unicode_normalization::char::canonical_combining_class(c),
            "ccc U+{:04X}",
            c as u32
        );
    }
}

/// последовательности знаков после разных стартеров: перестановка, блокировка, разрывная композиция
#[test]
fn mark_sequences()
{
    let data = data();

    // стартеры без декомпозиции, составные (в том числе с завершающим CCC != 0), чамо и слоги
    let starters = [
        'a', 'e', 'o', 'u', 'A', 'c', 's', '\u{3B1}', '\u{3C9}', '\u{41E}', '\u{1100}', '\u{AC00}', '\u{B47}', '\u{1E36}',
        '\u{D1}', '\u{389}', '\u{1EC2}', '\u{1161}',
    ];
    // первые 6 - знаки, которые комбинируются с предыдущими
    let marks = [
        '\u{300}', '\u{301}', '\u{302}', '\u{308}', '\u{316}', '\u{323}', '\u{327}', '\u{345}', '\u{313}', '\u{B3E}',
        '\u{1161}', '\u{11A8}', '\u{11BB}', '\u{334}', '\u{5B0}', '\u{F71}', '\u{F7A}', '\u{33A}', '\u{360}',
    ];

    for &starter in starters.iter() {
        for &first in marks.iter() {
            for &second in marks.iter() {
                for &third in marks.iter().take(6) {
                    let s: String = [starter, first, second, third].iter().collect();

                    let nfd: String = s.nfd().collect();
                    let nfc: String = s.nfc().collect();

                    assert_eq!(data.decompose(&s), nfd, "nfd {:?}", s);
                    assert_eq!(data.compose(&s, false), nfc, "nfc {:?}", s);
                    assert_eq!(data.compose(&nfd, false), nfc, "nfc(nfd) {:?}", s);

                    // FCC канонически эквивалентна исходной строке, идемпотентна и находится в FCD
                    let fcc = data.compose(&s, true);

                    assert_eq!(data.decompose(&fcc), nfd, "fcc {:?}", s);
                    assert_eq!(data.compose(&fcc, true), fcc, "fcc(fcc) {:?}", s);
                    assert!(data.is_normalized(&fcc, Form::Fcc), "is_fcc(fcc) {:?}", s);
                    assert!(data.is_normalized(&fcc, Form::Fcd), "is_fcd(fcc) {:?}", s);
                    assert_eq!(data.is_normalized(&s, Form::Fcc), s == fcc, "is_fcc {:?}", s);

                    match data.quick_check(&s, Form::Fcc) {
                        QuickCheck::Yes => assert_eq!(s, fcc, "quick_check fcc {:?}", s),
                        QuickCheck::No => assert_ne!(s, fcc, "quick_check fcc {:?}", s),
                        QuickCheck::Maybe => (),
                    }

                    assert_eq!(data.decompose(&data.make_fcd(&s)), nfd, "fcd {:?}", s);

                    match data.quick_check(&s, Form::Nfc) {
                        QuickCheck::Yes => assert_eq!(s, nfc, "quick_check {:?}", s),
                        QuickCheck::No => assert_ne!(s, nfc, "quick_check {:?}", s),
                        QuickCheck::Maybe => (),
                    }
                }
            }
        }
    }
}

/// пары первичных композиций совпадают с unicode-normalization
#[test]
fn compose_pairs()
{
    let nfc = Normalizer::new_nfc();

    let firsts: Vec<char> = (0 .. 0x3000).chain(0x11000 .. 0x11600).filter_map(char::from_u32).collect();
    let seconds: Vec<char> = (0x300 .. 0x370)
        .chain(0x900 .. 0xDFF)
        .chain(0x1161 .. 0x11C3)
        .chain(0x3099 .. 0x309B)
        .chain(0x110B0 .. 0x110C0)
        .chain(0x11127 .. 0x11128)
        .chain(0x1133E .. 0x11358)
        .filter_map(char::from_u32)
        .collect();

    for &a in firsts.iter() {
        for &b in seconds.iter() {
            assert_eq!(
                nfc.compose_pair(a, b),
                unicode_normalization::char::compose(a, b),
                "U+{:04X} U+{:04X}",
                a as u32,
                b as u32
            );
        }
    }
}
