use unicode_normalizing::{DataError, Form, NormalizationData, Normalizer, QuickCheck};

fn data() -> &'static NormalizationData
{
    NormalizationData::canonical()
}

/// слоги хангыль декомпозируются и собираются алгоритмически
#[test]
fn hangul()
{
    let nfc = Normalizer::new_nfc();
    let nfd = Normalizer::new_nfd();

    assert_eq!(nfd.normalize("\u{AC00}"), "\u{1100}\u{1161}");
    assert_eq!(nfd.normalize("\u{AC01}"), "\u{1100}\u{1161}\u{11A8}");
    assert_eq!(nfd.normalize("\u{D7A3}"), "\u{1112}\u{1175}\u{11C2}");

    assert_eq!(nfc.normalize("\u{1100}\u{1161}"), "\u{AC00}");
    assert_eq!(nfc.normalize("\u{1100}\u{1161}\u{11A8}"), "\u{AC01}");
    assert_eq!(nfc.normalize("\u{AC00}\u{11A8}"), "\u{AC01}");

    // LVT-слог с T больше не комбинируется, U+11A7 - не завершающая согласная
    assert_eq!(nfc.normalize("\u{AC01}\u{11A8}"), "\u{AC01}\u{11A8}");
    assert_eq!(nfc.normalize("\u{1100}\u{1161}\u{11A7}"), "\u{AC00}\u{11A7}");

    // чамо, разделённые знаком, не комбинируются
    assert_eq!(nfc.normalize("\u{1100}\u{301}\u{1161}"), "\u{1100}\u{301}\u{1161}");

    assert_eq!(nfd.raw_decomposition('\u{AC01}').as_deref(), Some("\u{AC00}\u{11A8}"));
    assert_eq!(nfd.raw_decomposition('\u{AC00}').as_deref(), Some("\u{1100}\u{1161}"));
    assert_eq!(nfc.compose_pair('\u{1100}', '\u{1161}'), Some('\u{AC00}'));
    assert_eq!(nfc.compose_pair('\u{AC00}', '\u{11A8}'), Some('\u{AC01}'));
    assert_eq!(nfc.compose_pair('\u{AC01}', '\u{11A8}'), None);

    assert_eq!(nfc.quick_check("\u{AC00}"), QuickCheck::Yes);
    assert_eq!(nfc.quick_check("\u{AC00}\u{11A8}"), QuickCheck::Maybe);
    assert!(!nfc.is_normalized("\u{AC00}\u{11A8}"));
}

/// знаки в неправильном порядке: быстрый путь не подходит, переставляем
#[test]
fn reordering()
{
    let data = data();

    let text = "a\u{301}\u{316}";

    assert_eq!(data.decompose(text), "a\u{316}\u{301}");
    assert_eq!(data.compose(text, false), "\u{E1}\u{316}");

    assert!(!data.is_normalized(text, Form::Nfd));
    assert!(!data.is_normalized(text, Form::Nfc));
    assert!(!data.is_normalized(text, Form::Fcd));
    assert_eq!(data.quick_check(text, Form::Nfc), QuickCheck::No);

    // составной кодпоинт, за которым идёт знак с меньшим CCC
    assert_eq!(data.decompose("\u{E1}\u{316}"), "a\u{316}\u{301}");
    assert_eq!(data.make_fcd("\u{E1}\u{316}"), "a\u{316}\u{301}");
    assert_eq!(data.compose("\u{E1}\u{316}", false), "\u{E1}\u{316}");
}

/// FCC не комбинирует через промежуточные знаки, NFC комбинирует
#[test]
fn fcc_differs_from_nfc()
{
    let data = data();

    let text = "a\u{316}\u{301}";

    let nfc = data.compose(text, false);
    let fcc = data.compose(text, true);

    assert_eq!(nfc, "\u{E1}\u{316}");
    assert_eq!(fcc, "a\u{316}\u{301}");

    assert_eq!(data.compose(&nfc, false), nfc);
    assert_eq!(data.compose(&fcc, true), fcc);

    assert!(data.is_normalized(&fcc, Form::Fcc));
    assert!(!data.is_normalized(&fcc, Form::Nfc));

    // соседние знаки комбинируются в обеих формах
    assert_eq!(data.compose("a\u{301}\u{316}", true), "\u{E1}\u{316}");
}

/// пустая строка и одиночные кодпоинты без декомпозиций
#[test]
fn identity()
{
    for form in [Form::Nfc, Form::Nfd, Form::Fcc, Form::Fcd] {
        let normalizer = Normalizer::with_data(data(), form);

        assert_eq!(normalizer.normalize(""), "");
        assert!(normalizer.is_normalized(""));
        assert_eq!(normalizer.quick_check(""), QuickCheck::Yes);
        assert_eq!(normalizer.span_quick_check_yes(""), 0);

        for text in ["a", "abc", "\u{410}\u{411}", "\u{4E00}", "\u{1F600}"] {
            assert_eq!(normalizer.normalize(text), text, "{:?}", form);
            assert!(normalizer.is_normalized(text), "{:?}", form);
        }
    }
}

/// синглтоны и исключения из композиции
#[test]
fn singletons_and_exclusions()
{
    let nfc = Normalizer::new_nfc();
    let nfd = Normalizer::new_nfd();

    // знак ангстрема, ом, кельвин
    assert_eq!(nfc.normalize("\u{212B}\u{2126}\u{212A}"), "\u{C5}\u{3A9}K");
    assert_eq!(nfd.normalize("\u{212B}"), "A\u{30A}");

    // исключённые из композиции
    assert_eq!(nfc.normalize("\u{958}"), "\u{915}\u{93C}");
    assert_eq!(nfc.normalize("\u{1D160}"), "\u{1D158}\u{1D165}\u{1D16E}");
    assert_eq!(nfc.compose_pair('\u{915}', '\u{93C}'), None);

    // U+0344 раскладывается на два знака и сам не получается
    assert_eq!(nfc.normalize("\u{344}"), "\u{308}\u{301}");
    assert_eq!(nfc.combining_class('\u{344}'), 230);

    // тибетские гласные с завершающим CCC, отличным от ведущего
    assert_eq!(nfd.normalize("\u{F73}"), "\u{F71}\u{F72}");
    assert_eq!(nfd.normalize("\u{F73}\u{F71}"), "\u{F71}\u{F71}\u{F72}");
}

/// цепочка композиций и комбинирование "назад-вперёд"
#[test]
fn composition_chains()
{
    let nfc = Normalizer::new_nfc();

    assert_eq!(nfc.normalize("c\u{327}\u{301}"), "\u{1E09}");
    assert_eq!(nfc.normalize("c\u{301}\u{327}"), "\u{1E09}");
    assert_eq!(nfc.normalize("\u{3B1}\u{313}\u{300}\u{345}"), "\u{1F82}");
    assert_eq!(nfc.normalize("o\u{31B}\u{323}"), "\u{1EE3}");

    // чамо и знак с CCC=0, который блокирует
    assert_eq!(nfc.normalize("\u{B47}\u{B3E}"), "\u{B4B}");
    assert_eq!(nfc.normalize("\u{B47}\u{334}\u{B3E}"), "\u{B47}\u{334}\u{B3E}");
}

/// повреждённые данные отвергаются при загрузке
#[test]
fn damaged_data()
{
    let bytes = data().to_bytes();

    assert!(matches!(NormalizationData::from_bytes(&bytes[.. 8]), Err(DataError::Truncated { .. })));

    let mut damaged = bytes.clone();
    let last = damaged.len() - 1;
    damaged[last] ^= 0x55;
    assert!(NormalizationData::from_bytes(&damaged).is_err());

    let mut damaged = bytes;
    damaged[0] ^= 0xFF;
    assert!(NormalizationData::from_bytes(&damaged).is_err());
}

/// индекс канонического итератора строится по требованию
#[test]
fn canonical_index()
{
    let data = data();
    let index = data.ensure_canonical_index();

    assert!(data.canonical_index().is_some());

    let set = index.start_set('e');
    assert!(set.contains(&'\u{E9}'));
    assert!(set.contains(&'\u{1EBF}'));

    assert!(index.start_set('\u{1100}').contains(&'\u{AC01}'));
    assert!(index.is_segment_starter('a'));
    assert!(!index.is_segment_starter('\u{301}'));
}
