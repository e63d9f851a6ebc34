// в блоке чамо (U+1100..U+11FF) могут быть скомбинированы кодпоинты:
//  - U+1100..=U+1112 (L, ведущие согласные)
//  - U+1161..=U+1175 (V, гласные)
//  - U+11A8..=U+11C2 (T, завершающие согласные)
// слоги хангыль (U+AC00..=U+D7A3) декомпозируются в них алгоритмически

/// начало блока ведущих согласных чамо
pub const JAMO_L_BASE: u32 = 0x1100;
/// количество ведущих согласных
pub const JAMO_L_COUNT: u32 = 19;
/// начало блока гласных чамо
pub const JAMO_V_BASE: u32 = 0x1161;
/// количество гласных
pub const JAMO_V_COUNT: u32 = 21;
/// кодпоинт перед блоком завершающих согласных (T = 0 - завершающей согласной нет)
pub const JAMO_T_BASE: u32 = 0x11A7;
/// количество завершающих согласных + 1
pub const JAMO_T_COUNT: u32 = 28;
/// количество слогов с одной ведущей согласной: гласные * (завершающие согласные + 1)
pub const JAMO_VT_COUNT: u32 = JAMO_V_COUNT * JAMO_T_COUNT;
/// начало блока слогов хангыль
pub const HANGUL_BASE: u32 = 0xAC00;
/// количество слогов хангыль
pub const HANGUL_COUNT: u32 = JAMO_L_COUNT * JAMO_VT_COUNT;
/// граница блока слогов хангыль (не включительно)
pub const HANGUL_LIMIT: u32 = HANGUL_BASE + HANGUL_COUNT;

/// кодпоинт - слог хангыль?
#[inline(always)]
pub fn is_hangul(code: u32) -> bool
{
    code.wrapping_sub(HANGUL_BASE) < HANGUL_COUNT
}

/// слог LV (без завершающей согласной)
#[inline(always)]
pub fn is_hangul_lv(code: u32) -> bool
{
    let offset = code.wrapping_sub(HANGUL_BASE);
    offset < HANGUL_COUNT && offset % JAMO_T_COUNT == 0
}

/// ведущая согласная: отступ от начала блока, если кодпоинт - L
#[inline(always)]
pub fn jamo_l(code: u32) -> Option<u32>
{
    let l = code.wrapping_sub(JAMO_L_BASE);

    match l < JAMO_L_COUNT {
        true => Some(l),
        false => None,
    }
}

/// гласная: отступ от начала блока, если кодпоинт - V
#[inline(always)]
pub fn jamo_v(code: u32) -> Option<u32>
{
    let v = code.wrapping_sub(JAMO_V_BASE);

    match v < JAMO_V_COUNT {
        true => Some(v),
        false => None,
    }
}

/// завершающая согласная: 1..28, если кодпоинт - T
#[inline(always)]
pub fn jamo_t(code: u32) -> Option<u32>
{
    let t = code.wrapping_sub(JAMO_T_BASE);

    match 0 < t && t < JAMO_T_COUNT {
        true => Some(t),
        false => None,
    }
}

/// слог LV из отступов ведущей согласной и гласной
#[inline(always)]
pub fn compose_lv(l: u32, v: u32) -> u32
{
    HANGUL_BASE + (l * JAMO_V_COUNT + v) * JAMO_T_COUNT
}

/// декомпозиция слога: L, V и, если есть, T
#[inline(always)]
pub fn decompose(code: u32) -> (char, char, Option<char>)
{
    let offset = code - HANGUL_BASE;
    let t = offset % JAMO_T_COUNT;
    let lv = offset / JAMO_T_COUNT;

    (
        jamo_char(JAMO_L_BASE + lv / JAMO_V_COUNT),
        jamo_char(JAMO_V_BASE + lv % JAMO_V_COUNT),
        match t {
            0 => None,
            _ => Some(jamo_char(JAMO_T_BASE + t)),
        },
    )
}

/// исходная декомпозиция: слог LVT -> LV + T, слог LV -> L + V
#[inline(always)]
pub fn raw_decompose(code: u32) -> (char, char)
{
    let offset = code - HANGUL_BASE;
    let t = offset % JAMO_T_COUNT;

    match t {
        0 => {
            let (l, v, _) = decompose(code);
            (l, v)
        }
        _ => (jamo_char(code - t), jamo_char(JAMO_T_BASE + t)),
    }
}

/// все кодпоинты чамо и слогов находятся в BMP вне диапазона суррогатов
#[inline(always)]
pub fn jamo_char(code: u32) -> char
{
    char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn syllables()
    {
        assert_eq!(decompose(0xAC00), ('\u{1100}', '\u{1161}', None));
        assert_eq!(decompose(0xAC01), ('\u{1100}', '\u{1161}', Some('\u{11A8}')));
        assert_eq!(decompose(0xD7A3), ('\u{1112}', '\u{1175}', Some('\u{11C2}')));

        assert_eq!(raw_decompose(0xAC01), ('\u{AC00}', '\u{11A8}'));
        assert_eq!(raw_decompose(0xAC00), ('\u{1100}', '\u{1161}'));

        assert_eq!(compose_lv(0, 0), 0xAC00);
        assert_eq!(HANGUL_LIMIT, 0xD7A4);
    }

    #[test]
    fn jamo_ranges()
    {
        assert!(is_hangul_lv(0xAC00));
        assert!(!is_hangul_lv(0xAC01));
        assert!(!is_hangul_lv(0xD7A4));

        assert_eq!(jamo_l(0x1112), Some(18));
        assert_eq!(jamo_l(0x1113), None);
        assert_eq!(jamo_v(0x1175), Some(20));
        assert_eq!(jamo_v(0x1176), None);
        // U+11A7 - не завершающая согласная
        assert_eq!(jamo_t(0x11A7), None);
        assert_eq!(jamo_t(0x11A8), Some(1));
        assert_eq!(jamo_t(0x11C3), None);
    }
}
