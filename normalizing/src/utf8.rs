/// получаем количество байт в последовательности UTF-8
#[inline(always)]
pub fn get_utf8_sequence_width(first: u8) -> usize
{
    match first {
        0 ..= 0x7F => 1,
        0xC2 ..= 0xDF => 2,
        0xE0 ..= 0xEF => 3,
        0xF0 ..= 0xF4 => 4,
        _ => 0,
    }
}

/// первый байт UTF-8 последовательности кодпоинта
///
/// все кодпоинты, последовательность которых начинается с меньшего байта, меньше code. поэтому
/// байты меньше этого значения (включая байты продолжения, если кодпоинт не ASCII) можно пропускать,
/// не декодируя
#[inline(always)]
pub fn lead_byte(code: u32) -> u8
{
    match code {
        0 ..= 0x7F => code as u8,
        0x80 ..= 0x7FF => 0xC0 | (code >> 6) as u8,
        0x800 ..= 0xFFFF => 0xE0 | (code >> 12) as u8,
        0x10000 ..= 0x10FFFF => 0xF0 | (code >> 18) as u8,
        _ => 0xF5,
    }
}

/// кодпоинт, последовательность которого начинается с байта index
#[inline(always)]
pub fn char_at(text: &str, index: usize) -> Option<char>
{
    text.get(index ..)?.chars().next()
}

/// кодпоинт, последовательность которого заканчивается перед байтом index
#[inline(always)]
pub fn char_before(text: &str, index: usize) -> Option<char>
{
    text.get(.. index)?.chars().next_back()
}

/// быстрый цикл: пропускаем кодпоинты, начиная с байта from, пока check возвращает None
///
/// кодпоинты, последовательность которых начинается с байта меньше min_lead, не декодируются.
/// возвращает позицию остановки и кодпоинт со значением check, если остановились не в конце строки
#[inline(always)]
pub fn scan<T>(
    text: &str,
    from: usize,
    min_lead: u8,
    mut check: impl FnMut(char) -> Option<T>,
) -> (usize, Option<(char, T)>)
{
    let bytes = text.as_bytes();
    let mut src = from;

    while src < bytes.len() {
        let first = bytes[src];

        // байты продолжения встречаются здесь, только если пропущен первый байт последовательности
        if first < min_lead || first & 0xC0 == 0x80 {
            src += 1;
            continue;
        }

        let c = match char_at(text, src) {
            Some(c) => c,
            None => break,
        };

        if let Some(value) = check(c) {
            return (src, Some((c, value)));
        }

        src += c.len_utf8();
    }

    (src, None)
}
