use std::collections::BTreeSet;

use crate::buffer::ReorderingBuffer;
use crate::data::*;
use crate::hangul;

impl NormalizationData
{
    /// найти в списке композиций стартера запись для кодпоинта trail
    ///
    /// результат: биты 21..1 - составной кодпоинт, бит 0 - составной кодпоинт комбинируется со следующими
    #[inline(always)]
    pub(crate) fn combine(&self, list: usize, trail: u32) -> Option<u32>
    {
        let units = &self.compositions;
        let mut list = list;

        if trail < COMP_1_TRAIL_LIMIT as u32 {
            // кодпоинты U+0000..U+33FF: запись из двух или трёх единиц
            let key1 = (trail << 1) as u16;

            let mut first_unit = units[list];

            while key1 > first_unit {
                list += 2 + (first_unit & COMP_1_TRIPLE) as usize;
                first_unit = units[list];
            }

            if key1 == first_unit & COMP_1_TRAIL_MASK {
                return Some(match first_unit & COMP_1_TRIPLE != 0 {
                    true => ((units[list + 1] as u32) << 16) | units[list + 2] as u32,
                    false => units[list + 1] as u32,
                });
            }

            return None;
        }

        // кодпоинты U+3400..U+10FFFF: запись всегда из трёх единиц
        let key1 = COMP_1_TRAIL_LIMIT + (((trail >> COMP_1_TRAIL_SHIFT) as u16) & !COMP_1_TRIPLE);
        let key2 = (trail << COMP_2_TRAIL_SHIFT) as u16;

        loop {
            let first_unit = units[list];

            if key1 > first_unit {
                list += 2 + (first_unit & COMP_1_TRIPLE) as usize;
                continue;
            }

            if key1 != first_unit & COMP_1_TRAIL_MASK {
                return None;
            }

            let second_unit = units[list + 1];

            if key2 > second_unit {
                if first_unit & COMP_1_LAST_TUPLE != 0 {
                    return None;
                }

                list += 3;
                continue;
            }

            if key2 == second_unit & COMP_2_TRAIL_MASK {
                return Some((((second_unit & !COMP_2_TRAIL_MASK) as u32) << 16) | units[list + 2] as u32);
            }

            return None;
        }
    }

    /// добавить в set все составные кодпоинты списка, включая цепочки композиций
    pub(crate) fn add_composites(&self, list: usize, set: &mut BTreeSet<char>)
    {
        let mut lists = vec![list];
        let mut visited = BTreeSet::new();

        while let Some(list) = lists.pop() {
            if !visited.insert(list) {
                continue;
            }

            let mut position = list;

            loop {
                let first_unit = self.compositions[position];

                let composite_and_fwd = match first_unit & COMP_1_TRIPLE {
                    0 => {
                        position += 2;
                        self.compositions[position - 1] as u32
                    }
                    _ => {
                        position += 3;
                        (((self.compositions[position - 2] & !COMP_2_TRAIL_MASK) as u32) << 16)
                            | self.compositions[position - 1] as u32
                    }
                };

                let composite = composite_and_fwd >> 1;

                if composite_and_fwd & 1 != 0 {
                    lists.push(self.compositions_list_for_composite(self.get_norm16(composite)));
                }

                if let Some(c) = char::from_u32(composite) {
                    set.insert(c);
                }

                if first_unit & COMP_1_LAST_TUPLE != 0 {
                    break;
                }
            }
        }
    }

    /// составной кодпоинт из пары, None - пара не комбинируется
    pub fn compose_pair(&self, a: u32, b: u32) -> Option<char>
    {
        let norm16 = self.get_norm16(a);

        let list = if self.is_inert(norm16) {
            return None;
        } else if norm16 < self.min_yes_no_mappings_only {
            if self.is_jamo_l(norm16) {
                let l = hangul::jamo_l(a)?;
                let v = hangul::jamo_v(b)?;

                return char::from_u32(hangul::compose_lv(l, v));
            }

            if self.is_hangul(norm16) {
                let t = hangul::jamo_t(b)?;

                return match hangul::is_hangul_lv(a) {
                    true => char::from_u32(a + t),
                    false => None,
                };
            }

            // у составного кодпоинта список записан после декомпозиции
            let mut list = norm16 as usize;

            if norm16 > self.min_yes_no {
                list += 1 + (self.extra(list) & MAPPING_LENGTH_MASK) as usize;
            }

            self.extra_offset + list
        } else if norm16 < self.min_maybe_yes || MIN_NORMAL_MAYBE_YES <= norm16 {
            return None;
        } else {
            (norm16 - self.min_maybe_yes) as usize
        };

        if b > 0x10FFFF {
            return None;
        }

        char::from_u32(self.combine(list, b)? >> 1)
    }

    /// перекомпозиция NFD-текста буфера, начиная с байта start
    pub(crate) fn recompose(&self, buffer: &mut ReorderingBuffer, start: usize, only_contiguous: bool)
    {
        let text = buffer.string_mut();

        if start == text.len() {
            return;
        }

        let mut chars: Vec<char> = text[start ..].chars().collect();
        self.recompose_chars(&mut chars, only_contiguous);

        text.truncate(start);
        text.extend(chars);

        buffer.flush();
    }

    /// жадная композиция слева направо: каждый нестартер, не заблокированный предыдущими,
    /// пробуем скомбинировать с последним стартером
    fn recompose_chars(&self, chars: &mut Vec<char>, only_contiguous: bool)
    {
        // список композиций последнего стартера, если он может комбинироваться со следующими
        let mut list: Option<usize> = None;
        let mut starter = 0;
        let mut prev_cc = 0;
        let mut p = 0;

        while p < chars.len() {
            let code = chars[p] as u32;
            p += 1;

            let norm16 = self.get_norm16(code);
            let cc = self.cc_from_yes_or_maybe(norm16);

            if let Some(current) = list {
                if self.is_maybe(norm16) && (prev_cc < cc || prev_cc == 0) {
                    if self.is_jamo_vt(norm16) {
                        // гласная после ведущей согласной (+ следующая завершающая согласная).
                        // слогов LV в NFD нет, поэтому завершающие согласные обрабатываются только здесь
                        if let (Some(v), Some(l)) = (hangul::jamo_v(code), hangul::jamo_l(chars[starter] as u32)) {
                            let remove = p - 1;
                            let mut syllable = hangul::compose_lv(l, v);

                            if let Some(t) = chars.get(p).and_then(|&next| hangul::jamo_t(next as u32)) {
                                p += 1;
                                syllable += t;
                            }

                            if let Some(syllable) = char::from_u32(syllable) {
                                chars[starter] = syllable;
                                chars.drain(remove .. p);
                                p = remove;
                            }
                        }

                        list = None;
                        continue;
                    }

                    if let Some(composite_and_fwd) = self.combine(current, code) {
                        if let Some(composite) = char::from_u32(composite_and_fwd >> 1) {
                            // нестартер удаляется, prev_cc не меняется
                            p -= 1;
                            chars.remove(p);
                            chars[starter] = composite;

                            list = match composite_and_fwd & 1 != 0 {
                                true => Some(self.compositions_list_for_composite(self.get_norm16(composite as u32))),
                                false => None,
                            };

                            continue;
                        }
                    }
                }
            }

            prev_cc = cc;

            if cc == 0 {
                list = self.compositions_list_for_decomp_yes(norm16);

                if list.is_some() {
                    starter = p - 1;
                }
            } else if only_contiguous {
                // FCC: любой нестартер между стартером и комбинируемым кодпоинтом блокирует композицию
                list = None;
            }
        }
    }
}
