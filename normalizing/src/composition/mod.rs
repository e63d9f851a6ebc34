use crate::buffer::ReorderingBuffer;
use crate::data::*;
use crate::hangul;
use crate::utf8;

mod combine;

impl NormalizationData
{
    /// NFC (only_contiguous = false) или FCC (only_contiguous = true)
    pub fn compose(&self, text: &str, only_contiguous: bool) -> String
    {
        let mut result = String::with_capacity(text.len());
        let mut buffer = ReorderingBuffer::new(self, &mut result);

        self.compose_text(text, only_contiguous, Some(&mut buffer));

        result
    }

    /// дописать к уже нормализованной строке dest текст text, нормализовав стык.
    /// если do_compose = false, text уже нормализован
    pub fn compose_and_append(&self, dest: &mut String, text: &str, do_compose: bool, only_contiguous: bool)
    {
        let mut buffer = ReorderingBuffer::new(self, dest);
        self.compose_and_append_to_buffer(text, do_compose, only_contiguous, &mut buffer);
    }

    pub(crate) fn compose_and_append_to_buffer(
        &self,
        text: &str,
        do_compose: bool,
        only_contiguous: bool,
        buffer: &mut ReorderingBuffer,
    )
    {
        let mut src = 0;

        if !buffer.is_empty() {
            let first_starter = self.find_next_comp_boundary(text, 0);

            // начало text может скомбинироваться с концом dest: нормализуем стык заново
            if first_starter != 0 {
                let last_starter = self.find_previous_comp_boundary(buffer.as_str(), buffer.len());

                let mut middle = String::with_capacity(buffer.len() - last_starter + first_starter);
                middle.push_str(&buffer.as_str()[last_starter ..]);
                middle.push_str(&text[.. first_starter]);

                buffer.remove_suffix(buffer.len() - last_starter);
                self.compose_into(&middle, only_contiguous, true, buffer);

                src = first_starter;
            }
        }

        match do_compose {
            true => {
                self.compose_into(&text[src ..], only_contiguous, true, buffer);
            }
            false => buffer.append_zero_cc(&text[src ..]),
        }
    }

    /// общий цикл композиции и проверки нормализованности
    ///
    /// с буфером - записываем результат в буфер, без буфера - проверяем, что текст уже нормализован
    pub(crate) fn compose_text(&self, text: &str, only_contiguous: bool, buffer: Option<&mut ReorderingBuffer>)
        -> bool
    {
        match buffer {
            Some(buffer) => self.compose_into(text, only_contiguous, true, buffer),
            None => {
                // при проверке буфер нужен только для перекомпозиции отдельных отрезков
                let mut scratch = String::new();
                let mut buffer = ReorderingBuffer::new(self, &mut scratch);

                self.compose_into(text, only_contiguous, false, &mut buffer)
            }
        }
    }

    /// композиция (do_compose = true) или проверка
    ///
    /// инвариант: отрезок текста [prev_boundary, prev_src) побайтно совпадает с концом буфера,
    /// поэтому при откате достаточно удалить из буфера prev_src - prev_boundary байт
    fn compose_into(&self, text: &str, only_contiguous: bool, do_compose: bool, buffer: &mut ReorderingBuffer)
        -> bool
    {
        let min_lead = utf8::lead_byte(self.min_comp_no_maybe_cp);
        let min_no_maybe_cp = self.min_comp_no_maybe_cp;

        // последний кодпоинт с границей композиции перед ним, CCC = 0 и результатом быстрой проверки "да"
        let mut prev_boundary = 0;
        let mut src = 0;

        // только для проверки
        let mut prev_cc = 0;

        loop {
            let mut prev_src = src;

            // пропускаем кодпоинты, которые не комбинируются с предыдущими и имеют CCC = 0
            let (stop, current) = utf8::scan(text, src, min_lead, |c| {
                let code = c as u32;

                if code < min_no_maybe_cp {
                    return None;
                }

                let norm16 = self.get_norm16(code);

                match self.is_comp_yes_and_zero_cc(norm16) {
                    true => None,
                    false => Some(norm16),
                }
            });

            src = stop;

            if src != prev_src {
                if current.is_none() {
                    if do_compose {
                        buffer.append_zero_cc(&text[prev_src .. src]);
                    }
                    break;
                }

                // последний пропущенный кодпоинт может скомбинироваться со следующими
                prev_boundary = last_char_start(text, src);

                match do_compose {
                    true => {
                        buffer.append_zero_cc(&text[prev_src .. prev_boundary]);
                        buffer.append_zero_cc(&text[prev_boundary .. src]);
                    }
                    false => prev_cc = 0,
                }

                prev_src = src;
            }

            let (c, norm16) = match current {
                Some(current) => current,
                None => break,
            };

            src += c.len_utf8();

            // кодпоинт либо декомпозируется, либо комбинируется с предыдущим, либо имеет CCC != 0.
            // слоги хангыль и ведущие согласные проходят быструю проверку
            if self.is_jamo_vt(norm16) && prev_boundary != prev_src {
                let prev = utf8::char_before(text, prev_src).map_or(0, |prev| prev as u32);
                let code = c as u32;
                let mut need_to_decompose = false;

                if let Some(v) = hangul::jamo_v(code) {
                    if let Some(l) = hangul::jamo_l(prev) {
                        if !do_compose {
                            return false;
                        }

                        let syllable = hangul::compose_lv(l, v);
                        let next = utf8::char_at(text, src);

                        match next.map(|next| (next, hangul::jamo_t(next as u32))) {
                            Some((next, Some(t))) => {
                                src += next.len_utf8();
                                prev_boundary = src;
                                buffer.set_last_char(hangul::jamo_char(syllable + t));

                                continue;
                            }
                            // L + V + не T без границы композиции: декомпозиция и перекомпозиция в общем порядке
                            Some((next, None)) if !self.has_comp_boundary_before(next as u32) => {
                                need_to_decompose = true;
                            }
                            // слог LV: дальше граница композиции или конец текста
                            _ => {
                                prev_boundary = src;
                                buffer.set_last_char(hangul::jamo_char(syllable));

                                continue;
                            }
                        }
                    }
                } else if let (true, Some(t)) = (hangul::is_hangul_lv(prev), hangul::jamo_t(code)) {
                    if !do_compose {
                        return false;
                    }

                    buffer.set_last_char(hangul::jamo_char(prev + t));
                    prev_boundary = src;

                    continue;
                }

                if !need_to_decompose {
                    // чамо не скомбинировалась в слог и не скомбинируется со следующими
                    match do_compose {
                        true => buffer.append_zero_cc_char(c),
                        false => prev_cc = 0,
                    }

                    prev_boundary = src;
                    continue;
                }
            }

            if norm16 >= MIN_YES_YES_WITH_CC {
                let cc = norm16 as u8;

                // FCC: завершающий CCC предыдущего кодпоинта больше cc - нарушен порядок FCD,
                // знаки не переставляются в буфере, а декомпозируются и перекомпозируются
                if only_contiguous && self.previous_trail_cc(text, prev_boundary, prev_src) > cc {
                    if !do_compose {
                        return false;
                    }
                } else if do_compose {
                    buffer.append(c, cc);
                    continue;
                } else if prev_cc <= cc {
                    prev_cc = cc;
                    continue;
                } else {
                    return false;
                }
            } else if !do_compose && !self.is_maybe_or_non_zero_cc(norm16) {
                return false;
            }

            // последняя граница композиции в [prev_boundary, src) - перед текущим кодпоинтом или prev_boundary
            if self.comp_boundary_before(c as u32, norm16) {
                prev_boundary = prev_src;
            } else if do_compose {
                buffer.remove_suffix(prev_src - prev_boundary);
            }

            src = self.find_next_comp_boundary(text, src);

            // декомпозиция отрезка между границами и его перекомпозиция
            let start = buffer.len();

            self.decompose_short(&text[prev_boundary .. src], buffer);
            self.recompose(buffer, start, only_contiguous);

            if !do_compose {
                if !buffer.equals(&text[prev_boundary .. src]) {
                    return false;
                }

                buffer.remove();
                prev_cc = 0;
            }

            prev_boundary = src;
        }

        true
    }

    /// быстрая проверка композиции
    ///
    /// возвращает длину начального отрезка, который точно нормализован, и признак "возможно".
    /// если длина меньше длины текста - результат "нет". при do_span = false проверка доходит
    /// до конца текста, если встречает только "возможно"; при do_span = true останавливается на первом
    pub(crate) fn compose_quick_check(&self, text: &str, only_contiguous: bool, do_span: bool) -> (usize, bool)
    {
        let min_lead = utf8::lead_byte(self.min_comp_no_maybe_cp);
        let min_no_maybe_cp = self.min_comp_no_maybe_cp;

        let mut prev_boundary = 0;
        let mut prev_cc = 0;
        let mut maybe = false;
        let mut src = 0;

        loop {
            let (stop, current) = utf8::scan(text, src, min_lead, |c| {
                let code = c as u32;

                if code < min_no_maybe_cp {
                    return None;
                }

                let norm16 = self.get_norm16(code);

                match self.is_comp_yes_and_zero_cc(norm16) {
                    true => None,
                    false => Some(norm16),
                }
            });

            let progressed = stop != src;
            src = stop;

            let (c, norm16) = match current {
                Some(current) => current,
                None => return (src, maybe),
            };

            if progressed {
                prev_boundary = last_char_start(text, src);
                prev_cc = 0;
            }

            let prev_src = src;
            src += c.len_utf8();

            if self.is_maybe_or_non_zero_cc(norm16) {
                let cc = self.cc_from_yes_or_maybe(norm16);

                let fails_fcd = only_contiguous && cc != 0 && self.previous_trail_cc(text, prev_boundary, prev_src) > cc;

                if !fails_fcd && (prev_cc <= cc || cc == 0) {
                    prev_cc = cc;

                    if norm16 < MIN_YES_YES_WITH_CC {
                        match do_span {
                            true => return (prev_boundary, false),
                            false => maybe = true,
                        }
                    }

                    continue;
                }
            }

            return (prev_boundary, false);
        }
    }

    /// завершающий CCC кодпоинта перед position, если он находится не раньше start
    #[inline(always)]
    fn previous_trail_cc(&self, text: &str, start: usize, position: usize) -> u8
    {
        match start < position {
            true => utf8::char_before(text, position).map_or(0, |c| self.get_fcd16(c as u32) as u8),
            false => 0,
        }
    }

    /// есть ли граница композиции перед кодпоинтом: его декомпозиция начинается с кодпоинта,
    /// который проходит быструю проверку и имеет CCC = 0
    pub fn has_comp_boundary_before(&self, code: u32) -> bool
    {
        code < self.min_comp_no_maybe_cp || self.comp_boundary_before(code, self.get_norm16(code))
    }

    fn comp_boundary_before(&self, code: u32, norm16: u16) -> bool
    {
        let mut code = code;
        let mut norm16 = norm16;

        loop {
            if self.is_comp_yes_and_zero_cc(norm16) {
                return true;
            }

            if self.is_maybe_or_non_zero_cc(norm16) {
                return false;
            }

            if self.is_decomp_no_algorithmic(norm16) {
                code = self.map_algorithmic(code, norm16);
                norm16 = self.get_norm16(code);
                continue;
            }

            let mapping = self.mapping(norm16);

            if mapping.is_empty() || mapping.lead_cc() != 0 {
                return false;
            }

            return match mapping.first_char() {
                Some(first) => self.is_comp_yes_and_zero_cc(self.get_norm16(first as u32)),
                None => false,
            };
        }
    }

    /// есть ли граница композиции после кодпоинта
    ///
    /// test_inert = true: кодпоинт, кроме того, не меняется при нормализации
    pub fn has_comp_boundary_after(&self, code: u32, only_contiguous: bool, test_inert: bool) -> bool
    {
        let mut code = code;

        loop {
            let norm16 = self.get_norm16(code);

            if self.is_inert(norm16) {
                return true;
            }

            if norm16 <= self.min_yes_no {
                // слог LVT не комбинируется со следующими, слоги LV и стартеры со списками - комбинируются
                return self.is_hangul(norm16) && !hangul::is_hangul_lv(code);
            }

            let limit = match test_inert {
                true => self.min_no_no,
                false => self.min_maybe_yes,
            };

            if norm16 >= limit {
                return false;
            }

            if self.is_decomp_no_algorithmic(norm16) {
                code = self.map_algorithmic(code, norm16);
                continue;
            }

            // при FCC завершающий CCC должен быть <= 1
            let first_unit = self.extra(norm16 as usize);

            return first_unit & MAPPING_NO_COMP_BOUNDARY_AFTER == 0 && (!only_contiguous || first_unit <= 0x1FF);
        }
    }

    /// начало последнего отрезка перед position, начинающегося с границы композиции
    fn find_previous_comp_boundary(&self, text: &str, position: usize) -> usize
    {
        let mut position = position;

        while let Some(c) = utf8::char_before(text, position) {
            position -= c.len_utf8();

            if self.has_comp_boundary_before(c as u32) {
                break;
            }
        }

        position
    }

    /// первая граница композиции, начиная с position
    fn find_next_comp_boundary(&self, text: &str, position: usize) -> usize
    {
        let mut position = position;

        while let Some(c) = utf8::char_at(text, position) {
            if self.comp_boundary_before(c as u32, self.get_norm16(c as u32)) {
                break;
            }

            position += c.len_utf8();
        }

        position
    }
}

/// начало последнего кодпоинта перед position
#[inline(always)]
pub(crate) fn last_char_start(text: &str, position: usize) -> usize
{
    position - utf8::char_before(text, position).map_or(0, |c| c.len_utf8())
}

#[cfg(test)]
mod tests
{
    use crate::data::NormalizationData;

    fn data() -> &'static NormalizationData
    {
        NormalizationData::canonical()
    }

    fn is_composed(text: &str, only_contiguous: bool) -> bool
    {
        data().compose_text(text, only_contiguous, None)
    }

    #[test]
    fn composes()
    {
        let data = data();

        assert_eq!(data.compose("", false), "");
        assert_eq!(data.compose("abc", false), "abc");
        assert_eq!(data.compose("e\u{301}t\u{E9}", false), "\u{E9}t\u{E9}");
        assert_eq!(data.compose("e\u{302}\u{301}", false), "\u{1EBF}");
        // синглтоны не восстанавливаются
        assert_eq!(data.compose("\u{212B}", false), "\u{C5}");
        assert_eq!(data.compose("\u{2126}", false), "\u{3A9}");
        // исключённые из композиции
        assert_eq!(data.compose("\u{344}", false), "\u{308}\u{301}");
        assert_eq!(data.compose("\u{1D15E}", false), "\u{1D157}\u{1D165}");
        // три единицы в записи списка композиций
        assert_eq!(data.compose("\u{11099}\u{110BA}", false), "\u{1109A}");
    }

    #[test]
    fn reorders_before_composing()
    {
        let data = data();

        // a + 230 + 220: нижний знак переставляется, верхний комбинируется
        assert_eq!(data.compose("a\u{301}\u{316}", false), "\u{E1}\u{316}");
        assert_eq!(data.compose("\u{1E0B}\u{323}", false), "\u{1E0D}\u{307}");
        assert_eq!(data.compose("q\u{307}\u{323}", false), "q\u{323}\u{307}");
    }

    #[test]
    fn hangul()
    {
        let data = data();

        assert_eq!(data.compose("\u{1100}\u{1161}", false), "\u{AC00}");
        assert_eq!(data.compose("\u{1100}\u{1161}\u{11A8}", false), "\u{AC01}");
        assert_eq!(data.compose("\u{AC00}\u{11A8}", false), "\u{AC01}");
        assert_eq!(data.compose("\u{AC01}\u{11A8}", false), "\u{AC01}\u{11A8}");
        // L + V + не T
        assert_eq!(data.compose("\u{1100}\u{1161}x", false), "\u{AC00}x");
        assert_eq!(data.compose("\u{1100}\u{1161}\u{301}", false), "\u{AC00}\u{301}");
        assert_eq!(data.compose("\u{1100}\u{1161}\u{1161}", false), "\u{AC00}\u{1161}");
        assert_eq!(data.compose("\u{1100}\u{1161}\u{11A7}", false), "\u{AC00}\u{11A7}");
        // одиночные гласные и завершающие согласные
        assert_eq!(data.compose("a\u{1161}\u{11A8}", false), "a\u{1161}\u{11A8}");
    }

    #[test]
    fn contiguous_composition()
    {
        let data = data();

        // нестартер между стартером и комбинируемым знаком блокирует композицию в FCC
        assert_eq!(data.compose("a\u{316}\u{301}", false), "\u{E1}\u{316}");
        assert_eq!(data.compose("a\u{316}\u{301}", true), "a\u{316}\u{301}");

        // завершающий CCC стартера больше CCC следующего знака
        assert_eq!(data.compose("\u{E9}\u{316}", false), "\u{E9}\u{316}");
        assert_eq!(data.compose("\u{E9}\u{316}", true), "e\u{316}\u{301}");

        // соседние знаки комбинируются в обоих режимах
        assert_eq!(data.compose("a\u{323}\u{302}", true), "\u{1EAD}");
        assert_eq!(data.compose("a\u{323}\u{302}", false), "\u{1EAD}");
    }

    #[test]
    fn contiguous_composition_keeps_fcd_order()
    {
        let data = data();

        // знак с меньшим CCC после знаков с большим не переставляется в буфере
        let fcc = data.compose("\u{1E36}\u{33A}\u{5B0}", true);
        assert_eq!(fcc, "L\u{5B0}\u{323}\u{33A}");
        assert_eq!(data.compose(&fcc, true), fcc);
        assert!(is_composed(&fcc, true));
        assert!(data.is_normalized(&fcc, crate::Form::Fcd));

        // стык при дописывании
        let mut dest = String::from("\u{389}\u{360}");
        data.compose_and_append(&mut dest, "\u{F7A}a", true, true);
        assert_eq!(dest, "\u{397}\u{F7A}\u{301}\u{360}a");
        assert_eq!(dest, data.compose("\u{389}\u{360}\u{F7A}a", true));
    }

    #[test]
    fn contiguous_composition_after_jamo()
    {
        let data = data();

        // гласные и завершающие согласные чамо без слога перед знаками
        for text in ["\u{1161}\u{5B0}", "\u{350}\u{11AF}\u{347}", "\u{D1}\u{11BB}\u{33B}", "\u{F2}\u{1EC2}\u{11AC}\u{5A5}"] {
            let fcc = data.compose(text, true);

            assert_eq!(fcc, text);
            assert!(is_composed(text, true), "{:?}", text);
            assert_ne!(data.compose_quick_check(text, true, false).0, 0, "{:?}", text);
        }

        assert_eq!(data.compose_quick_check("\u{1161}\u{5B0}", true, false), (5, true));
    }

    #[test]
    fn checks()
    {
        assert!(is_composed("", false));
        assert!(is_composed("abc", false));
        assert!(is_composed("\u{E9}", false));
        assert!(is_composed("\u{E1}\u{301}", false));
        assert!(is_composed("\u{E9}\u{316}", false));
        assert!(is_composed("\u{AC01}", false));

        assert!(!is_composed("e\u{301}", false));
        assert!(!is_composed("a\u{301}\u{301}", false));
        assert!(!is_composed("\u{340}", false));
        assert!(!is_composed("a\u{301}\u{316}", false));
        assert!(!is_composed("\u{1100}\u{1161}", false));
        assert!(!is_composed("\u{AC00}\u{11A8}", false));

        assert!(is_composed("a\u{316}\u{301}", true));
        assert!(!is_composed("\u{E9}\u{316}", true));
    }

    #[test]
    fn quick_checks()
    {
        let data = data();

        assert_eq!(data.compose_quick_check("abc", false, false), (3, false));
        assert_eq!(data.compose_quick_check("e\u{301}", false, false), (3, true));
        assert_eq!(data.compose_quick_check("e\u{301}", false, true), (0, false));
        assert_eq!(data.compose_quick_check("ab\u{340}", false, false), (1, false));
        assert_eq!(data.compose_quick_check("a\u{301}\u{316}", false, false), (0, false));
        assert_eq!(data.compose_quick_check("\u{E9}\u{316}", false, false), (4, false));
        assert_eq!(data.compose_quick_check("\u{E9}\u{316}", true, false), (0, false));
    }

    #[test]
    fn append()
    {
        let data = data();

        let mut dest = String::from("e");
        data.compose_and_append(&mut dest, "\u{301}", true, false);
        assert_eq!(dest, "\u{E9}");

        let mut dest = String::from("\u{1100}");
        data.compose_and_append(&mut dest, "\u{1161}x", true, false);
        assert_eq!(dest, "\u{AC00}x");

        let mut dest = String::from("xa");
        data.compose_and_append(&mut dest, "\u{301}b", false, false);
        assert_eq!(dest, "x\u{E1}b");

        let mut dest = String::from("\u{E9}");
        data.compose_and_append(&mut dest, "b\u{301}", true, false);
        assert_eq!(dest, "\u{E9}b\u{301}");
    }

    #[test]
    fn boundaries()
    {
        let data = data();

        assert!(data.has_comp_boundary_before('a' as u32));
        assert!(data.has_comp_boundary_before(0xE9));
        assert!(data.has_comp_boundary_before(0x212B));
        assert!(data.has_comp_boundary_before(0x2000));
        assert!(!data.has_comp_boundary_before(0x301));
        assert!(!data.has_comp_boundary_before(0x340));
        assert!(!data.has_comp_boundary_before(0x1161));

        assert!(data.has_comp_boundary_after('1' as u32, false, false));
        assert!(data.has_comp_boundary_after(0xAC01, false, false));
        assert!(data.has_comp_boundary_after(0x2000, false, false));
        assert!(!data.has_comp_boundary_after(0x2000, false, true));
        assert!(!data.has_comp_boundary_after('a' as u32, false, false));
        assert!(!data.has_comp_boundary_after(0xAC00, false, false));
        assert!(!data.has_comp_boundary_after(0xE9, false, false));
        assert!(!data.has_comp_boundary_after(0x301, false, false));
    }
}
