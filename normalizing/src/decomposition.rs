use crate::buffer::ReorderingBuffer;
use crate::data::{units_to_string, NormalizationData, MAPPING_HAS_CCC_LCCC_WORD, MAPPING_LENGTH_MASK,
                  MAPPING_UTF8_CAPACITY, MIN_NORMAL_MAYBE_YES};
use crate::hangul;
use crate::utf8;

impl NormalizationData
{
    /// NFD
    pub fn decompose(&self, text: &str) -> String
    {
        let mut result = String::with_capacity(text.len());
        let mut buffer = ReorderingBuffer::new(self, &mut result);

        self.decompose_text(text, Some(&mut buffer));

        result
    }

    /// дописать к уже нормализованной строке dest текст text, нормализовав стык.
    /// если do_decompose = false, text уже в NFD
    pub fn decompose_and_append(&self, dest: &mut String, text: &str, do_decompose: bool)
    {
        let mut buffer = ReorderingBuffer::new(self, dest);
        self.decompose_and_append_to_buffer(text, do_decompose, &mut buffer);
    }

    pub(crate) fn decompose_and_append_to_buffer(
        &self,
        text: &str,
        do_decompose: bool,
        buffer: &mut ReorderingBuffer,
    )
    {
        if do_decompose {
            self.decompose_text(text, Some(buffer));
            return;
        }

        // нестартеры в начале text могут потребовать перестановки с концом dest
        let mut first_cc = None;
        let mut prev_cc = 0;
        let mut src = 0;

        for c in text.chars() {
            let cc = self.get_cc(self.get_norm16(c as u32));
            first_cc.get_or_insert(cc);

            if cc == 0 {
                break;
            }

            prev_cc = cc;
            src += c.len_utf8();
        }

        buffer.append_span(&text[.. src], first_cc.unwrap_or(0), prev_cc);
        buffer.append_zero_cc(&text[src ..]);
    }

    /// длина начального отрезка text, который точно находится в NFD
    pub(crate) fn decompose_quick_check(&self, text: &str) -> usize
    {
        self.decompose_text(text, None)
    }

    /// общий цикл нормализации и быстрой проверки NFD
    ///
    /// с буфером - записываем NFD в буфер и возвращаем длину text,
    /// без буфера - возвращаем границу, начиная с которой текст может быть не в NFD
    pub(crate) fn decompose_text(&self, text: &str, mut buffer: Option<&mut ReorderingBuffer>) -> usize
    {
        let min_lead = utf8::lead_byte(self.min_decomp_no_cp);
        let min_no_cp = self.min_decomp_no_cp;

        let mut src = 0;

        // только для быстрой проверки
        let mut prev_boundary = 0;
        let mut prev_cc = 0;

        loop {
            let prev_src = src;

            // пропускаем кодпоинты без декомпозиции с CCC = 0
            let (stop, current) = utf8::scan(text, src, min_lead, |c| {
                let norm16 = self.get_norm16(c as u32);

                match (c as u32) < min_no_cp || self.is_most_decomp_yes_and_zero_cc(norm16) {
                    true => None,
                    false => Some(norm16),
                }
            });

            src = stop;

            // всё пропущенное пишем одним куском
            if src != prev_src {
                match buffer.as_deref_mut() {
                    Some(buffer) => buffer.append_zero_cc(&text[prev_src .. src]),
                    None => {
                        prev_cc = 0;
                        prev_boundary = src;
                    }
                }
            }

            let (c, norm16) = match current {
                Some(current) => current,
                None => break,
            };

            src += c.len_utf8();

            match buffer.as_deref_mut() {
                Some(buffer) => self.decompose_char(c, norm16, buffer),
                None => {
                    if self.is_decomp_yes(norm16) {
                        let cc = self.cc_from_yes_or_maybe(norm16);

                        if prev_cc <= cc || cc == 0 {
                            prev_cc = cc;

                            if cc <= 1 {
                                prev_boundary = src;
                            }

                            continue;
                        }
                    }

                    // декомпозиция или нарушен порядок CCC
                    return prev_boundary;
                }
            }
        }

        src
    }

    /// декомпозиция короткого отрезка без быстрого цикла
    #[inline(always)]
    pub(crate) fn decompose_short(&self, text: &str, buffer: &mut ReorderingBuffer)
    {
        for c in text.chars() {
            self.decompose_char(c, self.get_norm16(c as u32), buffer);
        }
    }

    /// записать в буфер декомпозицию кодпоинта
    pub(crate) fn decompose_char(&self, c: char, norm16: u16, buffer: &mut ReorderingBuffer)
    {
        let mut c = c;
        let mut norm16 = norm16;

        // алгоритмическая декомпозиция ведёт к кодпоинту без алгоритмической декомпозиции
        // (проверяется при загрузке данных), поэтому цикл повторяется не более одного раза
        loop {
            if self.is_decomp_yes(norm16) {
                buffer.append(c, self.cc_from_yes_or_maybe(norm16));
            } else if self.is_hangul(norm16) {
                let (l, v, t) = hangul::decompose(c as u32);

                buffer.append_zero_cc_char(l);
                buffer.append_zero_cc_char(v);

                if let Some(t) = t {
                    buffer.append_zero_cc_char(t);
                }
            } else if self.is_decomp_no_algorithmic(norm16) {
                let code = self.map_algorithmic(c as u32, norm16);

                c = match char::from_u32(code) {
                    Some(mapped) => mapped,
                    None => return,
                };
                norm16 = self.get_norm16(code);

                continue;
            } else {
                let mapping = self.mapping(norm16);
                let mut bytes = [0; MAPPING_UTF8_CAPACITY];

                buffer.append_span(mapping.to_utf8(&mut bytes), mapping.lead_cc(), mapping.trail_cc());
            }

            return;
        }
    }

    /// полная декомпозиция кодпоинта, None - кодпоинт не декомпозируется
    pub fn get_decomposition(&self, code: u32) -> Option<String>
    {
        let mut code = code;
        let mut mapped = false;

        loop {
            let norm16 = self.get_norm16(code);

            if code < self.min_decomp_no_cp || self.is_decomp_yes(norm16) {
                break;
            }

            if self.is_hangul(norm16) {
                let (l, v, t) = hangul::decompose(code);
                return Some([Some(l), Some(v), t].into_iter().flatten().collect());
            }

            if self.is_decomp_no_algorithmic(norm16) {
                code = self.map_algorithmic(code, norm16);
                mapped = true;
                continue;
            }

            return Some(units_to_string(self.mapping(norm16).units));
        }

        match mapped {
            true => char::from_u32(code).map(String::from),
            false => None,
        }
    }

    /// исходная (не рекурсивная) декомпозиция кодпоинта
    pub fn get_raw_decomposition(&self, code: u32) -> Option<String>
    {
        let norm16 = self.get_norm16(code);

        if code < self.min_decomp_no_cp || self.is_decomp_yes(norm16) {
            return None;
        }

        if self.is_hangul(norm16) {
            let (first, second) = hangul::raw_decompose(code);
            return Some([first, second].into_iter().collect());
        }

        if self.is_decomp_no_algorithmic(norm16) {
            return char::from_u32(self.map_algorithmic(code, norm16)).map(String::from);
        }

        let mapping = self.mapping(norm16);

        Some(match self.raw_mapping_units(&mapping) {
            Some(raw) => units_to_string(&raw),
            None => units_to_string(mapping.units),
        })
    }

    /// есть ли граница декомпозиции до (before = true) или после кодпоинта
    pub fn has_decomp_boundary(&self, code: u32, before: bool) -> bool
    {
        let mut code = code;

        loop {
            if code < self.min_decomp_no_cp {
                return true;
            }

            let norm16 = self.get_norm16(code);

            if self.is_hangul(norm16) || self.is_decomp_yes_and_zero_cc(norm16) {
                return true;
            }

            if norm16 > MIN_NORMAL_MAYBE_YES {
                // CCC != 0
                return false;
            }

            if self.is_decomp_no_algorithmic(norm16) {
                code = self.map_algorithmic(code, norm16);
                continue;
            }

            let mapping = self.mapping(norm16);
            let first_unit = mapping.first_unit;

            if first_unit & MAPPING_LENGTH_MASK == 0 {
                return false;
            }

            if !before {
                // завершающий CCC > 1
                if first_unit > 0x1FF {
                    return false;
                }

                // завершающий CCC = 0
                if first_unit <= 0xFF {
                    return true;
                }

                // завершающий CCC = 1: проверяем ведущий, как для границы перед кодпоинтом
            }

            return first_unit & MAPPING_HAS_CCC_LCCC_WORD == 0 || mapping.ccc_word & 0xFF00 == 0;
        }
    }

    /// кодпоинт не декомпозируется и не взаимодействует с соседями при декомпозиции
    pub fn is_decomp_inert(&self, code: u32) -> bool
    {
        self.is_decomp_yes_and_zero_cc(self.get_norm16(code))
    }
}
