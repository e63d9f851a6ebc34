use crate::buffer::ReorderingBuffer;
use crate::composition::last_char_start;
use crate::data::{NormalizationData, MIN_CCC_LCCC_CP};
use crate::utf8;

// FCD: для любых двух соседних кодпоинтов завершающий CCC левого не больше ведущего CCC правого.
// fcd16: старший байт - ведущий CCC, младший - завершающий

impl NormalizationData
{
    /// FCD
    pub fn make_fcd(&self, text: &str) -> String
    {
        let mut result = String::with_capacity(text.len());
        let mut buffer = ReorderingBuffer::new(self, &mut result);

        self.make_fcd_text(text, Some(&mut buffer));

        result
    }

    /// дописать к строке в FCD текст text, исправив порядок на стыке.
    /// если do_make_fcd = false, text уже в FCD
    pub fn make_fcd_and_append(&self, dest: &mut String, text: &str, do_make_fcd: bool)
    {
        let mut buffer = ReorderingBuffer::new(self, dest);
        self.make_fcd_and_append_to_buffer(text, do_make_fcd, &mut buffer);
    }

    pub(crate) fn make_fcd_and_append_to_buffer(&self, text: &str, do_make_fcd: bool, buffer: &mut ReorderingBuffer)
    {
        let mut src = 0;

        if !buffer.is_empty() {
            let first_boundary = self.find_next_fcd_boundary(text, 0);

            if first_boundary != 0 {
                let last_boundary = self.find_previous_fcd_boundary(buffer.as_str(), buffer.len());

                let mut middle = String::with_capacity(buffer.len() - last_boundary + first_boundary);
                middle.push_str(&buffer.as_str()[last_boundary ..]);
                middle.push_str(&text[.. first_boundary]);

                buffer.remove_suffix(buffer.len() - last_boundary);
                self.make_fcd_text(&middle, Some(buffer));

                src = first_boundary;
            }
        }

        match do_make_fcd {
            true => {
                self.make_fcd_text(&text[src ..], Some(buffer));
            }
            false => buffer.append_zero_cc(&text[src ..]),
        }
    }

    /// общий цикл FCD и его быстрой проверки
    ///
    /// с буфером - записываем FCD в буфер и возвращаем длину text,
    /// без буфера - возвращаем длину начального отрезка в FCD
    pub(crate) fn make_fcd_text(&self, text: &str, mut buffer: Option<&mut ReorderingBuffer>) -> usize
    {
        let min_lead = utf8::lead_byte(MIN_CCC_LCCC_CP);

        // последняя граница FCD: перед кодпоинтом с ведущим CCC = 0 или после завершающего CCC <= 1
        let mut prev_boundary = 0;
        let mut prev_fcd16 = 0;
        let mut src = 0;

        loop {
            let mut prev_src = src;

            // пропускаем кодпоинты с ведущим CCC = 0
            let (stop, current) = utf8::scan(text, src, min_lead, |c| {
                let fcd16 = self.get_fcd16(c as u32);

                match fcd16 <= 0xFF {
                    true => None,
                    false => Some(fcd16),
                }
            });

            src = stop;

            if src != prev_src {
                if current.is_none() {
                    if let Some(buffer) = buffer.as_deref_mut() {
                        buffer.append_zero_cc(&text[prev_src .. src]);
                    }
                    break;
                }

                // последний пропущенный кодпоинт может потребовать декомпозиции
                let prev = last_char_start(text, src);

                prev_fcd16 = utf8::char_at(text, prev).map_or(0, |c| self.get_fcd16(c as u32));
                prev_boundary = match prev_fcd16 > 1 {
                    true => prev,
                    false => src,
                };

                if let Some(buffer) = buffer.as_deref_mut() {
                    buffer.append_zero_cc(&text[prev_src .. prev_boundary]);
                    buffer.append_zero_cc(&text[prev_boundary .. src]);
                }

                prev_src = src;
            }

            let (c, fcd16) = match current {
                Some(current) => current,
                None => break,
            };

            src += c.len_utf8();

            // ведущий CCC текущего кодпоинта не меньше завершающего CCC предыдущего
            if (prev_fcd16 & 0xFF) <= (fcd16 >> 8) {
                if fcd16 & 0xFF <= 1 {
                    prev_boundary = src;
                }

                if let Some(buffer) = buffer.as_deref_mut() {
                    buffer.append_zero_cc_char(c);
                }

                prev_fcd16 = fcd16;
                continue;
            }

            let buffer = match buffer.as_deref_mut() {
                Some(buffer) => buffer,
                None => return prev_boundary,
            };

            // откатываем уже записанное и декомпозируем отрезок до следующей границы
            buffer.remove_suffix(prev_src - prev_boundary);
            src = self.find_next_fcd_boundary(text, src);

            self.decompose_short(&text[prev_boundary .. src], buffer);

            prev_boundary = src;
            prev_fcd16 = 0;
        }

        src
    }

    /// граница FCD перед кодпоинтом: ведущий CCC = 0
    #[inline(always)]
    pub fn has_fcd_boundary_before(&self, code: u32) -> bool
    {
        code < MIN_CCC_LCCC_CP || self.get_fcd16(code) <= 0xFF
    }

    /// граница FCD после кодпоинта: завершающий CCC = 0
    #[inline(always)]
    pub fn has_fcd_boundary_after(&self, code: u32) -> bool
    {
        let fcd16 = self.get_fcd16(code);

        fcd16 <= 1 || fcd16 & 0xFF == 0
    }

    #[inline(always)]
    pub fn is_fcd_inert(&self, code: u32) -> bool
    {
        self.get_fcd16(code) <= 1
    }

    fn find_previous_fcd_boundary(&self, text: &str, position: usize) -> usize
    {
        let mut position = position;

        while let Some(c) = utf8::char_before(text, position) {
            position -= c.len_utf8();

            if self.has_fcd_boundary_before(c as u32) {
                break;
            }
        }

        position
    }

    fn find_next_fcd_boundary(&self, text: &str, position: usize) -> usize
    {
        let mut position = position;

        while let Some(c) = utf8::char_at(text, position) {
            if self.has_fcd_boundary_before(c as u32) {
                break;
            }

            position += c.len_utf8();
        }

        position
    }
}
