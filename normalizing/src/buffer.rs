use crate::data::{NormalizationData, MIN_CCC_LCCC_CP};
use crate::utf8;

/// буфер результата, поддерживающий канонический порядок нестартеров при записи
///
/// между любыми двумя кодпоинтами с CCC = 0 нестартеры упорядочены по неубыванию CCC.
/// пишет непосредственно в строку результата, уже записанное в ней содержимое учитывается
pub(crate) struct ReorderingBuffer<'a>
{
    data: &'a NormalizationData,
    text: &'a mut String,
    /// до этой позиции кодпоинты не переставляются: после неё нет кодпоинтов с CCC <= 1
    reorder_start: usize,
    /// CCC последнего записанного кодпоинта
    last_cc: u8,
}

impl<'a> ReorderingBuffer<'a>
{
    /// буфер поверх строки результата. если строка не пуста, восстанавливаем состояние
    /// по её последним кодпоинтам
    pub fn new(data: &'a NormalizationData, text: &'a mut String) -> Self
    {
        let mut buffer = Self {
            data,
            text,
            reorder_start: 0,
            last_cc: 0,
        };

        let mut position = buffer.text.len();

        if let Some((cc, start)) = buffer.previous_cc(position) {
            buffer.last_cc = cc;

            match cc > 1 {
                true => {
                    position = start;

                    while let Some((cc, start)) = buffer.previous_cc(position) {
                        if cc <= 1 {
                            break;
                        }
                        position = start;
                    }
                }
                false => (),
            }

            buffer.reorder_start = position;
        }

        buffer
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool
    {
        self.text.is_empty()
    }

    #[inline(always)]
    pub fn len(&self) -> usize
    {
        self.text.len()
    }

    #[inline(always)]
    pub fn as_str(&self) -> &str
    {
        self.text
    }

    #[inline(always)]
    pub fn last_cc(&self) -> u8
    {
        self.last_cc
    }

    /// совпадает ли содержимое буфера со строкой
    #[inline(always)]
    pub fn equals(&self, text: &str) -> bool
    {
        self.text.as_str() == text
    }

    /// дописать кодпоинт с известным CCC
    #[inline(always)]
    pub fn append(&mut self, c: char, cc: u8)
    {
        if self.last_cc <= cc || cc == 0 {
            self.text.push(c);
            self.last_cc = cc;

            if cc <= 1 {
                self.reorder_start = self.text.len();
            }
        } else {
            self.insert(c, cc);
        }
    }

    /// дописать отрезок в NFD с известными CCC первого и последнего кодпоинтов
    pub fn append_span(&mut self, span: &str, lead_cc: u8, trail_cc: u8)
    {
        let mut chars = span.chars();

        let first = match chars.next() {
            Some(first) => first,
            None => return,
        };

        if self.last_cc <= lead_cc || lead_cc == 0 {
            if trail_cc <= 1 {
                self.reorder_start = self.text.len() + span.len();
            } else if lead_cc <= 1 {
                self.reorder_start = self.text.len() + first.len_utf8();
            }

            self.text.push_str(span);
            self.last_cc = trail_cc;

            return;
        }

        // первый кодпоинт нарушает порядок - дописываем по одному
        self.insert(first, lead_cc);

        let mut next = chars.next();

        while let Some(c) = next {
            next = chars.next();

            let cc = match next {
                Some(_) => self.data.cc_from_yes_or_maybe(self.data.get_norm16(c as u32)),
                None => trail_cc,
            };

            self.append(c, cc);
        }
    }

    /// дописать кодпоинт с CCC = 0
    #[inline(always)]
    pub fn append_zero_cc_char(&mut self, c: char)
    {
        self.text.push(c);
        self.last_cc = 0;
        self.reorder_start = self.text.len();
    }

    /// дописать отрезок, последний кодпоинт которого имеет CCC = 0 (или не должен участвовать в перестановке)
    #[inline(always)]
    pub fn append_zero_cc(&mut self, span: &str)
    {
        if span.is_empty() {
            return;
        }

        self.text.push_str(span);
        self.last_cc = 0;
        self.reorder_start = self.text.len();
    }

    /// записанное больше не переставляется
    #[inline(always)]
    pub fn flush(&mut self)
    {
        self.reorder_start = self.text.len();
        self.last_cc = 0;
    }

    /// очистить буфер вместе с исходным содержимым строки
    pub fn remove(&mut self)
    {
        self.text.clear();
        self.last_cc = 0;
        self.reorder_start = 0;
    }

    /// удалить последние len байт
    pub fn remove_suffix(&mut self, len: usize)
    {
        let new_len = self.text.len() - len;

        self.text.truncate(new_len);
        self.last_cc = 0;
        self.reorder_start = new_len;
    }

    /// заменить последний кодпоинт (композиция хангыль: чамо L или слог LV заменяются слогом)
    #[inline(always)]
    pub fn set_last_char(&mut self, c: char)
    {
        self.text.pop();
        self.text.push(c);
    }

    /// строка результата для перекомпозиции
    #[inline(always)]
    pub fn string_mut(&mut self) -> &mut String
    {
        self.text
    }

    /// вставить кодпоинт перед последним, чей CCC больше cc
    ///
    /// требует 0 < cc < last_cc, т.е. последний кодпоинт записан после reorder_start
    fn insert(&mut self, c: char, cc: u8)
    {
        // последний кодпоинт точно имеет CCC > cc
        let mut position = match utf8::char_before(self.text, self.text.len()) {
            Some(last) => self.text.len() - last.len_utf8(),
            None => 0,
        };

        while let Some((previous_cc, start)) = self.previous_cc(position) {
            if previous_cc <= cc {
                break;
            }
            position = start;
        }

        self.text.insert(position, c);

        if cc <= 1 {
            self.reorder_start = position + c.len_utf8();
        }
    }

    /// CCC и позиция кодпоинта перед position, None - если дошли до reorder_start
    #[inline(always)]
    fn previous_cc(&self, position: usize) -> Option<(u8, usize)>
    {
        if self.reorder_start >= position {
            return None;
        }

        let c = utf8::char_before(self.text, position)?;
        let start = position - c.len_utf8();
        let code = c as u32;

        let cc = match code < MIN_CCC_LCCC_CP {
            true => 0,
            false => self.data.cc_from_yes_or_maybe(self.data.get_norm16(code)),
        };

        Some((cc, start))
    }
}
