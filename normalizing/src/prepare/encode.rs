use super::norms::{Kind, Norm, Norms};
use crate::data::*;
use crate::error::DataError;
use crate::hangul;
use crate::trie::{CodepointTrie, TrieBuilder, CODEPOINTS_COUNT};

/// закодированные таблицы, ещё не прошедшие проверку
pub(super) struct Encoded
{
    pub thresholds: Thresholds,
    pub trie: CodepointTrie<u16>,
    pub compositions: Vec<u16>,
}

/// раскладка строки композиций:
///
/// списки "maybeYes" | 0xFFFF 0xFFFF, списки "yesYes" | минимальный "yesNo" (слоги хангыль) |
/// "yesNo" со списками | "yesNo" без списков | "noNo"
///
/// norm16 кодпоинтов со списками и декомпозициями - смещения их записей в дополнительных данных
pub(super) fn encode(norms: &Norms) -> Result<Encoded, DataError>
{
    let kinds = (0 .. CODEPOINTS_COUNT)
        .map(|code| norms.classify(code))
        .collect::<Result<Vec<Kind>, DataError>>()?;

    let mut offsets = vec![0u16; CODEPOINTS_COUNT as usize];

    // списки кодпоинтов, комбинирующихся в обе стороны
    let mut maybe: Vec<u16> = vec![];

    for code in codes(&kinds, |kind, _| kind == Kind::MaybeYes, norms) {
        offsets[code as usize] = position(&maybe)?;
        write_compositions(&mut maybe, &norms.get(code).compositions, norms);
    }

    if maybe.len() > (MIN_NORMAL_MAYBE_YES - 2 * MAX_DELTA - 1) as usize {
        return Err(DataError::TooLarge("списки композиций \"maybeYes\""));
    }

    let min_maybe_yes = MIN_NORMAL_MAYBE_YES - maybe.len() as u16;

    // Jamo L указывает на второй из маркеров - пустой список
    let mut extra: Vec<u16> = vec![0xFFFF, 0xFFFF];

    for code in codes(&kinds, |kind, _| kind == Kind::YesYes, norms) {
        offsets[code as usize] = position(&extra)?;
        write_compositions(&mut extra, &norms.get(code).compositions, norms);
    }

    let min_yes_no = position(&extra)?;
    extra.push(0);

    for code in codes(&kinds, |kind, norm| kind == Kind::YesNo && !norm.compositions.is_empty(), norms) {
        let norm = norms.get(code);

        offsets[code as usize] = write_mapping(&mut extra, norm, norms)?;
        write_compositions(&mut extra, &norm.compositions, norms);
    }

    let min_yes_no_mappings_only = position(&extra)?;

    for code in codes(&kinds, |kind, norm| kind == Kind::YesNo && norm.compositions.is_empty(), norms) {
        offsets[code as usize] = write_mapping(&mut extra, norms.get(code), norms)?;
    }

    let min_no_no = position(&extra)?;

    for code in codes(&kinds, |kind, _| kind == Kind::NoNo, norms) {
        offsets[code as usize] = write_mapping(&mut extra, norms.get(code), norms)?;
    }

    let limit_no_no = position(&extra)?;

    if limit_no_no as u32 + 2 * MAX_DELTA as u32 + 1 > min_maybe_yes as u32 {
        return Err(DataError::TooLarge("дополнительные данные пересекаются с алгоритмическими декомпозициями"));
    }

    let mut trie = TrieBuilder::new();
    let mut min_decomp_no_cp = CODEPOINTS_COUNT;
    let mut min_comp_no_maybe_cp = CODEPOINTS_COUNT;

    for (code, &kind) in kinds.iter().enumerate() {
        let code = code as u32;

        let norm16 = match kind {
            Kind::Inert => 0,
            Kind::JamoL => JAMO_L,
            Kind::JamoVT => JAMO_VT,
            Kind::Hangul => min_yes_no,
            Kind::YesYes | Kind::YesNo | Kind::NoNo => offsets[code as usize],
            Kind::MaybeYes => min_maybe_yes + offsets[code as usize],
            Kind::Algorithmic(delta) => ((min_maybe_yes - MAX_DELTA - 1) as i32 + delta) as u16,
            Kind::MaybeYesSimple(cc) => MIN_NORMAL_MAYBE_YES | cc as u16,
            Kind::YesYesWithCC(cc) => JAMO_VT + cc as u16,
        };

        if norm16 != 0 {
            trie.set(code, norm16);
        }

        let decomp_yes_and_zero_cc = matches!(
            kind,
            Kind::Inert | Kind::JamoL | Kind::JamoVT | Kind::YesYes | Kind::MaybeYes | Kind::MaybeYesSimple(0)
        );

        if !decomp_yes_and_zero_cc {
            min_decomp_no_cp = min_decomp_no_cp.min(code);
        }

        let comp_yes_and_zero_cc = matches!(kind, Kind::Inert | Kind::JamoL | Kind::YesYes | Kind::Hangul | Kind::YesNo);

        if !comp_yes_and_zero_cc {
            min_comp_no_maybe_cp = min_comp_no_maybe_cp.min(code);
        }
    }

    let mut compositions = maybe;
    compositions.extend(extra);

    Ok(Encoded {
        thresholds: Thresholds {
            min_decomp_no_cp,
            min_comp_no_maybe_cp,
            min_yes_no,
            min_yes_no_mappings_only,
            min_no_no,
            limit_no_no,
            min_maybe_yes,
        },
        trie: trie.build(),
        compositions,
    })
}

/// кодпоинты заданного вида по возрастанию
fn codes<'a>(
    kinds: &'a [Kind],
    filter: impl Fn(Kind, &Norm) -> bool + 'a,
    norms: &'a Norms,
) -> impl Iterator<Item = u32> + 'a
{
    kinds
        .iter()
        .enumerate()
        .filter(move |&(code, &kind)| filter(kind, norms.get(code as u32)))
        .map(|(code, _)| code as u32)
}

/// следующая позиция в данных как значение norm16
fn position(units: &[u16]) -> Result<u16, DataError>
{
    match units.len() < MIN_NORMAL_MAYBE_YES as usize {
        true => Ok(units.len() as u16),
        false => Err(DataError::TooLarge("дополнительные данные")),
    }
}

#[inline(always)]
fn utf16(chars: &[char]) -> Vec<u16>
{
    let mut units = Vec::with_capacity(chars.len() * 2);
    let mut buffer = [0; 2];

    for c in chars {
        units.extend_from_slice(c.encode_utf16(&mut buffer));
    }

    units
}

/// запись декомпозиции: [исходная декомпозиция] [слово CCC] заголовок декомпозиция.
/// возвращает позицию заголовка
fn write_mapping(extra: &mut Vec<u16>, norm: &Norm, norms: &Norms) -> Result<u16, DataError>
{
    let units = utf16(&norm.mapping);

    if units.len() > MAPPING_LENGTH_MASK as usize {
        return Err(DataError::TooLarge("декомпозиция длиннее 31 единицы UTF-16"));
    }

    let lead_cc = norm.mapping.first().map_or(0, |&c| norms.cc(c));
    let trail_cc = norm.mapping.last().map_or(0, |&c| norms.cc(c));

    let mut first_unit = units.len() as u16 | (trail_cc as u16) << 8;

    if let Some(raw) = &norm.raw {
        let raw_units = utf16(raw);

        // сжатая форма: первая единица исходной декомпозиции заменяет две первые единицы полной
        let compressed = !raw_units.is_empty()
            && raw_units[0] > MAPPING_LENGTH_MASK
            && units.len() >= 2
            && raw_units[1 ..] == units[2 ..];

        match compressed {
            true => extra.push(raw_units[0]),
            false => {
                if raw_units.len() > MAPPING_LENGTH_MASK as usize {
                    return Err(DataError::TooLarge("исходная декомпозиция длиннее 31 единицы UTF-16"));
                }

                extra.extend_from_slice(&raw_units);
                extra.push(raw_units.len() as u16);
            }
        }

        first_unit |= MAPPING_HAS_RAW_MAPPING;
    }

    if norm.cc != 0 || lead_cc != 0 {
        extra.push((lead_cc as u16) << 8 | norm.cc as u16);
        first_unit |= MAPPING_HAS_CCC_LCCC_WORD;
    }

    if no_comp_boundary_after(norm, trail_cc, norms) {
        first_unit |= MAPPING_NO_COMP_BOUNDARY_AFTER;
    }

    let offset = position(extra)?;

    extra.push(first_unit);
    extra.extend_from_slice(&units);

    Ok(offset)
}

/// после кодпоинта может начаться композиция со следующими
fn no_comp_boundary_after(norm: &Norm, trail_cc: u8, norms: &Norms) -> bool
{
    let last = match norm.mapping.last() {
        Some(&last) => last,
        None => return true,
    };

    let code = last as u32;

    !norm.compositions.is_empty()
        || trail_cc != 0
        || norms.combines_forward(last)
        || hangul::jamo_l(code).is_some()
        || hangul::jamo_v(code).is_some()
        || hangul::jamo_t(code).is_some()
}

/// список композиций, отсортированный по ключам второго кодпоинта
fn write_compositions(units: &mut Vec<u16>, compositions: &[(char, char)], norms: &Norms)
{
    let mut entries: Vec<Vec<u16>> = compositions
        .iter()
        .map(|&(trail, composite)| {
            let composite_and_fwd = (composite as u32) << 1 | norms.combines_forward(composite) as u32;
            let trail = trail as u32;

            match trail < COMP_1_TRAIL_LIMIT as u32 {
                true => match composite_and_fwd <= 0xFFFF {
                    true => vec![(trail << 1) as u16, composite_and_fwd as u16],
                    false => vec![
                        (trail << 1) as u16 | COMP_1_TRIPLE,
                        (composite_and_fwd >> 16) as u16,
                        composite_and_fwd as u16,
                    ],
                },
                false => vec![
                    (COMP_1_TRAIL_LIMIT + (((trail >> COMP_1_TRAIL_SHIFT) as u16) & !COMP_1_TRIPLE)) | COMP_1_TRIPLE,
                    ((trail << COMP_2_TRAIL_SHIFT) as u16) | (composite_and_fwd >> 16) as u16,
                    composite_and_fwd as u16,
                ],
            }
        })
        .collect();

    entries.sort_by_key(|entry| (entry[0] & COMP_1_TRAIL_MASK, entry[1]));

    if let Some(last) = entries.last_mut() {
        last[0] |= COMP_1_LAST_TUPLE;
    }

    entries.iter().for_each(|entry| units.extend_from_slice(entry));
}
