use std::collections::HashSet;

use super::*;

/// согласованность границ диапазонов norm16
pub(super) fn thresholds(thresholds: &Thresholds, compositions_len: usize) -> Result<(), DataError>
{
    let t = thresholds;

    if t.min_yes_no < 2 {
        return Err(DataError::Thresholds("minYesNo меньше 2"));
    }

    if !(t.min_yes_no <= t.min_yes_no_mappings_only
        && t.min_yes_no_mappings_only <= t.min_no_no
        && t.min_no_no <= t.limit_no_no)
    {
        return Err(DataError::Thresholds("нарушен порядок minYesNo / minYesNoMappingsOnly / minNoNo / limitNoNo"));
    }

    if t.min_maybe_yes > MIN_NORMAL_MAYBE_YES {
        return Err(DataError::Thresholds("minMaybeYes больше MIN_NORMAL_MAYBE_YES"));
    }

    if t.limit_no_no as u32 + 2 * MAX_DELTA as u32 + 1 > t.min_maybe_yes as u32 {
        return Err(DataError::Thresholds("диапазон алгоритмических декомпозиций не помещается перед minMaybeYes"));
    }

    if compositions_len < (MIN_NORMAL_MAYBE_YES - t.min_maybe_yes) as usize + t.limit_no_no as usize {
        return Err(DataError::Thresholds("дополнительные данные короче limitNoNo"));
    }

    if t.min_decomp_no_cp > 0x110000 || t.min_comp_no_maybe_cp > 0x110000 {
        return Err(DataError::Thresholds("пороговый кодпоинт за пределами Unicode"));
    }

    Ok(())
}

/// проверка всех значений trie и данных, на которые они ссылаются
pub(super) fn values(data: &NormalizationData) -> Result<(), DataError>
{
    let mut checked: HashSet<u16> = HashSet::new();

    for (start, end, norm16) in data.trie.ranges() {
        let band = data.band(norm16).ok_or(DataError::UnknownBand {
            code: start,
            norm16,
        })?;

        if start < data.min_decomp_no_cp && !data.is_decomp_yes_and_zero_cc(norm16) {
            return Err(DataError::Thresholds("кодпоинт до minDecompNoCP декомпозируется"));
        }

        if start < data.min_comp_no_maybe_cp && !data.is_comp_yes_and_zero_cc(norm16) {
            return Err(DataError::Thresholds("кодпоинт до minCompNoMaybeCP не проходит быструю проверку"));
        }

        // алгоритмическая декомпозиция зависит от кодпоинта, проверяем каждый
        if let Band::NoNoAlgorithmic(_) = band {
            for code in start ..= end {
                algorithmic(data, code, norm16)?;
            }
            continue;
        }

        if !checked.insert(norm16) {
            continue;
        }

        match band {
            Band::YesYesCombinesForward | Band::MaybeYesCombinesForward => {
                if let Some(list) = data.compositions_list_for_decomp_yes(norm16) {
                    compositions_list(data, list)?;
                }
            }
            Band::YesNoCombinesForward => {
                mapping(data, norm16)?;
                compositions_list(data, data.compositions_list_for_composite(norm16))?;
            }
            Band::YesNoMappingOnly | Band::NoNo => mapping(data, norm16)?,
            _ => (),
        }
    }

    small_fcd(data)
}

/// битовая карта small FCD не должна скрывать кодпоинты с ненулевым fcd16
fn small_fcd(data: &NormalizationData) -> Result<(), DataError>
{
    for (start, end, norm16) in data.trie.ranges() {
        if data.is_inert(norm16) || data.is_hangul(norm16) {
            continue;
        }

        for code in start ..= end {
            let fcd16 = data.get_fcd16_from_norm_data(code);

            if fcd16 == 0 {
                continue;
            }

            // кодпоинты до U+0300 не могут иметь ненулевой ведущий CCC
            if code < MIN_CCC_LCCC_CP && fcd16 > 0xFF {
                return Err(DataError::Thresholds("ненулевой ведущий CCC до U+0300"));
            }

            let lead = match code <= 0xFFFF {
                true => code,
                false => 0xD7C0 + (code >> 10),
            };

            if !data.single_lead_might_have_non_zero_fcd16(lead) {
                return Err(DataError::Thresholds("битовая карта small FCD пропускает кодпоинт с ненулевым fcd16"));
            }
        }
    }

    Ok(())
}

/// алгоритмическая декомпозиция должна вести к корректному кодпоинту без алгоритмической декомпозиции
fn algorithmic(data: &NormalizationData, code: u32, norm16: u16) -> Result<(), DataError>
{
    let target = data.map_algorithmic(code, norm16);

    if char::from_u32(target).is_none() {
        return Err(DataError::Mapping {
            norm16,
            reason: "алгоритмическая декомпозиция за пределами Unicode",
        });
    }

    match data.band(data.get_norm16(target)) {
        Some(Band::NoNoAlgorithmic(_)) | None => Err(DataError::AlgorithmicChain { code }),
        Some(_) => Ok(()),
    }
}

/// запись декомпозиции в дополнительных данных
fn mapping(data: &NormalizationData, norm16: u16) -> Result<(), DataError>
{
    let error = |reason| DataError::Mapping { norm16, reason };

    let offset = norm16 as usize;
    let first_unit = data.extra(offset);
    let len = (first_unit & MAPPING_LENGTH_MASK) as usize;
    let has_ccc_word = first_unit & MAPPING_HAS_CCC_LCCC_WORD != 0;

    if data.extra_offset + offset + 1 + len > data.compositions.len() {
        return Err(error("декомпозиция выходит за пределы данных"));
    }

    if has_ccc_word && offset < 1 {
        return Err(error("слово CCC перед началом данных"));
    }

    if char::decode_utf16(data.extra_slice(offset + 1, len).iter().copied()).any(|c| c.is_err()) {
        return Err(error("декомпозиция - некорректная UTF-16 строка"));
    }

    if first_unit & MAPPING_HAS_RAW_MAPPING != 0 {
        let raw = match offset.checked_sub(has_ccc_word as usize + 1) {
            Some(raw) => raw,
            None => return Err(error("исходная декомпозиция перед началом данных")),
        };

        let rm0 = data.extra(raw);

        match rm0 <= MAPPING_LENGTH_MASK {
            true => {
                let from = match raw.checked_sub(rm0 as usize) {
                    Some(from) => from,
                    None => return Err(error("исходная декомпозиция перед началом данных")),
                };

                if char::decode_utf16(data.extra_slice(from, rm0 as usize).iter().copied())
                    .any(|c| c.is_err())
                {
                    return Err(error("исходная декомпозиция - некорректная UTF-16 строка"));
                }
            }
            false => {
                if len < 2 {
                    return Err(error("сжатая исходная декомпозиция при декомпозиции короче двух единиц"));
                }
            }
        }
    }

    Ok(())
}

/// список композиций должен заканчиваться внутри данных и содержать корректные кодпоинты
fn compositions_list(data: &NormalizationData, index: usize) -> Result<(), DataError>
{
    let error = |reason| DataError::CompositionList { index, reason };
    let units = &data.compositions;

    let mut position = index;

    loop {
        let first_unit = *units.get(position).ok_or(error("список выходит за пределы данных"))?;
        let len = 2 + (first_unit & COMP_1_TRIPLE) as usize;

        if position + len > units.len() {
            return Err(error("запись выходит за пределы данных"));
        }

        let composite_and_fwd = match first_unit & COMP_1_TRIPLE {
            0 => units[position + 1] as u32,
            _ => (((units[position + 1] & !COMP_2_TRAIL_MASK) as u32) << 16) | units[position + 2] as u32,
        };

        let composite = composite_and_fwd >> 1;

        if char::from_u32(composite).is_none() {
            return Err(error("некорректный составной кодпоинт"));
        }

        if composite_and_fwd & 1 != 0
            && data.band(data.get_norm16(composite)) != Some(Band::YesNoCombinesForward)
        {
            return Err(error("составной кодпоинт отмечен как комбинируемый, но не имеет списка композиций"));
        }

        if first_unit & COMP_1_LAST_TUPLE != 0 {
            return Ok(());
        }

        position += len;
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn canonical_data_is_consistent()
    {
        let data = NormalizationData::canonical();

        assert_eq!(thresholds(&data.thresholds(), data.compositions.len()), Ok(()));
        assert_eq!(values(data), Ok(()));
    }

    #[test]
    fn broken_thresholds()
    {
        let data = NormalizationData::canonical();
        let len = data.compositions.len();

        let mut t = data.thresholds();
        t.min_yes_no = 1;
        assert!(matches!(thresholds(&t, len), Err(DataError::Thresholds(_))));

        let mut t = data.thresholds();
        t.min_no_no = t.limit_no_no + 1;
        assert!(matches!(thresholds(&t, len), Err(DataError::Thresholds(_))));

        let mut t = data.thresholds();
        t.limit_no_no = t.min_maybe_yes - MAX_DELTA;
        assert!(matches!(thresholds(&t, len), Err(DataError::Thresholds(_))));

        let t = data.thresholds();
        assert!(matches!(thresholds(&t, 10), Err(DataError::Thresholds(_))));
    }
}
