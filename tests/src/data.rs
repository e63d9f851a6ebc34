use std::fs;
use std::path::Path;

/// тексты на разных языках, отсортированные по названию файла
pub fn files() -> Vec<(String, String)>
{
    let mut data: Vec<(String, String)> = fs::read_dir("./../test_data/texts")
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "txt"))
        .map(|path| (name(&path), fs::read_to_string(&path).unwrap()))
        .collect();

    assert!(!data.is_empty(), "нет тестовых текстов");

    data.sort_by(|a, b| a.0.cmp(&b.0));

    data
}

/// название файла без расширения
fn name(path: &Path) -> String
{
    path.file_stem().unwrap().to_string_lossy().into_owned()
}
