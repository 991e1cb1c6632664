//! Shared capsule fixtures for integration tests.

#![allow(dead_code)]

use capsule::storage::MemoryStorage;

pub const MANIFEST: &str = "\
# news
01_news.pdf | НОВОСТЬ | Выборы | Итоги голосования | 2024-01-01 | политика,выборы,город,итоги,новости
02_news.pdf | НОВОСТЬ | Погода | Снег в марте | 2024-03-02 | погода,снег,весна,город,новости
03_news.pdf | НОВОСТЬ | Транспорт | Новый мост | 2024-04-10 | мост,транспорт,город,стройка,новости
04_news.jpg | НОВОСТЬ | Спорт | Победа команды | 2024-05-05 | спорт,футбол,команда,победа,новости
05_news.jpg | НОВОСТЬ | Культура | Открытие музея | 2024-06-01 | музей,культура,город,выставка,новости

# personal
06_personal.jpg | ЛИЧНОЕ | 2024-07-01 | Дача | лето,семья,дача,отдых,фото
07_personal.jpg | ЛИЧНОЕ | 2024-07-15 | Выпускной | школа,выпуск,друзья,праздник,фото

# memes
08_meme.png | МЕМ | 2024-08-01 | Кот | кот,юмор,интернет,мем,картинка
09_meme.png | МЕМ | 2024-08-02 | Пёс | пёс,юмор,интернет,мем,картинка
10_meme.png | МЕМ | 2024-08-03 | Работа | офис,юмор,работа,мем,картинка
11_meme.png | МЕМ | 2024-08-04 | Учёба | учёба,юмор,сессия,мем,картинка
12_meme.png | МЕМ | 2024-08-05 | Лето | жара,юмор,лето,мем,картинка

capsule.txt | КАПСУЛА | 2024-12-31 | Анна Иванова
";

pub fn words(count: usize) -> Vec<u8> {
    vec!["слово"; count].join(" ").into_bytes()
}

/// Every file a complete capsule needs, manifest included.
pub fn complete_files() -> Vec<(String, Vec<u8>)> {
    let mut files = vec![("manifest.txt".to_string(), MANIFEST.as_bytes().to_vec())];

    for name in [
        "01_news.pdf",
        "02_news.pdf",
        "03_news.pdf",
        "04_news.jpg",
        "05_news.jpg",
        "capsule.txt",
    ] {
        files.push((name.to_string(), b"content".to_vec()));
    }
    for i in 6..=7 {
        files.push((format!("{:02}_personal.jpg", i), b"jpeg".to_vec()));
        files.push((format!("{:02}_personal_объяснение.txt", i), words(120)));
    }
    for i in 8..=12 {
        files.push((format!("{:02}_meme.png", i), b"png".to_vec()));
        files.push((format!("{:02}_meme_explanation.txt", i), words(60)));
    }

    files
}

pub fn complete_storage() -> MemoryStorage {
    let mut storage = MemoryStorage::new();
    for (name, content) in complete_files() {
        storage.insert(name, content);
    }
    storage
}
