use super::*;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "slidereel_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn touch(dir: &Path, names: &[&str]) {
    for n in names {
        std::fs::write(dir.join(n), b"").unwrap();
    }
}

fn file_names(assets: &[Asset]) -> Vec<String> {
    assets
        .iter()
        .map(|a| {
            Path::new(&a.source)
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

#[test]
fn images_sort_by_numeric_suffix() {
    let dir = temp_dir("discover_numeric");
    touch(
        &dir,
        &[
            "image_10.jpg",
            "image_2.JPG",
            "image_1.png",
            "placeholder.png",
            "notes.txt",
            "cover.webp",
        ],
    );
    let assets = discover_images(&dir).unwrap();
    assert_eq!(
        file_names(&assets),
        ["cover.webp", "image_1.png", "image_2.JPG", "image_10.jpg"]
    );
    assert!(assets.iter().all(|a| a.background.is_none()));
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn layer_pairs_become_one_asset() {
    let dir = temp_dir("discover_layers");
    touch(
        &dir,
        &[
            "image_1.png",
            "image_2_FG.png",
            "image_2_BG.png",
            "image_3_FG.png",
        ],
    );
    let assets = discover_images(&dir).unwrap();
    assert_eq!(assets.len(), 3);
    assert!(assets[1].source.ends_with("image_2_FG.png"));
    assert!(assets[1].background.as_deref().unwrap().ends_with("image_2_BG.png"));
    assert!(assets[2].source.ends_with("image_3_FG.png"));
    assert!(assets[2].background.is_none());
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn narration_skips_background_music() {
    let dir = temp_dir("discover_audio");
    touch(&dir, &["bgmusic.mp3", "voice.wav", "zz.flac", "cover.png"]);
    let narration = discover_narration(&dir).unwrap().unwrap();
    assert_eq!(narration.file_name().unwrap(), "voice.wav");
    let music = discover_background_music(&dir).unwrap().unwrap();
    assert_eq!(music.file_name().unwrap(), "bgmusic.mp3");
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn empty_dir_finds_nothing_and_missing_dir_errors() {
    let dir = temp_dir("discover_empty");
    assert!(discover_images(&dir).unwrap().is_empty());
    assert!(discover_narration(&dir).unwrap().is_none());
    std::fs::remove_dir_all(&dir).ok();
    assert!(discover_images(&dir).is_err());
}

#[test]
fn placeholder_is_used_only_when_nothing_else_exists() {
    let dir = temp_dir("discover_placeholder");
    touch(&dir, &["placeholder.png", "voice.mp3"]);
    let assets = discover_images(&dir).unwrap();
    assert_eq!(file_names(&assets), ["placeholder.png"]);

    touch(&dir, &["image_1.jpg"]);
    let assets = discover_images(&dir).unwrap();
    assert_eq!(file_names(&assets), ["image_1.jpg"]);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn numeric_suffix_parsing() {
    assert_eq!(numeric_suffix("image_12.png"), 12);
    assert_eq!(numeric_suffix("a_b_7.jpg"), 7);
    assert_eq!(numeric_suffix("image.png"), 0);
    assert_eq!(numeric_suffix("image_x.png"), 0);
    assert_eq!(split_layer("image_3_BG.webp"), Some(("image_3.webp".to_string(), false)));
    assert_eq!(split_layer("image_3.webp"), None);
}
