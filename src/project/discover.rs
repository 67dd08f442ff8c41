use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::{
    foundation::error::{ReelError, ReelResult},
    timeline::model::Asset,
};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "aac", "flac"];
const PLACEHOLDER: &str = "placeholder.png";
const MUSIC_PREFIX: &str = "bgmusic";

/// Find slideshow images in `dir` and order them by numeric suffix.
///
/// `image_2.jpg` sorts before `image_10.jpg`; names without a `_<n>.` suffix
/// count as 0 and ties fall back to the file name. `<stem>_FG.<ext>` and
/// `<stem>_BG.<ext>` are paired into one layered asset ordered by `<stem>`.
/// An unpaired layer is used as a plain image. `placeholder.png` is ignored
/// unless it is the only image, in which case it is returned alone.
#[tracing::instrument]
pub fn discover_images(dir: &Path) -> ReelResult<Vec<Asset>> {
    let names = list_files(dir, IMAGE_EXTENSIONS)?;

    let mut layers: BTreeMap<String, (Option<String>, Option<String>)> = BTreeMap::new();
    let mut entries: Vec<(u64, String, Asset)> = Vec::new();
    let mut has_placeholder = false;
    for name in names {
        if name == PLACEHOLDER {
            has_placeholder = true;
            continue;
        }
        match split_layer(&name) {
            Some((key, true)) => layers.entry(key).or_default().0 = Some(name),
            Some((key, false)) => layers.entry(key).or_default().1 = Some(name),
            None => entries.push((numeric_suffix(&name), name.clone(), asset_for(dir, &name, None))),
        }
    }

    for (key, pair) in layers {
        match pair {
            (Some(fg), Some(bg)) => {
                entries.push((numeric_suffix(&key), key, asset_for(dir, &fg, Some(&bg))));
            }
            (Some(single), None) | (None, Some(single)) => {
                tracing::warn!(file = %single, "layer without its counterpart; using it as a plain image");
                entries.push((numeric_suffix(&key), key, asset_for(dir, &single, None)));
            }
            (None, None) => {}
        }
    }

    if entries.is_empty() && has_placeholder {
        tracing::warn!(dir = %dir.display(), "no images found; using placeholder");
        return Ok(vec![asset_for(dir, PLACEHOLDER, None)]);
    }

    entries.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    tracing::debug!(count = entries.len(), "discovered images");
    Ok(entries.into_iter().map(|(_, _, asset)| asset).collect())
}

/// First narration audio file in `dir` by name, skipping `bgmusic*` files.
pub fn discover_narration(dir: &Path) -> ReelResult<Option<PathBuf>> {
    Ok(list_files(dir, AUDIO_EXTENSIONS)?
        .into_iter()
        .find(|name| !name.starts_with(MUSIC_PREFIX))
        .map(|name| dir.join(name)))
}

/// First `bgmusic*` audio file in `dir` by name.
pub fn discover_background_music(dir: &Path) -> ReelResult<Option<PathBuf>> {
    Ok(list_files(dir, AUDIO_EXTENSIONS)?
        .into_iter()
        .find(|name| name.starts_with(MUSIC_PREFIX))
        .map(|name| dir.join(name)))
}

fn list_files(dir: &Path, extensions: &[&str]) -> ReelResult<Vec<String>> {
    let read = std::fs::read_dir(dir).map_err(|e| {
        ReelError::Other(anyhow::Error::new(e).context(format!("read dir '{}'", dir.display())))
    })?;
    let mut names = Vec::new();
    for entry in read {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if has_extension(&name, extensions) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

fn has_extension(name: &str, extensions: &[&str]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
}

/// `image_3_FG.png` -> `("image_3.png", true)`.
fn split_layer(name: &str) -> Option<(String, bool)> {
    let (stem, ext) = name.rsplit_once('.')?;
    if let Some(base) = stem.strip_suffix("_FG") {
        return Some((format!("{base}.{ext}"), true));
    }
    if let Some(base) = stem.strip_suffix("_BG") {
        return Some((format!("{base}.{ext}"), false));
    }
    None
}

/// Number in the first `_<digits>.` run of `name`, or 0.
fn numeric_suffix(name: &str) -> u64 {
    let bytes = name.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'_' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if end > start && end < bytes.len() && bytes[end] == b'.' {
                return name[start..end].parse().unwrap_or(u64::MAX);
            }
        }
        i += 1;
    }
    0
}

fn asset_for(dir: &Path, source: &str, background: Option<&str>) -> Asset {
    let path = |n: &str| dir.join(n).to_string_lossy().into_owned();
    match background {
        Some(bg) => Asset::layered(path(source), path(bg)),
        None => Asset::new(path(source)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/discover.rs"]
mod tests;
