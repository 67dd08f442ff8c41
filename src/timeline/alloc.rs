use crate::foundation::error::{ReelError, ReelResult};

/// Split `total_frames` across `asset_count` assets.
///
/// Every asset gets `total_frames / asset_count` frames and the first
/// `total_frames % asset_count` assets get one extra, so the counts always sum
/// to `total_frames` exactly. When `total_frames < asset_count` the trailing
/// assets receive 0 frames.
pub fn allocate(asset_count: usize, total_frames: u64) -> ReelResult<Vec<u64>> {
    if asset_count == 0 {
        return Err(ReelError::invalid_input(
            "cannot allocate frames: no assets to render",
        ));
    }
    let n = asset_count as u64;
    let base = total_frames / n;
    let remainder = total_frames - base * n;
    Ok((0..n)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/alloc.rs"]
mod tests;
