/// Split `items` into groups of exactly `group_size`.
///
/// Full chunks are taken in order. A short final chunk (or a list shorter than one group) is
/// topped up with items taken cyclically from the start of `items`, so every group is full.
/// An empty input yields no groups. `group_size == 0` is treated as 1.
pub fn group_images<T: Clone>(items: &[T], group_size: usize) -> Vec<Vec<T>> {
    let g = group_size.max(1);
    if items.is_empty() {
        return Vec::new();
    }

    let mut chunks = items.chunks_exact(g);
    let mut groups: Vec<Vec<T>> = chunks.by_ref().map(<[T]>::to_vec).collect();

    let remainder = chunks.remainder();
    if !remainder.is_empty() {
        let mut last = remainder.to_vec();
        last.extend(items.iter().cycle().take(g - remainder.len()).cloned());
        groups.push(last);
    }
    groups
}

#[cfg(test)]
#[path = "../../tests/unit/render/group.rs"]
mod tests;
